//! In-memory persistence.
//!
//! Every collection is a `Vec` behind a `tokio::sync::RwLock`, scanned
//! linearly: the placeholder persistence layer a future database integration
//! will replace. Uniqueness constraints are enforced under the write lock and
//! surfaced as conflict errors, so handlers treat this layer the same way
//! they would treat SQL unique violations.

pub mod memberships;
pub mod permissions;
pub mod tenants;
pub mod tokens;
pub mod users;

pub use memberships::MembershipStore;
pub use permissions::PermissionStore;
pub use tenants::TenantStore;
pub use tokens::TokenStore;
pub use users::UserStore;

/// Aggregate handed to handlers through an `Extension` layer.
#[derive(Debug, Default)]
pub struct Store {
    pub users: UserStore,
    pub tenants: TenantStore,
    pub memberships: MembershipStore,
    pub permissions: PermissionStore,
    pub tokens: TokenStore,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
