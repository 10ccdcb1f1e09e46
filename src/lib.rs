//! # Luanto (Multi-tenant Accounts & Access Control)
//!
//! `luanto` is a multi-tenant account and authorization backend. It manages
//! user accounts, tenants (organizations), role-based access control, and
//! opaque authentication tokens with refresh-token rotation.
//!
//! ## Tenant Model
//!
//! Tenants are the isolation boundary. Every user belongs to one or more
//! tenants through a membership that carries a role, and every request is
//! scoped to the tenant baked into the caller's access token.
//!
//! - **Subdomain Normalization:** Tenant subdomains are normalized to
//!   lowercase, URL-safe strings (`[a-z0-9-]`) and are globally unique.
//! - **Owner Protection:** Each tenant has exactly one owner. The owner
//!   membership can never be removed or handed out through membership
//!   operations.
//!
//! ## Authorization
//!
//! Access is controlled by a static role→permission table
//! (`owner`, `admin`, `curator`, `user`), checked by set membership per
//! request. Cross-tenant access returns `404 Not Found` rather than
//! `403 Forbidden` to prevent resource enumeration across tenants.
//!
//! ## Tokens
//!
//! Access and refresh tokens are opaque random values; the store only keeps
//! their SHA-256 hashes. Refresh tokens rotate within a *family*, and
//! replaying an already-rotated token revokes the whole family.

pub mod api;
pub mod cli;
pub mod domain;
pub mod email;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
