use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Links a user to a tenant with a role. A user has at most one membership
/// per tenant; the role decides which permissions apply inside that tenant.
#[derive(Debug, Clone)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tenant-scoped role. Each role's permission set is a strict superset of the
/// one below it: `owner` ⊃ `admin` ⊃ `curator` ⊃ `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Curator,
    User,
}

impl Role {
    /// Canonical string used in API payloads and token records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Curator => "curator",
            Self::User => "user",
        }
    }

    /// Roles that can be handed out through membership or user management.
    /// `owner` is excluded: it exists only through tenant creation.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        !matches!(self, Self::Owner)
    }

    /// Roles whose holders are protected by the `users:delete-admin` guard.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_serde() {
        for (role, name) in [
            (Role::Owner, "\"owner\""),
            (Role::Admin, "\"admin\""),
            (Role::Curator, "\"curator\""),
            (Role::User, "\"user\""),
        ] {
            let encoded = serde_json::to_string(&role).expect("serialize role");
            assert_eq!(encoded, name);
            let decoded: Role = serde_json::from_str(name).expect("deserialize role");
            assert_eq!(decoded, role);
        }
    }

    #[test]
    fn owner_is_not_assignable() {
        assert!(!Role::Owner.is_assignable());
        assert!(Role::Admin.is_assignable());
        assert!(Role::Curator.is_assignable());
        assert!(Role::User.is_assignable());
    }

    #[test]
    fn privileged_roles() {
        assert!(Role::Owner.is_privileged());
        assert!(Role::Admin.is_privileged());
        assert!(!Role::Curator.is_privileged());
        assert!(!Role::User.is_privileged());
    }
}
