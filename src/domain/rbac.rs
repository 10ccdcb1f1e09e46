//! Static role→permission table.
//!
//! Permissions are flat strings checked by set membership; nothing here is
//! dynamic or per-tenant. The table is the single authority consulted by
//! every guarded operation.

use super::membership::Role;

pub const USERS_VIEW: &str = "users:view";
pub const USERS_CREATE: &str = "users:create";
pub const USERS_EDIT: &str = "users:edit";
pub const USERS_DELETE: &str = "users:delete";
pub const USERS_DELETE_ADMIN: &str = "users:delete-admin";
pub const USERS_CHANGE_ROLE: &str = "users:change-role";

pub const TENANT_VIEW: &str = "tenant:view";
pub const TENANT_EDIT: &str = "tenant:edit";
pub const TENANT_DELETE: &str = "tenant:delete";
pub const TENANT_CHANGE_SUBDOMAIN: &str = "tenant:change-subdomain";
pub const TENANT_ADD_USERS: &str = "tenant:add-users";
pub const TENANT_REMOVE_USERS: &str = "tenant:remove-users";

/// Catalog of every permission the service knows about: `(code, name,
/// description)`. Seeded into the store at startup so admin tooling can list
/// and label them.
pub const CATALOG: &[(&str, &str, &str)] = &[
    (USERS_VIEW, "USERS_VIEW", "View users"),
    (USERS_CREATE, "USERS_CREATE", "Create users"),
    (USERS_EDIT, "USERS_EDIT", "Edit users"),
    (USERS_DELETE, "USERS_DELETE", "Delete users"),
    (
        USERS_DELETE_ADMIN,
        "USERS_DELETE_ADMIN",
        "Delete users holding the admin or owner role",
    ),
    (USERS_CHANGE_ROLE, "USERS_CHANGE_ROLE", "Change user roles"),
    (TENANT_VIEW, "TENANT_VIEW", "View tenant details"),
    (TENANT_EDIT, "TENANT_EDIT", "Edit tenant details"),
    (TENANT_DELETE, "TENANT_DELETE", "Delete the tenant"),
    (
        TENANT_CHANGE_SUBDOMAIN,
        "TENANT_CHANGE_SUBDOMAIN",
        "Change the tenant subdomain",
    ),
    (TENANT_ADD_USERS, "TENANT_ADD_USERS", "Add users to the tenant"),
    (
        TENANT_REMOVE_USERS,
        "TENANT_REMOVE_USERS",
        "Remove users from the tenant",
    ),
];

const USER_PERMISSIONS: &[&str] = &[TENANT_VIEW];

const CURATOR_PERMISSIONS: &[&str] = &[TENANT_VIEW, USERS_VIEW];

const ADMIN_PERMISSIONS: &[&str] = &[
    TENANT_VIEW,
    USERS_VIEW,
    USERS_CREATE,
    USERS_EDIT,
    USERS_DELETE,
    USERS_CHANGE_ROLE,
    TENANT_EDIT,
    TENANT_ADD_USERS,
    TENANT_REMOVE_USERS,
];

const OWNER_PERMISSIONS: &[&str] = &[
    TENANT_VIEW,
    USERS_VIEW,
    USERS_CREATE,
    USERS_EDIT,
    USERS_DELETE,
    USERS_CHANGE_ROLE,
    TENANT_EDIT,
    TENANT_ADD_USERS,
    TENANT_REMOVE_USERS,
    USERS_DELETE_ADMIN,
    TENANT_DELETE,
    TENANT_CHANGE_SUBDOMAIN,
];

/// Permissions granted to a role.
#[must_use]
pub const fn role_permissions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Owner => OWNER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Curator => CURATOR_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
    }
}

/// Set-membership check against the static table.
#[must_use]
pub fn has_permission(role: Role, permission: &str) -> bool {
    role_permissions(role).contains(&permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 4] = [Role::Owner, Role::Admin, Role::Curator, Role::User];

    #[test]
    fn every_granted_permission_is_in_the_catalog() {
        for role in ALL_ROLES {
            for permission in role_permissions(role) {
                assert!(
                    CATALOG.iter().any(|(code, _, _)| code == permission),
                    "role {} grants {permission} which is not in the catalog",
                    role.as_str()
                );
            }
        }
    }

    #[test]
    fn allows_access_when_role_has_the_permission() {
        assert!(has_permission(Role::Admin, USERS_DELETE));
        assert!(has_permission(Role::Owner, TENANT_DELETE));
        assert!(has_permission(Role::User, TENANT_VIEW));
    }

    #[test]
    fn denies_access_when_role_lacks_the_permission() {
        assert!(!has_permission(Role::User, USERS_VIEW));
        assert!(!has_permission(Role::Curator, USERS_CREATE));
        assert!(!has_permission(Role::Admin, USERS_DELETE_ADMIN));
        assert!(!has_permission(Role::Owner, "permission.that.does.not.exist"));
    }

    #[test]
    fn role_hierarchy_is_strict_supersets() {
        let ordered = [Role::User, Role::Curator, Role::Admin, Role::Owner];
        for pair in ordered.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            for permission in role_permissions(lower) {
                assert!(
                    has_permission(upper, permission),
                    "{} should inherit {permission} from {}",
                    upper.as_str(),
                    lower.as_str()
                );
            }
            assert!(
                role_permissions(upper).len() > role_permissions(lower).len(),
                "{} should hold strictly more permissions than {}",
                upper.as_str(),
                lower.as_str()
            );
        }
    }

    #[test]
    fn owner_exceeds_admin() {
        // The delete-admin guard is the canonical owner-only permission.
        assert!(has_permission(Role::Owner, USERS_DELETE_ADMIN));
        assert!(!has_permission(Role::Admin, USERS_DELETE_ADMIN));
    }
}
