use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::membership::{Membership, Role};

/// The user already has a membership in the tenant.
#[derive(Debug, PartialEq, Eq)]
pub struct AlreadyMember;

#[derive(Debug, Default)]
pub struct MembershipStore {
    items: RwLock<Vec<Membership>>,
}

impl MembershipStore {
    /// Insert a membership, enforcing one membership per (user, tenant).
    ///
    /// # Errors
    /// Returns `AlreadyMember` when such a membership exists.
    pub async fn create(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        role: Role,
    ) -> Result<Membership, AlreadyMember> {
        let mut items = self.items.write().await;
        if items
            .iter()
            .any(|item| item.user_id == user_id && item.tenant_id == tenant_id)
        {
            return Err(AlreadyMember);
        }
        let now = Utc::now();
        let membership = Membership {
            id: Uuid::new_v4(),
            user_id,
            tenant_id,
            role,
            created_at: now,
            updated_at: now,
        };
        items.push(membership.clone());
        Ok(membership)
    }

    pub async fn find_by_user_and_tenant(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Option<Membership> {
        let items = self.items.read().await;
        items
            .iter()
            .find(|item| item.user_id == user_id && item.tenant_id == tenant_id)
            .cloned()
    }

    pub async fn find_by_tenant(&self, tenant_id: Uuid) -> Vec<Membership> {
        let items = self.items.read().await;
        items
            .iter()
            .filter(|item| item.tenant_id == tenant_id)
            .cloned()
            .collect()
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Vec<Membership> {
        let items = self.items.read().await;
        items
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Change the role carried by a membership. Returns `None` for unknown ids.
    pub async fn set_role(&self, id: Uuid, role: Role) -> Option<Membership> {
        let mut items = self.items.write().await;
        let membership = items.iter_mut().find(|item| item.id == id)?;
        membership.role = role;
        membership.updated_at = Utc::now();
        Some(membership.clone())
    }

    /// Remove a membership by id. Returns `false` when the id is unknown.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    /// Remove every membership a user holds. Used when the account is deleted.
    pub async fn delete_by_user(&self, user_id: Uuid) {
        let mut items = self.items.write().await;
        items.retain(|item| item.user_id != user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_rejects_duplicate_membership() {
        let store = MembershipStore::default();
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        store
            .create(user_id, tenant_id, Role::User)
            .await
            .expect("first membership");
        assert_eq!(
            store.create(user_id, tenant_id, Role::Admin).await.err(),
            Some(AlreadyMember)
        );
        // Same user in a different tenant is fine.
        assert!(store.create(user_id, Uuid::new_v4(), Role::User).await.is_ok());
    }

    #[tokio::test]
    async fn set_role_updates_in_place() {
        let store = MembershipStore::default();
        let membership = store
            .create(Uuid::new_v4(), Uuid::new_v4(), Role::User)
            .await
            .expect("membership");
        let updated = store
            .set_role(membership.id, Role::Curator)
            .await
            .expect("membership exists");
        assert_eq!(updated.role, Role::Curator);
    }

    #[tokio::test]
    async fn delete_by_user_clears_all_memberships() {
        let store = MembershipStore::default();
        let user_id = Uuid::new_v4();
        store
            .create(user_id, Uuid::new_v4(), Role::User)
            .await
            .expect("first");
        store
            .create(user_id, Uuid::new_v4(), Role::Admin)
            .await
            .expect("second");
        store.delete_by_user(user_id).await;
        assert!(store.find_by_user(user_id).await.is_empty());
    }
}
