use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::tenant::{Tenant, TenantChanges, TenantStatus};

/// Fields required to insert a tenant. The subdomain must already be
/// normalized by the caller.
#[derive(Debug)]
pub struct NewTenant {
    pub name: String,
    pub subdomain: String,
    pub status: TenantStatus,
    pub owner_id: Uuid,
}

/// Another tenant already holds the subdomain.
#[derive(Debug, PartialEq, Eq)]
pub struct SubdomainTaken;

#[derive(Debug, Default)]
pub struct TenantStore {
    items: RwLock<Vec<Tenant>>,
}

impl TenantStore {
    /// Insert a tenant, enforcing subdomain uniqueness under the write lock.
    ///
    /// # Errors
    /// Returns `SubdomainTaken` when the subdomain is already in use.
    pub async fn create(&self, data: NewTenant) -> Result<Tenant, SubdomainTaken> {
        let mut items = self.items.write().await;
        if items.iter().any(|item| item.subdomain == data.subdomain) {
            return Err(SubdomainTaken);
        }
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: data.name,
            subdomain: data.subdomain,
            status: data.status,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        items.push(tenant.clone());
        Ok(tenant)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Tenant> {
        let items = self.items.read().await;
        items.iter().find(|item| item.id == id).cloned()
    }

    pub async fn find_by_subdomain(&self, subdomain: &str) -> Option<Tenant> {
        let items = self.items.read().await;
        items.iter().find(|item| item.subdomain == subdomain).cloned()
    }

    /// Apply a name/status changeset. Returns `None` for unknown ids.
    pub async fn update(&self, id: Uuid, changes: TenantChanges) -> Option<Tenant> {
        let mut items = self.items.write().await;
        let tenant = items.iter_mut().find(|item| item.id == id)?;
        if let Some(name) = changes.name {
            tenant.name = name;
        }
        if let Some(status) = changes.status {
            tenant.status = status;
        }
        tenant.updated_at = Utc::now();
        Some(tenant.clone())
    }

    /// Move a tenant to a new (normalized) subdomain.
    ///
    /// # Errors
    /// Returns `SubdomainTaken` when a different tenant already uses it.
    pub async fn set_subdomain(
        &self,
        id: Uuid,
        subdomain: String,
    ) -> Result<Option<Tenant>, SubdomainTaken> {
        let mut items = self.items.write().await;
        if items
            .iter()
            .any(|item| item.subdomain == subdomain && item.id != id)
        {
            return Err(SubdomainTaken);
        }
        let Some(tenant) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        tenant.subdomain = subdomain;
        tenant.updated_at = Utc::now();
        Ok(Some(tenant.clone()))
    }

    /// Remove a tenant. Returns `false` when the id is unknown.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tenant(subdomain: &str) -> NewTenant {
        NewTenant {
            name: "Acme".to_string(),
            subdomain: subdomain.to_string(),
            status: TenantStatus::Active,
            owner_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_subdomain() {
        let store = TenantStore::default();
        store.create(new_tenant("acme")).await.expect("first insert");
        assert_eq!(store.create(new_tenant("acme")).await.err(), Some(SubdomainTaken));
    }

    #[tokio::test]
    async fn set_subdomain_checks_other_tenants_only() {
        let store = TenantStore::default();
        let acme = store.create(new_tenant("acme")).await.expect("insert acme");
        store.create(new_tenant("globex")).await.expect("insert globex");

        assert_eq!(
            store.set_subdomain(acme.id, "globex".to_string()).await.err(),
            Some(SubdomainTaken)
        );

        // Keeping your own subdomain is not a conflict.
        let kept = store
            .set_subdomain(acme.id, "acme".to_string())
            .await
            .expect("no conflict");
        assert_eq!(kept.map(|tenant| tenant.subdomain).as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn update_changes_name_and_status() {
        let store = TenantStore::default();
        let acme = store.create(new_tenant("acme")).await.expect("insert acme");
        let updated = store
            .update(
                acme.id,
                TenantChanges {
                    name: Some("Acme Corp".to_string()),
                    status: Some(TenantStatus::Suspended),
                },
            )
            .await
            .expect("tenant exists");
        assert_eq!(updated.name, "Acme Corp");
        assert_eq!(updated.status, TenantStatus::Suspended);
        assert!(!updated.is_active());
    }
}
