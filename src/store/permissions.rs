use tokio::sync::RwLock;

/// A catalog entry describing one permission code.
#[derive(Debug, Clone)]
pub struct PermissionRecord {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct PermissionStore {
    items: RwLock<Vec<PermissionRecord>>,
}

impl PermissionStore {
    /// Idempotently seed the catalog: codes already present are left alone,
    /// so re-running at every startup never duplicates entries.
    pub async fn initialize(&self, catalog: &[(&str, &str, &str)]) {
        let mut items = self.items.write().await;
        for (code, name, description) in catalog {
            if items.iter().any(|item| item.code == *code) {
                continue;
            }
            items.push(PermissionRecord {
                code: (*code).to_string(),
                name: (*name).to_string(),
                description: (*description).to_string(),
            });
        }
    }

    pub async fn find_by_code(&self, code: &str) -> Option<PermissionRecord> {
        let items = self.items.read().await;
        items.iter().find(|item| item.code == code).cloned()
    }

    pub async fn find_all(&self) -> Vec<PermissionRecord> {
        let items = self.items.read().await;
        items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rbac;

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let store = PermissionStore::default();
        store.initialize(rbac::CATALOG).await;
        store.initialize(rbac::CATALOG).await;
        assert_eq!(store.find_all().await.len(), rbac::CATALOG.len());
    }

    #[tokio::test]
    async fn find_by_code_returns_seeded_entries() {
        let store = PermissionStore::default();
        store.initialize(rbac::CATALOG).await;
        let record = store
            .find_by_code(rbac::USERS_DELETE_ADMIN)
            .await
            .expect("seeded");
        assert_eq!(record.name, "USERS_DELETE_ADMIN");
        assert!(store.find_by_code("bots:view").await.is_none());
    }
}
