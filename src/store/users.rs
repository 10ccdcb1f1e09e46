use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{EmailVerification, User, UserChanges};

/// Fields required to insert a user. Timestamps and the id are assigned by
/// the store.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification: EmailVerification,
}

/// Another account already holds the email.
#[derive(Debug, PartialEq, Eq)]
pub struct EmailTaken;

#[derive(Debug, Default)]
pub struct UserStore {
    items: RwLock<Vec<User>>,
}

impl UserStore {
    /// Insert a user, enforcing email uniqueness under the write lock.
    ///
    /// # Errors
    /// Returns `EmailTaken` when another account already uses the email.
    pub async fn create(&self, data: NewUser) -> Result<User, EmailTaken> {
        let mut items = self.items.write().await;
        if items.iter().any(|item| item.email == data.email) {
            return Err(EmailTaken);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            email_verification: data.email_verification,
            created_at: now,
            updated_at: now,
        };
        items.push(user.clone());
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        let items = self.items.read().await;
        items.iter().find(|item| item.id == id).cloned()
    }

    /// Lookup by already-normalized email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let items = self.items.read().await;
        items.iter().find(|item| item.email == email).cloned()
    }

    /// Apply a changeset, re-checking email uniqueness when the email moves.
    ///
    /// # Errors
    /// Returns `EmailTaken` when the new email belongs to a different user.
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, EmailTaken> {
        let mut items = self.items.write().await;
        if let Some(email) = changes.email.as_deref() {
            if items
                .iter()
                .any(|item| item.email == email && item.id != id)
            {
                return Err(EmailTaken);
            }
        }
        let Some(user) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    /// Remove a user. Returns `false` when the id is unknown.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    /// Users whose id appears in `ids`, preserving store order.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Vec<User> {
        let items = self.items.read().await;
        items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect()
    }

    /// Mark the account verified if the pending token hash matches and has
    /// not expired. Returns the updated user, or `None` when the token is
    /// unknown, already consumed, or stale.
    pub async fn verify_email(
        &self,
        id: Uuid,
        token_hash: &[u8],
        now: DateTime<Utc>,
    ) -> Option<User> {
        let mut items = self.items.write().await;
        let user = items.iter_mut().find(|item| item.id == id)?;
        let verification = &user.email_verification;
        if verification.verified {
            return None;
        }
        let pending = verification.token_hash.as_deref()?;
        if pending != token_hash {
            return None;
        }
        if verification.expires_at.is_none_or(|expiry| expiry < now) {
            return None;
        }
        user.email_verification = EmailVerification {
            token_hash: None,
            expires_at: None,
            verified: true,
            verified_at: Some(now),
        };
        user.updated_at = now;
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email_verification: EmailVerification::default(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = UserStore::default();
        store
            .create(new_user("alice@example.com"))
            .await
            .expect("first insert");
        let err = store.create(new_user("alice@example.com")).await;
        assert_eq!(err.err(), Some(EmailTaken));
    }

    #[tokio::test]
    async fn update_rejects_email_already_in_use() {
        let store = UserStore::default();
        let alice = store
            .create(new_user("alice@example.com"))
            .await
            .expect("insert alice");
        store
            .create(new_user("bob@example.com"))
            .await
            .expect("insert bob");

        let changes = UserChanges {
            email: Some("bob@example.com".to_string()),
            ..UserChanges::default()
        };
        assert_eq!(store.update(alice.id, changes).await.err(), Some(EmailTaken));

        // Re-submitting your own email is not a conflict.
        let changes = UserChanges {
            email: Some("alice@example.com".to_string()),
            ..UserChanges::default()
        };
        let updated = store.update(alice.id, changes).await.expect("no conflict");
        assert_eq!(updated.map(|user| user.email).as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn delete_is_idempotent_on_unknown_ids() {
        let store = UserStore::default();
        let alice = store
            .create(new_user("alice@example.com"))
            .await
            .expect("insert alice");
        assert!(store.delete(alice.id).await);
        assert!(!store.delete(alice.id).await);
        assert!(store.find_by_id(alice.id).await.is_none());
    }

    #[tokio::test]
    async fn verify_email_consumes_the_pending_token() {
        let store = UserStore::default();
        let mut data = new_user("alice@example.com");
        data.email_verification = EmailVerification {
            token_hash: Some(vec![1, 2, 3]),
            expires_at: Some(Utc::now() + chrono::Duration::hours(1)),
            verified: false,
            verified_at: None,
        };
        let alice = store.create(data).await.expect("insert alice");

        assert!(store.verify_email(alice.id, &[9, 9, 9], Utc::now()).await.is_none());
        let verified = store
            .verify_email(alice.id, &[1, 2, 3], Utc::now())
            .await
            .expect("token accepted");
        assert!(verified.email_verification.verified);
        // The token is single-use.
        assert!(store.verify_email(alice.id, &[1, 2, 3], Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn verify_email_rejects_expired_tokens() {
        let store = UserStore::default();
        let mut data = new_user("alice@example.com");
        data.email_verification = EmailVerification {
            token_hash: Some(vec![1, 2, 3]),
            expires_at: Some(Utc::now() - chrono::Duration::hours(1)),
            verified: false,
            verified_at: None,
        };
        let alice = store.create(data).await.expect("insert alice");
        assert!(store.verify_email(alice.id, &[1, 2, 3], Utc::now()).await.is_none());
    }
}
