//! Opaque token records, keyed by SHA-256 hash of the raw token.
//!
//! Raw tokens never reach this module; callers hash first. Refresh tokens
//! rotate within a family: consuming one marks it rotated, and replaying a
//! rotated token revokes every token in its family.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::membership::Role;

#[derive(Debug, Clone)]
pub struct AccessTokenRecord {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: Role,
    /// Family of the refresh token issued alongside, so logout can retire the
    /// whole chain.
    pub family: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    /// Correlation id shared across rotations of one refresh chain.
    pub family: Uuid,
    pub expires_at: DateTime<Utc>,
    pub state: RefreshState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Active,
    /// Consumed by a rotation; seeing it again means the token leaked.
    Rotated,
    Revoked,
}

/// Why an access token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejected {
    Unknown,
    Expired,
}

/// Why a refresh token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRejected {
    Unknown,
    Expired,
    /// An already-rotated token was replayed; the family has been revoked.
    Reused,
}

#[derive(Debug, Default)]
pub struct TokenStore {
    access: RwLock<HashMap<Vec<u8>, AccessTokenRecord>>,
    refresh: RwLock<HashMap<Vec<u8>, RefreshTokenRecord>>,
}

impl TokenStore {
    pub async fn insert_access(&self, token_hash: Vec<u8>, record: AccessTokenRecord) {
        let mut access = self.access.write().await;
        access.insert(token_hash, record);
    }

    /// Resolve an access token hash. Expired records are dropped on sight so
    /// the map does not accumulate dead entries.
    pub async fn verify_access(
        &self,
        token_hash: &[u8],
        now: DateTime<Utc>,
    ) -> Result<AccessTokenRecord, TokenRejected> {
        let mut access = self.access.write().await;
        let Some(record) = access.get(token_hash) else {
            return Err(TokenRejected::Unknown);
        };
        if record.expires_at < now {
            access.remove(token_hash);
            return Err(TokenRejected::Expired);
        }
        Ok(record.clone())
    }

    pub async fn revoke_access(&self, token_hash: &[u8]) {
        let mut access = self.access.write().await;
        access.remove(token_hash);
    }

    pub async fn insert_refresh(&self, token_hash: Vec<u8>, record: RefreshTokenRecord) {
        let mut refresh = self.refresh.write().await;
        refresh.insert(token_hash, record);
    }

    /// Consume a refresh token for rotation.
    ///
    /// An active, unexpired token is marked rotated and returned so the
    /// caller can mint successors in the same family. Replaying a rotated
    /// token revokes the family before reporting `Reused`.
    ///
    /// # Errors
    /// `Unknown` for missing or revoked hashes, `Expired` past the deadline,
    /// `Reused` for rotation replays.
    pub async fn consume_refresh(
        &self,
        token_hash: &[u8],
        now: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, RefreshRejected> {
        let mut refresh = self.refresh.write().await;
        let Some(record) = refresh.get(token_hash).cloned() else {
            return Err(RefreshRejected::Unknown);
        };
        match record.state {
            RefreshState::Revoked => Err(RefreshRejected::Unknown),
            RefreshState::Rotated => {
                for item in refresh.values_mut() {
                    if item.family == record.family {
                        item.state = RefreshState::Revoked;
                    }
                }
                Err(RefreshRejected::Reused)
            }
            RefreshState::Active => {
                if record.expires_at < now {
                    refresh.remove(token_hash);
                    return Err(RefreshRejected::Expired);
                }
                if let Some(item) = refresh.get_mut(token_hash) {
                    item.state = RefreshState::Rotated;
                }
                Ok(record)
            }
        }
    }

    /// Retire one session chain: drop its access tokens and revoke its
    /// refresh tokens.
    pub async fn revoke_family(&self, family: Uuid) {
        let mut access = self.access.write().await;
        access.retain(|_, record| record.family != family);
        drop(access);
        let mut refresh = self.refresh.write().await;
        for record in refresh.values_mut() {
            if record.family == family {
                record.state = RefreshState::Revoked;
            }
        }
    }

    /// Revoke every token a user holds, access and refresh alike.
    pub async fn revoke_user(&self, user_id: Uuid) {
        let mut access = self.access.write().await;
        access.retain(|_, record| record.user_id != user_id);
        drop(access);
        let mut refresh = self.refresh.write().await;
        for record in refresh.values_mut() {
            if record.user_id == user_id {
                record.state = RefreshState::Revoked;
            }
        }
    }
}
