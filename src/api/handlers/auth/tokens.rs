//! Opaque token pair issuance shared by login and refresh.

use anyhow::Result;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::state::AuthConfig;
use super::types::TokenResponse;
use super::utils::{generate_token, hash_token};
use crate::domain::membership::Role;
use crate::store::tokens::{AccessTokenRecord, RefreshState, RefreshTokenRecord};
use crate::store::Store;

/// Mint an access + refresh token pair for a tenant-scoped session.
///
/// The refresh token joins `family`: fresh at login, carried over on refresh.
/// Only hashes are persisted; the raw values go to the client once.
///
/// # Errors
/// Returns an error when the system RNG fails.
pub(crate) async fn issue_token_pair(
    store: &Store,
    config: &AuthConfig,
    user_id: Uuid,
    tenant_id: Uuid,
    role: Role,
    family: Uuid,
) -> Result<TokenResponse> {
    let access_token = generate_token()?;
    let refresh_token = generate_token()?;
    let now = Utc::now();

    store
        .tokens
        .insert_access(
            hash_token(&access_token),
            AccessTokenRecord {
                user_id,
                tenant_id,
                role,
                family,
                expires_at: now + Duration::seconds(config.access_ttl_seconds()),
            },
        )
        .await;

    store
        .tokens
        .insert_refresh(
            hash_token(&refresh_token),
            RefreshTokenRecord {
                user_id,
                tenant_id,
                family,
                expires_at: now + Duration::seconds(config.refresh_ttl_seconds()),
                state: RefreshState::Active,
            },
        )
        .await;

    Ok(TokenResponse {
        token: access_token,
        refresh_token,
        expires_in: config.access_ttl_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_pair_is_resolvable_by_hash_only() {
        let store = Store::new();
        let config = AuthConfig::new("http://localhost:5173".to_string(), 900, 604_800);
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        let family = Uuid::new_v4();

        let pair = issue_token_pair(&store, &config, user_id, tenant_id, Role::Admin, family)
            .await
            .expect("token pair");
        assert_eq!(pair.expires_in, 900);
        assert_ne!(pair.token, pair.refresh_token);

        let record = store
            .tokens
            .verify_access(&hash_token(&pair.token), Utc::now())
            .await
            .expect("access token resolves");
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.tenant_id, tenant_id);
        assert_eq!(record.family, family);

        // The raw token itself is not a valid key.
        assert!(store
            .tokens
            .verify_access(pair.token.as_bytes(), Utc::now())
            .await
            .is_err());
    }
}
