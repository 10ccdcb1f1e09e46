//! Authenticated principal extraction and authorization helpers.
//!
//! Flow Overview: read the bearer token, resolve it against the token store,
//! and return a tenant-scoped principal for downstream handlers. Permission
//! checks run against the static RBAC table.

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use chrono::Utc;
use uuid::Uuid;

use super::utils::hash_token;
use crate::domain::membership::Role;
use crate::domain::rbac;
use crate::store::Store;

/// Authenticated caller context derived from the access token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    /// Tenant the access token was scoped to at login.
    pub tenant_id: Uuid,
    pub role: Role,
    /// Refresh family of the session, used by logout.
    pub family: Uuid,
}

/// Resolve a bearer token into a principal, or return 401.
///
/// The user is re-resolved so tokens for deleted accounts stop working even
/// though the token store is never retroactively scrubbed.
pub(crate) async fn require_auth(headers: &HeaderMap, store: &Store) -> Result<Principal, StatusCode> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let token_hash = hash_token(&token);
    let record = store
        .tokens
        .verify_access(&token_hash, Utc::now())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    if store.users.find_by_id(record.user_id).await.is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Principal {
        user_id: record.user_id,
        tenant_id: record.tenant_id,
        role: record.role,
        family: record.family,
    })
}

/// Set-membership permission gate: deny with 403 inside the caller's tenant.
pub(crate) fn require_permission(principal: &Principal, permission: &str) -> Result<(), StatusCode> {
    if rbac::has_permission(principal.role, permission) {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extract_bearer_token_accepts_both_cases() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer_token(&headers), Some("abc".to_string()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(extract_bearer_token(&headers), Some("xyz".to_string()));
    }

    #[test]
    fn extract_bearer_token_rejects_empty_or_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn require_permission_follows_the_table() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            role: Role::Curator,
            family: Uuid::new_v4(),
        };
        assert!(require_permission(&principal, rbac::USERS_VIEW).is_ok());
        assert_eq!(
            require_permission(&principal, rbac::USERS_DELETE),
            Err(StatusCode::FORBIDDEN)
        );
    }
}
