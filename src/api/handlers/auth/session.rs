//! Session introspection and logout.

use axum::{extract::Extension, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use super::principal::extract_bearer_token;
use super::types::SessionResponse;
use super::utils::hash_token;
use crate::store::Store;

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is active.", body = SessionResponse),
        (status = 204, description = "No active session."),
    ),
    tag = "auth"
)]
/// Resolves the bearer token to the current principal.
/// Missing, unknown, and expired tokens all map to `204` to avoid leaking
/// auth state.
pub async fn session(headers: HeaderMap, store: Extension<Arc<Store>>) -> impl IntoResponse {
    let Some(token) = extract_bearer_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let token_hash = hash_token(&token);
    let Ok(record) = store.tokens.verify_access(&token_hash, Utc::now()).await else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let Some(user) = store.users.find_by_id(record.user_id).await else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let response = SessionResponse {
        user_id: record.user_id.to_string(),
        tenant_id: record.tenant_id.to_string(),
        email: user.email,
        role: record.role,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared."),
    ),
    tag = "auth"
)]
/// Revokes the presented access token and its whole refresh family.
/// Always returns `204`, even when no valid token was presented.
pub async fn logout(headers: HeaderMap, store: Extension<Arc<Store>>) -> impl IntoResponse {
    if let Some(token) = extract_bearer_token(&headers) {
        let token_hash = hash_token(&token);
        if let Ok(record) = store.tokens.verify_access(&token_hash, Utc::now()).await {
            store.tokens.revoke_family(record.family).await;
        }
        store.tokens.revoke_access(&token_hash).await;
    }
    StatusCode::NO_CONTENT
}
