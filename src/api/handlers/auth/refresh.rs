//! Refresh-token rotation.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, warn};

use super::state::AuthState;
use super::tokens::issue_token_pair;
use super::types::{RefreshRequest, TokenResponse};
use super::utils::hash_token;
use crate::store::tokens::RefreshRejected;
use crate::store::Store;

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated.", body = TokenResponse),
        (status = 401, description = "Invalid or expired refresh token.", body = String),
    ),
    tag = "auth"
)]
/// Rotates a refresh token: the presented token is consumed and a new pair is
/// minted in the same family. The user and membership are re-resolved, so
/// deleted accounts and revoked memberships fail here, and role changes take
/// effect on the new access token.
pub async fn refresh(
    store: Extension<Arc<Store>>,
    auth_state: Extension<Arc<AuthState>>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let token_hash = hash_token(&payload.refresh_token);
    let record = match store.tokens.consume_refresh(&token_hash, Utc::now()).await {
        Ok(record) => record,
        Err(RefreshRejected::Expired) => {
            return (StatusCode::UNAUTHORIZED, "Refresh token has expired.").into_response();
        }
        Err(RefreshRejected::Reused) => {
            warn!("Rotated refresh token replayed; family revoked");
            return (StatusCode::UNAUTHORIZED, "Invalid refresh token.").into_response();
        }
        Err(RefreshRejected::Unknown) => {
            return (StatusCode::UNAUTHORIZED, "Invalid refresh token.").into_response();
        }
    };

    let Some(user) = store.users.find_by_id(record.user_id).await else {
        return (StatusCode::UNAUTHORIZED, "Invalid refresh token.").into_response();
    };
    let Some(membership) = store
        .memberships
        .find_by_user_and_tenant(user.id, record.tenant_id)
        .await
    else {
        return (StatusCode::UNAUTHORIZED, "Invalid refresh token.").into_response();
    };

    match issue_token_pair(
        &store,
        auth_state.config(),
        user.id,
        record.tenant_id,
        membership.role,
        record.family,
    )
    .await
    {
        Ok(pair) => (StatusCode::OK, Json(pair)).into_response(),
        Err(err) => {
            error!("Failed to rotate token pair: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
