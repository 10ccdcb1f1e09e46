//! Email verification.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use super::types::VerifyEmailRequest;
use super::utils::{hash_token, normalize_email};
use crate::store::Store;

const INVALID_TOKEN: &str = "Invalid or expired verification token.";

#[utoipa::path(
    post,
    path = "/v1/auth/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 204, description = "Email verified."),
        (status = 400, description = "Invalid or expired verification token.", body = String),
    ),
    tag = "auth"
)]
/// Marks an account verified when the raw verification token matches the
/// stored hash and has not expired. Unknown emails, stale tokens, and
/// already-verified accounts all return the same `400`.
pub async fn verify_email(
    store: Extension<Arc<Store>>,
    Json(payload): Json<VerifyEmailRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&payload.email);
    let Some(user) = store.users.find_by_email(&email).await else {
        return (StatusCode::BAD_REQUEST, INVALID_TOKEN).into_response();
    };
    let token_hash = hash_token(payload.token.trim());
    match store.users.verify_email(user.id, &token_hash, Utc::now()).await {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::BAD_REQUEST, INVALID_TOKEN).into_response(),
    }
}
