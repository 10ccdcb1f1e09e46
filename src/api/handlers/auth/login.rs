//! Tenant-scoped login.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use super::password::verify_password;
use super::state::AuthState;
use super::tokens::issue_token_pair;
use super::types::{LoginRequest, TokenResponse};
use super::utils::normalize_email;
use crate::store::Store;

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established.", body = TokenResponse),
        (status = 401, description = "Invalid credentials.", body = String),
    ),
    tag = "auth"
)]
/// Authenticates a user against one tenant and mints an opaque token pair.
/// Every failure (unknown tenant, unknown user, bad password, inactive tenant,
/// missing membership) returns the same `401` so callers cannot probe which
/// step rejected them.
pub async fn login(
    store: Extension<Arc<Store>>,
    auth_state: Extension<Arc<AuthState>>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&payload.email);
    let subdomain = payload.tenant.trim().to_lowercase();

    let Some(tenant) = store.tenants.find_by_subdomain(&subdomain).await else {
        debug!("Login rejected: unknown tenant subdomain");
        return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response();
    };
    let Some(user) = store.users.find_by_email(&email).await else {
        debug!("Login rejected: unknown email");
        return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response();
    };
    if !verify_password(payload.password.expose_secret(), &user.password_hash) {
        debug!("Login rejected: password mismatch");
        return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response();
    }
    if !tenant.is_active() {
        debug!("Login rejected: tenant is not active");
        return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response();
    }
    let Some(membership) = store
        .memberships
        .find_by_user_and_tenant(user.id, tenant.id)
        .await
    else {
        debug!("Login rejected: no membership in tenant");
        return (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).into_response();
    };

    // Fresh family: this is the start of a new rotation chain.
    let family = Uuid::new_v4();
    match issue_token_pair(
        &store,
        auth_state.config(),
        user.id,
        tenant.id,
        membership.role,
        family,
    )
    .await
    {
        Ok(pair) => (StatusCode::OK, Json(pair)).into_response(),
        Err(err) => {
            error!("Failed to issue token pair: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
