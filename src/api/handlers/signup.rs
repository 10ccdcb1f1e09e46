//! Self-service signup: first user + their tenant in one step.
//!
//! Accounts and tenants reference each other (users need a membership,
//! tenants need an owner), so the public bootstrap creates both and wires the
//! `owner` membership between them.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use super::auth::password::hash_password;
use super::auth::state::AuthState;
use super::auth::utils::{build_verify_url, generate_token, hash_token, normalize_email, valid_email};
use super::auth::MIN_PASSWORD_LEN;
use super::tenants::types::TenantResponse;
use super::tenants::{SUBDOMAIN_MAX, SUBDOMAIN_MIN};
use super::users::types::UserResponse;
use crate::domain::membership::Role;
use crate::domain::tenant::TenantStatus;
use crate::domain::user::EmailVerification;
use crate::email::welcome_message;
use crate::store::tenants::NewTenant;
use crate::store::users::NewUser;
use crate::store::Store;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
    /// Display name for the new tenant.
    pub tenant_name: String,
    /// Requested tenant subdomain; normalized before the uniqueness check.
    pub subdomain: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub tenant: TenantResponse,
}

#[utoipa::path(
    post,
    path = "/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account and tenant created.", body = SignupResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 409, description = "Email or subdomain already in use.", body = String),
    ),
    tag = "signup"
)]
/// Creates a user account, a tenant owned by it, and the `owner` membership,
/// then mails the verification link. If the tenant insert loses a subdomain
/// race the fresh user is rolled back so no orphan account remains.
pub async fn signup(
    store: Extension<Arc<Store>>,
    auth_state: Extension<Arc<AuthState>>,
    Json(payload): Json<SignupRequest>,
) -> impl IntoResponse {
    let name = payload.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Name is required.").into_response();
    }
    let tenant_name = payload.tenant_name.trim();
    if tenant_name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Tenant name is required.").into_response();
    }
    let email = normalize_email(&payload.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email address.").into_response();
    }
    if payload.password.expose_secret().len() < MIN_PASSWORD_LEN {
        return (StatusCode::BAD_REQUEST, "Password is too short.").into_response();
    }
    let Some(subdomain) =
        super::tenants::normalize_subdomain(&payload.subdomain, SUBDOMAIN_MIN, SUBDOMAIN_MAX)
    else {
        return (StatusCode::BAD_REQUEST, "Invalid tenant subdomain.").into_response();
    };

    // Cheap pre-check so the common conflict does not create a user first.
    if store.tenants.find_by_subdomain(&subdomain).await.is_some() {
        return (StatusCode::CONFLICT, "The subdomain is already in use.").into_response();
    }

    let password_hash = match hash_password(payload.password.expose_secret()) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let verification_token = match generate_token() {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to generate verification token: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let config = auth_state.config();
    let user = match store
        .users
        .create(NewUser {
            name: name.to_string(),
            email,
            password_hash,
            email_verification: EmailVerification {
                token_hash: Some(hash_token(&verification_token)),
                expires_at: Some(Utc::now() + Duration::seconds(config.verification_ttl_seconds())),
                verified: false,
                verified_at: None,
            },
        })
        .await
    {
        Ok(user) => user,
        Err(_) => {
            return (StatusCode::CONFLICT, "The email is already in use.").into_response();
        }
    };

    let tenant = match store
        .tenants
        .create(NewTenant {
            name: tenant_name.to_string(),
            subdomain,
            status: TenantStatus::Active,
            owner_id: user.id,
        })
        .await
    {
        Ok(tenant) => tenant,
        Err(_) => {
            // Lost the subdomain race after the pre-check; undo the account.
            store.users.delete(user.id).await;
            return (StatusCode::CONFLICT, "The subdomain is already in use.").into_response();
        }
    };

    if store
        .memberships
        .create(user.id, tenant.id, Role::Owner)
        .await
        .is_err()
    {
        store.tenants.delete(tenant.id).await;
        store.users.delete(user.id).await;
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let verify_url = build_verify_url(config.frontend_base_url(), &verification_token);
    if let Err(err) = auth_state
        .email()
        .send(&welcome_message(&user.email, &user.name, &verify_url))
    {
        error!("Failed to send welcome email: {err}");
    }

    info!(tenant = %tenant.subdomain, "New tenant signed up");

    let response = SignupResponse {
        user: UserResponse::from_parts(&user, Role::Owner),
        tenant: TenantResponse::from_tenant(&tenant),
    };
    (StatusCode::CREATED, Json(response)).into_response()
}
