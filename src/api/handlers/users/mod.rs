//! User account endpoints, scoped to the caller's tenant.
//!
//! Every lookup goes through the caller's tenant membership list, so a user
//! outside the tenant is indistinguishable from a missing user (`404`). That
//! mirrors the cross-tenant doctrine used across the service: existence is
//! never leaked across the tenant boundary.

pub(crate) mod types;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::auth::principal::{require_auth, require_permission, Principal};
use super::auth::state::AuthState;
use super::auth::utils::{build_verify_url, generate_token, hash_token, normalize_email, valid_email};
use super::auth::{password::hash_password, MIN_PASSWORD_LEN};
use crate::domain::membership::{Membership, Role};
use crate::domain::rbac;
use crate::domain::user::{EmailVerification, User, UserChanges};
use crate::email::welcome_message;
use crate::store::users::NewUser;
use crate::store::Store;
use types::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Resolve a user id inside the caller's tenant.
/// Unknown ids, unparseable ids, and members of other tenants all come back
/// as `None` so handlers answer `404` uniformly.
async fn resolve_in_tenant(
    store: &Store,
    principal: &Principal,
    raw_id: &str,
) -> Option<(User, Membership)> {
    let user_id = Uuid::parse_str(raw_id).ok()?;
    let user = store.users.find_by_id(user_id).await?;
    let membership = store
        .memberships
        .find_by_user_and_tenant(user_id, principal.tenant_id)
        .await?;
    Some((user, membership))
}

#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created in the caller's tenant.", body = UserResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks users:create."),
        (status = 409, description = "Email already in use.", body = String),
    ),
    tag = "users"
)]
/// Creates a user inside the caller's tenant and mails a verification link.
/// The `owner` role is never assignable; duplicate emails map to `409`.
pub async fn create_user(
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    auth_state: Extension<Arc<AuthState>>,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    if let Err(status) = require_permission(&principal, rbac::USERS_CREATE) {
        return status.into_response();
    }

    let name = payload.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Name is required.").into_response();
    }
    let email = normalize_email(&payload.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email address.").into_response();
    }
    if payload.password.expose_secret().len() < MIN_PASSWORD_LEN {
        return (StatusCode::BAD_REQUEST, "Password is too short.").into_response();
    }
    let role = payload.role.unwrap_or(Role::User);
    if !role.is_assignable() {
        return (StatusCode::BAD_REQUEST, "The owner role cannot be assigned.").into_response();
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

    if let Err(err) = store
        .memberships
        .create(user.id, principal.tenant_id, role)
        .await
    {
        error!("Failed to create membership for new user: {err:?}");
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

    (StatusCode::CREATED, Json(UserResponse::from_parts(&user, role))).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/users",
    responses(
        (status = 200, description = "Users in the caller's tenant.", body = [UserResponse]),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks users:view."),
    ),
    tag = "users"
)]
/// Lists the users holding a membership in the caller's tenant.
pub async fn list_users(headers: HeaderMap, store: Extension<Arc<Store>>) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    if let Err(status) = require_permission(&principal, rbac::USERS_VIEW) {
        return status.into_response();
    }

    let memberships = store.memberships.find_by_tenant(principal.tenant_id).await;
    let roles: HashMap<Uuid, Role> = memberships
        .iter()
        .map(|membership| (membership.user_id, membership.role))
        .collect();
    let ids: Vec<Uuid> = memberships.iter().map(|membership| membership.user_id).collect();
    let users = store.users.find_by_ids(&ids).await;
    let rows: Vec<UserResponse> = users
        .iter()
        .filter_map(|user| {
            roles
                .get(&user.id)
                .map(|role| UserResponse::from_parts(user, *role))
        })
        .collect();
    (StatusCode::OK, Json(rows)).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail.", body = UserResponse),
        (status = 401, description = "Missing or invalid access token."),
        (status = 404, description = "User not found in the caller's tenant."),
    ),
    tag = "users"
)]
/// Fetches one user. Members of other tenants are reported as missing.
pub async fn get_user(
    Path(user_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    match resolve_in_tenant(&store, &principal, &user_id).await {
        Some((user, membership)) => {
            (StatusCode::OK, Json(UserResponse::from_parts(&user, membership.role))).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/users/{user_id}",
    request_body = UpdateUserRequest,
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated.", body = UserResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks the required permission."),
        (status = 404, description = "User not found in the caller's tenant."),
        (status = 409, description = "Email already in use.", body = String),
    ),
    tag = "users"
)]
/// Updates name/email/password and, with `users:change-role`, the tenant
/// role. Users can edit themselves; editing others needs `users:edit`. The
/// owner's role is immutable and `owner` can never be granted here.
pub async fn patch_user(
    Path(user_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    Json(payload): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    let Some((user, membership)) = resolve_in_tenant(&store, &principal, &user_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if user.id != principal.user_id {
        if let Err(status) = require_permission(&principal, rbac::USERS_EDIT) {
            return status.into_response();
        }
    }

    let role_change = payload.role.filter(|role| *role != membership.role);
    if let Some(role) = role_change {
        if let Err(status) = require_permission(&principal, rbac::USERS_CHANGE_ROLE) {
            return status.into_response();
        }
        if !role.is_assignable() {
            return (StatusCode::BAD_REQUEST, "The owner role cannot be assigned.").into_response();
        }
        if membership.role == Role::Owner {
            // Owner protection: the owner role is tied to the tenant itself.
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    let mut changes = UserChanges::default();
    if let Some(name) = payload.name.as_deref().map(str::trim) {
        if name.is_empty() {
            return (StatusCode::BAD_REQUEST, "Name cannot be empty.").into_response();
        }
        changes.name = Some(name.to_string());
    }
    if let Some(email) = payload.email.as_deref() {
        let email = normalize_email(email);
        if !valid_email(&email) {
            return (StatusCode::BAD_REQUEST, "Invalid email address.").into_response();
        }
        changes.email = Some(email);
    }
    if let Some(password) = payload.password.as_ref() {
        if password.expose_secret().len() < MIN_PASSWORD_LEN {
            return (StatusCode::BAD_REQUEST, "Password is too short.").into_response();
        }
        match hash_password(password.expose_secret()) {
            Ok(hash) => changes.password_hash = Some(hash),
            Err(err) => {
                error!("Failed to hash password: {err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }

    if changes.is_empty() && role_change.is_none() {
        // Nothing to do: answer with the current state.
        return (StatusCode::OK, Json(UserResponse::from_parts(&user, membership.role)))
            .into_response();
    }

    let updated = match store.users.update(user.id, changes).await {
        Ok(Some(updated)) => updated,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(_) => {
            return (StatusCode::CONFLICT, "The email is already in use.").into_response();
        }
    };

    let mut role = membership.role;
    if let Some(new_role) = role_change {
        match store.memberships.set_role(membership.id, new_role).await {
            Some(updated_membership) => role = updated_membership.role,
            None => return StatusCode::NOT_FOUND.into_response(),
        }
    }

    (StatusCode::OK, Json(UserResponse::from_parts(&updated, role))).into_response()
}

#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted."),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks the required permission."),
        (status = 404, description = "User not found in the caller's tenant."),
    ),
    tag = "users"
)]
/// Deletes a user account. Self-deletion is always allowed; deleting others
/// needs `users:delete`, and targets holding `admin` or `owner` additionally
/// need `users:delete-admin`. All tokens of the account are revoked.
pub async fn delete_user(
    Path(user_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    let Some((user, membership)) = resolve_in_tenant(&store, &principal, &user_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if user.id != principal.user_id {
        if let Err(status) = require_permission(&principal, rbac::USERS_DELETE) {
            return status.into_response();
        }
        if membership.role.is_privileged() {
            if let Err(status) = require_permission(&principal, rbac::USERS_DELETE_ADMIN) {
                return status.into_response();
            }
        }
    }

    store.users.delete(user.id).await;
    store.memberships.delete_by_user(user.id).await;
    store.tokens.revoke_user(user.id).await;
    StatusCode::NO_CONTENT.into_response()
}
