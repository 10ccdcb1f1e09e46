//! Tenant membership endpoints.
//!
//! Owner protection lives here: the `owner` role can never be granted through
//! membership operations, and the owner membership can never be removed.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::super::auth::principal::{require_auth, require_permission};
use super::types::{AddMemberRequest, MembershipResponse};
use crate::domain::membership::Role;
use crate::domain::rbac;
use crate::store::Store;

#[utoipa::path(
    post,
    path = "/v1/tenants/{tenant_id}/members",
    request_body = AddMemberRequest,
    params(("tenant_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 201, description = "Member added.", body = MembershipResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks tenant:add-users."),
        (status = 404, description = "Tenant or user not found."),
        (status = 409, description = "User is already a member.", body = String),
    ),
    tag = "tenants"
)]
/// Adds an existing user to the caller's tenant with an assignable role.
/// The `owner` role is rejected outright, and the tenant in the path must be
/// the caller's own.
pub async fn add_member(
    Path(tenant_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    Json(payload): Json<AddMemberRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    if let Err(status) = require_permission(&principal, rbac::TENANT_ADD_USERS) {
        return status.into_response();
    }

    if payload.role == Role::Owner {
        return (StatusCode::BAD_REQUEST, "The owner role cannot be assigned.").into_response();
    }

    let Ok(tenant_id) = Uuid::parse_str(&tenant_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if tenant_id != principal.tenant_id {
        return StatusCode::NOT_FOUND.into_response();
    }
    if store.tenants.find_by_id(tenant_id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Ok(user_id) = Uuid::parse_str(&payload.user_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if store.users.find_by_id(user_id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    match store.memberships.create(user_id, tenant_id, payload.role).await {
        Ok(membership) => (
            StatusCode::CREATED,
            Json(MembershipResponse::from_membership(&membership)),
        )
            .into_response(),
        Err(_) => (StatusCode::CONFLICT, "The user is already a member of this tenant.")
            .into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/tenants/{tenant_id}/members/{user_id}",
    params(
        ("tenant_id" = String, Path, description = "Tenant id"),
        ("user_id" = String, Path, description = "User id"),
    ),
    responses(
        (status = 204, description = "Member removed."),
        (status = 400, description = "Callers cannot remove themselves.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks tenant:remove-users, or the target is the owner."),
        (status = 404, description = "Tenant, user, or membership not found."),
    ),
    tag = "tenants"
)]
/// Removes a member from the caller's tenant. The owner membership is
/// protected, and callers cannot remove themselves.
pub async fn remove_member(
    Path((tenant_id, user_id)): Path<(String, String)>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    if let Err(status) = require_permission(&principal, rbac::TENANT_REMOVE_USERS) {
        return status.into_response();
    }

    let Ok(tenant_id) = Uuid::parse_str(&tenant_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if tenant_id != principal.tenant_id {
        return StatusCode::NOT_FOUND.into_response();
    }
    if store.tenants.find_by_id(tenant_id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if store.users.find_by_id(user_id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(membership) = store
        .memberships
        .find_by_user_and_tenant(user_id, tenant_id)
        .await
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if membership.role == Role::Owner {
        return (StatusCode::FORBIDDEN, "The tenant owner cannot be removed.").into_response();
    }
    if user_id == principal.user_id {
        return (StatusCode::BAD_REQUEST, "You cannot remove yourself from the tenant.")
            .into_response();
    }

    store.memberships.delete(membership.id).await;
    StatusCode::NO_CONTENT.into_response()
}
