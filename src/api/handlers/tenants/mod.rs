//! Tenant endpoints.
//!
//! Tenants are the isolation boundary, so every scoped handler first checks
//! that the path id matches the caller's own tenant and answers `404`
//! otherwise; a tenant you are not a member of does not exist as far as the
//! API is concerned. Permission checks inside the tenant return `403`.
//!
//! Flow Overview:
//! 1) Authenticate via bearer token.
//! 2) Guard the tenant scope (path id == principal tenant).
//! 3) Enforce the role permission for the operation.
//! 4) Perform the scoped read/write against the store.

pub(crate) mod members;
mod slug;
pub(crate) mod types;

pub(crate) use slug::normalize_subdomain;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::auth::principal::{require_auth, require_permission, Principal};
use crate::domain::rbac;
use crate::domain::tenant::{Tenant, TenantChanges};
use crate::store::Store;
use types::{
    CreateTenantRequest, PublicTenantResponse, SetSubdomainRequest, TenantResponse,
    UpdateTenantRequest,
};

pub(crate) const SUBDOMAIN_MIN: usize = 3;
pub(crate) const SUBDOMAIN_MAX: usize = 63;

/// Tenant-scope guard: the path id must parse and match the caller's tenant,
/// and the tenant record must still exist. Everything else is a `404`.
async fn resolve_own_tenant(
    store: &Store,
    principal: &Principal,
    raw_id: &str,
) -> Option<Tenant> {
    let tenant_id = Uuid::parse_str(raw_id).ok()?;
    if tenant_id != principal.tenant_id {
        return None;
    }
    store.tenants.find_by_id(tenant_id).await
}

#[utoipa::path(
    post,
    path = "/v1/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created.", body = TenantResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 409, description = "Subdomain already in use.", body = String),
    ),
    tag = "tenants"
)]
/// Creates a tenant owned by the caller. The subdomain is normalized and must
/// be globally unique; the caller receives the tenant's `owner` membership.
pub async fn create_tenant(
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    Json(payload): Json<CreateTenantRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let name = payload.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Tenant name is required.").into_response();
    }
    let Some(subdomain) = slug::normalize_subdomain(&payload.subdomain, SUBDOMAIN_MIN, SUBDOMAIN_MAX)
    else {
        return (StatusCode::BAD_REQUEST, "Invalid tenant subdomain.").into_response();
    };

    let tenant = match store
        .tenants
        .create(crate::store::tenants::NewTenant {
            name: name.to_string(),
            subdomain,
            status: payload.status,
            owner_id: principal.user_id,
        })
        .await
    {
        Ok(tenant) => tenant,
        Err(_) => {
            return (StatusCode::CONFLICT, "The subdomain is already in use.").into_response();
        }
    };

    // The creator is the owner; a duplicate membership cannot exist for a
    // freshly minted tenant id.
    if store
        .memberships
        .create(principal.user_id, tenant.id, crate::domain::membership::Role::Owner)
        .await
        .is_err()
    {
        store.tenants.delete(tenant.id).await;
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (StatusCode::CREATED, Json(TenantResponse::from_tenant(&tenant))).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/tenants/{tenant_id}",
    params(("tenant_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant detail.", body = TenantResponse),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks tenant:view."),
        (status = 404, description = "Tenant not found."),
    ),
    tag = "tenants"
)]
/// Fetches the caller's tenant. Other tenants are reported as missing.
pub async fn get_tenant(
    Path(tenant_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    let Some(tenant) = resolve_own_tenant(&store, &principal, &tenant_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(status) = require_permission(&principal, rbac::TENANT_VIEW) {
        return status.into_response();
    }
    (StatusCode::OK, Json(TenantResponse::from_tenant(&tenant))).into_response()
}

#[utoipa::path(
    patch,
    path = "/v1/tenants/{tenant_id}",
    request_body = UpdateTenantRequest,
    params(("tenant_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Tenant updated.", body = TenantResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks tenant:edit."),
        (status = 404, description = "Tenant not found."),
    ),
    tag = "tenants"
)]
/// Updates the tenant's name and/or status. Requires `tenant:edit` inside the
/// caller's own tenant; the subdomain has its own guarded endpoint.
pub async fn patch_tenant(
    Path(tenant_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    Json(payload): Json<UpdateTenantRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    let Some(tenant) = resolve_own_tenant(&store, &principal, &tenant_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(status) = require_permission(&principal, rbac::TENANT_EDIT) {
        return status.into_response();
    }

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    if payload.name.is_some() && name.is_none() {
        return (StatusCode::BAD_REQUEST, "Tenant name cannot be empty.").into_response();
    }
    if name.is_none() && payload.status.is_none() {
        return (StatusCode::BAD_REQUEST, "No updates provided.").into_response();
    }

    match store
        .tenants
        .update(
            tenant.id,
            TenantChanges {
                name,
                status: payload.status,
            },
        )
        .await
    {
        Some(updated) => (StatusCode::OK, Json(TenantResponse::from_tenant(&updated))).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/v1/tenants/{tenant_id}/subdomain",
    request_body = SetSubdomainRequest,
    params(("tenant_id" = String, Path, description = "Tenant id")),
    responses(
        (status = 200, description = "Subdomain updated.", body = TenantResponse),
        (status = 400, description = "Invalid subdomain.", body = String),
        (status = 401, description = "Missing or invalid access token."),
        (status = 403, description = "Caller lacks tenant:change-subdomain."),
        (status = 404, description = "Tenant not found."),
        (status = 409, description = "Subdomain already in use.", body = String),
    ),
    tag = "tenants"
)]
/// Moves the tenant to a new subdomain. Guarded by the dedicated
/// `tenant:change-subdomain` permission since the subdomain is the public
/// routing handle.
pub async fn set_subdomain(
    Path(tenant_id): Path<String>,
    headers: HeaderMap,
    store: Extension<Arc<Store>>,
    Json(payload): Json<SetSubdomainRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };
    let Some(tenant) = resolve_own_tenant(&store, &principal, &tenant_id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(status) = require_permission(&principal, rbac::TENANT_CHANGE_SUBDOMAIN) {
        return status.into_response();
    }
    let Some(subdomain) = slug::normalize_subdomain(&payload.subdomain, SUBDOMAIN_MIN, SUBDOMAIN_MAX)
    else {
        return (StatusCode::BAD_REQUEST, "Invalid tenant subdomain.").into_response();
    };

    match store.tenants.set_subdomain(tenant.id, subdomain).await {
        Ok(Some(updated)) => {
            (StatusCode::OK, Json(TenantResponse::from_tenant(&updated))).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(_) => (StatusCode::CONFLICT, "The subdomain is already in use.").into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/tenants/by-domain/{subdomain}",
    params(("subdomain" = String, Path, description = "Tenant subdomain")),
    responses(
        (status = 200, description = "Tenant resolved.", body = PublicTenantResponse),
        (status = 404, description = "No tenant with this subdomain."),
    ),
    tag = "tenants"
)]
/// Unauthenticated subdomain → tenant resolution for host-based routing.
/// Only public fields are exposed.
pub async fn get_tenant_by_domain(
    Path(subdomain): Path<String>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let subdomain = subdomain.trim().to_lowercase();
    match store.tenants.find_by_subdomain(&subdomain).await {
        Some(tenant) => {
            (StatusCode::OK, Json(PublicTenantResponse::from_tenant(&tenant))).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
