//! Permission catalog endpoint.

use axum::{extract::Extension, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::auth::principal::require_auth;
use crate::store::Store;

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionResponse {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/v1/permissions",
    responses(
        (status = 200, description = "Permission catalog.", body = [PermissionResponse]),
        (status = 401, description = "Missing or invalid access token."),
    ),
    tag = "rbac"
)]
/// Lists the permission catalog seeded at startup. The catalog is static and
/// identical for every tenant, so plain authentication is enough.
pub async fn list_permissions(headers: HeaderMap, store: Extension<Arc<Store>>) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &store).await {
        return status.into_response();
    }
    let rows: Vec<PermissionResponse> = store
        .permissions
        .find_all()
        .await
        .into_iter()
        .map(|record| PermissionResponse {
            code: record.code,
            name: record.name,
            description: record.description,
        })
        .collect();
    (StatusCode::OK, Json(rows)).into_response()
}
