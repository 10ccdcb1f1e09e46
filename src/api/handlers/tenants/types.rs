//! Request/response types for tenant endpoints.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::membership::{Membership, Role};
use crate::domain::tenant::{Tenant, TenantStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTenantRequest {
    pub name: String,
    pub subdomain: String,
    #[serde(default)]
    pub status: TenantStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub status: Option<TenantStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetSubdomainRequest {
    pub subdomain: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TenantResponse {
    pub id: String,
    pub name: String,
    pub subdomain: String,
    pub status: TenantStatus,
    pub owner_id: String,
    pub created_at: String,
}

impl TenantResponse {
    pub(crate) fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name.clone(),
            subdomain: tenant.subdomain.clone(),
            status: tenant.status,
            owner_id: tenant.owner_id.to_string(),
            created_at: tenant.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Unauthenticated view used by subdomain resolution; omits the owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicTenantResponse {
    pub id: String,
    pub name: String,
    pub subdomain: String,
    pub status: TenantStatus,
}

impl PublicTenantResponse {
    pub(crate) fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name.clone(),
            subdomain: tenant.subdomain.clone(),
            status: tenant.status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub tenant_id: String,
    pub role: Role,
    pub created_at: String,
}

impl MembershipResponse {
    pub(crate) fn from_membership(membership: &Membership) -> Self {
        Self {
            id: membership.id.to_string(),
            user_id: membership.user_id.to_string(),
            tenant_id: membership.tenant_id.to_string(),
            role: membership.role,
            created_at: membership
                .created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
