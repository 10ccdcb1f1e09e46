//! Request/response types for user account endpoints.

use chrono::SecondsFormat;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::membership::Role;
use crate::domain::user::User;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
    /// Role inside the caller's tenant; defaults to `user`. `owner` is never
    /// accepted here.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>, format = Password)]
    pub password: Option<SecretString>,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role inside the tenant the request was scoped to.
    pub role: Role,
    pub verified: bool,
    pub created_at: String,
}

impl UserResponse {
    /// Shape a user plus their tenant role into the public payload.
    /// Password and verification-token hashes are intentionally absent.
    pub(crate) fn from_parts(user: &User, role: Role) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role,
            verified: user.email_verification.verified,
            created_at: user.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
