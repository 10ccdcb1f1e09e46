use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user account. Email uniqueness and normalization are enforced by the
/// store; the entity never holds a raw password or verification token, only
/// their hashes.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verification: EmailVerification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Email verification state attached to each account.
#[derive(Debug, Clone, Default)]
pub struct EmailVerification {
    /// SHA-256 of the token mailed to the user, if a verification is pending.
    pub token_hash: Option<Vec<u8>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
}

/// Field changeset for user updates. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
