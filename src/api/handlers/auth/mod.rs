//! Authentication endpoints and shared auth plumbing.
//!
//! Flow Overview:
//! 1) `login` scopes a session to one tenant and mints an opaque access +
//!    refresh token pair (fresh family).
//! 2) `refresh` rotates the pair inside the same family; replaying a rotated
//!    token revokes the family.
//! 3) `principal::require_auth` resolves the bearer token into a
//!    tenant-scoped principal for every guarded handler.
//!
//! Raw tokens never reach the store; only SHA-256 hashes do.

pub(crate) mod login;
pub(crate) mod password;
pub(crate) mod principal;
pub(crate) mod refresh;
pub(crate) mod session;
pub(crate) mod state;
pub(crate) mod tokens;
pub(crate) mod types;
pub(crate) mod utils;
pub(crate) mod verification;

pub use state::{AuthConfig, AuthState};

/// Minimum accepted password length, in bytes.
pub(crate) const MIN_PASSWORD_LEN: usize = 8;
