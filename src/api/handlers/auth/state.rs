//! Shared auth configuration and state handed to handlers via `Extension`.

use std::sync::Arc;

use crate::email::{EmailSender, LogEmailSender};

/// Auth-related settings resolved from the CLI.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    frontend_base_url: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    verification_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        Self {
            frontend_base_url,
            access_ttl_seconds,
            refresh_ttl_seconds,
            // Verification links follow the original 24h window.
            verification_ttl_seconds: 24 * 60 * 60,
        }
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub const fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    #[must_use]
    pub const fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    #[must_use]
    pub const fn verification_ttl_seconds(&self) -> i64 {
        self.verification_ttl_seconds
    }
}

/// Auth state shared across handlers: configuration plus the email seam.
pub struct AuthState {
    config: AuthConfig,
    email: Arc<dyn EmailSender>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, email: Arc<dyn EmailSender>) -> Self {
        Self { config, email }
    }

    /// State with the log-only email sender, used by local dev and tests.
    #[must_use]
    pub fn with_log_sender(config: AuthConfig) -> Self {
        Self::new(config, Arc::new(LogEmailSender))
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn email(&self) -> &dyn EmailSender {
        self.email.as_ref()
    }
}
