use crate::api::{self, AuthConfig, AuthState};
use crate::store::Store;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub frontend_base_url: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the listener cannot bind or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {args:?}");

    let config = AuthConfig::new(
        args.frontend_base_url,
        args.access_ttl_seconds,
        args.refresh_ttl_seconds,
    );
    let auth_state = Arc::new(AuthState::with_log_sender(config));
    let store = Arc::new(Store::new());

    api::new(args.port, auth_state, store).await
}
