use crate::APP_USER_AGENT;

// Undocumented landing route; mirrors the `X-App` identity header.
pub async fn root() -> &'static str {
    APP_USER_AGENT
}
