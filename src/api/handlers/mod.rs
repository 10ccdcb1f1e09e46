//! API handlers for Luanto.
//!
//! This module organizes the service's route handlers: account signup, auth
//! (login/refresh/session/verification), user and tenant CRUD, tenant
//! membership, and the permission catalog. Handlers stay thin: they parse
//! input, resolve the principal, run the guard chain, and delegate to the
//! store.

pub mod auth;
pub mod health;
pub mod permissions;
pub mod root;
pub mod signup;
pub mod tenants;
pub mod users;
