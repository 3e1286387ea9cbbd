//! Session management over an identity provider.

mod auth_service;

pub use auth_service::{AuthGateway, Authenticator};
#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthGateway;
