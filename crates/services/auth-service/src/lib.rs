//! Auth Service Library
//!
//! This crate provides the authentication gateway: it exchanges identity
//! tokens for a session through an [`IdentityProvider`] and publishes the
//! signed-in user to observers.

pub mod provider;
pub mod service;

pub use provider::{Claims, IdentityProvider, JwtIdentityProvider};
pub use service::{AuthGateway, Authenticator};
