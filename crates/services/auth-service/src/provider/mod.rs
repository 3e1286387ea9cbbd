//! Identity providers: exchange an identity token for the user it names.

mod jwt;

use async_trait::async_trait;

use common::AppResult;
use domain::AuthUser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use jwt::{Claims, JwtIdentityProvider};

/// Identity provider trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify `id_token` and return the user it was issued for
    async fn exchange(&self, id_token: &str) -> AppResult<AuthUser>;
}
