//! HS256 identity tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::IdentityProvider;
use common::{AppError, AppResult, IdentityConfig};
use domain::AuthUser;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.name,
        }
    }
}

/// Verifies identity tokens signed with the shared secret of the configured
/// issuer. Issuer, audience and expiry are all checked.
pub struct JwtIdentityProvider {
    config: IdentityConfig,
}

impl JwtIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        Self { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation
    }

    /// Decode and validate a token
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &self.validation(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign a token for `user` valid for `ttl`
    pub fn mint_token(&self, user: &AuthUser, ttl: Duration) -> AppResult<String> {
        if user.uid.is_empty() {
            return Err(AppError::validation("Token subject must not be empty"));
        }
        let now = Utc::now();
        let claims = Claims {
            sub: user.uid.clone(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )?;
        Ok(token)
    }

    /// Sign a development token with the configured lifetime
    pub fn mint_dev_token(&self, user: &AuthUser) -> AppResult<String> {
        self.mint_token(user, Duration::hours(self.config.token_ttl_hours))
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn exchange(&self, id_token: &str) -> AppResult<AuthUser> {
        let claims = self.verify_token(id_token)?;
        Ok(claims.into())
    }
}
