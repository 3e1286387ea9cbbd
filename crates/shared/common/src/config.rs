//! Shared configuration structures.
//!
//! Each section has a `Default` suitable for local development and is
//! overridden field by field from the environment by [`CompanionConfig::from_env`].

use std::env;

use domain::DEFAULT_APP_DOMAIN;
use serde::{Deserialize, Serialize};

/// Secret used when `IDENTITY_SECRET` is unset. Only fit for local runs.
pub const DEV_IDENTITY_SECRET: &str = "companion-development-secret-change-me";

/// Top-level configuration for the composition root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanionConfig {
    /// Domain used to build share links
    pub app_domain: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    pub blob: BlobConfig,
    pub identity: IdentityConfig,
}

impl CompanionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_domain: env::var("APP_DOMAIN").unwrap_or(defaults.app_domain),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            blob: BlobConfig::from_env(),
            identity: IdentityConfig::from_env(),
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            app_domain: DEFAULT_APP_DOMAIN.to_string(),
            log_level: "info".to_string(),
            blob: BlobConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

/// Blob store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobConfig {
    /// Directory holding uploaded files
    pub root_dir: String,
    /// Public URL prefix that maps onto `root_dir`
    pub base_url: String,
}

impl BlobConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_dir: env::var("BLOB_ROOT_DIR").unwrap_or(defaults.root_dir),
            base_url: env::var("BLOB_BASE_URL").unwrap_or(defaults.base_url),
        }
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root_dir: "./data/blobs".to_string(),
            base_url: "http://localhost:8080/files".to_string(),
        }
    }
}

/// Identity provider configuration for token verification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_ttl_hours: i64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env::var("IDENTITY_SECRET").unwrap_or(defaults.secret),
            issuer: env::var("IDENTITY_ISSUER").unwrap_or(defaults.issuer),
            audience: env::var("IDENTITY_AUDIENCE").unwrap_or(defaults.audience),
            token_ttl_hours: env::var("IDENTITY_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.token_ttl_hours),
        }
    }

    /// Whether the development fallback secret is in use
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_IDENTITY_SECRET
    }

    /// Get the secret as bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            secret: DEV_IDENTITY_SECRET.to_string(),
            issuer: "companion-identity".to_string(),
            audience: "companion".to_string(),
            token_ttl_hours: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompanionConfig::default();
        assert_eq!(config.app_domain, DEFAULT_APP_DOMAIN);
        assert_eq!(config.identity.token_ttl_hours, 24);
        assert!(config.identity.uses_dev_secret());
    }

    #[test]
    fn test_secret_is_not_serialized() {
        let json = serde_json::to_value(IdentityConfig::default()).unwrap();
        assert!(json.get("secret").is_none());
        assert_eq!(json["audience"], "companion");
    }
}
