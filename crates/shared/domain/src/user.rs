//! Signed-in identity.

use serde::{Deserialize, Serialize};

/// The user behind the current session, as reported by the identity
/// provider. `uid` is the `userId` scoping key of every owned collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Name to greet the user with
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("User")
    }
}
