//! Assistant chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COLLECTION_CHAT_MESSAGES, FIELD_TIMESTAMP};
use crate::record::Record;

labelled_enum! {
    Sender("sender") {
        User => "user",
        Ai => "ai",
    }
}

/// One message in a (user, profile) conversation, ordered by `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        user_id: impl Into<String>,
        profile_id: impl Into<String>,
        sender: Sender,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            profile_id: profile_id.into(),
            sender,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build the assistant's reply in the same conversation
    pub fn reply(&self, message: impl Into<String>) -> Self {
        Self::new(self.user_id.clone(), self.profile_id.clone(), Sender::Ai, message)
    }
}

impl Record for ChatMessage {
    const COLLECTION: &'static str = COLLECTION_CHAT_MESSAGES;
    const DEFAULT_ORDER: Option<&'static str> = Some(FIELD_TIMESTAMP);

    record_id!();
}
