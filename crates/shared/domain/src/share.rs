//! Links that expose one content item to people outside the account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::COLLECTION_SHAREABLE_CONTENT;
use crate::record::Record;

labelled_enum! {
    ShareContentType("share content type") {
        MedicalDocument => "medical_document",
        HealthReport => "health_report",
        DietPlan => "diet_plan",
    }
}

/// A share of `(content_type, content_id)`. The id is a generated UUID and
/// `share_link` is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableContent {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    pub content_type: ShareContentType,
    pub content_id: String,
    #[serde(default)]
    pub share_link: String,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShareableContent {
    pub fn new(
        user_id: impl Into<String>,
        profile_id: impl Into<String>,
        content_type: ShareContentType,
        content_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            profile_id: profile_id.into(),
            content_type,
            content_id: content_id.into(),
            share_link: String::new(),
            expiration_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expiration_date = Some(at);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires < now)
    }
}

impl Record for ShareableContent {
    const COLLECTION: &'static str = COLLECTION_SHAREABLE_CONTENT;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }
}
