//! Read-mostly catalog content: educational articles and smart extras.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COLLECTION_EDUCATIONAL_CONTENT, COLLECTION_SMART_EXTRAS};
use crate::record::Record;

labelled_enum! {
    ContentCategory("content category") {
        Nutrition => "nutrition",
        Exercise => "exercise",
        Diseases => "diseases",
        FirstAid => "first_aid",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalContent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub category: ContentCategory,
    /// Markdown or HTML body
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EducationalContent {
    pub fn new(
        title: impl Into<String>,
        category: ContentCategory,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: title.into(),
            category,
            content: content.into(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for EducationalContent {
    const COLLECTION: &'static str = COLLECTION_EDUCATIONAL_CONTENT;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

labelled_enum! {
    SmartExtraType("smart extra type") {
        FirstAid => "first_aid",
        OfflineContent => "offline_content",
        LanguagePack => "language_pack",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartExtra {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub extra_type: SmartExtraType,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl SmartExtra {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        extra_type: SmartExtraType,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description: description.into(),
            extra_type,
            content_url: None,
            language_code: None,
        }
    }
}

impl Record for SmartExtra {
    const COLLECTION: &'static str = COLLECTION_SMART_EXTRAS;

    record_id!();
}
