//! Family member profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{is_child_age, COLLECTION_PROFILES};
use crate::record::Record;

labelled_enum! {
    /// Gender recorded on a profile
    Gender("gender") {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

/// A family member whose records are tracked by the owning user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    /// Derived from `age`; recomputed by the repository on every write
    #[serde(default)]
    pub is_child: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create an unsaved profile owned by `user_id`
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        age: i32,
        gender: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            user_id: user_id.into(),
            name: name.into(),
            photo_url: None,
            age,
            gender,
            medical_history: None,
            allergies: None,
            is_child: is_child_age(age),
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute `is_child` from the current age
    pub fn refresh_is_child(&mut self) {
        self.is_child = is_child_age(self.age);
    }
}

impl Record for Profile {
    const COLLECTION: &'static str = COLLECTION_PROFILES;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
        self.refresh_is_child();
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.refresh_is_child();
    }
}
