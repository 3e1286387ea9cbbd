//! Scheduled reminders attached to a profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COLLECTION_REMINDERS, FIELD_DATE_TIME};
use crate::record::Record;

labelled_enum! {
    /// What a reminder is about
    ReminderType("reminder type") {
        Appointment => "appointment",
        Exam => "exam",
        Medication => "medication",
        Meal => "meal",
        Other => "other",
    }
}

labelled_enum! {
    /// How often a recurring reminder repeats
    RecurrencePattern("recurrence pattern") {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default)]
    pub id: String,
    pub profile_id: String,
    pub reminder_type: ReminderType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Scheduled instant
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
    /// Always `None` when `is_recurring` is false
    #[serde(default)]
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Create an unsaved one-off reminder
    pub fn new(
        profile_id: impl Into<String>,
        reminder_type: ReminderType,
        title: impl Into<String>,
        date_time: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            profile_id: profile_id.into(),
            reminder_type,
            title: title.into(),
            description: None,
            date_time,
            is_recurring: false,
            recurrence_pattern: None,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Make the reminder repeat with the given pattern
    pub fn recurring(mut self, pattern: RecurrencePattern) -> Self {
        self.is_recurring = true;
        self.recurrence_pattern = Some(pattern);
        self
    }

    fn normalize_recurrence(&mut self) {
        if !self.is_recurring {
            self.recurrence_pattern = None;
        }
    }
}

impl Record for Reminder {
    const COLLECTION: &'static str = COLLECTION_REMINDERS;
    const DEFAULT_ORDER: Option<&'static str> = Some(FIELD_DATE_TIME);

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
        self.normalize_recurrence();
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.normalize_recurrence();
    }
}
