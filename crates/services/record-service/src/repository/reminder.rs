//! Reminders for a profile, ordered by when they are due.

use std::sync::Arc;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter};
use common::AppResult;
use domain::{Reminder, FIELD_PROFILE_ID};

pub struct ReminderRepository {
    records: RecordStore<Reminder>,
}

impl ReminderRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// Live list of the profile's reminders, earliest first
    pub fn reminders_for_profile(&self, profile_id: &str) -> Subscription<Reminder> {
        self.records
            .subscribe(vec![Filter::eq(FIELD_PROFILE_ID, profile_id)], None)
    }

    pub async fn create_reminder(&self, reminder: Reminder) -> AppResult<String> {
        self.records.create(reminder).await
    }

    pub async fn update_reminder(&self, reminder: Reminder) -> AppResult<()> {
        self.records.update(reminder).await
    }

    pub async fn delete_reminder(&self, reminder_id: &str) -> AppResult<()> {
        self.records.delete(reminder_id).await
    }

    pub async fn get_reminder(&self, reminder_id: &str) -> AppResult<Reminder> {
        self.records.get_one(reminder_id).await
    }
}
