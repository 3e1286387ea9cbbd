//! Family member profiles owned by a user account.

use std::sync::Arc;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter};
use common::AppResult;
use domain::{Profile, FIELD_USER_ID};

pub struct ProfileRepository {
    records: RecordStore<Profile>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// Live list of the profiles owned by `user_id`
    pub fn profiles_for_user(&self, user_id: &str) -> Subscription<Profile> {
        self.records
            .subscribe(vec![Filter::eq(FIELD_USER_ID, user_id)], None)
    }

    /// Store a new profile. `is_child` is derived from the age.
    pub async fn create_profile(&self, profile: Profile) -> AppResult<String> {
        self.records.create(profile).await
    }

    pub async fn update_profile(&self, profile: Profile) -> AppResult<()> {
        self.records.update(profile).await
    }

    pub async fn delete_profile(&self, profile_id: &str) -> AppResult<()> {
        self.records.delete(profile_id).await
    }

    pub async fn get_profile(&self, profile_id: &str) -> AppResult<Profile> {
        self.records.get_one(profile_id).await
    }
}
