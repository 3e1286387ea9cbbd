//! Diet plans, one per profile, stored under the profile id.

use std::sync::Arc;

use super::base::{ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use crate::infra::store::DocumentStore;
use crate::intelligence::HealthAssistant;
use common::{AppError, AppResult};
use domain::{DietPlan, Profile};

pub struct DietRepository {
    records: RecordStore<DietPlan>,
    assistant: Arc<dyn HealthAssistant>,
}

impl DietRepository {
    pub fn new(store: Arc<dyn DocumentStore>, assistant: Arc<dyn HealthAssistant>) -> Self {
        Self {
            records: RecordStore::new(store),
            assistant,
        }
    }

    /// Build a plan for a stored profile, replacing any previous one
    pub async fn generate_diet_plan(&self, profile: &Profile) -> AppResult<DietPlan> {
        if profile.id.is_empty() {
            return Err(AppError::validation("Diet plans need a stored profile"));
        }
        let meals = self.assistant.plan_meals(profile).await?;
        let plan = DietPlan::from_meals(profile.id.clone(), meals);
        self.records.create_with_id(&profile.id, plan).await
    }

    pub async fn get_diet_plan(&self, profile_id: &str) -> AppResult<DietPlan> {
        self.records.get_one(profile_id).await
    }
}
