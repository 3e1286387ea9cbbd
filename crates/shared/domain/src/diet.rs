//! Diet plans. A profile has at most one plan, stored under the profile id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::COLLECTION_DIET_PLANS;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    /// Free-text portion, e.g. "150g" or "1 slice"
    pub quantity: String,
    pub calories: i32,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, calories: i32) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            calories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    /// Time of day as "HH:MM"
    pub time: String,
    pub food_items: Vec<FoodItem>,
}

impl Meal {
    pub fn new(
        name: impl Into<String>,
        time: impl Into<String>,
        food_items: Vec<FoodItem>,
    ) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
            food_items,
        }
    }

    pub fn calories(&self) -> i32 {
        self.food_items.iter().map(|item| item.calories).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    /// Equal to `profile_id` once stored
    #[serde(default)]
    pub id: String,
    pub profile_id: String,
    pub daily_calories: i32,
    pub meals: Vec<Meal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DietPlan {
    /// Build a plan whose daily total is the sum of every food item
    pub fn from_meals(profile_id: impl Into<String>, meals: Vec<Meal>) -> Self {
        let now = Utc::now();
        let daily_calories = meals.iter().map(Meal::calories).sum();
        Self {
            id: String::new(),
            profile_id: profile_id.into(),
            daily_calories,
            meals,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for DietPlan {
    const COLLECTION: &'static str = COLLECTION_DIET_PLANS;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
