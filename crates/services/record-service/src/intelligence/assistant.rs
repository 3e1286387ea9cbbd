//! Health assistant: diet plans, document summaries and chat replies.

use async_trait::async_trait;

use common::AppResult;
use domain::{ChatMessage, FoodItem, Meal, Profile, ANALYSIS_PREVIEW_CHARS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reply sent by the placeholder assistant to every chat message
pub const CHAT_GREETING: &str = "Hello! I'm your health assistant. How can I help today?";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HealthAssistant: Send + Sync {
    /// Meals of a daily plan for the profile
    async fn plan_meals(&self, profile: &Profile) -> AppResult<Vec<Meal>>;

    /// Summary of the text recognized in a medical document
    async fn summarize(&self, extracted_text: &str) -> AppResult<String>;

    /// Answer to a chat message given the conversation so far
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> AppResult<String>;
}

/// Fixed answers until a model-backed assistant is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAssistant;

#[async_trait]
impl HealthAssistant for PlaceholderAssistant {
    async fn plan_meals(&self, _profile: &Profile) -> AppResult<Vec<Meal>> {
        Ok(vec![
            Meal::new(
                "Breakfast",
                "08:00",
                vec![
                    FoodItem::new("Scrambled eggs", "2 units", 150),
                    FoodItem::new("Whole-grain bread", "1 slice", 80),
                    FoodItem::new("Black coffee", "1 cup", 5),
                ],
            ),
            Meal::new(
                "Lunch",
                "13:00",
                vec![
                    FoodItem::new("Grilled chicken", "150g", 250),
                    FoodItem::new("Brown rice", "100g", 130),
                    FoodItem::new("Mixed salad", "1 bowl", 50),
                ],
            ),
            Meal::new(
                "Dinner",
                "19:00",
                vec![
                    FoodItem::new("Baked fish", "120g", 180),
                    FoodItem::new("Sweet potato", "100g", 90),
                    FoodItem::new("Steamed broccoli", "100g", 30),
                ],
            ),
        ])
    }

    async fn summarize(&self, extracted_text: &str) -> AppResult<String> {
        let preview: String = extracted_text.chars().take(ANALYSIS_PREVIEW_CHARS).collect();
        Ok(format!(
            "Preliminary document analysis:\n\n\
             Extracted text:\n\n\
             {}...\n\n\
             This is a simulated analysis. Connect a medical language model for a full review.",
            preview
        ))
    }

    async fn reply(&self, _message: &str, _history: &[ChatMessage]) -> AppResult<String> {
        Ok(CHAT_GREETING.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DietPlan, Gender};

    #[tokio::test]
    async fn test_placeholder_plan_totals() {
        let profile = Profile::new("u1", "Ana", 8, Gender::Female);
        let meals = PlaceholderAssistant.plan_meals(&profile).await.unwrap();

        let times: Vec<&str> = meals.iter().map(|m| m.time.as_str()).collect();
        assert_eq!(times, ["08:00", "13:00", "19:00"]);
        assert!(meals.iter().all(|m| m.food_items.len() == 3));
        assert_eq!(DietPlan::from_meals("p1", meals).daily_calories, 965);
    }

    #[tokio::test]
    async fn test_summary_quotes_first_chars() {
        let text = "é".repeat(ANALYSIS_PREVIEW_CHARS + 20);
        let summary = PlaceholderAssistant.summarize(&text).await.unwrap();

        let quoted = "é".repeat(ANALYSIS_PREVIEW_CHARS) + "...";
        assert!(summary.contains(&quoted));
        assert!(!summary.contains(&("é".repeat(ANALYSIS_PREVIEW_CHARS + 1))));
    }

    #[tokio::test]
    async fn test_reply_is_greeting() {
        let reply = PlaceholderAssistant.reply("I have a headache", &[]).await.unwrap();
        assert_eq!(reply, CHAT_GREETING);
    }
}
