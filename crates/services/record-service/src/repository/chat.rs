//! Conversations between a user and the health assistant, per profile.

use std::sync::Arc;

use super::base::{ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter};
use crate::intelligence::HealthAssistant;
use common::AppResult;
use domain::{ChatMessage, FIELD_PROFILE_ID, FIELD_USER_ID};

pub struct ChatRepository {
    records: RecordStore<ChatMessage>,
    assistant: Arc<dyn HealthAssistant>,
}

impl ChatRepository {
    pub fn new(store: Arc<dyn DocumentStore>, assistant: Arc<dyn HealthAssistant>) -> Self {
        Self {
            records: RecordStore::new(store),
            assistant,
        }
    }

    /// Live conversation of a user about one profile, oldest message first
    pub fn messages(&self, user_id: &str, profile_id: &str) -> Subscription<ChatMessage> {
        self.records.subscribe(
            vec![
                Filter::eq(FIELD_USER_ID, user_id),
                Filter::eq(FIELD_PROFILE_ID, profile_id),
            ],
            None,
        )
    }

    /// Store a message with the timestamp it carries
    pub async fn send_message(&self, message: ChatMessage) -> AppResult<String> {
        self.records.create(message).await
    }

    pub async fn ai_response(&self, message: &str, history: &[ChatMessage]) -> AppResult<String> {
        self.assistant.reply(message, history).await
    }
}
