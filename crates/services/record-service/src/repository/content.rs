//! Read-mostly catalogues: educational articles and smart extras.

use std::sync::Arc;

use super::base::{ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter};
use common::AppResult;
use domain::{
    ContentCategory, EducationalContent, SmartExtra, SmartExtraType, FIELD_CATEGORY, FIELD_TYPE,
};

pub struct EducationalContentRepository {
    records: RecordStore<EducationalContent>,
}

impl EducationalContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    pub fn all_content(&self) -> Subscription<EducationalContent> {
        self.records.subscribe(Vec::new(), None)
    }

    pub fn content_by_category(
        &self,
        category: ContentCategory,
    ) -> Subscription<EducationalContent> {
        self.records
            .subscribe(vec![Filter::eq(FIELD_CATEGORY, category.as_str())], None)
    }

    pub async fn get_content(&self, content_id: &str) -> AppResult<EducationalContent> {
        self.records.get_one(content_id).await
    }

    /// Add an article to the catalogue
    pub async fn publish_content(&self, content: EducationalContent) -> AppResult<String> {
        self.records.create(content).await
    }
}

pub struct SmartExtraRepository {
    records: RecordStore<SmartExtra>,
}

impl SmartExtraRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// One-shot lookup of the extras of a type
    pub async fn extras_by_type(&self, extra_type: SmartExtraType) -> AppResult<Vec<SmartExtra>> {
        self.records
            .fetch(vec![Filter::eq(FIELD_TYPE, extra_type.as_str())], None)
            .await
    }

    pub async fn get_extra(&self, extra_id: &str) -> AppResult<SmartExtra> {
        self.records.get_one(extra_id).await
    }

    pub async fn publish_extra(&self, extra: SmartExtra) -> AppResult<String> {
        self.records.create(extra).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::MemoryStore;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_category_subscription() {
        let repo = EducationalContentRepository::new(Arc::new(MemoryStore::new()));
        let hydration =
            EducationalContent::new("Hydration", ContentCategory::Nutrition, "Drink water");
        repo.publish_content(hydration)
            .await
            .unwrap();
        let cpr = repo
            .publish_content(EducationalContent::new(
                "CPR basics",
                ContentCategory::FirstAid,
                "Push hard",
            ))
            .await
            .unwrap();

        let mut first_aid = repo.content_by_category(ContentCategory::FirstAid);
        let items = first_aid.next().await.unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, cpr);

        let mut everything = repo.all_content();
        assert_eq!(everything.next().await.unwrap().unwrap().len(), 2);
        assert_eq!(repo.get_content(&cpr).await.unwrap().title, "CPR basics");
    }

    #[tokio::test]
    async fn test_extras_by_type() {
        let repo = SmartExtraRepository::new(Arc::new(MemoryStore::new()));
        let id = repo
            .publish_extra(SmartExtra::new("Burns", "Cool the area", SmartExtraType::FirstAid))
            .await
            .unwrap();
        repo.publish_extra(SmartExtra::new("Português", "UI pack", SmartExtraType::LanguagePack))
            .await
            .unwrap();

        let first_aid = repo.extras_by_type(SmartExtraType::FirstAid).await.unwrap();
        assert_eq!(first_aid.len(), 1);
        assert_eq!(first_aid[0].id, id);
        assert!(repo
            .extras_by_type(SmartExtraType::OfflineContent)
            .await
            .unwrap()
            .is_empty());
        assert!(repo.get_extra("missing").await.unwrap_err().is_not_found());
    }
}
