//! Public share links for documents, reports and diet plans.

use std::sync::Arc;

use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use crate::infra::store::DocumentStore;
use common::AppResult;
use domain::{share_link, ShareableContent};

pub struct ShareableContentRepository {
    records: RecordStore<ShareableContent>,
    app_domain: String,
}

impl ShareableContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, app_domain: impl Into<String>) -> Self {
        Self {
            records: RecordStore::new(store),
            app_domain: app_domain.into(),
        }
    }

    /// Store the share under a fresh id and return its public link
    pub async fn create_shareable_link(&self, mut content: ShareableContent) -> AppResult<String> {
        let share_id = Uuid::new_v4().to_string();
        content.share_link = share_link(&self.app_domain, &share_id);
        let saved = self.records.create_with_id(&share_id, content).await?;
        Ok(saved.share_link)
    }

    pub async fn get_shareable_content(&self, share_id: &str) -> AppResult<ShareableContent> {
        self.records.get_one(share_id).await
    }

    pub async fn delete_shareable_link(&self, share_id: &str) -> AppResult<()> {
        self.records.delete(share_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::MemoryStore;
    use domain::ShareContentType;

    #[tokio::test]
    async fn test_link_points_at_share_id() {
        let repo = ShareableContentRepository::new(Arc::new(MemoryStore::new()), "example.org");
        let link = repo
            .create_shareable_link(ShareableContent::new(
                "u1",
                "p1",
                ShareContentType::DietPlan,
                "p1",
            ))
            .await
            .unwrap();

        let share_id = link
            .strip_prefix("https://example.org/share/")
            .expect("link uses configured domain");
        assert!(Uuid::parse_str(share_id).is_ok());

        let share = repo.get_shareable_content(share_id).await.unwrap();
        assert_eq!(share.id, share_id);
        assert_eq!(share.share_link, link);
        assert_eq!(share.content_type, ShareContentType::DietPlan);

        repo.delete_shareable_link(share_id).await.unwrap();
        repo.delete_shareable_link(share_id).await.unwrap();
        assert!(repo.get_shareable_content(share_id).await.unwrap_err().is_not_found());
    }
}
