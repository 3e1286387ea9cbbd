//! Service Container - wires every repository to one document store, one
//! blob store and one session.
//!
//! Repositories are shared through `Arc` so feeds and commands can run
//! concurrently from any task.

use std::sync::Arc;

use auth_service_lib::{AuthGateway, Authenticator, JwtIdentityProvider};
use common::CompanionConfig;
use record_service_lib::{
    BlobStore, ChatRepository, DietRepository, DocumentAnalysisRepository, DocumentStore,
    EducationalContentRepository, FsBlobStore, HealthAssistant, HealthDeviceRepository,
    HealthMetricRepository, MedicalDocumentRepository, MemoryStore, PlaceholderAssistant,
    PlainTextRecognizer, ProfileRepository, ReminderRepository, ShareableContentRepository,
    SmartExtraRepository, TextRecognizer,
};

/// Concrete composition of the companion's services
pub struct Services {
    identity: Arc<JwtIdentityProvider>,
    auth: Arc<dyn AuthGateway>,
    profiles: Arc<ProfileRepository>,
    reminders: Arc<ReminderRepository>,
    metrics: Arc<HealthMetricRepository>,
    devices: Arc<HealthDeviceRepository>,
    documents: Arc<MedicalDocumentRepository>,
    analyses: Arc<DocumentAnalysisRepository>,
    content: Arc<EducationalContentRepository>,
    extras: Arc<SmartExtraRepository>,
    chat: Arc<ChatRepository>,
    diet: Arc<DietRepository>,
    shares: Arc<ShareableContentRepository>,
}

impl Services {
    /// Create the container over the given stores with the placeholder
    /// intelligence
    pub fn new(
        config: &CompanionConfig,
        store: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let assistant: Arc<dyn HealthAssistant> = Arc::new(PlaceholderAssistant);
        let recognizer: Arc<dyn TextRecognizer> = Arc::new(PlainTextRecognizer);
        let identity = Arc::new(JwtIdentityProvider::new(config.identity.clone()));

        Self {
            auth: Arc::new(Authenticator::new(identity.clone())),
            identity,
            profiles: Arc::new(ProfileRepository::new(store.clone())),
            reminders: Arc::new(ReminderRepository::new(store.clone())),
            metrics: Arc::new(HealthMetricRepository::new(store.clone())),
            devices: Arc::new(HealthDeviceRepository::new(store.clone())),
            documents: Arc::new(MedicalDocumentRepository::new(store.clone(), blobs)),
            analyses: Arc::new(DocumentAnalysisRepository::new(
                store.clone(),
                recognizer,
                assistant.clone(),
            )),
            content: Arc::new(EducationalContentRepository::new(store.clone())),
            extras: Arc::new(SmartExtraRepository::new(store.clone())),
            chat: Arc::new(ChatRepository::new(store.clone(), assistant.clone())),
            diet: Arc::new(DietRepository::new(store.clone(), assistant)),
            shares: Arc::new(ShareableContentRepository::new(
                store,
                config.app_domain.clone(),
            )),
        }
    }

    /// In-process document store with files kept under the configured
    /// blob directory
    pub fn from_config(config: &CompanionConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(FsBlobStore::from_config(&config.blob)),
        )
    }

    pub fn identity(&self) -> Arc<JwtIdentityProvider> {
        self.identity.clone()
    }

    pub fn auth(&self) -> Arc<dyn AuthGateway> {
        self.auth.clone()
    }

    pub fn profiles(&self) -> Arc<ProfileRepository> {
        self.profiles.clone()
    }

    pub fn reminders(&self) -> Arc<ReminderRepository> {
        self.reminders.clone()
    }

    pub fn metrics(&self) -> Arc<HealthMetricRepository> {
        self.metrics.clone()
    }

    pub fn devices(&self) -> Arc<HealthDeviceRepository> {
        self.devices.clone()
    }

    pub fn documents(&self) -> Arc<MedicalDocumentRepository> {
        self.documents.clone()
    }

    pub fn analyses(&self) -> Arc<DocumentAnalysisRepository> {
        self.analyses.clone()
    }

    pub fn content(&self) -> Arc<EducationalContentRepository> {
        self.content.clone()
    }

    pub fn extras(&self) -> Arc<SmartExtraRepository> {
        self.extras.clone()
    }

    pub fn chat(&self) -> Arc<ChatRepository> {
        self.chat.clone()
    }

    pub fn diet(&self) -> Arc<DietRepository> {
        self.diet.clone()
    }

    pub fn shares(&self) -> Arc<ShareableContentRepository> {
        self.shares.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AuthUser, Gender, Profile};
    use record_service_lib::MemoryBlobStore;

    fn services() -> Services {
        Services::new(
            &CompanionConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    #[tokio::test]
    async fn test_repositories_share_one_store() {
        let services = services();
        let id = services
            .profiles()
            .create_profile(Profile::new("u1", "Ana", 8, Gender::Female))
            .await
            .unwrap();

        let plan = services
            .diet()
            .generate_diet_plan(&services.profiles().get_profile(&id).await.unwrap())
            .await
            .unwrap();
        assert_eq!(plan.id, id);
    }

    #[tokio::test]
    async fn test_minted_token_signs_in() {
        let services = services();
        let mut user = AuthUser::new("u1");
        user.email = Some("ana@example.com".to_string());
        let token = services.identity().mint_dev_token(&user).unwrap();

        let signed_in = services.auth().sign_in_with_token(&token).await.unwrap();
        assert_eq!(signed_in, user);
        assert_eq!(services.auth().current_user(), Some(user));
    }
}
