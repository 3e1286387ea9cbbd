//! Medical documents: uploaded files plus their metadata, and the text
//! recognized from them.

use std::sync::Arc;

use tracing::warn;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::blob::{blob_path, BlobStore};
use crate::infra::store::{DocumentStore, Filter};
use crate::intelligence::{HealthAssistant, TextRecognizer};
use common::{AppError, AppResult};
use domain::{
    DocumentAnalysis, DocumentType, MedicalDocument, COLLECTION_MEDICAL_DOCUMENTS,
    FIELD_PROFILE_ID,
};

pub struct MedicalDocumentRepository {
    records: RecordStore<MedicalDocument>,
    blobs: Arc<dyn BlobStore>,
}

impl MedicalDocumentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            records: RecordStore::new(store),
            blobs,
        }
    }

    pub fn documents_for_profile(&self, profile_id: &str) -> Subscription<MedicalDocument> {
        self.records
            .subscribe(vec![Filter::eq(FIELD_PROFILE_ID, profile_id)], None)
    }

    /// Upload the file, then record its metadata. Returns the document id.
    ///
    /// If the metadata write fails the uploaded blob is removed again.
    pub async fn upload_document(
        &self,
        profile_id: &str,
        document_name: &str,
        document_type: DocumentType,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        let path = blob_path(COLLECTION_MEDICAL_DOCUMENTS, profile_id, document_name);
        let file_url = self.blobs.put(&path, bytes).await?;

        let document = MedicalDocument::uploaded(
            profile_id,
            document_name,
            document_type,
            file_url,
            path.clone(),
        );
        match self.records.create(document).await {
            Ok(id) => Ok(id),
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&path).await {
                    warn!(path = %path, error = %cleanup, "Failed to remove orphaned upload");
                }
                Err(e)
            }
        }
    }

    pub async fn update_document(&self, document: MedicalDocument) -> AppResult<()> {
        self.records.update(document).await
    }

    /// Remove the metadata, then the stored file.
    ///
    /// A failure to remove the file is logged and does not fail the call.
    pub async fn delete_document(&self, document_id: &str) -> AppResult<()> {
        let storage_path = match self.records.get_one(document_id).await {
            Ok(document) => Some(document.storage_path),
            Err(AppError::NotFound(_)) => None,
            Err(AppError::Serialization(e)) => {
                warn!(document_id, error = %e, "Deleting undecodable document without its file");
                None
            }
            Err(e) => return Err(e),
        };

        self.records.delete(document_id).await?;

        if let Some(path) = storage_path.filter(|p| !p.is_empty()) {
            if let Err(e) = self.blobs.delete(&path).await {
                warn!(document_id, path = %path, error = %e, "Failed to remove document file");
            }
        }
        Ok(())
    }

    pub async fn get_document(&self, document_id: &str) -> AppResult<MedicalDocument> {
        self.records.get_one(document_id).await
    }

    /// Attach an analysis summary and mark the document analysed
    pub async fn record_analysis(&self, document_id: &str, summary: String) -> AppResult<()> {
        let mut document = self.records.get_one(document_id).await?;
        document.ai_analysis_summary = Some(summary);
        document.is_analyzed = true;
        self.records.update(document).await
    }
}

pub struct DocumentAnalysisRepository {
    records: RecordStore<DocumentAnalysis>,
    recognizer: Arc<dyn TextRecognizer>,
    assistant: Arc<dyn HealthAssistant>,
}

impl DocumentAnalysisRepository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        recognizer: Arc<dyn TextRecognizer>,
        assistant: Arc<dyn HealthAssistant>,
    ) -> Self {
        Self {
            records: RecordStore::new(store),
            recognizer,
            assistant,
        }
    }

    /// Recognize the document's text, store it under the document id and
    /// return a summary of it.
    pub async fn analyze_document(&self, document_id: &str, bytes: &[u8]) -> AppResult<String> {
        let extracted_text = self.recognizer.recognize(bytes).await?;
        let analysis = self
            .records
            .create_with_id(document_id, DocumentAnalysis::new(extracted_text))
            .await?;
        self.assistant.summarize(&analysis.extracted_text).await
    }

    /// Text recognized by the last analysis of the document
    pub async fn get_analysis_result(&self, document_id: &str) -> AppResult<String> {
        let analysis = self.records.get_one(document_id).await?;
        Ok(analysis.extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::blob::{MemoryBlobStore, MockBlobStore};
    use crate::infra::store::{MemoryStore, MockDocumentStore};
    use crate::intelligence::{MockTextRecognizer, PlaceholderAssistant, PlainTextRecognizer};

    #[tokio::test]
    async fn test_upload_sets_metadata() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let repo = MedicalDocumentRepository::new(Arc::new(MemoryStore::new()), blobs.clone());

        let id = repo
            .upload_document("p1", "blood.pdf", DocumentType::Exam, b"%PDF".to_vec())
            .await
            .unwrap();
        let document = repo.get_document(&id).await.unwrap();

        assert!(!document.file_url.is_empty());
        assert!(!document.is_analyzed);
        assert_eq!(document.document_type, DocumentType::Exam);
        assert!(document.storage_path.starts_with("medical_documents/p1/"));
        assert_eq!(blobs.get(&document.storage_path), Some(b"%PDF".to_vec()));
    }

    #[tokio::test]
    async fn test_failed_upload_writes_nothing() {
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_put()
            .returning(|_, _| Err(AppError::blob("bucket unavailable")));
        let store = Arc::new(MemoryStore::new());
        let repo = MedicalDocumentRepository::new(store.clone(), Arc::new(blobs));

        let err = repo
            .upload_document("p1", "scan.png", DocumentType::Report, vec![1, 2])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BLOB_ERROR");
        assert_eq!(store.document_count(COLLECTION_MEDICAL_DOCUMENTS), 0);
    }

    #[tokio::test]
    async fn test_rejected_metadata_removes_blob() {
        let mut store = MockDocumentStore::new();
        store
            .expect_add()
            .returning(|_, _| Err(AppError::store("permission denied")));
        let blobs = Arc::new(MemoryBlobStore::new());
        let repo = MedicalDocumentRepository::new(Arc::new(store), blobs.clone());

        let err = repo
            .upload_document("p1", "scan.png", DocumentType::Report, vec![1, 2])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STORE_ERROR");
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_file_and_is_idempotent() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let repo = MedicalDocumentRepository::new(Arc::new(MemoryStore::new()), blobs.clone());
        let id = repo
            .upload_document("p1", "rx.txt", DocumentType::Prescription, b"take 1".to_vec())
            .await
            .unwrap();

        repo.delete_document(&id).await.unwrap();
        assert!(blobs.is_empty());
        assert!(repo.get_document(&id).await.unwrap_err().is_not_found());

        repo.delete_document(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_blob_cleanup_failure_does_not_fail_delete() {
        let store = Arc::new(MemoryStore::new());
        let seed = MedicalDocumentRepository::new(store.clone(), Arc::new(MemoryBlobStore::new()));
        let id = seed
            .upload_document("p1", "rx.txt", DocumentType::Prescription, b"x".to_vec())
            .await
            .unwrap();

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_delete()
            .withf(|path| path.starts_with("medical_documents/p1/"))
            .times(1)
            .returning(|_| Err(AppError::blob("network down")));
        let repo = MedicalDocumentRepository::new(store.clone(), Arc::new(blobs));

        repo.delete_document(&id).await.unwrap();
        assert_eq!(store.document_count(COLLECTION_MEDICAL_DOCUMENTS), 0);
    }

    #[tokio::test]
    async fn test_record_analysis_marks_document() {
        let repo = MedicalDocumentRepository::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryBlobStore::new()),
        );
        let id = repo
            .upload_document("p1", "a.txt", DocumentType::Other, b"a".to_vec())
            .await
            .unwrap();

        repo.record_analysis(&id, "All normal".to_string()).await.unwrap();
        let document = repo.get_document(&id).await.unwrap();
        assert!(document.is_analyzed);
        assert_eq!(document.ai_analysis_summary.as_deref(), Some("All normal"));
    }

    #[tokio::test]
    async fn test_analysis_is_stored_under_document_id() {
        let repo = DocumentAnalysisRepository::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PlainTextRecognizer),
            Arc::new(PlaceholderAssistant),
        );

        let summary = repo
            .analyze_document("doc-1", b"Cholesterol 180 mg/dL")
            .await
            .unwrap();
        assert!(summary.contains("Cholesterol 180 mg/dL..."));
        assert_eq!(
            repo.get_analysis_result("doc-1").await.unwrap(),
            "Cholesterol 180 mg/dL"
        );
    }

    #[tokio::test]
    async fn test_missing_analysis_is_not_found() {
        let repo = DocumentAnalysisRepository::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PlainTextRecognizer),
            Arc::new(PlaceholderAssistant),
        );
        assert!(repo.get_analysis_result("doc-9").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_recognition_failure_stores_nothing() {
        let mut recognizer = MockTextRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(|_| Err(AppError::internal("engine crashed")));
        let store = Arc::new(MemoryStore::new());
        let repo = DocumentAnalysisRepository::new(
            store.clone(),
            Arc::new(recognizer),
            Arc::new(PlaceholderAssistant),
        );

        assert!(repo.analyze_document("doc-1", b"x").await.is_err());
        assert_eq!(store.document_count("document_analysis"), 0);
    }
}
