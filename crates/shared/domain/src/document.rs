//! Medical documents and their text analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COLLECTION_DOCUMENT_ANALYSIS, COLLECTION_MEDICAL_DOCUMENTS};
use crate::record::Record;

labelled_enum! {
    DocumentType("document type") {
        Exam => "exam",
        Prescription => "prescription",
        Report => "report",
        Other => "other",
    }
}

/// Metadata for an uploaded medical file. The bytes live in the blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDocument {
    #[serde(default)]
    pub id: String,
    pub profile_id: String,
    pub document_type: DocumentType,
    pub document_name: String,
    pub file_url: String,
    /// Blob path the file was stored under
    #[serde(default)]
    pub storage_path: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub exam_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ai_analysis_summary: Option<String>,
    #[serde(default)]
    pub is_analyzed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicalDocument {
    /// Describe a freshly uploaded file
    pub fn uploaded(
        profile_id: impl Into<String>,
        document_name: impl Into<String>,
        document_type: DocumentType,
        file_url: impl Into<String>,
        storage_path: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            profile_id: profile_id.into(),
            document_type,
            document_name: document_name.into(),
            file_url: file_url.into(),
            storage_path: storage_path.into(),
            upload_date: now,
            exam_date: None,
            expiration_date: None,
            ai_analysis_summary: None,
            is_analyzed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the document expired before `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires < now)
    }
}

impl Record for MedicalDocument {
    const COLLECTION: &'static str = COLLECTION_MEDICAL_DOCUMENTS;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Text recognized from a medical document, keyed by the document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    #[serde(default)]
    pub id: String,
    pub extracted_text: String,
    pub analysis_date: DateTime<Utc>,
}

impl DocumentAnalysis {
    pub fn new(extracted_text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            extracted_text: extracted_text.into(),
            analysis_date: Utc::now(),
        }
    }
}

impl Record for DocumentAnalysis {
    const COLLECTION: &'static str = COLLECTION_DOCUMENT_ANALYSIS;

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.analysis_date = now;
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.analysis_date = now;
    }
}
