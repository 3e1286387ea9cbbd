//! Record Service Library
//!
//! Real-time, user-scoped repositories over a document database:
//! - `infra`: the document store and blob store seams with in-process engines
//! - `repository`: the generic record engine, live subscriptions and the
//!   per-entity repositories
//! - `intelligence`: assistant and text recognition seams

pub mod infra;
pub mod intelligence;
pub mod repository;

pub use infra::{BlobStore, DocumentStore, Filter, FsBlobStore, MemoryBlobStore, MemoryStore, Query};
pub use intelligence::{HealthAssistant, PlaceholderAssistant, PlainTextRecognizer, TextRecognizer};
pub use repository::{
    switch_latest, ChatRepository, DietRepository, DocumentAnalysisRepository,
    EducationalContentRepository, HealthDeviceRepository, HealthMetricRepository,
    MedicalDocumentRepository, ProfileRepository, RecordStore, ReminderRepository,
    ShareableContentRepository, SmartExtraRepository, Subscription,
};
