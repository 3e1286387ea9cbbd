//! Repository layer for record access.
//!
//! [`base`] holds the generic operations, [`RecordStore`] applies them to one
//! record type, and the per-entity repositories expose the scoped queries and
//! workflows of each collection.

pub mod base;
pub(crate) mod codec;
mod record_store;
mod subscription;
mod switch;

mod chat;
mod content;
mod diet;
mod document;
mod health;
mod profile;
mod reminder;
mod share;

pub use base::{CrudRepository, DeleteRepository, ReadRepository, WriteRepository};
pub use record_store::RecordStore;
pub use subscription::Subscription;
pub use switch::switch_latest;

pub use chat::ChatRepository;
pub use content::{EducationalContentRepository, SmartExtraRepository};
pub use diet::DietRepository;
pub use document::{DocumentAnalysisRepository, MedicalDocumentRepository};
pub use health::{HealthDeviceRepository, HealthMetricRepository};
pub use profile::ProfileRepository;
pub use reminder::ReminderRepository;
pub use share::ShareableContentRepository;
