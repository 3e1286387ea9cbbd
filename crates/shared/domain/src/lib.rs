//! Domain layer - Core entities and value objects.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! Every persisted entity implements [`Record`], which is all the generic
//! repository in `record-service` needs to know about it.

#[macro_use]
mod labels;
#[macro_use]
pub mod record;

pub mod chat;
pub mod constants;
pub mod content;
pub mod diet;
pub mod document;
pub mod error;
pub mod health;
pub mod profile;
pub mod reminder;
pub mod share;
pub mod user;

pub use chat::{ChatMessage, Sender};
pub use constants::*;
pub use content::{ContentCategory, EducationalContent, SmartExtra, SmartExtraType};
pub use diet::{DietPlan, FoodItem, Meal};
pub use document::{DocumentAnalysis, DocumentType, MedicalDocument};
pub use error::DomainError;
pub use health::{ConnectionStatus, DeviceType, HealthDevice, HealthMetric, MetricType};
pub use profile::{Gender, Profile};
pub use record::Record;
pub use reminder::{RecurrencePattern, Reminder, ReminderType};
pub use share::{ShareContentType, ShareableContent};
pub use user::AuthUser;
