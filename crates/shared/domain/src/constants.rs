//! Domain-level constants.
//!
//! These constants define collection names and business rules shared by
//! every repository.

// =============================================================================
// Collections
// =============================================================================

pub const COLLECTION_PROFILES: &str = "profiles";
pub const COLLECTION_REMINDERS: &str = "reminders";
pub const COLLECTION_HEALTH_METRICS: &str = "health_metrics";
pub const COLLECTION_HEALTH_DEVICES: &str = "health_devices";
pub const COLLECTION_MEDICAL_DOCUMENTS: &str = "medical_documents";
pub const COLLECTION_EDUCATIONAL_CONTENT: &str = "educational_content";
pub const COLLECTION_CHAT_MESSAGES: &str = "chat_messages";
pub const COLLECTION_DIET_PLANS: &str = "diet_plans";
pub const COLLECTION_DOCUMENT_ANALYSIS: &str = "document_analysis";
pub const COLLECTION_SHAREABLE_CONTENT: &str = "shareable_content";
pub const COLLECTION_SMART_EXTRAS: &str = "smart_extras";

// =============================================================================
// Field names used in scope filters and orderings
// =============================================================================

pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_PROFILE_ID: &str = "profileId";
pub const FIELD_METRIC_TYPE: &str = "metricType";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_DATE_TIME: &str = "dateTime";
pub const FIELD_DATE: &str = "date";
pub const FIELD_TIMESTAMP: &str = "timestamp";

// =============================================================================
// Profiles
// =============================================================================

/// Profiles younger than this age (in years) are flagged as children.
pub const CHILD_AGE_LIMIT: i32 = 13;

/// Check whether an age counts as a child profile
pub fn is_child_age(age: i32) -> bool {
    age < CHILD_AGE_LIMIT
}

// =============================================================================
// Sharing
// =============================================================================

/// Domain used to build share links when none is configured
pub const DEFAULT_APP_DOMAIN: &str = "medicofamiliadigital.app";

/// Build the public link for a share identifier
pub fn share_link(app_domain: &str, share_id: &str) -> String {
    format!("https://{}/share/{}", app_domain, share_id)
}

// =============================================================================
// Document analysis
// =============================================================================

/// Number of recognized characters quoted in an analysis summary
pub const ANALYSIS_PREVIEW_CHARS: usize = 500;
