//! Health metrics and connected devices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{COLLECTION_HEALTH_DEVICES, COLLECTION_HEALTH_METRICS, FIELD_DATE};
use crate::record::Record;

labelled_enum! {
    /// Kind of measurement
    MetricType("metric type") {
        Weight => "weight",
        BloodPressure => "blood_pressure",
        Glucose => "glucose",
        HeartRate => "heart_rate",
        Temperature => "temperature",
        Sleep => "sleep",
        Steps => "steps",
    }
}

/// One observation of a metric for a profile.
///
/// `date` is when the value was observed; `created_at` is when the record
/// was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    #[serde(default)]
    pub id: String,
    pub profile_id: String,
    pub metric_type: MetricType,
    pub value: f64,
    pub unit: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthMetric {
    pub fn new(
        profile_id: impl Into<String>,
        metric_type: MetricType,
        value: f64,
        unit: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            profile_id: profile_id.into(),
            metric_type,
            value,
            unit: unit.into(),
            date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for HealthMetric {
    const COLLECTION: &'static str = COLLECTION_HEALTH_METRICS;
    const DEFAULT_ORDER: Option<&'static str> = Some(FIELD_DATE);

    record_id!();

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

labelled_enum! {
    DeviceType("device type") {
        Smartwatch => "smartwatch",
        BloodPressureMonitor => "blood_pressure_monitor",
    }
}

labelled_enum! {
    ConnectionStatus("connection status") {
        Connected => "connected",
        Disconnected => "disconnected",
    }
}

/// A wearable or monitor registered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDevice {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub device_type: DeviceType,
    pub device_name: String,
    pub connection_status: ConnectionStatus,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

impl HealthDevice {
    pub fn new(
        user_id: impl Into<String>,
        device_type: DeviceType,
        device_name: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            device_type,
            device_name: device_name.into(),
            connection_status: ConnectionStatus::Disconnected,
            last_sync: None,
        }
    }

    /// Mark the device connected and synced at `at`
    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.connection_status = ConnectionStatus::Connected;
        self.last_sync = Some(at);
    }
}

impl Record for HealthDevice {
    const COLLECTION: &'static str = COLLECTION_HEALTH_DEVICES;

    record_id!();
}
