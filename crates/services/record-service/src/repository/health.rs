//! Health metrics per profile and connected devices per user.

use std::sync::Arc;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use super::record_store::RecordStore;
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter};
use common::AppResult;
use domain::{
    HealthDevice, HealthMetric, MetricType, FIELD_METRIC_TYPE, FIELD_PROFILE_ID, FIELD_USER_ID,
};

pub struct HealthMetricRepository {
    records: RecordStore<HealthMetric>,
}

impl HealthMetricRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// Live series of one metric type for a profile, oldest measurement first
    pub fn metrics_for_profile(
        &self,
        profile_id: &str,
        metric_type: MetricType,
    ) -> Subscription<HealthMetric> {
        self.records.subscribe(
            vec![
                Filter::eq(FIELD_PROFILE_ID, profile_id),
                Filter::eq(FIELD_METRIC_TYPE, metric_type.as_str()),
            ],
            None,
        )
    }

    pub async fn add_metric(&self, metric: HealthMetric) -> AppResult<String> {
        self.records.create(metric).await
    }

    pub async fn update_metric(&self, metric: HealthMetric) -> AppResult<()> {
        self.records.update(metric).await
    }

    pub async fn delete_metric(&self, metric_id: &str) -> AppResult<()> {
        self.records.delete(metric_id).await
    }

    pub async fn get_metric(&self, metric_id: &str) -> AppResult<HealthMetric> {
        self.records.get_one(metric_id).await
    }
}

pub struct HealthDeviceRepository {
    records: RecordStore<HealthDevice>,
}

impl HealthDeviceRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    pub fn devices_for_user(&self, user_id: &str) -> Subscription<HealthDevice> {
        self.records
            .subscribe(vec![Filter::eq(FIELD_USER_ID, user_id)], None)
    }

    pub async fn add_device(&self, device: HealthDevice) -> AppResult<String> {
        self.records.create(device).await
    }

    pub async fn update_device(&self, device: HealthDevice) -> AppResult<()> {
        self.records.update(device).await
    }

    pub async fn delete_device(&self, device_id: &str) -> AppResult<()> {
        self.records.delete(device_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use domain::{ConnectionStatus, DeviceType};
    use futures::StreamExt;

    #[tokio::test]
    async fn test_metrics_filtered_by_type_and_ordered_by_date() {
        let repo = HealthMetricRepository::new(Arc::new(MemoryStore::new()));
        let day = Utc.with_ymd_and_hms(2024, 2, 10, 7, 30, 0).unwrap();

        let later = day + Duration::days(2);
        repo.add_metric(HealthMetric::new("p1", MetricType::Weight, 71.2, "kg", later))
            .await
            .unwrap();
        repo.add_metric(HealthMetric::new("p1", MetricType::Weight, 72.0, "kg", day))
            .await
            .unwrap();
        repo.add_metric(HealthMetric::new("p1", MetricType::Glucose, 98.0, "mg/dL", day))
            .await
            .unwrap();

        let mut live = repo.metrics_for_profile("p1", MetricType::Weight);
        let series = live.next().await.unwrap().unwrap();
        let values: Vec<f64> = series.iter().map(|m| m.value).collect();
        assert_eq!(values, [72.0, 71.2]);
    }

    #[tokio::test]
    async fn test_device_sync_is_published() {
        let repo = HealthDeviceRepository::new(Arc::new(MemoryStore::new()));
        let id = repo
            .add_device(HealthDevice::new("u1", DeviceType::Smartwatch, "Wrist"))
            .await
            .unwrap();

        let mut live = repo.devices_for_user("u1");
        let mut device = live.next().await.unwrap().unwrap().remove(0);
        assert_eq!(device.id, id);
        assert_eq!(device.connection_status, ConnectionStatus::Disconnected);

        device.mark_synced(Utc::now());
        repo.update_device(device).await.unwrap();

        let synced = live.next().await.unwrap().unwrap();
        assert_eq!(synced[0].connection_status, ConnectionStatus::Connected);
        assert!(synced[0].last_sync.is_some());

        repo.delete_device(&id).await.unwrap();
        assert!(live.next().await.unwrap().unwrap().is_empty());
    }
}
