//! Reading service — ingestion and history of sensor measurements.

use farmwatch_domain::error::{FarmwatchError, NotFoundError};
use farmwatch_domain::id::{DeviceId, ReadingId};
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::{Day, day_bounds, now};

use crate::ports::{DeviceRepository, ReadingRepository};

/// Number of readings returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Values reported by a sensor in one message.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub moisture: Option<f64>,
}

pub struct ReadingService<D, R> {
    devices: D,
    readings: R,
}

impl<D, R> ReadingService<D, R>
where
    D: DeviceRepository,
    R: ReadingRepository,
{
    pub fn new(devices: D, readings: R) -> Self {
        Self { devices, readings }
    }

    /// Store a measurement reported by `device_id`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::NotFound`] when the device is not provisioned,
    /// or a storage error from either repository.
    #[tracing::instrument(skip(self))]
    pub async fn ingest(
        &self,
        device_id: &DeviceId,
        measurement: Measurement,
    ) -> Result<SensorReading, FarmwatchError> {
        if self.devices.get_by_id(device_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
            .into());
        }

        let reading = SensorReading {
            id: ReadingId::new(),
            device_id: device_id.clone(),
            temperature: measurement.temperature,
            humidity: measurement.humidity,
            moisture: measurement.moisture,
            recorded_at: now(),
        };
        self.readings.store(reading).await
    }

    /// Most recent readings of `device_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn history(
        &self,
        device_id: &DeviceId,
        limit: Option<usize>,
    ) -> Result<Vec<SensorReading>, FarmwatchError> {
        self.readings
            .recent_for_device(device_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }

    /// Most recent readings of all devices, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn latest(&self, limit: Option<usize>) -> Result<Vec<SensorReading>, FarmwatchError> {
        self.readings
            .recent(limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }

    /// Every reading recorded on the UTC calendar `day`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn on_day(&self, day: Day) -> Result<Vec<SensorReading>, FarmwatchError> {
        let (from, until) = day_bounds(day);
        self.readings.between(from, until).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{InMemoryDeviceRepo, InMemoryReadings, pump};
    use chrono::TimeZone;

    fn service() -> ReadingService<InMemoryDeviceRepo, InMemoryReadings> {
        ReadingService::new(
            InMemoryDeviceRepo::with([pump("soil-1")]),
            InMemoryReadings::default(),
        )
    }

    #[tokio::test]
    async fn should_store_reading_for_known_device() {
        let svc = service();
        let id = DeviceId::from("soil-1");

        let reading = svc
            .ingest(
                &id,
                Measurement {
                    temperature: Some(24.5),
                    humidity: Some(61.0),
                    moisture: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(reading.temperature, Some(24.5));
        let history = svc.history(&id, None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, reading.id);
    }

    #[tokio::test]
    async fn should_reject_reading_for_unknown_device() {
        let svc = service();
        let result = svc
            .ingest(&DeviceId::from("ghost"), Measurement::default())
            .await;
        assert!(matches!(result, Err(FarmwatchError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_limit_history_newest_first() {
        let svc = service();
        let id = DeviceId::from("soil-1");
        for t in [20.0, 21.0, 22.0] {
            svc.ingest(
                &id,
                Measurement {
                    temperature: Some(t),
                    ..Measurement::default()
                },
            )
            .await
            .unwrap();
        }

        let history = svc.history(&id, Some(2)).await.unwrap();
        let temps: Vec<Option<f64>> = history.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![Some(22.0), Some(21.0)]);
    }

    #[tokio::test]
    async fn should_list_latest_readings_of_all_devices() {
        let readings = InMemoryReadings::default();
        let svc = ReadingService::new(
            InMemoryDeviceRepo::with([pump("soil-1"), pump("soil-2")]),
            readings,
        );
        for id in ["soil-1", "soil-2", "soil-1"] {
            svc.ingest(&DeviceId::from(id), Measurement::default())
                .await
                .unwrap();
        }

        let latest = svc.latest(Some(2)).await.unwrap();
        let ids: Vec<&str> = latest.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, vec!["soil-1", "soil-2"]);
        assert_eq!(svc.latest(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_return_only_readings_of_requested_day() {
        let readings = InMemoryReadings::default();
        let at = |day: u32, hour: u32| chrono::Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap();
        for (day, hour, temperature) in [(1, 23, 1.0), (2, 0, 2.0), (2, 12, 3.0), (3, 0, 4.0)] {
            readings.readings.lock().unwrap().push(SensorReading {
                id: ReadingId::new(),
                device_id: DeviceId::from("soil-1"),
                temperature: Some(temperature),
                humidity: None,
                moisture: None,
                recorded_at: at(day, hour),
            });
        }
        let svc = ReadingService::new(InMemoryDeviceRepo::with([pump("soil-1")]), readings);

        let day = chrono::NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let temps: Vec<Option<f64>> = svc
            .on_day(day)
            .await
            .unwrap()
            .iter()
            .map(|r| r.temperature)
            .collect();
        assert_eq!(temps, vec![Some(3.0), Some(2.0)]);
    }
}
