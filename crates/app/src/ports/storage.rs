//! Storage port — repository traits for persistence.

use std::future::Future;
use std::sync::Arc;

use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::device::Device;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::Timestamp;

/// CRUD access to provisioned devices.
pub trait DeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send;

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FarmwatchError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FarmwatchError>> + Send;

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send;

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), FarmwatchError>> + Send;
}

/// Append-only history of issued commands.
pub trait ActionLog {
    fn record(
        &self,
        action: ActionRecord,
    ) -> impl Future<Output = Result<ActionRecord, FarmwatchError>> + Send;

    /// Most recent actions for `device_id`, newest first.
    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActionRecord>, FarmwatchError>> + Send;
}

/// Storage for sensor measurements.
pub trait ReadingRepository {
    fn store(
        &self,
        reading: SensorReading,
    ) -> impl Future<Output = Result<SensorReading, FarmwatchError>> + Send;

    /// Most recent readings for `device_id`, newest first.
    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send;

    /// Most recent readings of every device, newest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send;

    /// Readings recorded in `[from, until)`, newest first.
    fn between(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        (**self).create(device)
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FarmwatchError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FarmwatchError>> + Send {
        (**self).get_all()
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        (**self).update(device)
    }

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        (**self).delete(id)
    }
}
