//! In-memory port implementations shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::control::ControlMessage;
use farmwatch_domain::device::{Device, DeviceKind};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::Timestamp;

use crate::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<BTreeMap<DeviceId, Device>>,
}

impl InMemoryDeviceRepo {
    pub fn with(devices: impl IntoIterator<Item = Device>) -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for device in devices {
                store.insert(device.id.clone(), device);
            }
        }
        repo
    }
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(device.id.clone(), device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FarmwatchError>> + Send {
        let result = self.store.lock().unwrap().get(id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FarmwatchError>> + Send {
        let result: Vec<Device> = self.store.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, FarmwatchError>> + Send {
        self.store
            .lock()
            .unwrap()
            .insert(device.id.clone(), device.clone());
        async { Ok(device) }
    }

    fn delete(&self, id: &DeviceId) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        self.store.lock().unwrap().remove(id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryActionLog {
    pub records: Mutex<Vec<ActionRecord>>,
}

impl ActionLog for InMemoryActionLog {
    fn record(
        &self,
        action: ActionRecord,
    ) -> impl Future<Output = Result<ActionRecord, FarmwatchError>> + Send {
        self.records.lock().unwrap().push(action.clone());
        async { Ok(action) }
    }

    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActionRecord>, FarmwatchError>> + Send {
        let result: Vec<ActionRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| &r.device_id == device_id)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

#[derive(Default)]
pub struct InMemoryReadings {
    pub readings: Mutex<Vec<SensorReading>>,
}

impl ReadingRepository for InMemoryReadings {
    fn store(
        &self,
        reading: SensorReading,
    ) -> impl Future<Output = Result<SensorReading, FarmwatchError>> + Send {
        self.readings.lock().unwrap().push(reading.clone());
        async { Ok(reading) }
    }

    fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let result: Vec<SensorReading> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| &r.device_id == device_id)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let result: Vec<SensorReading> =
            self.readings.lock().unwrap().iter().rev().take(limit).cloned().collect();
        async { Ok(result) }
    }

    fn between(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<Vec<SensorReading>, FarmwatchError>> + Send {
        let result: Vec<SensorReading> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.recorded_at >= from && r.recorded_at < until)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("broker unreachable")]
pub struct BrokerDown;

/// Records published messages, or fails every publish when `down`.
#[derive(Default)]
pub struct RecordingPublisher {
    pub down: bool,
    pub published: Mutex<Vec<(String, ControlMessage)>>,
}

impl CommandPublisher for RecordingPublisher {
    fn publish(
        &self,
        topic: &str,
        message: &ControlMessage,
    ) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        let result = if self.down {
            Err(FarmwatchError::Publish(Box::new(BrokerDown)))
        } else {
            self.published
                .lock()
                .unwrap()
                .push((topic.to_string(), message.clone()));
            Ok(())
        };
        async { result }
    }
}

pub fn pump(id: &str) -> Device {
    Device::builder()
        .id(id)
        .name("Irrigation pump")
        .kind(DeviceKind::Actuator)
        .topic(format!("farm/{id}"))
        .build()
        .unwrap()
}
