//! In-memory adapters and request helpers for the router tests.

use std::path::Path;
use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::control::ControlMessage;
use farmwatch_domain::device::{Device, DeviceKind};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::farm::Farm;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::Timestamp;

use crate::state::AppState;

#[derive(Default)]
pub struct StubDevices(Mutex<Vec<Device>>);

impl StubDevices {
    pub fn with(devices: impl IntoIterator<Item = Device>) -> Self {
        Self(Mutex::new(devices.into_iter().collect()))
    }
}

impl DeviceRepository for StubDevices {
    async fn create(&self, device: Device) -> Result<Device, FarmwatchError> {
        self.0.lock().unwrap().push(device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: &DeviceId) -> Result<Option<Device>, FarmwatchError> {
        Ok(self.0.lock().unwrap().iter().find(|d| &d.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Device>, FarmwatchError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn update(&self, device: Device) -> Result<Device, FarmwatchError> {
        let mut devices = self.0.lock().unwrap();
        if let Some(slot) = devices.iter_mut().find(|d| d.id == device.id) {
            *slot = device.clone();
        }
        Ok(device)
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), FarmwatchError> {
        self.0.lock().unwrap().retain(|d| &d.id != id);
        Ok(())
    }
}

/// Publisher that either accepts everything or fails like an unreachable broker.
#[derive(Default)]
pub struct StubPublisher {
    pub down: bool,
}

impl CommandPublisher for StubPublisher {
    async fn publish(&self, _topic: &str, _message: &ControlMessage) -> Result<(), FarmwatchError> {
        if self.down {
            return Err(FarmwatchError::Publish(Box::new(std::io::Error::other(
                "broker unreachable",
            ))));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StubActions(Mutex<Vec<ActionRecord>>);

impl ActionLog for StubActions {
    async fn record(&self, action: ActionRecord) -> Result<ActionRecord, FarmwatchError> {
        self.0.lock().unwrap().push(action.clone());
        Ok(action)
    }

    async fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, FarmwatchError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| &a.device_id == device_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct StubReadings(Mutex<Vec<SensorReading>>);

impl ReadingRepository for StubReadings {
    async fn store(&self, reading: SensorReading) -> Result<SensorReading, FarmwatchError> {
        self.0.lock().unwrap().push(reading.clone());
        Ok(reading)
    }

    async fn recent_for_device(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<SensorReading>, FarmwatchError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| &r.device_id == device_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SensorReading>, FarmwatchError> {
        Ok(self.0.lock().unwrap().iter().rev().take(limit).cloned().collect())
    }

    async fn between(
        &self,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<SensorReading>, FarmwatchError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.recorded_at >= from && r.recorded_at < until)
            .cloned()
            .collect())
    }
}

pub type TestState = AppState<StubDevices, StubPublisher, StubActions, StubReadings>;

pub fn pump(id: &str) -> Device {
    Device::builder()
        .id(id)
        .name("Irrigation pump")
        .kind(DeviceKind::Actuator)
        .topic(format!("farm/{id}"))
        .farm("North field")
        .build()
        .unwrap()
}

pub fn soil_sensor(id: &str) -> Device {
    Device::builder()
        .id(id)
        .name("Soil probe")
        .kind(DeviceKind::Sensor)
        .topic(format!("farm/{id}"))
        .build()
        .unwrap()
}

pub fn north_field() -> Farm {
    Farm {
        name: "North field".to_string(),
        location: Some("Valley road".to_string()),
        latitude: 45.5,
        longitude: -122.6,
        crop_type: Some("Corn".to_string()),
    }
}

pub fn state_with(devices: impl IntoIterator<Item = Device>, publisher: StubPublisher) -> TestState {
    AppState::new(
        StubDevices::with(devices),
        publisher,
        StubActions::default(),
        StubReadings::default(),
        vec![north_field()],
    )
}

pub fn app(state: TestState) -> Router {
    crate::router::build(state, Path::new("static"))
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await;
    (status, body)
}

pub async fn post_json(app: Router, uri: &str, json: &str) -> (StatusCode, String) {
    let (status, _, body) = send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await;
    (status, body)
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
}
