//! Device list page and the add, edit, and delete device forms.

use askama::Template;
use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_domain::device::{Device, DeviceKind};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::farm::Farm;
use farmwatch_domain::id::DeviceId;

use crate::dashboard::{DeviceView, format_value, render};
use crate::error::ApiError;
use crate::state::AppState;

/// Most recent measurement of a device, formatted for display.
pub struct LatestReading {
    temperature: String,
    humidity: String,
    moisture: String,
}

#[derive(Template)]
#[template(path = "devices.html")]
pub struct DeviceListTemplate {
    rows: Vec<(DeviceView, LatestReading)>,
}

/// `GET /device`
pub async fn list<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    let mut rows = Vec::with_capacity(devices.len());
    for device in &devices {
        let latest = state
            .reading_service
            .history(&device.id, Some(1))
            .await?
            .into_iter()
            .next();
        rows.push((
            DeviceView::from(device),
            LatestReading {
                temperature: format_value(latest.as_ref().and_then(|r| r.temperature), " °C"),
                humidity: format_value(latest.as_ref().and_then(|r| r.humidity), " %"),
                moisture: format_value(latest.as_ref().and_then(|r| r.moisture), " %"),
            },
        ));
    }

    Ok(render(&DeviceListTemplate { rows })?.into_response())
}

/// Fields posted by the add and edit device forms.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub farm: String,
    #[serde(default)]
    pub description: String,
}

impl DeviceForm {
    fn to_device(&self) -> Result<Device, FarmwatchError> {
        let kind: DeviceKind = self.kind.parse()?;
        let mut builder = Device::builder()
            .id(self.id.trim())
            .name(self.name.trim())
            .kind(kind)
            .topic(self.topic.trim());
        if !self.farm.trim().is_empty() {
            builder = builder.farm(self.farm.trim());
        }
        if !self.description.trim().is_empty() {
            builder = builder.description(self.description.trim());
        }
        builder.build()
    }
}

impl From<&Device> for DeviceForm {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.to_string(),
            name: device.name.clone(),
            kind: device.kind.as_str().to_string(),
            topic: device.topic.clone(),
            farm: device.farm.clone().unwrap_or_default(),
            description: device.description.clone().unwrap_or_default(),
        }
    }
}

/// An `<option>` of a form select.
pub struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "device_form.html")]
pub struct DeviceFormTemplate {
    heading: &'static str,
    action: String,
    editing: bool,
    values: DeviceForm,
    kinds: Vec<SelectOption>,
    farms: Vec<SelectOption>,
    error: Option<String>,
}

impl DeviceFormTemplate {
    fn add(farms: &[Farm], values: DeviceForm, error: Option<String>) -> Self {
        Self::new("Add device", "/device/add".to_string(), false, farms, values, error)
    }

    fn edit(farms: &[Farm], values: DeviceForm, error: Option<String>) -> Self {
        let action = format!("/device/{}/edit", values.id);
        Self::new("Edit device", action, true, farms, values, error)
    }

    fn new(
        heading: &'static str,
        action: String,
        editing: bool,
        farms: &[Farm],
        values: DeviceForm,
        error: Option<String>,
    ) -> Self {
        let kinds = [DeviceKind::Sensor, DeviceKind::Actuator]
            .into_iter()
            .map(|kind| SelectOption {
                value: kind.as_str().to_string(),
                label: kind_label(kind).to_string(),
                selected: values.kind == kind.as_str(),
            })
            .collect();
        let farms = farms
            .iter()
            .map(|farm| SelectOption {
                value: farm.name.clone(),
                label: farm.name.clone(),
                selected: values.farm == farm.name,
            })
            .collect();
        Self {
            heading,
            action,
            editing,
            values,
            kinds,
            farms,
            error,
        }
    }
}

fn kind_label(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Sensor => "Sensor",
        DeviceKind::Actuator => "Actuator",
    }
}

fn rejected(status: StatusCode, page: &DeviceFormTemplate) -> Result<Response, ApiError> {
    Ok((status, render(page)?).into_response())
}

/// `GET /device/add`
pub async fn new_form<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let page = DeviceFormTemplate::add(&state.farms, DeviceForm::default(), None);
    Ok(render(&page)?.into_response())
}

/// `POST /device/add` — create the device and redirect to the list.
pub async fn create<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Form(form): Form<DeviceForm>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = match form.to_device() {
        Ok(device) => device,
        Err(FarmwatchError::Validation(err)) => {
            let page = DeviceFormTemplate::add(&state.farms, form, Some(err.to_string()));
            return rejected(StatusCode::BAD_REQUEST, &page);
        }
        Err(err) => return Err(err.into()),
    };

    match state.device_service.get_device(&device.id).await {
        Ok(existing) => {
            let message = format!("A device with id {} already exists", existing.id);
            let page = DeviceFormTemplate::add(&state.farms, form, Some(message));
            return rejected(StatusCode::CONFLICT, &page);
        }
        Err(FarmwatchError::NotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }

    let device = state.device_service.create_device(device).await?;
    tracing::info!(device_id = %device.id, "device added");
    Ok(Redirect::to("/device").into_response())
}

/// `GET /device/{id}/edit` — unknown ids go back to the list.
pub async fn edit_form<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = match state.device_service.get_device(&DeviceId::from(id)).await {
        Ok(device) => device,
        Err(FarmwatchError::NotFound(_)) => return Ok(Redirect::to("/device").into_response()),
        Err(err) => return Err(err.into()),
    };

    let page = DeviceFormTemplate::edit(&state.farms, DeviceForm::from(&device), None);
    Ok(render(&page)?.into_response())
}

/// `POST /device/{id}/edit` — replace everything but the id and status.
pub async fn update<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
    Form(mut form): Form<DeviceForm>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let existing = match state.device_service.get_device(&DeviceId::from(id)).await {
        Ok(device) => device,
        Err(FarmwatchError::NotFound(_)) => return Ok(Redirect::to("/device").into_response()),
        Err(err) => return Err(err.into()),
    };

    form.id = existing.id.to_string();
    let device = match form.to_device() {
        Ok(device) => device,
        Err(FarmwatchError::Validation(err)) => {
            let page = DeviceFormTemplate::edit(&state.farms, form, Some(err.to_string()));
            return rejected(StatusCode::BAD_REQUEST, &page);
        }
        Err(err) => return Err(err.into()),
    };

    let device = state
        .device_service
        .update_device(Device {
            status: existing.status,
            ..device
        })
        .await?;
    tracing::info!(device_id = %device.id, "device updated");
    Ok(Redirect::to("/device").into_response())
}

/// `POST /device/{id}/delete` — remove the device with its history.
pub async fn delete<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let id = DeviceId::from(id);
    match state.device_service.get_device(&id).await {
        Ok(_) => {
            state.device_service.delete_device(&id).await?;
            tracing::info!(device_id = %id, "device removed");
        }
        Err(FarmwatchError::NotFound(_)) => {
            tracing::debug!(device_id = %id, "delete of unknown device ignored");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Redirect::to("/device").into_response())
}
