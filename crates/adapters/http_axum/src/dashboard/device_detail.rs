//! Device detail page: status, controls, reading charts, and command history.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_app::services::reading_service::DEFAULT_HISTORY_LIMIT;
use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::{Metric, SensorReading, series};
use farmwatch_domain::widget::ChartKind;

use crate::dashboard::{DeviceView, FarmView, format_value, render};
use crate::error::ApiError;
use crate::state::AppState;

const ACTION_HISTORY_LIMIT: usize = 20;

fn palette(metric: Metric) -> (&'static str, &'static str) {
    match metric {
        Metric::Temperature => ("rgb(255, 99, 132)", "rgba(255, 99, 132, 0.2)"),
        Metric::Humidity => ("rgb(54, 162, 235)", "rgba(54, 162, 235, 0.2)"),
        Metric::Moisture => ("rgb(75, 192, 192)", "rgba(75, 192, 192, 0.2)"),
    }
}

/// Attributes of one `.sensor-chart` canvas.
pub struct ChartView {
    pub kind: String,
    pub label: &'static str,
    pub labels_json: String,
    pub values_json: String,
    pub border_color: &'static str,
    pub background_color: &'static str,
}

impl ChartView {
    fn new(readings: &[SensorReading], metric: Metric) -> Self {
        let (labels, values) = series(readings, metric);
        let (border_color, background_color) = palette(metric);
        Self {
            kind: ChartKind::Line.to_string(),
            label: metric.label(),
            labels_json: serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string()),
            values_json: serde_json::to_string(&values).unwrap_or_else(|_| "[]".to_string()),
            border_color,
            background_color,
        }
    }
}

pub struct ReadingRow {
    time: String,
    temperature: String,
    humidity: String,
    moisture: String,
}

impl From<&SensorReading> for ReadingRow {
    fn from(reading: &SensorReading) -> Self {
        Self {
            time: reading.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            temperature: format_value(reading.temperature, " °C"),
            humidity: format_value(reading.humidity, " %"),
            moisture: format_value(reading.moisture, " %"),
        }
    }
}

pub struct ActionRow {
    time: String,
    command: &'static str,
    source: &'static str,
}

impl From<&ActionRecord> for ActionRow {
    fn from(action: &ActionRecord) -> Self {
        Self {
            time: action.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            command: action.command.as_str(),
            source: action.source.as_str(),
        }
    }
}

#[derive(Template)]
#[template(path = "device_detail.html")]
pub struct DeviceDetailTemplate {
    device: DeviceView,
    farm: Option<FarmView>,
    charts: Vec<ChartView>,
    readings: Vec<ReadingRow>,
    actions: Vec<ActionRow>,
}

/// `GET /device/{id}` — unknown devices redirect to the device list.
pub async fn show<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = match state.device_service.get_device(&DeviceId::new(id)).await {
        Ok(device) => device,
        Err(FarmwatchError::NotFound(err)) => {
            tracing::debug!(%err, "device page requested for unknown device");
            return Ok(Redirect::to("/device").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let readings = state
        .reading_service
        .history(&device.id, Some(DEFAULT_HISTORY_LIMIT))
        .await?;
    let actions = state
        .control_service
        .history(&device.id, ACTION_HISTORY_LIMIT)
        .await?;
    let farm = device.farm.as_deref().and_then(|name| {
        state
            .farms
            .iter()
            .enumerate()
            .find(|(_, farm)| farm.name == name)
            .map(|(index, farm)| FarmView::new(index, farm))
    });

    let page = DeviceDetailTemplate {
        device: DeviceView::from(&device),
        farm,
        charts: if readings.is_empty() {
            Vec::new()
        } else {
            Metric::ALL
                .iter()
                .map(|&metric| ChartView::new(&readings, metric))
                .collect()
        },
        readings: readings.iter().map(ReadingRow::from).collect(),
        actions: actions.iter().map(ActionRow::from).collect(),
    };
    Ok(render(&page)?.into_response())
}
