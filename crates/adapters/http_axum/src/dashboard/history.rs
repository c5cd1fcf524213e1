//! Reading history pages: the latest readings of every device, and the
//! readings of one calendar day.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::reading::SensorReading;
use farmwatch_domain::time::{Day, now, parse_day};

use crate::dashboard::{format_value, render};
use crate::error::ApiError;
use crate::state::AppState;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// One reading with the name of the device that reported it.
pub struct HistoryRow {
    time: String,
    device_id: String,
    device_name: String,
    temperature: String,
    humidity: String,
    moisture: String,
}

impl HistoryRow {
    fn new(reading: &SensorReading, names: &HashMap<String, String>) -> Self {
        let device_id = reading.device_id.to_string();
        Self {
            time: reading.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            device_name: names
                .get(&device_id)
                .cloned()
                .unwrap_or_else(|| device_id.clone()),
            device_id,
            temperature: format_value(reading.temperature, " °C"),
            humidity: format_value(reading.humidity, " %"),
            moisture: format_value(reading.moisture, " %"),
        }
    }
}

#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    rows: Vec<HistoryRow>,
}

#[derive(Template)]
#[template(path = "history_daily.html")]
pub struct DailyHistoryTemplate {
    date: String,
    previous: String,
    next: String,
    rows: Vec<HistoryRow>,
}

async fn rows<DR, P, AL, RR>(
    state: &AppState<DR, P, AL, RR>,
    readings: &[SensorReading],
) -> Result<Vec<HistoryRow>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let names: HashMap<String, String> = state
        .device_service
        .list_devices()
        .await?
        .into_iter()
        .map(|d| (d.id.to_string(), d.name))
        .collect();
    Ok(readings.iter().map(|r| HistoryRow::new(r, &names)).collect())
}

/// `GET /history`
pub async fn latest<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let readings = state.reading_service.latest(None).await?;
    let rows = rows(&state, &readings).await?;
    Ok(render(&HistoryTemplate { rows })?.into_response())
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    date: Option<String>,
}

/// `GET /history/daily?date=YYYY-MM-DD`, today (UTC) when no date is given.
pub async fn daily<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Query(query): Query<DailyQuery>,
) -> Result<Response, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let day: Day = match query.date.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_day(raw).map_err(FarmwatchError::from)?,
        None => now().date_naive(),
    };

    let readings = state.reading_service.on_day(day).await?;
    let rows = rows(&state, &readings).await?;
    let template = DailyHistoryTemplate {
        date: day.format(DAY_FORMAT).to_string(),
        previous: day.pred_opt().unwrap_or(day).format(DAY_FORMAT).to_string(),
        next: day.succ_opt().unwrap_or(day).format(DAY_FORMAT).to_string(),
        rows,
    };
    Ok(render(&template)?.into_response())
}
