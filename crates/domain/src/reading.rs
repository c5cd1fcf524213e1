//! Sensor reading — one measurement reported by a device.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, ReadingId};
use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: ReadingId,
    pub device_id: DeviceId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub moisture: Option<f64>,
    pub recorded_at: Timestamp,
}

/// Which quantity of a reading to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Moisture,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Moisture];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Moisture => "Moisture",
        }
    }

    #[must_use]
    pub fn value(self, reading: &SensorReading) -> Option<f64> {
        match self {
            Self::Temperature => reading.temperature,
            Self::Humidity => reading.humidity,
            Self::Moisture => reading.moisture,
        }
    }
}

/// Chronological series of `metric` over `readings` (given newest first).
///
/// Returns `(labels, values)` ready for the `data-labels` / `data-values`
/// attributes of a chart element.
#[must_use]
pub fn series(readings: &[SensorReading], metric: Metric) -> (Vec<String>, Vec<Option<f64>>) {
    readings
        .iter()
        .rev()
        .map(|r| (r.recorded_at.format("%H:%M").to_string(), metric.value(r)))
        .unzip()
}
