//! Widget descriptors — configuration read from element attributes for the
//! map and chart libraries.
//!
//! Descriptors are plain data. Turning them into live widgets is the job of
//! the browser adapter; this module only owns the attribute contract, the
//! defaults, and the translation into library configuration.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::page::{
    ATTR_BACKGROUND_COLOR, ATTR_BORDER_COLOR, ATTR_CHART_TYPE, ATTR_FARM_NAME, ATTR_LABEL,
    ATTR_LABELS, ATTR_LAT, ATTR_LNG, ATTR_VALUES,
};

/// Tile source for farm maps.
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the tile source.
pub const TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

/// Initial zoom level of farm maps.
pub const MAP_ZOOM: u8 = 13;

pub const DEFAULT_CHART_LABEL: &str = "Value";
pub const DEFAULT_BORDER_COLOR: &str = "rgb(75, 192, 192)";
pub const DEFAULT_BACKGROUND_COLOR: &str = "rgba(75, 192, 192, 0.2)";

/// Read-only attribute lookup.
pub trait Attributes {
    /// Value of the attribute `name`, or `None` when it is absent.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl Attributes for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Attributes for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Why a widget could not be configured from its attributes.
#[derive(Debug, thiserror::Error)]
pub enum WidgetConfigError {
    #[error("element has no id")]
    MissingId,

    #[error("attribute {attribute} is missing")]
    MissingAttribute { attribute: &'static str },

    #[error("attribute {attribute} is not a number: {value:?}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },

    #[error("attribute {attribute} holds malformed JSON")]
    MalformedJson {
        attribute: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown chart type: {0}")]
    UnknownChartKind(String),
}

/// Where a farm map is drawn and what it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDescriptor {
    pub element_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub farm_name: String,
}

impl MapDescriptor {
    /// Read a map descriptor from an element's id and attributes.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetConfigError`] when the element has no id or either
    /// coordinate is absent or not a finite number. A coordinate must be a
    /// number and nothing else, apart from surrounding whitespace: a trailing
    /// suffix such as `"45.5 N"` is rejected rather than read as `45.5`.
    pub fn from_attributes(
        element_id: Option<String>,
        attrs: &impl Attributes,
    ) -> Result<Self, WidgetConfigError> {
        let element_id = element_id
            .filter(|id| !id.is_empty())
            .ok_or(WidgetConfigError::MissingId)?;
        Ok(Self {
            element_id,
            latitude: coordinate(attrs, ATTR_LAT)?,
            longitude: coordinate(attrs, ATTR_LNG)?,
            farm_name: attrs.attribute(ATTR_FARM_NAME).unwrap_or_default(),
        })
    }
}

fn coordinate(attrs: &impl Attributes, attribute: &'static str) -> Result<f64, WidgetConfigError> {
    let raw = attrs
        .attribute(attribute)
        .ok_or(WidgetConfigError::MissingAttribute { attribute })?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(WidgetConfigError::InvalidNumber {
            attribute,
            value: raw,
        }),
    }
}

/// Chart types understood by the charting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Radar,
    Doughnut,
    Pie,
    PolarArea,
    Bubble,
    Scatter,
}

impl FromStr for ChartKind {
    type Err = WidgetConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "radar" => Ok(Self::Radar),
            "doughnut" => Ok(Self::Doughnut),
            "pie" => Ok(Self::Pie),
            "polarArea" => Ok(Self::PolarArea),
            "bubble" => Ok(Self::Bubble),
            "scatter" => Ok(Self::Scatter),
            other => Err(WidgetConfigError::UnknownChartKind(other.to_string())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Radar => "radar",
            Self::Doughnut => "doughnut",
            Self::Pie => "pie",
            Self::PolarArea => "polarArea",
            Self::Bubble => "bubble",
            Self::Scatter => "scatter",
        };
        f.write_str(name)
    }
}

/// A single-series chart read from a canvas element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub labels: Vec<serde_json::Value>,
    /// `None` entries are gaps in the series.
    pub values: Vec<Option<f64>>,
    pub label: String,
    pub border_color: String,
    pub background_color: String,
}

impl Default for ChartDescriptor {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            labels: Vec::new(),
            values: Vec::new(),
            label: DEFAULT_CHART_LABEL.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl ChartDescriptor {
    /// Read a chart descriptor from element attributes, applying defaults for
    /// absent ones.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetConfigError::MalformedJson`] when `data-labels` or
    /// `data-values` is not a JSON array of the expected shape, and
    /// [`WidgetConfigError::UnknownChartKind`] for an unsupported type.
    pub fn from_attributes(attrs: &impl Attributes) -> Result<Self, WidgetConfigError> {
        let defaults = Self::default();
        let kind = match attrs.attribute(ATTR_CHART_TYPE) {
            Some(kind) => kind.parse()?,
            None => defaults.kind,
        };
        Ok(Self {
            kind,
            labels: json_attribute(attrs, ATTR_LABELS)?,
            values: json_attribute(attrs, ATTR_VALUES)?,
            label: attrs.attribute(ATTR_LABEL).unwrap_or(defaults.label),
            border_color: attrs
                .attribute(ATTR_BORDER_COLOR)
                .unwrap_or(defaults.border_color),
            background_color: attrs
                .attribute(ATTR_BACKGROUND_COLOR)
                .unwrap_or(defaults.background_color),
        })
    }

    /// Configuration object handed to the charting library.
    #[must_use]
    pub fn to_config(&self) -> ChartConfig<'_> {
        ChartConfig {
            kind: self.kind,
            data: ChartData {
                labels: &self.labels,
                datasets: [Dataset {
                    label: &self.label,
                    data: &self.values,
                    border_color: &self.border_color,
                    background_color: &self.background_color,
                    tension: 0.1,
                    fill: true,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                scales: Scales {
                    y: Axis {
                        begin_at_zero: true,
                    },
                },
            },
        }
    }
}

fn json_attribute<T>(attrs: &impl Attributes, attribute: &'static str) -> Result<Vec<T>, WidgetConfigError>
where
    T: serde::de::DeserializeOwned,
{
    match attrs.attribute(attribute) {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|source| WidgetConfigError::MalformedJson { attribute, source }),
        None => Ok(Vec::new()),
    }
}

/// Chart library configuration, serialized as JSON.
#[derive(Debug, Serialize)]
pub struct ChartConfig<'a> {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData<'a>,
    pub options: ChartOptions,
}

#[derive(Debug, Serialize)]
pub struct ChartData<'a> {
    pub labels: &'a [serde_json::Value],
    pub datasets: [Dataset<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset<'a> {
    pub label: &'a str,
    pub data: &'a [Option<f64>],
    pub border_color: &'a str,
    pub background_color: &'a str,
    pub tension: f64,
    pub fill: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
}

#[derive(Debug, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}
