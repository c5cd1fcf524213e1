//! Page contract — selectors, attribute names, ids, and classes shared by
//! the server-rendered pages and the browser adapter.

use std::time::Duration;

use crate::command::Command;
use crate::id::DeviceId;

pub const ATTR_TOGGLE: &str = "data-bs-toggle";
pub const ATTR_LAT: &str = "data-lat";
pub const ATTR_LNG: &str = "data-lng";
pub const ATTR_FARM_NAME: &str = "data-farm-name";
pub const ATTR_CHART_TYPE: &str = "data-chart-type";
pub const ATTR_LABELS: &str = "data-labels";
pub const ATTR_VALUES: &str = "data-values";
pub const ATTR_LABEL: &str = "data-label";
pub const ATTR_BORDER_COLOR: &str = "data-border-color";
pub const ATTR_BACKGROUND_COLOR: &str = "data-background-color";
pub const ATTR_DEVICE_ID: &str = "data-device-id";
pub const ATTR_COMMAND: &str = "data-command";

/// Class marking the control button of the last successful command.
pub const ACTIVE_CLASS: &str = "active";

/// Class that makes a form render its validation feedback.
pub const VALIDATED_CLASS: &str = "was-validated";

/// Period of the device status refresh.
pub const POLL_INTERVAL: Duration = Duration::from_millis(30_000);

/// Routes on which the status refresh runs.
pub const POLLED_ROUTES: [&str; 2] = ["/", "/device"];

/// Categories of elements the bootstrapper attaches behaviour to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Tooltip,
    Popover,
    FarmMap,
    SensorChart,
    DeviceControl,
    NeedsValidation,
}

impl Marker {
    pub const ALL: [Self; 6] = [
        Self::Tooltip,
        Self::Popover,
        Self::FarmMap,
        Self::SensorChart,
        Self::DeviceControl,
        Self::NeedsValidation,
    ];

    /// CSS selector matching every element of this category.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::Tooltip => r#"[data-bs-toggle="tooltip"]"#,
            Self::Popover => r#"[data-bs-toggle="popover"]"#,
            Self::FarmMap => ".farm-map",
            Self::SensorChart => ".sensor-chart",
            Self::DeviceControl => ".device-control",
            Self::NeedsValidation => ".needs-validation",
        }
    }
}

/// Selector of the control button issuing `command` for `device_id`.
///
/// The id is escaped as a CSS string, so an odd id only ever matches its own
/// button.
#[must_use]
pub fn control_button_selector(device_id: &DeviceId, command: Command) -> String {
    format!(
        r#"{}[{ATTR_DEVICE_ID}="{}"][{ATTR_COMMAND}="{command}"]"#,
        Marker::DeviceControl.selector(),
        css_string(device_id.as_str())
    )
}

/// Escape `value` for use between double quotes in a CSS selector.
fn css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push('\u{FFFD}'),
            c if c.is_control() => {
                escaped.push_str(&format!("\\{:x} ", u32::from(c)));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Element id of the status badge of `device_id`.
#[must_use]
pub fn status_badge_id(device_id: &DeviceId) -> String {
    format!("device-{device_id}-status")
}

/// Whether the status refresh runs on `path`.
#[must_use]
pub fn is_polled_route(path: &str) -> bool {
    POLLED_ROUTES.contains(&path)
}
