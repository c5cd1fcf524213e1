//! Alert — a transient, auto-dismissing notification.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Id of the fixed-position element that hosts all alerts.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// Class list of the alert container.
pub const ALERT_CONTAINER_CLASS: &str = "position-fixed top-0 end-0 p-3";

/// Stacking order of the alert container.
pub const ALERT_CONTAINER_Z_INDEX: &str = "1050";

/// How long an alert stays visible before it is removed.
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// Message shown when a control request fails before a response is read.
pub const GENERIC_CONTROL_FAILURE: &str = "An error occurred while controlling the device";

/// Visual severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Bootstrap contextual class, e.g. `alert-success`.
    #[must_use]
    pub fn css_class(self) -> String {
        format!("alert-{}", self.as_str())
    }
}

/// Identifier of a rendered alert, derived from the time it was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlertId(i64);

impl AlertId {
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Next id after `previous` for a clock reading of `now_millis`.
    ///
    /// Ids stay strictly increasing even when several alerts are shown within
    /// the same millisecond or the clock steps backwards.
    #[must_use]
    pub fn next(previous: Option<Self>, now_millis: i64) -> Self {
        match previous {
            Some(prev) if prev.0 >= now_millis => Self(prev.0 + 1),
            _ => Self(now_millis),
        }
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// A notification ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    /// Full class attribute of the alert block.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!(
            "alert {} alert-dismissible fade show",
            self.severity.css_class()
        )
    }
}
