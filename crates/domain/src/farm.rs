//! Farm — a named plot of land shown on a map.

use serde::{Deserialize, Serialize};

use crate::error::{FarmwatchError, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub name: String,
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub crop_type: Option<String>,
}

impl Farm {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] when the name is empty or a
    /// coordinate is outside the WGS84 range.
    pub fn validate(&self) -> Result<(), FarmwatchError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::CoordinateOutOfRange {
                axis: "latitude",
                value: self.latitude.to_string(),
            }
            .into());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::CoordinateOutOfRange {
                axis: "longitude",
                value: self.longitude.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Element id of this farm's map on a page listing farms at `index`.
    #[must_use]
    pub fn map_element_id(index: usize) -> String {
        format!("farm-map-{index}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm(latitude: f64, longitude: f64) -> Farm {
        Farm {
            name: "North Field".to_string(),
            location: None,
            latitude,
            longitude,
            crop_type: Some("rice".to_string()),
        }
    }

    #[test]
    fn should_accept_coordinates_in_range() {
        assert!(farm(-6.91, 107.61).validate().is_ok());
        assert!(farm(90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn should_reject_latitude_out_of_range() {
        let result = farm(91.0, 0.0).validate();
        assert!(matches!(
            result,
            Err(FarmwatchError::Validation(
                ValidationError::CoordinateOutOfRange { axis: "latitude", .. }
            ))
        ));
    }

    #[test]
    fn should_reject_nan_longitude() {
        assert!(farm(0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn should_reject_empty_name() {
        let mut f = farm(0.0, 0.0);
        f.name.clear();
        assert!(f.validate().is_err());
    }
}
