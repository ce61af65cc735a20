use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Geographic point where an item was lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation(format!(
                "latitude {latitude} is out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(format!(
                "longitude {longitude} is out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Coordinates must be supplied together or not at all.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, DomainError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::Validation(
                "latitude and longitude must be provided together".to_string(),
            )),
        }
    }
}
