use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {}, Longitude: {}",
            self.get_latitude(),
            self.get_longitude()
        )
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Latitude with at most 4 decimals, the finest precision api.weather.gov accepts.
    pub fn get_latitude(&self) -> String {
        trim_decimals(self.latitude)
    }

    pub fn get_longitude(&self) -> String {
        trim_decimals(self.longitude)
    }
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => String::from("0"),
        other => other.to_string(),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LocationError {
    #[error("no location available, set latitude and longitude")]
    Unavailable,
}

/// Supplies where the observer is; asked once per forecast cycle.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

pub struct FixedLocator {
    coordinate: Option<Coordinate>,
}

impl FixedLocator {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        FixedLocator { coordinate }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        self.coordinate.ok_or(LocationError::Unavailable)
    }
}
