use slog::{debug, Logger};
use std::sync::Arc;

use crate::{
    models::epa::UvHour, parse_uv_stamp, Coordinate, CycleError, HourStamp, JsonFetcher,
    TimestampError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct UvRecord {
    pub stamp: HourStamp,
    pub uv_value: f64,
}

impl TryFrom<UvHour> for UvRecord {
    type Error = TimestampError;
    fn try_from(value: UvHour) -> Result<Self, Self::Error> {
        Ok(UvRecord {
            stamp: parse_uv_stamp(&value.date_time)?,
            uv_value: value.uv_value,
        })
    }
}

pub struct UvService {
    logger: Logger,
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
}

impl UvService {
    pub fn new(logger: Logger, fetcher: Arc<dyn JsonFetcher>, base_url: &str) -> Self {
        UvService {
            logger,
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn uv_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/getEnvirofactsUVHourly/LATITUDE/{}/LONGITUDE/{}/JSON",
            self.base_url,
            coordinate.get_latitude(),
            coordinate.get_longitude()
        )
    }

    /// Every hour the feed returns; the feed already scopes itself to the current day.
    pub async fn get_readings(&self, coordinate: &Coordinate) -> Result<Vec<UvRecord>, CycleError> {
        let raw_hours: Vec<UvHour> =
            serde_json::from_value(self.fetcher.fetch_json(&self.uv_url(coordinate), false).await?)?;
        let readings = raw_hours
            .into_iter()
            .map(UvRecord::try_from)
            .collect::<Result<Vec<UvRecord>, TimestampError>>()?;
        debug!(self.logger, "uv readings: {}", readings.len());
        Ok(readings)
    }
}
