use slog::{debug, Logger};
use std::sync::Arc;

use crate::{
    models::noaa::{ForecastRoot, Period, PointsRoot},
    parse_feed_hour, Coordinate, CycleError, HourStamp, JsonFetcher, TimestampError,
};

/// Number of hourly periods kept from the feed: the current hour and the twelve after it.
pub const FORECAST_HOURS: usize = 13;

#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    pub stamp: HourStamp,
    pub temperature: Option<f64>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub precipitation_chance: Option<i64>,
    pub short_forecast: Option<String>,
    pub icon: Option<String>,
}

impl HourRecord {
    pub fn from_period(period: Period, base_url: &str) -> Result<Self, TimestampError> {
        Ok(HourRecord {
            stamp: parse_feed_hour(&period.start_time)?,
            temperature: period.temperature,
            wind_speed: period.wind_speed,
            wind_direction: period.wind_direction,
            precipitation_chance: period
                .probability_of_precipitation
                .and_then(|precipitation| precipitation.value),
            short_forecast: period.short_forecast,
            icon: period.icon.map(|icon| absolute_icon(base_url, icon)),
        })
    }
}

// Older payloads carried icon paths relative to the api host.
fn absolute_icon(base_url: &str, icon: String) -> String {
    if icon.starts_with("http://") || icon.starts_with("https://") {
        icon
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), icon)
    }
}

pub struct ForecastService {
    logger: Logger,
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    hours: usize,
}

impl ForecastService {
    pub fn new(
        logger: Logger,
        fetcher: Arc<dyn JsonFetcher>,
        base_url: &str,
        hours: usize,
    ) -> Self {
        ForecastService {
            logger,
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            hours,
        }
    }

    pub fn points_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}/points/{},{}",
            self.base_url,
            coordinate.get_latitude(),
            coordinate.get_longitude()
        )
    }

    /// Resolves the coordinate's forecast grid, then pulls its hourly periods.
    pub async fn get_hours(&self, coordinate: &Coordinate) -> Result<Vec<HourRecord>, CycleError> {
        let points: PointsRoot =
            serde_json::from_value(self.fetcher.fetch_json(&self.points_url(coordinate), false).await?)?;
        let hourly_url = points.properties.forecast_hourly;
        debug!(
            self.logger,
            "hourly forecast url: {} (grid time zone: {})",
            hourly_url,
            points.properties.time_zone.as_deref().unwrap_or("unknown")
        );

        let forecast: ForecastRoot =
            serde_json::from_value(self.fetcher.fetch_json(&hourly_url, true).await?)?;
        let total = forecast.properties.periods.len();

        let hours = forecast
            .properties
            .periods
            .into_iter()
            .take(self.hours)
            .map(|period| HourRecord::from_period(period, &self.base_url))
            .collect::<Result<Vec<HourRecord>, TimestampError>>()?;
        debug!(
            self.logger,
            "kept {} of {} forecast periods",
            hours.len(),
            total
        );
        Ok(hours)
    }
}
