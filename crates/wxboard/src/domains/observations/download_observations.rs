use slog::{debug, Logger};
use std::{fmt, sync::Arc};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    models::{mesonet::CurrentRoot, proxy::ProxyObservation},
    CycleError, JsonFetcher, TimestampError,
};

/// Where current conditions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveSource {
    /// A fixed ASOS station on the Iowa Environmental Mesonet.
    Mesonet { network: String, station: String },
    /// A proxied flat json document, see [`ProxyObservation`].
    Proxy { url: String },
}

impl fmt::Display for LiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveSource::Mesonet { network, station } => {
                write!(f, "mesonet station {} ({})", station, network)
            }
            LiveSource::Proxy { url } => write!(f, "proxy {}", url),
        }
    }
}

/// One snapshot of current conditions, any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveObservation {
    pub observed_at: Option<OffsetDateTime>,
    pub wind_speed_kt: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub temperature_f: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub apparent_f: Option<f64>,
    pub visibility_km: Option<f64>,
}

fn parse_observed_at(value: Option<String>) -> Result<Option<OffsetDateTime>, TimestampError> {
    value
        .map(|raw| {
            OffsetDateTime::parse(&raw, &Rfc3339)
                .map_err(|source| TimestampError::Instant { value: raw, source })
        })
        .transpose()
}

impl TryFrom<CurrentRoot> for LiveObservation {
    type Error = TimestampError;
    fn try_from(val: CurrentRoot) -> Result<Self, Self::Error> {
        let last_ob = val.last_ob;
        Ok(LiveObservation {
            observed_at: parse_observed_at(last_ob.utc_valid)?,
            wind_speed_kt: last_ob.wind_speed_kt,
            wind_direction_deg: last_ob.wind_direction_deg,
            temperature_f: last_ob.air_temp_f,
            ..Default::default()
        })
    }
}

impl TryFrom<ProxyObservation> for LiveObservation {
    type Error = TimestampError;
    fn try_from(val: ProxyObservation) -> Result<Self, Self::Error> {
        // heat index wins whenever the feed reports one
        let apparent_f = val
            .heat_index
            .as_ref()
            .and_then(|reading| reading.fahrenheit())
            .or_else(|| val.wind_chill.as_ref().and_then(|reading| reading.fahrenheit()));
        Ok(LiveObservation {
            observed_at: parse_observed_at(val.observed_at)?,
            wind_speed_kt: val.wind_speed_kt.and_then(|reading| reading.value()),
            wind_direction_deg: val.wind_direction_deg.and_then(|reading| reading.value()),
            temperature_f: val.temperature.and_then(|reading| reading.fahrenheit()),
            humidity_pct: val.humidity.and_then(|reading| reading.value()),
            apparent_f,
            visibility_km: val.visibility_km.and_then(|reading| reading.value()),
        })
    }
}

pub struct LiveObservationService {
    logger: Logger,
    fetcher: Arc<dyn JsonFetcher>,
    source: LiveSource,
    mesonet_url: String,
}

impl LiveObservationService {
    pub fn new(
        logger: Logger,
        fetcher: Arc<dyn JsonFetcher>,
        source: LiveSource,
        mesonet_url: &str,
    ) -> Self {
        LiveObservationService {
            logger,
            fetcher,
            source,
            mesonet_url: mesonet_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn source_url(&self) -> String {
        match &self.source {
            LiveSource::Mesonet { network, station } => format!(
                "{}/json/current.py?network={}&station={}",
                self.mesonet_url, network, station
            ),
            LiveSource::Proxy { url } => url.clone(),
        }
    }

    pub async fn latest(&self) -> Result<LiveObservation, CycleError> {
        let raw = self.fetcher.fetch_json(&self.source_url(), true).await?;
        let observation: LiveObservation = match &self.source {
            LiveSource::Mesonet { .. } => serde_json::from_value::<CurrentRoot>(raw)?.try_into()?,
            LiveSource::Proxy { .. } => {
                serde_json::from_value::<ProxyObservation>(raw)?.try_into()?
            }
        };
        debug!(self.logger, "live observation from {}: {:?}", self.source, observation);
        Ok(observation)
    }
}
