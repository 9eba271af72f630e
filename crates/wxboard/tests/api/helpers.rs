use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use mockall::mock;
use serde_json::{json, Value};
use slog::{o, Logger};
use time::{
    format_description::well_known::Rfc3339, macros::offset, Duration, OffsetDateTime,
};
use wxboard::{
    Board, Coordinate, FetchError, FixedLocator, HtmlPage, JsonFetcher, LiveSource, Normalizer,
    Pipeline, Settings,
};

pub const POINTS_URL: &str = "https://api.weather.gov/points/44.98,-93.27";
pub const HOURLY_URL: &str = "https://api.weather.gov/gridpoints/MPX/107,71/forecast/hourly";
pub const UV_URL: &str =
    "https://data.epa.gov/efservice/getEnvirofactsUVHourly/LATITUDE/44.98/LONGITUDE/-93.27/JSON";
pub const MESONET_URL: &str =
    "https://mesonet.agron.iastate.edu/json/current.py?network=MN_ASOS&station=MSP";
pub const PROXY_URL: &str = "http://127.0.0.1:8080/current";

mock! {
    pub Fetcher {}
    #[async_trait]
    impl JsonFetcher for Fetcher {
        async fn fetch_json(&self, url: &str, fresh: bool) -> Result<Value, FetchError>;
    }
}

pub fn test_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

pub fn test_settings() -> Settings {
    Settings {
        coordinate: Some(Coordinate::new(44.98, -93.27)),
        utc_offset: Some(offset!(-6)),
        output: None,
        ..Default::default()
    }
}

pub fn spawn_pipeline(fetcher: MockFetcher, settings: Settings) -> Pipeline {
    let logger = test_logger();
    let board = Arc::new(Board::new(
        logger.clone(),
        HtmlPage::new("Weather"),
        settings.output.clone(),
    ));
    let normalizer = Normalizer::new(settings.utc_offset.unwrap_or(offset!(-6)));
    Pipeline::new(
        logger,
        &settings,
        Arc::new(fetcher),
        Arc::new(FixedLocator::new(settings.coordinate)),
        board,
        normalizer,
    )
}

pub fn proxy_settings() -> Settings {
    Settings {
        live_source: LiveSource::Proxy {
            url: String::from(PROXY_URL),
        },
        ..test_settings()
    }
}

pub fn output_settings(output: PathBuf) -> Settings {
    Settings {
        output: Some(output),
        ..test_settings()
    }
}

pub fn network_failure(url: &str) -> FetchError {
    FetchError::Send {
        url: url.to_string(),
        reason: String::from("connection refused"),
    }
}

pub fn points_body() -> Value {
    json!({
        "id": "https://api.weather.gov/points/44.98,-93.27",
        "properties": {
            "gridId": "MPX",
            "gridX": 107,
            "gridY": 71,
            "forecast": "https://api.weather.gov/gridpoints/MPX/107,71/forecast",
            "forecastHourly": HOURLY_URL,
            "timeZone": "America/Chicago",
            "relativeLocation": {
                "properties": { "city": "Minneapolis", "state": "MN" }
            }
        }
    })
}

pub fn period(start_time: &str, temperature: i64) -> Value {
    json!({
        "number": 1,
        "name": "",
        "startTime": start_time,
        "endTime": start_time,
        "isDaytime": true,
        "temperature": temperature,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 10 },
        "windSpeed": "10 mph",
        "windDirection": "NW",
        "icon": "https://api.weather.gov/icons/land/day/sct?size=small",
        "shortForecast": "Partly Sunny",
        "detailedForecast": ""
    })
}

pub fn hourly_body(periods: Vec<Value>) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "units": "us",
            "generatedAt": "2024-01-01T18:30:00+00:00",
            "periods": periods
        }
    })
}

/// `count` consecutive hourly periods starting at midnight on 2024-01-01, central time.
pub fn hourly_periods(count: i64) -> Vec<Value> {
    let midnight = OffsetDateTime::new_in_offset(
        time::Date::from_calendar_date(2024, time::Month::January, 1).unwrap(),
        time::Time::MIDNIGHT,
        offset!(-6),
    );
    (0..count)
        .map(|i| {
            let start = (midnight + Duration::hours(i)).format(&Rfc3339).unwrap();
            period(&start, 20 + i)
        })
        .collect()
}

pub fn uv_entry(date_time: &str, uv_value: i64) -> Value {
    json!({
        "ORDER": 1,
        "ZIP": 55401,
        "CITY": "MINNEAPOLIS",
        "STATE": "MN",
        "DATE_TIME": date_time,
        "UV_VALUE": uv_value
    })
}

/// Serves the points, hourly and uv documents; anything else is a test bug.
pub fn serve_forecast_feeds(fetcher: &mut MockFetcher, hourly: Value, uv: Value) {
    fetcher
        .expect_fetch_json()
        .returning(move |url, fresh| match url {
            POINTS_URL => Ok(points_body()),
            HOURLY_URL => {
                assert!(fresh, "hourly forecast must bypass caches");
                Ok(hourly.clone())
            }
            UV_URL => Ok(uv.clone()),
            other => panic!("unexpected url {}", other),
        });
}

pub fn minutes_ago(minutes: i64) -> String {
    (OffsetDateTime::now_utc() - Duration::minutes(minutes))
        .format(&Rfc3339)
        .unwrap()
}
