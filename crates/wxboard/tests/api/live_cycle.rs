use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde_json::json;
use wxboard::CycleError;

use crate::helpers::{
    minutes_ago, network_failure, proxy_settings, spawn_pipeline, test_settings, MockFetcher,
    MESONET_URL, PROXY_URL,
};

#[tokio::test]
async fn mesonet_snapshot_fills_live_fields() {
    let mut fetcher = MockFetcher::new();
    let observed = minutes_ago(5);
    fetcher
        .expect_fetch_json()
        .withf(|url, fresh| url.to_string() == MESONET_URL && *fresh)
        .times(1)
        .returning(move |_, _| {
            Ok(json!({
                "id": "MSP",
                "network": "MN_ASOS",
                "last_ob": {
                    "utc_valid": observed.clone(),
                    "windspeed[kt]": 10.0,
                    "winddirection[deg]": 270.0,
                    "airtemp[F]": 72.14
                }
            }))
        });
    let pipeline = spawn_pipeline(fetcher, test_settings());

    pipeline.live_cycle().await.unwrap();

    let page = pipeline.board().snapshot().await;
    assert_eq!(page.text("age"), Some("5"));
    assert_eq!(page.text("wind_speed"), Some("11.5"));
    assert_eq!(page.text("wind_direction"), Some("270"));
    assert_eq!(page.text("temperature"), Some("72.1"));
    assert_eq!(page.text("humidity"), Some("n/a"));
    assert_eq!(page.text("apparent"), Some("n/a"));
    assert_eq!(page.text("visibility"), Some("n/a"));
}

#[tokio::test]
async fn missing_readings_render_as_not_available() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch_json().returning(|_, _| {
        Ok(json!({
            "id": "MSP",
            "last_ob": {
                "utc_valid": null,
                "windspeed[kt]": null,
                "winddirection[deg]": null,
                "airtemp[F]": null
            }
        }))
    });
    let pipeline = spawn_pipeline(fetcher, test_settings());

    pipeline.live_cycle().await.unwrap();

    let page = pipeline.board().snapshot().await;
    for id in ["age", "time", "wind_speed", "wind_direction", "temperature"] {
        assert_eq!(page.text(id), Some("n/a"), "{}", id);
    }
}

#[tokio::test]
async fn proxy_document_converts_units() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch_json()
        .withf(|url, fresh| url.to_string() == PROXY_URL && *fresh)
        .returning(|_, _| {
            Ok(json!({
                "observed_at": "2024-01-01T20:05:00Z",
                "wind_speed_kt": "8 KT",
                "wind_direction_deg": 200,
                "temperature": "21.5 C",
                "humidity": 55,
                "heat_index": "N/A",
                "wind_chill": "65 F",
                "visibility_km": 16.09
            }))
        });
    let pipeline = spawn_pipeline(fetcher, proxy_settings());

    pipeline.live_cycle().await.unwrap();

    let page = pipeline.board().snapshot().await;
    assert_eq!(page.text("time"), Some("14:05"));
    assert_eq!(page.text("wind_speed"), Some("9.2"));
    assert_eq!(page.text("wind_direction"), Some("200"));
    assert_eq!(page.text("temperature"), Some("70.7"));
    assert_eq!(page.text("humidity"), Some("55"));
    assert_eq!(page.text("apparent"), Some("65"));
    assert_eq!(page.text("visibility"), Some("10"));
}

#[tokio::test]
async fn failed_refresh_keeps_last_values() {
    let mut fetcher = MockFetcher::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let observed = minutes_ago(1);
    let counter = calls.clone();
    fetcher.expect_fetch_json().returning(move |url, _| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(json!({
                "last_ob": {
                    "utc_valid": observed.clone(),
                    "windspeed[kt]": 0.0,
                    "winddirection[deg]": 0.0,
                    "airtemp[F]": 50.0
                }
            }))
        } else {
            Err(network_failure(url))
        }
    });
    let pipeline = spawn_pipeline(fetcher, test_settings());

    pipeline.live_cycle().await.unwrap();
    let outcome = pipeline.live_cycle().await;

    assert!(matches!(outcome, Err(CycleError::Fetch(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let page = pipeline.board().snapshot().await;
    assert_eq!(page.text("temperature"), Some("50"));
    assert_eq!(page.text("wind_speed"), Some("0"));
}

#[tokio::test]
async fn unparseable_observation_time_fails_the_cycle() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch_json().returning(|_, _| {
        Ok(json!({
            "observed_at": "yesterday",
            "temperature": 70
        }))
    });
    let pipeline = spawn_pipeline(fetcher, proxy_settings());

    let outcome = pipeline.live_cycle().await;

    assert!(matches!(outcome, Err(CycleError::Timestamp(_))));
    assert_eq!(pipeline.board().snapshot().await.text("temperature"), None);
}
