//! Integration tests for Windy Pinwheel
//!
//! The full pipeline runs against mock Open-Meteo and Nominatim servers.

use std::process::Command;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};
use windy_pinwheel::animation::{RotationAnimator, RotationState, frame_channel};
use windy_pinwheel::config::PinwheelConfig;
use windy_pinwheel::{Query, WindOrchestrator, WindResolver, WindResult};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

fn config_for(server: &MockServer) -> PinwheelConfig {
    let mut config = PinwheelConfig::default();
    config.weather.forecast_url = format!("{}/v1/forecast", server.uri());
    config.weather.archive_url = format!("{}/v1/archive", server.uri());
    config.geocoding.base_url = format!("{}/reverse", server.uri());
    config
}

fn resolver_for(server: &MockServer) -> WindResolver {
    WindResolver::from_config(&config_for(server)).unwrap()
}

fn hourly(noon_speed: f64, noon_direction: u16, len: usize) -> Value {
    let mut speeds = vec![1.0; len];
    let mut directions = vec![10; len];
    if len > 12 {
        speeds[12] = noon_speed;
        directions[12] = noon_direction;
    }
    json!({
        "time": (0..len).map(|h| format!("2024-01-01T{h:02}:00")).collect::<Vec<_>>(),
        "wind_speed_10m": speeds,
        "wind_direction_10m": directions
    })
}

async fn mount_place(server: &MockServer, address: Value) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": address })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_forecast_current_reading_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("start_date", "2024-09-01"))
        .and(query_param("end_date", "2024-09-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": { "time": "2024-09-01T10:00", "wind_speed_10m": 12.3, "wind_direction_10m": 270 },
            "hourly": hourly(2.0, 20, 24)
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_place(&server, json!({ "city": "London", "country": "United Kingdom" })).await;

    let result = resolver_for(&server)
        .resolve_wind_on(&Query::new(51.505, -0.09, today()), today())
        .await;

    assert_eq!(
        result,
        WindResult {
            speed_kmh: 12.3,
            direction_deg: 270,
            location_name: "London, United Kingdom".to_string(),
            failed: false,
        }
    );
}

#[tokio::test]
async fn test_archive_noon_reading_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .and(query_param("start_date", "2010-07-04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": hourly(7.0, 90, 24)
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_place(&server, json!({ "village": "Grindelwald", "country": "Switzerland" })).await;

    let date = NaiveDate::from_ymd_opt(2010, 7, 4).unwrap();
    let result = resolver_for(&server)
        .resolve_wind_on(&Query::new(46.62, 8.04, date), today())
        .await;

    assert_eq!(result.speed_kmh, 7.0);
    assert_eq!(result.direction_deg, 90);
    assert_eq!(result.location_name, "Grindelwald, Switzerland");
    assert!(!result.failed);
}

#[tokio::test]
async fn test_archive_short_day_reads_as_calm() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": hourly(7.0, 90, 12)
        })))
        .mount(&server)
        .await;
    mount_place(&server, json!({ "country": "Chad" })).await;

    let date = today() - Duration::days(30);
    let result = resolver_for(&server)
        .resolve_wind_on(&Query::new(15.0, 19.0, date), today())
        .await;

    assert!(!result.failed);
    assert_eq!(result.speed_kmh, 0.0);
    assert_eq!(result.direction_deg, 0);
    assert_eq!(result.location_name, "Chad");
}

#[tokio::test]
async fn test_geocoding_failure_keeps_wind_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": { "wind_speed_10m": 18.2, "wind_direction_10m": 45 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = resolver_for(&server)
        .resolve_wind_on(&Query::new(0.0, 0.0, today()), today())
        .await;

    assert!(!result.failed);
    assert_eq!(result.speed_kmh, 18.2);
    assert_eq!(result.direction_deg, 45);
    assert_eq!(result.location_name, "Unknown Location");
}

#[tokio::test]
async fn test_wind_fetch_failure_is_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": { "city": "Lima", "country": "Peru" }
        })))
        .expect(0)
        .mount(&server)
        .await;

    let result = resolver_for(&server)
        .resolve_wind_on(&Query::new(-12.05, -77.04, today()), today())
        .await;

    assert_eq!(result, WindResult::failed());
}

#[tokio::test]
async fn test_orchestrator_drives_animator() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": hourly(10.0, 180, 24)
        })))
        .mount(&server)
        .await;
    mount_place(&server, json!({ "town": "Tórshavn", "country": "Faroe Islands" })).await;

    let resolver = Arc::new(resolver_for(&server));
    let date = NaiveDate::from_ymd_opt(2005, 3, 9).unwrap();
    let orchestrator = WindOrchestrator::new(resolver, Query::new(62.0, -6.77, date));

    let (frames_tx, frames) = frame_channel(4);
    let handle =
        RotationAnimator::default().start(frames, orchestrator.speed(), RotationState::default());
    let mut rotation = handle.rotation();

    // the step between frames follows the resolved speed
    frames_tx.send(()).await.unwrap();
    rotation.changed().await.unwrap();
    let before = rotation.borrow_and_update().angle_deg;

    let mut states = orchestrator.subscribe();
    let state = states.wait_for(|s| !s.loading).await.unwrap().clone();
    assert_eq!(state.result.speed_kmh, 10.0);
    assert_eq!(state.result.location_name, "Tórshavn, Faroe Islands");

    frames_tx.send(()).await.unwrap();
    rotation.changed().await.unwrap();
    let after = rotation.borrow_and_update().angle_deg;
    assert_eq!((after - before).rem_euclid(360.0), 5.0);

    let last = handle.stop().await;
    assert_eq!(last.angle_deg, after);
}

/// The CLI shows help with the explicit help flag
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_windy-pinwheel"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("windy-pinwheel"));
    assert!(stdout.contains("wind"));
    assert!(stdout.contains("spin"));
    assert!(stdout.contains("serve"));
}

/// Out-of-range coordinates fail before any request is made
#[test]
fn test_cli_rejects_invalid_latitude() {
    let output = Command::new(env!("CARGO_BIN_EXE_windy-pinwheel"))
        .args(["wind", "--lat", "123", "--lon", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Latitude must be between -90 and 90"));
}
