//! HTTP services against mock servers.

use std::time::Duration;

use iss_bot::{
    services::{
        position::{OpenNotifyService, PositionService},
        predictor::{AstroViewerService, PassPredictionService},
        Coordinates, GeocodeResult,
    },
    IssBotError, ParseError,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[tokio::test]
async fn position_parses_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iss-now.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "success",
            "timestamp": 1_577_880_000,
            "iss_position": {"latitude": "-51.6423", "longitude": "109.3010"}
        })))
        .mount(&server)
        .await;

    let service = OpenNotifyService::with_endpoint(
        &format!("{}/iss-now.json", server.uri()),
        Duration::from_secs(10),
    );
    let coordinates = service.current_position().await.unwrap();

    assert_eq!(coordinates.to_string(), "-51.6423,109.3010");
}

#[tokio::test]
async fn slow_position_is_a_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"iss_position": {"latitude": "0", "longitude": "0"}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let service = OpenNotifyService::with_endpoint(&server.uri(), Duration::from_millis(200));
    let err = service.current_position().await.unwrap_err();

    assert!(matches!(err, IssBotError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn unparsable_position_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "iss_position": {"latitude": "north", "longitude": "0"}
        })))
        .mount(&server)
        .await;

    let service = OpenNotifyService::with_endpoint(&server.uri(), Duration::from_secs(10));
    let err = service.current_position().await.unwrap_err();

    assert!(matches!(
        err,
        IssBotError::Parse(ParseError::Coordinate(ref raw)) if raw == "north"
    ));
}

#[tokio::test]
async fn server_error_is_an_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = OpenNotifyService::with_endpoint(&server.uri(), Duration::from_secs(10));
    let err = service.current_position().await.unwrap_err();

    match err {
        IssBotError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn predictor_sends_place_and_returns_raw_body() {
    let body = "var passesData = {location: {name: 'Sydney NSW, Australia'}, passes: []};\n";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/predictor"))
        .and(header("user-agent", "request"))
        .and(query_param("var", "passesData"))
        .and(query_param("lat", "-33.8688"))
        .and(query_param("lon", "151.2093"))
        .and(query_param("name", "Sydney NSW, Australia"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let service = AstroViewerService::with_endpoint(&format!("{}/predictor", server.uri()));
    let place = GeocodeResult {
        formatted_address: "Sydney NSW, Australia".to_string(),
        coordinates: Coordinates {
            lat: dec("-33.8688"),
            lng: dec("151.2093"),
        },
    };

    assert_eq!(service.predict(&place).await.unwrap(), body);
}
