//! Integration tests for the Viajeros AI HTTP API

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use viajeros_ai::{AiConfig, AppState, ProviderFactory, web};

const BODY_LIMIT: usize = 64 * 1024;

fn app_with(config: AiConfig) -> Router {
    web::app(AppState::new(ProviderFactory::new(config)), BODY_LIMIT)
}

fn mock_app() -> Router {
    app_with(AiConfig::mock(Duration::ZERO))
}

fn valid_request() -> Value {
    json!({
        "origen": "Madrid",
        "destino": "Tokio",
        "dias": 10,
        "tipoViaje": "cultural",
        "presupuesto": "medio"
    })
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/travel/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn detail_fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| detail["field"].as_str().unwrap().to_string())
        .collect()
}

/// A valid request yields a plan with metadata echoing the parameters
#[tokio::test]
async fn test_generate_valid_request() {
    let request = valid_request();
    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(body["plan"].as_str().unwrap().contains("Tokio"));
    assert_eq!(body["metadata"]["aiProvider"], "Claude (Mock)");
    assert!(body["metadata"]["generatedAt"].is_string());
    assert_eq!(body["metadata"]["parametros"], request);
}

/// Every generated plan gets its own identifier
#[tokio::test]
async fn test_generate_assigns_fresh_ids() {
    let app = mock_app();
    let (_, first) = send(app.clone(), post_json(&valid_request())).await;
    let (_, second) = send(app, post_json(&valid_request())).await;

    assert_ne!(first["id"], second["id"]);
}

/// Optional fields are validated and echoed back
#[tokio::test]
async fn test_generate_with_optional_fields() {
    let mut request = valid_request();
    request["alojamiento"] = json!("hostal");
    request["transporte"] = json!("tren");
    request["actividades"] = json!(["museos", "templos"]);

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::OK);
    let params = &body["metadata"]["parametros"];
    assert_eq!(params["alojamiento"], "hostal");
    assert_eq!(params["transporte"], "tren");
    assert_eq!(params["actividades"], json!(["museos", "templos"]));
}

/// Surrounding whitespace is removed before validation and in the echo
#[tokio::test]
async fn test_generate_trims_strings() {
    let mut request = valid_request();
    request["origen"] = json!("  Madrid  ");
    request["destino"] = json!("\tTokio\n");

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["parametros"]["origen"], "Madrid");
    assert_eq!(body["metadata"]["parametros"]["destino"], "Tokio");
}

/// An empty object reports every required field
#[tokio::test]
async fn test_generate_missing_fields() {
    let (status, body) = send(mock_app(), post_json(&json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let fields = detail_fields(&body);
    for field in ["origen", "destino", "dias", "tipoViaje", "presupuesto"] {
        assert!(fields.iter().any(|f| f == field), "missing detail for {field}");
    }
    assert!(body["details"][0]["message"]
        .as_str()
        .unwrap()
        .contains("is required"));
}

#[rstest]
#[case::trip_type("tipoViaje", json!("crucero"))]
#[case::budget("presupuesto", json!("infinito"))]
#[case::accommodation("alojamiento", json!("castillo"))]
#[case::transport("transporte", json!("teletransporte"))]
#[tokio::test]
async fn test_generate_rejects_unknown_literals(#[case] field: &str, #[case] value: Value) {
    let mut request = valid_request();
    request[field] = value;

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec![field.to_string()]);
    assert!(body["details"][0]["message"]
        .as_str()
        .unwrap()
        .contains("must be one of"));
}

#[rstest]
#[case::zero_days(json!(0), "greater than or equal to 1")]
#[case::too_many_days(json!(366), "less than or equal to 365")]
#[case::fractional_days(json!(2.5), "must be an integer")]
#[case::text_days(json!("diez"), "must be a number")]
#[tokio::test]
async fn test_generate_rejects_bad_day_counts(#[case] days: Value, #[case] message: &str) {
    let mut request = valid_request();
    request["dias"] = days;

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["dias".to_string()]);
    assert!(body["details"][0]["message"].as_str().unwrap().contains(message));
}

/// A place that is only whitespace is empty after trimming
#[tokio::test]
async fn test_generate_rejects_blank_destination() {
    let mut request = valid_request();
    request["destino"] = json!("   ");

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["destino".to_string()]);
}

#[tokio::test]
async fn test_generate_rejects_unknown_keys() {
    let mut request = valid_request();
    request["mascota"] = json!("perro");

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["mascota".to_string()]);
}

#[tokio::test]
async fn test_generate_rejects_invalid_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/travel/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"origen\": \"Madrid\","))
        .unwrap();

    let (status, body) = send(mock_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(detail_fields(&body), vec!["body".to_string()]);
}

#[tokio::test]
async fn test_generate_rejects_non_json_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/travel/generate")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(valid_request().to_string()))
        .unwrap();

    let (status, body) = send(mock_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["body".to_string()]);
}

/// A JSON array is well-formed but not an object
#[tokio::test]
async fn test_generate_rejects_non_object_body() {
    let (status, body) = send(mock_app(), post_json(&json!(["Madrid", "Tokio"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec!["value".to_string()]);
}

#[tokio::test]
async fn test_generate_rejects_oversized_body() {
    let padding = "x".repeat(BODY_LIMIT + 1);
    let payload = json!({ "origen": padding }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/api/travel/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();

    let response = mock_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

/// A body without a declared length is still cut off at the limit
#[tokio::test]
async fn test_generate_rejects_oversized_body_without_length() {
    let padding = "x".repeat(BODY_LIMIT + 1);
    let request = Request::builder()
        .method("POST")
        .uri("/api/travel/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "origen": padding }).to_string()))
        .unwrap();

    let (status, body) = send(mock_app(), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Payload too large");
}

/// Optional keys sent as `null` are rejected rather than dropped from the echo
#[rstest]
#[case::accommodation("alojamiento")]
#[case::transport("transporte")]
#[case::activities("actividades")]
#[tokio::test]
async fn test_generate_rejects_null_optionals(#[case] field: &str) {
    let mut request = valid_request();
    request[field] = Value::Null;

    let (status, body) = send(mock_app(), post_json(&request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_fields(&body), vec![field.to_string()]);
}

/// Provider failures surface as a generic 500 without internal detail
#[tokio::test]
async fn test_generate_with_unknown_provider() {
    let app = app_with(AiConfig {
        provider: "unknown_provider".to_string(),
        ..AiConfig::mock(Duration::ZERO)
    });

    let (status, body) = send(app, post_json(&valid_request())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], "Failed to generate travel plan");
    assert!(!body.to_string().contains("unknown_provider"));
}

/// Validation runs before any provider is consulted
#[tokio::test]
async fn test_validation_precedes_provider_selection() {
    let app = app_with(AiConfig {
        provider: "openai".to_string(),
        ..AiConfig::mock(Duration::ZERO)
    });

    let (status, _) = send(app, post_json(&json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_with_mock_provider() {
    let request = Request::builder()
        .uri("/api/travel/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(mock_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["aiProvider"], "Claude (Mock)");
    assert_eq!(body["apiKeyValid"], true);
    assert!(body["timestamp"].is_string());
}

#[rstest]
#[case::unknown("unknown_provider")]
#[case::not_implemented("openai")]
#[tokio::test]
async fn test_health_without_provider(#[case] provider: &str) {
    let app = app_with(AiConfig {
        provider: provider.to_string(),
        ..AiConfig::mock(Duration::ZERO)
    });
    let request = Request::builder()
        .uri("/api/travel/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "AI service unavailable");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::builder()
        .uri("/api/travel/itineraries")
        .body(Body::empty())
        .unwrap();

    let response = mock_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let request = Request::builder()
        .uri("/api/travel/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = mock_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
