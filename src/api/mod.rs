//! HTTP handlers for travel plan generation and health checks

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::models::{TravelPlanRequest, TravelPlanResponse};
use crate::providers::{PlanProvider, ProviderFactory};
use crate::validation::{FieldViolation, ValidationErrors, sanitize, validate};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderFactory>,
}

impl AppState {
    #[must_use]
    pub fn new(providers: ProviderFactory) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationFailureBody {
    pub error: &'static str,
    pub details: Vec<FieldViolation>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBody {
    pub status: &'static str,
    pub ai_provider: String,
    pub api_key_valid: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UnhealthyBody {
    pub status: &'static str,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_plan))
        .route("/health", get(health))
        .with_state(state)
}

fn rejected(errors: ValidationErrors) -> Response {
    let body = ValidationFailureBody {
        error: "Validation error",
        details: errors.into_violations(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn failed() -> Response {
    let body = ErrorBody {
        error: "Internal server error",
        message: "Failed to generate travel plan",
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn too_large() -> Response {
    let body = ErrorBody {
        error: "Payload too large",
        message: "Request body exceeds the configured limit",
    };
    (StatusCode::PAYLOAD_TOO_LARGE, Json(body)).into_response()
}

#[instrument(skip_all)]
async fn generate_plan(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(reason = %rejection.body_text(), "request body too large");
            return too_large();
        }
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "unreadable request body");
            return rejected(ValidationErrors::malformed_body(
                "request body must be a JSON object sent as application/json",
            ));
        }
    };

    let body = sanitize(body);
    let request = match validate(&body) {
        Ok(request) => request,
        Err(errors) => {
            info!(violations = errors.violations().len(), "travel plan request rejected");
            return rejected(errors);
        }
    };

    info!(
        destination = %request.destination,
        days = request.days,
        trip_type = %request.trip_type,
        "generating travel plan"
    );

    match generate(&state, request).await {
        Ok(response) => {
            info!(id = %response.id, provider = %response.metadata.ai_provider, "travel plan generated");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            error!(error = %err, "Error generating travel plan");
            failed()
        }
    }
}

async fn generate(state: &AppState, request: TravelPlanRequest) -> crate::Result<TravelPlanResponse> {
    let provider = state.providers.get_instance().await?;
    let plan = provider.generate(&request).await?;
    Ok(TravelPlanResponse::new(plan, provider.name(), request))
}

#[instrument(skip_all)]
async fn health(State(state): State<AppState>) -> Response {
    match state.providers.get_instance().await {
        Ok(provider) => {
            let api_key_valid = provider.validate_credential().await;
            let body = HealthBody {
                status: "healthy",
                ai_provider: provider.name().to_string(),
                api_key_valid,
                timestamp: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            error!(error = %err, "health check could not obtain an AI provider");
            let body = UnhealthyBody {
                status: "unhealthy",
                error: err.user_message(),
                timestamp: Utc::now(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
