//! Viajeros AI - travel plan generation service
//!
//! This library validates trip requests, picks an AI provider (a real
//! Claude backend or a local mock) and serves the result over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod telemetry;
pub mod validation;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::{AiConfig, TravelAiConfig};
pub use error::TravelAiError;
pub use models::{GeneratedPlan, TravelPlanRequest, TravelPlanResponse};
pub use providers::{AiProvider, PlanProvider, ProviderFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelAiError>;
