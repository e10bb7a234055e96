//! Data models for the Viajeros AI service
//!
//! - Trip: the parameters a traveller submits
//! - Plan: provider output and the response envelope

pub mod plan;
pub mod trip;

pub use plan::{GeneratedPlan, PlanMetadata, TravelPlanResponse};
pub use trip::{Accommodation, Budget, Transport, TravelPlanRequest, TripType, WireEnum};
