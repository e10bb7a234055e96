//! Generated plans and the response envelope returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TravelPlanRequest;

/// Output of a plan provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Markdown document
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Successful response to a plan request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlanResponse {
    pub id: Uuid,
    pub plan: String,
    pub metadata: PlanMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub generated_at: DateTime<Utc>,
    pub ai_provider: String,
    /// The sanitized request, echoed back verbatim
    #[serde(rename = "parametros")]
    pub parameters: TravelPlanRequest,
}

impl TravelPlanResponse {
    /// Wrap a generated plan with a fresh id and the current time
    #[must_use]
    pub fn new(plan: GeneratedPlan, ai_provider: &str, parameters: TravelPlanRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            plan: plan.content,
            metadata: PlanMetadata {
                generated_at: Utc::now(),
                ai_provider: ai_provider.to_string(),
                parameters,
            },
        }
    }
}
