use std::time::Duration;

use rand::RngExt;
use tracing::{debug, instrument};

use super::{PlanProvider, mock_plan};
use crate::Result;
use crate::models::{GeneratedPlan, TravelPlanRequest};

pub const MOCK_PROVIDER_NAME: &str = "Claude (Mock)";
pub const MOCK_MODEL: &str = "claude-3-sonnet-mock";

/// Offline provider that renders a template plan after a configurable pause
#[derive(Debug, Clone)]
pub struct MockPlanProvider {
    delay: Duration,
}

impl MockPlanProvider {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockPlanProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

fn random_token_count() -> u32 {
    rand::rng().random_range(1000..=3000)
}

impl PlanProvider for MockPlanProvider {
    #[instrument(name = "mock_generate", skip_all, fields(destination = %request.destination))]
    async fn generate(&self, request: &TravelPlanRequest) -> Result<GeneratedPlan> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating upstream latency");
            tokio::time::sleep(self.delay).await;
        }

        Ok(GeneratedPlan {
            content: mock_plan::render(request),
            tokens_used: Some(random_token_count()),
            model: Some(MOCK_MODEL.to_string()),
        })
    }

    async fn validate_credential(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        MOCK_PROVIDER_NAME
    }
}
