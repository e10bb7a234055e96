//! Plan providers
//!
//! A provider turns validated trip parameters into a Markdown plan:
//! - Mock: deterministic template output with an artificial delay
//! - Claude: prompt sent to the Anthropic Messages API
//! - Factory: selects one provider from configuration and memoizes it

pub mod claude;
pub mod factory;
pub mod mock;
pub mod mock_plan;

use std::future::Future;

use crate::Result;
use crate::models::{GeneratedPlan, TravelPlanRequest};

pub use claude::ClaudePlanProvider;
pub use factory::{ProviderFactory, ProviderKind, build_provider};
pub use mock::MockPlanProvider;

/// Capability shared by every plan backend
pub trait PlanProvider {
    /// Produce a plan for the given trip
    fn generate(
        &self,
        request: &TravelPlanRequest,
    ) -> impl Future<Output = Result<GeneratedPlan>> + Send;

    /// Cheap check that the backend accepts our credential
    fn validate_credential(&self) -> impl Future<Output = bool> + Send;

    /// Name reported to clients
    fn name(&self) -> &str;
}

/// The provider chosen at startup. Closed so every dispatch is exhaustive.
#[derive(Debug)]
pub enum AiProvider {
    Mock(MockPlanProvider),
    Claude(ClaudePlanProvider),
}

impl PlanProvider for AiProvider {
    async fn generate(&self, request: &TravelPlanRequest) -> Result<GeneratedPlan> {
        match self {
            AiProvider::Mock(provider) => provider.generate(request).await,
            AiProvider::Claude(provider) => provider.generate(request).await,
        }
    }

    async fn validate_credential(&self) -> bool {
        match self {
            AiProvider::Mock(provider) => provider.validate_credential().await,
            AiProvider::Claude(provider) => provider.validate_credential().await,
        }
    }

    fn name(&self) -> &str {
        match self {
            AiProvider::Mock(provider) => provider.name(),
            AiProvider::Claude(provider) => provider.name(),
        }
    }
}

impl AiProvider {
    #[must_use]
    pub fn is_mock(&self) -> bool {
        matches!(self, AiProvider::Mock(_))
    }
}
