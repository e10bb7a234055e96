//! Provider selection and memoization
//!
//! The factory is an ordinary value owned by the application state rather
//! than a global. It keeps one provider alive until it is reset, so every
//! request sees the same backend.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{AiProvider, ClaudePlanProvider, MockPlanProvider, PlanProvider};
use crate::config::AiConfig;
use crate::{Result, TravelAiError};

/// Provider families that can be named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Claude,
    OpenAi,
}

impl ProviderKind {
    /// Parse a configured provider name, case-insensitively
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "claude" => Ok(ProviderKind::Claude),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(TravelAiError::config(format!("Unknown AI provider: {name}"))),
        }
    }
}

/// Construct the provider described by `config`.
///
/// For Claude the mock stands in when mocking is forced or no usable
/// credential is configured.
pub fn build_provider(config: &AiConfig) -> Result<AiProvider> {
    match ProviderKind::parse(&config.provider)? {
        ProviderKind::Claude if config.wants_mock() => Ok(AiProvider::Mock(
            MockPlanProvider::new(config.mock_delay()),
        )),
        ProviderKind::Claude => Ok(AiProvider::Claude(ClaudePlanProvider::new(config)?)),
        ProviderKind::OpenAi => Err(TravelAiError::not_implemented(
            "OpenAI service not implemented yet",
        )),
    }
}

#[derive(Debug)]
struct FactoryState {
    config: AiConfig,
    instance: Option<Arc<AiProvider>>,
}

/// Owns the AI configuration and the single active provider
#[derive(Debug)]
pub struct ProviderFactory {
    state: RwLock<FactoryState>,
}

impl ProviderFactory {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            state: RwLock::new(FactoryState {
                config,
                instance: None,
            }),
        }
    }

    /// Return the active provider, constructing it on first use.
    ///
    /// Concurrent first calls all receive the same instance.
    pub async fn get_instance(&self) -> Result<Arc<AiProvider>> {
        if let Some(provider) = &self.state.read().await.instance {
            return Ok(Arc::clone(provider));
        }

        let mut state = self.state.write().await;
        if let Some(provider) = &state.instance {
            return Ok(Arc::clone(provider));
        }

        let provider = Arc::new(build_provider(&state.config)?);
        info!(
            provider = provider.name(),
            configured = %state.config.provider,
            "AI provider selected"
        );
        state.instance = Some(Arc::clone(&provider));
        Ok(provider)
    }

    /// Drop the active provider; the next call rebuilds it
    pub async fn reset_instance(&self) {
        self.state.write().await.instance = None;
        debug!("AI provider reset");
    }

    /// Swap in new settings and drop the active provider
    pub async fn reconfigure(&self, config: AiConfig) {
        let mut state = self.state.write().await;
        state.config = config;
        state.instance = None;
        debug!(provider = %state.config.provider, "AI provider reconfigured");
    }

    /// Copy of the current settings
    pub async fn config(&self) -> AiConfig {
        self.state.read().await.config.clone()
    }
}
