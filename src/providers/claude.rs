//! Anthropic Messages API client for real plan generation

use std::fmt;
use std::time::Instant;

use anyhow::{Context, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::PlanProvider;
use crate::config::{AiConfig, REDACTED};
use crate::models::{GeneratedPlan, TravelPlanRequest};
use crate::{Result, TravelAiError};

pub const CLAUDE_PROVIDER_NAME: &str = "Claude";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const CREDENTIAL_CHECK_TOKENS: u32 = 10;

/// Provider backed by the Anthropic Messages API
#[derive(Clone)]
pub struct ClaudePlanProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl fmt::Debug for ClaudePlanProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaudePlanProvider")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ClaudePlanProvider {
    /// Create a client. Fails when no usable API key is configured.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = config
            .usable_api_key()
            .ok_or_else(|| TravelAiError::config("CLAUDE_API_KEY is required"))?
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("ViajerosAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelAiError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    async fn send(&self, prompt: &str, max_tokens: u32) -> anyhow::Result<MessagesResponse> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(%url, max_tokens, "calling Anthropic Messages API");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("Request to Anthropic API failed")?
            .error_for_status()
            .context("Anthropic API returned an error status")?;

        response
            .json::<MessagesResponse>()
            .await
            .context("Failed to parse Anthropic API response")
    }

    async fn request_plan(&self, request: &TravelPlanRequest) -> anyhow::Result<GeneratedPlan> {
        let prompt = build_prompt(request);
        let response = self.send(&prompt, self.max_tokens).await?;

        let text = match response.content.into_iter().next() {
            Some(ContentBlock::Text { text }) if !text.trim().is_empty() => text,
            Some(ContentBlock::Text { .. }) => return Err(anyhow!("Empty response from Claude")),
            Some(ContentBlock::Other) => return Err(anyhow!("Unexpected response format from Claude")),
            None => return Err(anyhow!("Empty response from Claude")),
        };

        Ok(GeneratedPlan {
            content: text,
            tokens_used: Some(
                response
                    .usage
                    .input_tokens
                    .saturating_add(response.usage.output_tokens),
            ),
            model: Some(response.model),
        })
    }

    async fn check_credential(&self) -> Result<()> {
        self.send("test", CREDENTIAL_CHECK_TOKENS)
            .await
            .map(|_| ())
            .map_err(|e| TravelAiError::credential(format!("{e:#}")))
    }
}

impl PlanProvider for ClaudePlanProvider {
    #[instrument(name = "claude_generate", skip_all, fields(destination = %request.destination, model = %self.model))]
    async fn generate(&self, request: &TravelPlanRequest) -> Result<GeneratedPlan> {
        let started = Instant::now();
        match self.request_plan(request).await {
            Ok(plan) => {
                info!(
                    tokens_used = ?plan.tokens_used,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "plan generated"
                );
                Ok(plan)
            }
            Err(err) => {
                error!(error = ?err, "Error generating travel plan with Claude");
                Err(TravelAiError::generation("Failed to generate travel plan"))
            }
        }
    }

    async fn validate_credential(&self) -> bool {
        match self.check_credential().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "credential check failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        CLAUDE_PROVIDER_NAME
    }
}

/// Prompt asking the model for a Markdown plan with a fixed set of sections
#[must_use]
pub fn build_prompt(request: &TravelPlanRequest) -> String {
    let accommodation = request
        .accommodation
        .map_or("flexible", |value| value.as_str());
    let transport = request.transport.map_or("flexible", |value| value.as_str());
    let activities = match &request.activities {
        Some(list) if !list.is_empty() => format!("\n- Actividades de interés: {}", list.join(", ")),
        _ => String::new(),
    };

    format!(
        "Eres un experto en planificación de viajes. Genera un plan de viaje detallado en formato Markdown con la siguiente información:

**Parámetros del viaje:**
- Origen: {origin}
- Destino: {destination}
- Duración: {days} días
- Tipo de viaje: {trip_type}
- Presupuesto: {budget}
- Alojamiento preferido: {accommodation}
- Transporte preferido: {transport}{activities}

**Estructura requerida:**
1. # Título del viaje
2. ## Información práctica (visados, vacunas, moneda, clima)
3. ## Itinerario por días
4. ## Alojamientos recomendados
5. ## Comida y restaurantes
6. ## Actividades principales
7. ## Presupuesto estimado
8. ## Consejos útiles

**Consideraciones importantes:**
- Adapta el contenido al tipo de viaje seleccionado
- Incluye precios aproximados según el presupuesto
- Sugiere actividades apropiadas para el perfil
- Menciona aspectos de seguridad relevantes
- Incluye enlaces útiles cuando sea apropiado

Genera un plan completo y detallado que sea útil y práctico para el viajero.",
        origin = request.origin,
        destination = request.destination,
        days = request.days,
        trip_type = request.trip_type,
        budget = request.budget,
    )
}
