//! Provider fallback chain.
//!
//! Models are tried in configured order until one returns a response; a
//! `openrouter/` (or `or/`) prefix routes the model through the
//! OpenAI-compatible endpoint instead of Gemini. Fallback lives here, at the
//! orchestration edge; the reconciliation core never retries anything.

use tracing::{info, warn};

use podcut_engine::AnalysisWindow;

use crate::error::{DetectError, DetectResult};
use crate::gemini::GeminiClient;
use crate::openrouter::OpenRouterClient;
use crate::prompt::build_prompt;
use crate::retry::{retry_async, RetryConfig};

/// Default model order when `PODCUT_MODEL_ORDER` is not set.
pub const DEFAULT_MODEL_CHAIN: &[&str] = &[
    "gemini-pro-latest",
    "gemini-2.5-flash",
    "openrouter/x-ai/grok-4.1-fast",
];

/// An ordered chain of detector models with per-model retry.
pub struct DetectorChain {
    models: Vec<String>,
    gemini: Option<GeminiClient>,
    openrouter: Option<OpenRouterClient>,
    retry: RetryConfig,
}

impl DetectorChain {
    /// Build a chain from the configured model list and whichever API keys
    /// are present. At least one provider must be usable.
    pub fn new(
        models: Vec<String>,
        gemini_api_key: Option<String>,
        openrouter_api_key: Option<String>,
        openrouter_base_url: Option<String>,
    ) -> DetectResult<Self> {
        if models.is_empty() {
            return Err(DetectError::config_error("empty model chain"));
        }
        if gemini_api_key.is_none() && openrouter_api_key.is_none() {
            return Err(DetectError::config_error(
                "neither GEMINI_API_KEY nor OPENROUTER_API_KEY is set",
            ));
        }

        Ok(Self {
            models,
            gemini: gemini_api_key.map(GeminiClient::new),
            openrouter: openrouter_api_key
                .map(|key| OpenRouterClient::new(key, openrouter_base_url)),
            retry: RetryConfig::new("detector_call"),
        })
    }

    /// Analyze one window, returning the first successful raw response.
    ///
    /// The transcript payload is the window's local-time segment list; the
    /// caller is responsible for normalizing the response and mapping the
    /// detections back to global time.
    pub async fn detect_window(&self, window: &AnalysisWindow) -> DetectResult<String> {
        let prompt = build_prompt(window);
        let payload = window_payload(window)?;

        for model in &self.models {
            match self.call_model(model, &prompt, &payload).await {
                Ok(text) => {
                    info!(model, window = window.index + 1, "detector call succeeded");
                    return Ok(text);
                }
                Err(err) => {
                    warn!(model, error = %err, "model failed, trying next in chain");
                }
            }
        }

        Err(DetectError::AllProvidersFailed {
            attempted: self.models.len(),
        })
    }

    async fn call_model(&self, model: &str, prompt: &str, payload: &str) -> DetectResult<String> {
        let routed = model
            .strip_prefix("openrouter/")
            .or_else(|| model.strip_prefix("or/"));

        match routed {
            Some(or_model) => {
                let client = self.openrouter.as_ref().ok_or_else(|| {
                    DetectError::config_error("OpenRouter model configured without an API key")
                })?;
                retry_async(&self.retry, || client.generate(or_model, prompt, payload)).await
            }
            None => {
                let client = self.gemini.as_ref().ok_or_else(|| {
                    DetectError::config_error("Gemini model configured without an API key")
                })?;
                retry_async(&self.retry, || client.generate(model, prompt, payload)).await
            }
        }
    }
}

/// Serialize the window's local-time transcript as the detector payload.
/// The wire shape is the segments themselves: `[{start, end, text}, ...]`.
fn window_payload(window: &AnalysisWindow) -> DetectResult<String> {
    Ok(serde_json::to_string(&window.segments)?)
}
