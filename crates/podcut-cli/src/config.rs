//! Application configuration.

use podcut_detect::DEFAULT_MODEL_CHAIN;

/// Configuration pulled from the environment, with CLI flags layered on top
/// by the caller.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key, if configured.
    pub gemini_api_key: Option<String>,
    /// OpenRouter API key, if configured.
    pub openrouter_api_key: Option<String>,
    /// Override for the OpenAI-compatible endpoint.
    pub openrouter_base_url: Option<String>,
    /// Ordered detector model chain.
    pub model_chain: Vec<String>,
    /// Analysis window length in seconds.
    pub window_secs: f64,
    /// Overlap between adjacent windows in seconds.
    pub overlap_secs: f64,
    /// Plausibility ceiling for a single remove-span.
    pub max_segment_secs: f64,
    /// Cross-window dedup tolerance in seconds.
    pub dedup_epsilon_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            openrouter_base_url: None,
            model_chain: DEFAULT_MODEL_CHAIN.iter().map(|m| m.to_string()).collect(),
            window_secs: 600.0,
            overlap_secs: 60.0,
            max_segment_secs: 300.0,
            dedup_epsilon_secs: 1.0,
        }
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let model_chain = std::env::var("PODCUT_MODEL_ORDER")
            .ok()
            .map(|order| {
                order
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|chain| !chain.is_empty())
            .unwrap_or(defaults.model_chain);

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openrouter_base_url: std::env::var("OPENAI_BASE_URL").ok(),
            model_chain,
            window_secs: env_f64("PODCUT_WINDOW_SECS", defaults.window_secs),
            overlap_secs: env_f64("PODCUT_OVERLAP_SECS", defaults.overlap_secs),
            max_segment_secs: env_f64("PODCUT_MAX_SEGMENT_SECS", defaults.max_segment_secs),
            dedup_epsilon_secs: env_f64("PODCUT_DEDUP_EPSILON_SECS", defaults.dedup_epsilon_secs),
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
