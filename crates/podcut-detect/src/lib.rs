//! LLM-backed ad detection for podcut.
//!
//! Sends one prompt per analysis window through an ordered model chain
//! (Gemini first, OpenAI-compatible providers as fallback) and returns the
//! raw response text. Parsing and validation of that text is the engine's
//! job; this crate only handles transport, retry, and fallback.

pub mod error;
pub mod gemini;
pub mod openrouter;
pub mod prompt;
pub mod provider;
pub mod retry;

pub use error::{DetectError, DetectResult};
pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;
pub use prompt::build_prompt;
pub use provider::{DetectorChain, DEFAULT_MODEL_CHAIN};
pub use retry::{retry_async, RetryConfig};
