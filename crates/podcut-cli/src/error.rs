//! Application-level error aggregation.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] podcut_engine::EngineError),

    #[error(transparent)]
    Media(#[from] podcut_media::MediaError),

    #[error(transparent)]
    Detect(#[from] podcut_detect::DetectError),

    #[error(transparent)]
    Cache(#[from] podcut_cache::CacheError),

    #[error("no transcript available for {0}")]
    NoTranscript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
