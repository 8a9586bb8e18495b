//! Shared data models for podcut.
//!
//! This crate provides Serde-serializable types for:
//! - Time spans and detected remove-segments
//! - Transcript segments from the upstream speech/caption engine
//! - Persisted analysis records
//! - Timestamp parsing and formatting

pub mod record;
pub mod segment;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use record::{AnalysisRecord, InputMeta, SCHEMA_VERSION};
pub use segment::{Segment, SegmentKind, SegmentSource, TimeSpan};
pub use timestamp::{format_seconds, parse_timestamp, parse_timestamp_value, TimestampError};
pub use transcript::TranscriptSegment;
