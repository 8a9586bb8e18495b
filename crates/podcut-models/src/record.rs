//! Persisted analysis records.
//!
//! An [`AnalysisRecord`] is the durable outcome of one analysis run: the
//! reconciled remove list plus the transcript it was derived from. The keep
//! list is never persisted; it is recomputed from the remove list on demand.

use serde::{Deserialize, Serialize};

use crate::segment::Segment;
use crate::transcript::TranscriptSegment;

/// Bump when the record shape changes; a mismatch on load is a cache miss.
pub const SCHEMA_VERSION: u32 = 2;

/// Identity of the analyzed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMeta {
    /// Local path or remote URL, as given by the user.
    pub input: String,
    pub is_remote: bool,
    /// Stable stem used for output filenames.
    pub file_stem: String,
    pub schema_version: u32,
}

/// One media item's persisted analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub input_meta: InputMeta,
    pub segments_to_remove: Vec<Segment>,
    #[serde(default)]
    pub transcript_segments: Vec<TranscriptSegment>,
}

impl AnalysisRecord {
    pub fn new(
        input: impl Into<String>,
        is_remote: bool,
        file_stem: impl Into<String>,
        segments_to_remove: Vec<Segment>,
        transcript_segments: Vec<TranscriptSegment>,
    ) -> Self {
        Self {
            input_meta: InputMeta {
                input: input.into(),
                is_remote,
                file_stem: file_stem.into(),
                schema_version: SCHEMA_VERSION,
            },
            segments_to_remove,
            transcript_segments,
        }
    }

    /// True if the record was written by this schema version.
    pub fn is_current_schema(&self) -> bool {
        self.input_meta.schema_version == SCHEMA_VERSION
    }
}
