//! Analysis windowing.
//!
//! Long recordings are analyzed in overlapping windows so a single detector
//! call never sees more than `window_secs` of transcript. Each window owns a
//! contiguous slice of the global timeline; its transcript is rebased to
//! local time zero and detections are mapped back via the additive offset.
//! The overlap means the same ad near a boundary can be reported by two
//! adjacent windows; collapsing that is the normalizer's job, not ours.

use podcut_models::{Segment, TranscriptSegment};

use crate::error::{EngineError, EngineResult};
use crate::plausibility::WindowContext;

/// One analysis window over the global timeline.
#[derive(Debug, Clone)]
pub struct AnalysisWindow {
    /// Position among the windows actually produced (empty ones are dropped
    /// and the rest renumbered).
    pub index: usize,
    pub total: usize,
    /// Additive correction from window-local to global time.
    pub offset_secs: f64,
    /// Global end of the slice this window owns.
    pub end_secs: f64,
    /// Transcript slice rebased to local time zero.
    pub segments: Vec<TranscriptSegment>,
}

impl AnalysisWindow {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Chunk-position context for the plausibility filter.
    pub fn context(&self) -> WindowContext {
        WindowContext {
            is_first: self.is_first(),
            is_last: self.is_last(),
            start_secs: self.offset_secs,
            end_secs: self.end_secs,
        }
    }

    /// Map window-local detections back to the global timeline.
    pub fn to_global(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
            .into_iter()
            .map(|s| s.offset_by(self.offset_secs))
            .collect()
    }
}

/// Split a transcript into overlapping analysis windows.
///
/// Windows start at `0, stride, 2*stride, ...` with
/// `stride = window_secs - overlap_secs`, until the start reaches
/// `total_duration`. A window owning zero transcript segments is dropped.
pub fn plan_windows(
    segments: &[TranscriptSegment],
    total_duration: f64,
    window_secs: f64,
    overlap_secs: f64,
) -> EngineResult<Vec<AnalysisWindow>> {
    if window_secs <= 0.0 || overlap_secs < 0.0 || overlap_secs >= window_secs {
        return Err(EngineError::InvalidWindowing {
            window_secs,
            overlap_secs,
        });
    }

    let stride = window_secs - overlap_secs;
    let mut windows = Vec::new();
    let mut start = 0.0;

    while start < total_duration {
        let end = (start + window_secs).min(total_duration);
        let slice: Vec<TranscriptSegment> = segments
            .iter()
            .filter(|s| s.start >= start && s.start < start + window_secs)
            .map(|s| TranscriptSegment::new(s.start - start, s.end - start, s.text.clone()))
            .collect();

        if !slice.is_empty() {
            windows.push(AnalysisWindow {
                index: 0,
                total: 0,
                offset_secs: start,
                end_secs: end,
                segments: slice,
            });
        }

        start += stride;
    }

    let total = windows.len();
    for (i, window) in windows.iter_mut().enumerate() {
        window.index = i;
        window.total = total;
    }

    Ok(windows)
}
