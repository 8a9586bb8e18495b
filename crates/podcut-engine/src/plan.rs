//! Edit planning.
//!
//! A [`CutPlan`] is the reconciled view of one media item: the keep list for
//! the media-side trim+concat edit, and the merged remove list for the
//! text-side transcript filter and the player-side skip script. Both sides
//! are derived from the same remove list so they can never disagree.

use podcut_models::{Segment, TimeSpan, TranscriptSegment};

use crate::error::{EngineError, EngineResult};
use crate::reconcile::{merge_spans, reconcile};

#[derive(Debug, Clone)]
pub struct CutPlan {
    /// Sorted, non-overlapping spans that survive the edit.
    keep: Vec<TimeSpan>,
    /// Time-sorted union of the remove-spans.
    removed: Vec<TimeSpan>,
    total_duration: f64,
}

impl CutPlan {
    /// Build a plan from validated remove-spans.
    ///
    /// Fails with [`EngineError::DestructiveResult`] when nothing would
    /// survive the cut; an empty output file is never an acceptable result.
    pub fn new(remove: &[Segment], total_duration: f64) -> EngineResult<Self> {
        let keep = reconcile(remove, total_duration);
        let removed = merge_spans(remove);

        if keep.is_empty() && total_duration > 0.0 {
            return Err(EngineError::DestructiveResult {
                removed_secs: removed.iter().map(TimeSpan::duration).sum(),
                total_secs: total_duration,
            });
        }

        Ok(Self {
            keep,
            removed,
            total_duration,
        })
    }

    /// Trim ranges in concatenation order, for the media engine.
    pub fn trims(&self) -> &[TimeSpan] {
        &self.keep
    }

    /// Merged remove-spans in ascending order.
    pub fn removed(&self) -> &[TimeSpan] {
        &self.removed
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn kept_duration(&self) -> f64 {
        self.keep.iter().map(TimeSpan::duration).sum()
    }

    pub fn removed_duration(&self) -> f64 {
        self.removed.iter().map(TimeSpan::duration).sum()
    }

    /// Whether the edit changes the file at all.
    pub fn has_cuts(&self) -> bool {
        !self.removed.is_empty()
    }

    /// Midpoint containment test for a text-bearing unit.
    ///
    /// A unit straddling a cut boundary belongs wholly to whichever side
    /// holds its center, so single utterances are never fragmented.
    pub fn is_removed(&self, start: f64, end: f64) -> bool {
        self.midpoint_removed((start + end) / 2.0)
    }

    fn midpoint_removed(&self, mid: f64) -> bool {
        self.removed.iter().any(|span| span.contains(mid))
    }

    /// Drop transcript units whose midpoint falls inside a remove-span.
    pub fn filter_transcript(&self, segments: &[TranscriptSegment]) -> Vec<TranscriptSegment> {
        segments
            .iter()
            .filter(|s| !self.midpoint_removed(s.midpoint()))
            .cloned()
            .collect()
    }

    /// `(start, stop)` pairs for a player-side skip script: once playback
    /// position enters `[start, stop)`, jump to `stop`.
    pub fn skip_pairs(&self) -> Vec<(f64, f64)> {
        self.removed.iter().map(|span| (span.start, span.end)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcut_models::SegmentKind;

    fn ad(start: f64, end: f64) -> Segment {
        Segment::new(SegmentKind::Ad, start, end)
    }

    #[test]
    fn test_plan_basic_cut() {
        let plan = CutPlan::new(&[ad(10.0, 20.0)], 100.0).unwrap();
        assert!(plan.has_cuts());
        assert_eq!(plan.trims().len(), 2);
        assert_eq!(plan.kept_duration(), 90.0);
        assert_eq!(plan.removed_duration(), 10.0);
        assert_eq!(plan.skip_pairs(), vec![(10.0, 20.0)]);
    }

    #[test]
    fn test_plan_no_cuts() {
        let plan = CutPlan::new(&[], 100.0).unwrap();
        assert!(!plan.has_cuts());
        assert_eq!(plan.trims().len(), 1);
        assert_eq!(plan.kept_duration(), 100.0);
    }

    #[test]
    fn test_full_removal_is_destructive() {
        let err = CutPlan::new(&[ad(0.0, 100.0)], 100.0).unwrap_err();
        assert!(matches!(err, EngineError::DestructiveResult { .. }));
    }

    #[test]
    fn test_midpoint_rule_on_boundary_straddling_lines() {
        let plan = CutPlan::new(&[ad(90.0, 102.0)], 200.0).unwrap();

        // midpoint 102 sits exactly on the span end: inside (inclusive)
        assert!(plan.is_removed(100.0, 104.0));
        // midpoint 104 is past the span: kept
        assert!(!plan.is_removed(100.0, 108.0));
    }

    #[test]
    fn test_filter_transcript() {
        let plan = CutPlan::new(&[ad(90.0, 102.0)], 200.0).unwrap();
        let transcript = vec![
            TranscriptSegment::new(80.0, 85.0, "before"),
            TranscriptSegment::new(95.0, 100.0, "inside"),
            TranscriptSegment::new(100.0, 108.0, "straddling"),
            TranscriptSegment::new(110.0, 115.0, "after"),
        ];
        let kept = plan.filter_transcript(&transcript);
        let texts: Vec<&str> = kept.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["before", "straddling", "after"]);
    }

    #[test]
    fn test_overlapping_removes_collapse_in_plan() {
        let plan = CutPlan::new(&[ad(10.0, 20.0), ad(15.0, 30.0)], 100.0).unwrap();
        assert_eq!(plan.removed().len(), 1);
        assert_eq!(plan.skip_pairs(), vec![(10.0, 30.0)]);
        assert_eq!(plan.kept_duration(), 80.0);
    }
}
