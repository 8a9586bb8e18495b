//! Timeline reconciliation.
//!
//! Turns an unsorted, possibly-overlapping multiset of remove-spans into the
//! keep list: the sorted, non-overlapping gap-complement over
//! `[0, total_duration]`. The keep list is never persisted; it is recomputed
//! on demand from the much smaller remove list.

use podcut_models::{Segment, TimeSpan};

/// Compute the keep list for a set of remove-spans over `[0, total_duration]`.
///
/// Left-to-right sweep: sort by start, keep a cursor at the end of covered
/// time, emit a keep-span for every gap before the next remove-span, and
/// advance the cursor to `max(cursor, segment.end)` so overlapping and nested
/// remove-spans collapse into their union.
///
/// An empty input yields one span covering the whole file. A remove list
/// covering everything yields an empty keep list; deciding that this is fatal
/// is [`crate::plan::CutPlan`]'s job, not ours.
pub fn reconcile(remove: &[Segment], total_duration: f64) -> Vec<TimeSpan> {
    let mut sorted: Vec<&Segment> = remove.iter().collect();
    sorted.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut cursor = 0.0;

    for segment in sorted {
        if segment.start > cursor {
            if let Some(span) = TimeSpan::new(cursor, segment.start.min(total_duration)) {
                keep.push(span);
            }
        }
        cursor = cursor.max(segment.end);
    }

    if cursor < total_duration {
        if let Some(span) = TimeSpan::new(cursor, total_duration) {
            keep.push(span);
        }
    }

    keep
}

/// Merge remove-spans into their time-sorted union.
///
/// Used for the transcript-side midpoint test, which needs the merged spans
/// directly rather than their complement.
pub fn merge_spans(remove: &[Segment]) -> Vec<TimeSpan> {
    let mut sorted: Vec<&Segment> = remove
        .iter()
        .filter(|s| s.end > s.start && s.start >= 0.0)
        .collect();
    sorted.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<TimeSpan> = Vec::new();
    for segment in sorted {
        match merged.last_mut() {
            Some(last) if segment.start <= last.end => {
                last.end = last.end.max(segment.end);
            }
            _ => {
                if let Some(span) = TimeSpan::new(segment.start, segment.end) {
                    merged.push(span);
                }
            }
        }
    }
    merged
}
