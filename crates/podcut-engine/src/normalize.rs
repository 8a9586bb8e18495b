//! Detection normalization.
//!
//! Detector output is untrusted: nominally
//! `{"segments_to_remove": [{"type", "start", "end"}, ...]}`, but models also
//! return bare lists, fenced code blocks, or truncated JSON. Normalization
//! coerces whatever arrived into typed [`Segment`]s, dropping malformed
//! entries individually. "Nothing usable this round" is a valid outcome, not
//! an error, so total recovery failure yields [`ParseOutcome::Empty`].

use podcut_models::{parse_timestamp_value, Segment, SegmentKind, SegmentSource};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of normalizing one detector response.
///
/// Tagged so callers can tell "nothing found" from "could not parse at all"
/// for diagnostics; neither stops the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The payload was well-formed JSON.
    Parsed(Vec<Segment>),
    /// The payload was malformed but the segments list was recovered by
    /// structural scanning.
    Recovered(Vec<Segment>),
    /// Nothing could be extracted.
    Empty,
}

impl ParseOutcome {
    /// Consume the outcome, yielding whatever segments were extracted.
    pub fn into_segments(self) -> Vec<Segment> {
        match self {
            Self::Parsed(segments) | Self::Recovered(segments) => segments,
            Self::Empty => Vec::new(),
        }
    }
}

/// Normalize one raw detector response into candidate segments.
pub fn normalize_response(raw: &str) -> ParseOutcome {
    let text = strip_code_fence(raw);

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(entries) = entries_from_value(&value) {
            return ParseOutcome::Parsed(collect_segments(entries));
        }
        debug!("detector JSON has no segments_to_remove list");
        return ParseOutcome::Empty;
    }

    // Truncated or otherwise invalid JSON: scan for the segments sub-list.
    if let Some(entries) = recover_segment_list(text) {
        return ParseOutcome::Recovered(collect_segments(&entries));
    }

    debug!("detector response yielded no recoverable segments");
    ParseOutcome::Empty
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Locate the entries list: either `value.segments_to_remove` or the value
/// itself when the detector returned a bare list.
fn entries_from_value(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Object(map) => map.get("segments_to_remove")?.as_array(),
        Value::Array(entries) => Some(entries),
        _ => None,
    }
}

/// Best-effort extraction of the `segments_to_remove` list from broken text.
fn recover_segment_list(text: &str) -> Option<Vec<Value>> {
    let pattern = Regex::new(r#"(?s)"segments_to_remove"\s*:\s*(\[.*?\])"#)
        .ok()?;
    let captured = pattern.captures(text)?.get(1)?.as_str();
    serde_json::from_str::<Vec<Value>>(captured).ok()
}

/// Validate entries one by one; malformed entries are dropped with a
/// diagnostic, never fatal to the batch.
fn collect_segments(entries: &[Value]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(entries.len());
    for entry in entries {
        match segment_from_entry(entry) {
            Some(segment) => segments.push(segment),
            None => warn!(entry = %entry, "dropping malformed detector entry"),
        }
    }
    segments
}

fn segment_from_entry(entry: &Value) -> Option<Segment> {
    let obj = entry.as_object()?;
    let start = parse_timestamp_value(obj.get("start")?).ok()?;
    let end = parse_timestamp_value(obj.get("end")?).ok()?;
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .map(SegmentKind::parse)
        .unwrap_or(SegmentKind::Other("other".to_string()));
    Some(Segment::new(kind, start, end).with_source(SegmentSource::Model))
}

/// Fold `candidates` into `accepted`, discarding any candidate within
/// `epsilon` of an already-accepted segment. Earliest-seen wins, so the
/// rolling accumulator threaded between sequential window calls keeps the
/// first report of a boundary-straddling ad.
pub fn dedup_into(accepted: &mut Vec<Segment>, candidates: Vec<Segment>, epsilon: f64) {
    for candidate in candidates {
        if accepted.iter().any(|s| s.matches(&candidate, epsilon)) {
            debug!(
                kind = %candidate.kind,
                start = candidate.start,
                end = candidate.end,
                "dropping duplicate detection from adjacent window"
            );
            continue;
        }
        accepted.push(candidate);
    }
}

/// Deterministic dedup over an unordered union of detections.
///
/// Used when windows were analyzed out of order: dedup correctness depends on
/// adjacency in time, not call-completion order, so sort globally first.
pub fn sort_and_dedup(mut segments: Vec<Segment>, epsilon: f64) -> Vec<Segment> {
    segments.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.end
                    .partial_cmp(&b.end)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    let mut deduped: Vec<Segment> = Vec::with_capacity(segments.len());
    for candidate in segments {
        if deduped.iter().any(|s| s.matches(&candidate, epsilon)) {
            continue;
        }
        deduped.push(candidate);
    }
    deduped
}
