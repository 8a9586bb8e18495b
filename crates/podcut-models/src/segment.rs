//! Segment value types.
//!
//! A [`Segment`] is a remove-span candidate: a time interval judged to be
//! non-content (ad, intro, outro, sponsor read) plus provenance. Segments are
//! value objects; deduplication compares (kind, start, end) within an epsilon.

use serde::{Deserialize, Serialize};

/// A span of the source timeline in seconds. Invariant: `end > start >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl TimeSpan {
    /// Create a span, rejecting degenerate or negative input.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start >= 0.0 && end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Inclusive containment: a unit sitting exactly on a cut boundary is
    /// attributed to the span.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// What kind of non-content a segment is. Open enum: unrecognized kinds pass
/// through as [`SegmentKind::Other`] and keep their original label for
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Intro,
    Ad,
    Sponsor,
    Outro,
    Other(String),
}

impl SegmentKind {
    /// Parse a detector/database label, case-insensitively.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "intro" => Self::Intro,
            "ad" | "ads" => Self::Ad,
            "sponsor" => Self::Sponsor,
            "outro" => Self::Outro,
            "" => Self::Other("other".to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Intro => "intro",
            Self::Ad => "ad",
            Self::Sponsor => "sponsor",
            Self::Outro => "outro",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SegmentKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SegmentKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Where a segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentSource {
    /// Crowd-sourced segment database (SponsorBlock).
    CrowdDb,
    /// LLM analysis of a transcript window.
    Model,
    /// Derived directly from caption metadata.
    Caption,
}

/// A candidate remove-span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Start in seconds on the global timeline.
    pub start: f64,
    /// End in seconds on the global timeline.
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<SegmentSource>,
}

impl Segment {
    pub fn new(kind: SegmentKind, start: f64, end: f64) -> Self {
        Self {
            kind,
            start,
            end,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SegmentSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Dedup equality: same kind and both endpoints within `epsilon` seconds.
    pub fn matches(&self, other: &Segment, epsilon: f64) -> bool {
        self.kind == other.kind
            && (self.start - other.start).abs() <= epsilon
            && (self.end - other.end).abs() <= epsilon
    }

    /// Shift both endpoints by `offset` seconds (window-local to global).
    pub fn offset_by(mut self, offset: f64) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_span_rejects_degenerate() {
        assert!(TimeSpan::new(10.0, 10.0).is_none());
        assert!(TimeSpan::new(10.0, 5.0).is_none());
        assert!(TimeSpan::new(-1.0, 5.0).is_none());
        assert!(TimeSpan::new(0.0, 5.0).is_some());
    }

    #[test]
    fn test_time_span_contains_is_inclusive() {
        let span = TimeSpan::new(90.0, 102.0).unwrap();
        assert!(span.contains(90.0));
        assert!(span.contains(102.0));
        assert!(!span.contains(102.001));
    }

    #[test]
    fn test_kind_parse_round_trip() {
        assert_eq!(SegmentKind::parse("AD"), SegmentKind::Ad);
        assert_eq!(SegmentKind::parse("Sponsor"), SegmentKind::Sponsor);
        assert_eq!(
            SegmentKind::parse("SelfPromo"),
            SegmentKind::Other("selfpromo".to_string())
        );
    }

    #[test]
    fn test_kind_serde_preserves_unknown_labels() {
        let kind: SegmentKind = serde_json::from_str("\"preview\"").unwrap();
        assert_eq!(kind, SegmentKind::Other("preview".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"preview\"");
    }

    #[test]
    fn test_segment_serde_uses_type_field() {
        let seg = Segment::new(SegmentKind::Ad, 10.0, 20.0).with_source(SegmentSource::Model);
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "ad");
        assert_eq!(json["source"], "model");

        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, seg);
    }

    #[test]
    fn test_matches_within_epsilon() {
        let a = Segment::new(SegmentKind::Ad, 590.0, 600.0);
        let b = Segment::new(SegmentKind::Ad, 590.4, 599.8);
        let c = Segment::new(SegmentKind::Sponsor, 590.0, 600.0);
        assert!(a.matches(&b, 1.0));
        assert!(!a.matches(&b, 0.1));
        assert!(!a.matches(&c, 1.0));
    }
}
