//! Plausibility filtering.
//!
//! Detections are rejected when they are structurally invalid or implausible
//! given domain priors. The filter is deliberately conservative: a missed ad
//! is an annoyance, a wrongly cut minute of content is unrecoverable once the
//! original is gone.

use podcut_models::{Segment, SegmentKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunables for the plausibility filter and cross-window dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlausibilityConfig {
    /// Maximum believable length of one remove-span, in seconds. A single
    /// "ad" longer than this is far more likely a detector hallucination
    /// than a real ad read.
    pub max_segment_secs: f64,

    /// Two detections whose endpoints agree within this many seconds count
    /// as the same segment.
    pub dedup_epsilon_secs: f64,
}

impl Default for PlausibilityConfig {
    fn default() -> Self {
        Self {
            max_segment_secs: 300.0,
            dedup_epsilon_secs: 1.0,
        }
    }
}

/// Chunk-position context of the window a detection came from.
#[derive(Debug, Clone, Copy)]
pub struct WindowContext {
    pub is_first: bool,
    pub is_last: bool,
    /// Global start of the window.
    pub start_secs: f64,
    /// Global end of the window.
    pub end_secs: f64,
}

/// Filter candidate segments against structural rules and domain priors.
///
/// Rules are independent and order-insensitive, applied per segment:
/// - drop degenerate spans (`start >= end`)
/// - drop spans entirely outside the file (`start >= total_duration`)
/// - clamp `end` to `total_duration`
/// - drop spans longer than `max_segment_secs`
/// - with window context: drop `intro` on a non-first window unless it starts
///   at the window start, and `outro` on a non-final window unless it ends at
///   the window end (a mid-file window has no business labeling either)
///
/// Segments are expected in global time; `ctx` carries the window's global
/// bounds.
pub fn filter_segments(
    segments: Vec<Segment>,
    total_duration: f64,
    ctx: Option<&WindowContext>,
    config: &PlausibilityConfig,
) -> Vec<Segment> {
    let mut kept = Vec::with_capacity(segments.len());

    for mut segment in segments {
        if segment.start >= segment.end {
            warn!(
                kind = %segment.kind,
                start = segment.start,
                end = segment.end,
                "dropping degenerate segment (start >= end)"
            );
            continue;
        }

        if segment.start >= total_duration {
            warn!(
                kind = %segment.kind,
                start = segment.start,
                total_duration = total_duration,
                "dropping segment outside the file"
            );
            continue;
        }

        if segment.end > total_duration {
            segment.end = total_duration;
        }

        if segment.duration() > config.max_segment_secs {
            warn!(
                kind = %segment.kind,
                duration_secs = segment.duration(),
                ceiling_secs = config.max_segment_secs,
                "dropping implausibly long segment (likely hallucination)"
            );
            continue;
        }

        if let Some(ctx) = ctx {
            let eps = config.dedup_epsilon_secs;
            if !ctx.is_first
                && segment.kind == SegmentKind::Intro
                && (segment.start - ctx.start_secs).abs() > eps
            {
                warn!(
                    start = segment.start,
                    window_start = ctx.start_secs,
                    "dropping intro labeled inside a mid-file window"
                );
                continue;
            }
            if !ctx.is_last
                && segment.kind == SegmentKind::Outro
                && (segment.end - ctx.end_secs).abs() > eps
            {
                warn!(
                    end = segment.end,
                    window_end = ctx.end_secs,
                    "dropping outro labeled inside a non-final window"
                );
                continue;
            }
        }

        kept.push(segment);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(start: f64, end: f64) -> Segment {
        Segment::new(SegmentKind::Ad, start, end)
    }

    #[test]
    fn test_degenerate_span_dropped() {
        let kept = filter_segments(
            vec![ad(20.0, 20.0), ad(30.0, 25.0)],
            100.0,
            None,
            &PlausibilityConfig::default(),
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn test_span_outside_file_dropped() {
        let kept = filter_segments(vec![ad(120.0, 130.0)], 100.0, None, &PlausibilityConfig::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_end_clamped_to_duration() {
        let kept = filter_segments(vec![ad(90.0, 130.0)], 100.0, None, &PlausibilityConfig::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].end, 100.0);
    }

    #[test]
    fn test_overlong_segment_dropped() {
        // 5 -> 400 exceeds the 300s ceiling for any duration >= 400
        let kept = filter_segments(vec![ad(5.0, 400.0)], 500.0, None, &PlausibilityConfig::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_intro_suppressed_on_non_first_window() {
        let ctx = WindowContext {
            is_first: false,
            is_last: false,
            start_secs: 540.0,
            end_secs: 1140.0,
        };
        let config = PlausibilityConfig::default();

        let mid_window_intro = Segment::new(SegmentKind::Intro, 600.0, 620.0);
        let boundary_intro = Segment::new(SegmentKind::Intro, 540.0, 560.0);
        let kept = filter_segments(
            vec![mid_window_intro, boundary_intro],
            1500.0,
            Some(&ctx),
            &config,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].start, 540.0);
    }

    #[test]
    fn test_outro_suppressed_on_non_final_window() {
        let ctx = WindowContext {
            is_first: true,
            is_last: false,
            start_secs: 0.0,
            end_secs: 600.0,
        };
        let kept = filter_segments(
            vec![Segment::new(SegmentKind::Outro, 300.0, 320.0)],
            1500.0,
            Some(&ctx),
            &PlausibilityConfig::default(),
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn test_intro_allowed_on_first_window() {
        let ctx = WindowContext {
            is_first: true,
            is_last: false,
            start_secs: 0.0,
            end_secs: 600.0,
        };
        let kept = filter_segments(
            vec![Segment::new(SegmentKind::Intro, 0.0, 15.0)],
            1500.0,
            Some(&ctx),
            &PlausibilityConfig::default(),
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_plausible_ad_passes() {
        let kept = filter_segments(vec![ad(450.2, 480.0)], 1500.0, None, &PlausibilityConfig::default());
        assert_eq!(kept.len(), 1);
    }
}
