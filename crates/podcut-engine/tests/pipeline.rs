//! End-to-end engine flow: window a transcript, normalize detector output
//! per window, filter, reconcile, and derive the edit plan.

use podcut_engine::{
    dedup_into, filter_segments, normalize_response, plan_windows, sort_and_dedup, CutPlan,
    PlausibilityConfig,
};
use podcut_models::{format_seconds, Segment, SegmentKind, TranscriptSegment};

fn transcript(duration: f64) -> Vec<TranscriptSegment> {
    let mut lines = Vec::new();
    let mut t = 0.0;
    while t < duration {
        lines.push(TranscriptSegment::new(t, t + 5.0, format_seconds(t)));
        t += 30.0;
    }
    lines
}

#[test]
fn boundary_straddling_ad_is_reported_once() {
    let total = 1500.0;
    let windows = plan_windows(&transcript(total), total, 600.0, 60.0).unwrap();
    assert_eq!(windows.len(), 3);

    // Window 1 and window 2 both see the ad near the 600s boundary and
    // report it in their own local time.
    let responses = [
        r#"{"segments_to_remove": [{"type": "ad", "start": 590.0, "end": 600.0}]}"#,
        r#"{"segments_to_remove": [{"type": "ad", "start": 50.2, "end": 60.1}]}"#,
        r#"{"segments_to_remove": []}"#,
    ];

    let config = PlausibilityConfig::default();
    let mut accepted = Vec::new();
    for (window, raw) in windows.iter().zip(responses) {
        let local = normalize_response(raw).into_segments();
        let global = window.to_global(local);
        let plausible = filter_segments(global, total, Some(&window.context()), &config);
        dedup_into(&mut accepted, plausible, config.dedup_epsilon_secs);
    }

    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].kind, SegmentKind::Ad);
    assert_eq!(accepted[0].start, 590.0);

    let plan = CutPlan::new(&accepted, total).unwrap();
    assert_eq!(plan.trims().len(), 2);
    assert!((plan.kept_duration() - 1490.0).abs() < 1e-9);
    assert_eq!(plan.skip_pairs(), vec![(590.0, 600.0)]);
}

#[test]
fn failed_window_does_not_discard_prior_results() {
    let total = 1500.0;
    let windows = plan_windows(&transcript(total), total, 600.0, 60.0).unwrap();
    let config = PlausibilityConfig::default();

    let responses = [
        r#"{"segments_to_remove": [{"type": "intro", "start": 0, "end": 15}]}"#,
        "the model timed out and this is an error page",
        r#"{"segments_to_remove": [{"type": "outro", "start": 400.0, "end": 420.0}]}"#,
    ];

    let mut accepted = Vec::new();
    for (window, raw) in windows.iter().zip(responses) {
        let local = normalize_response(raw).into_segments();
        let global = window.to_global(local);
        let plausible = filter_segments(global, total, Some(&window.context()), &config);
        dedup_into(&mut accepted, plausible, config.dedup_epsilon_secs);
    }

    // Window 2 yielded nothing; window 1's intro and window 3's outro survive.
    assert_eq!(accepted.len(), 2);
    assert_eq!(accepted[0].kind, SegmentKind::Intro);
    assert_eq!(accepted[1].kind, SegmentKind::Outro);
    assert_eq!(accepted[1].start, 1480.0);
}

#[test]
fn completion_order_does_not_change_the_final_segment_list() {
    // Same three windows, but the dedup accumulator receives their results
    // in reverse completion order. The final time-sorted pass must produce
    // the same list the sequential loop would.
    let window_results = [
        vec![Segment::new(SegmentKind::Intro, 0.0, 15.0)],
        vec![Segment::new(SegmentKind::Ad, 590.0, 600.0)],
        vec![Segment::new(SegmentKind::Ad, 590.3, 600.2)],
    ];

    let mut forward = Vec::new();
    for result in window_results.iter() {
        dedup_into(&mut forward, result.clone(), 1.0);
    }
    let forward = sort_and_dedup(forward, 1.0);

    let mut reverse = Vec::new();
    for result in window_results.iter().rev() {
        dedup_into(&mut reverse, result.clone(), 1.0);
    }
    let reverse = sort_and_dedup(reverse, 1.0);

    assert_eq!(forward.len(), 2);
    assert_eq!(forward.len(), reverse.len());
    assert_eq!(forward[0].kind, SegmentKind::Intro);
    assert_eq!(forward[1].kind, reverse[1].kind);
    // sorted output, regardless of arrival order
    assert!(forward[0].start <= forward[1].start);
    assert!(reverse[0].start <= reverse[1].start);
}
