//! Segment reconciliation and timeline engine.
//!
//! This crate turns a noisy, possibly-chunked, possibly-multi-source set of
//! candidate remove-spans into one trustworthy, non-overlapping, monotonic
//! cut list, and derives the edit plan from it:
//!
//! - [`window`]: split a long transcript into overlapping analysis windows
//!   and re-map window-local detections back to global time
//! - [`normalize`]: coerce untrusted detector output into typed segments and
//!   deduplicate across windows and sources
//! - [`plausibility`]: reject structurally invalid or implausible candidates
//! - [`reconcile`]: compute the gap-complement keep list
//! - [`plan`]: drive the media trim/concat edit and the transcript filter
//!
//! Everything here is pure and synchronous; all I/O lives in sibling crates.

pub mod error;
pub mod normalize;
pub mod plan;
pub mod plausibility;
pub mod reconcile;
pub mod window;

pub use error::{EngineError, EngineResult};
pub use normalize::{dedup_into, normalize_response, sort_and_dedup, ParseOutcome};
pub use plan::CutPlan;
pub use plausibility::{filter_segments, PlausibilityConfig, WindowContext};
pub use reconcile::{merge_spans, reconcile};
pub use window::{plan_windows, AnalysisWindow};
