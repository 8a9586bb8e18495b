//! Per-item processing pipeline.
//!
//! One input goes through: identity + cache check, transcript acquisition,
//! crowd-sourced lookup, windowed detection with a rolling dedup
//! accumulator, plausibility filtering, reconciliation, and finally the
//! media cut, transcript filter, and optional skip-script playback.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use podcut_cache::{cache_id, AnalysisCache};
use podcut_detect::DetectorChain;
use podcut_engine::{
    dedup_into, filter_segments, normalize_response, plan_windows, sort_and_dedup, CutPlan,
    ParseOutcome, PlausibilityConfig,
};
use podcut_media::{
    apply_cut_list, download_captions, download_media, fetch_sponsorblock_segments, get_duration,
    load_whisper_json, play_with_skips,
};
use podcut_models::{format_seconds, AnalysisRecord, Segment, TranscriptSegment};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::skip_script::write_skip_script;

/// Per-run options layered over [`AppConfig`] by the CLI.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub output_dir: PathBuf,
    /// Whisper-style transcript JSON overriding caption download.
    pub transcript: Option<PathBuf>,
    /// Analyze and report only; leave the media untouched.
    pub dry_run: bool,
    /// Generate an mpv skip script instead of (or alongside) cutting.
    pub skip_script: bool,
    /// Launch mpv with the skip script after analysis.
    pub play: bool,
    /// Audio-only download and playback.
    pub audio_only: bool,
    /// Ignore and overwrite any cached analysis.
    pub no_cache: bool,
}

/// Process one input path or URL end to end.
pub async fn process_input(
    input: &str,
    options: &ProcessOptions,
    config: &AppConfig,
) -> AppResult<()> {
    std::fs::create_dir_all(&options.output_dir)?;
    let cache = AnalysisCache::new(options.output_dir.join(".podcut-cache"));

    let is_remote = input.starts_with("http://") || input.starts_with("https://");
    let id = cache_id(input);
    let file_stem = derive_file_stem(input, is_remote, &id);

    info!(input, is_remote, "processing");

    let transcript = acquire_transcript(input, is_remote, &id, &cache, options).await?;
    if transcript.is_empty() {
        return Err(AppError::NoTranscript(input.to_string()));
    }

    // Local files report their real duration; for remote inputs the
    // transcript extent stands in until the media is downloaded.
    let total_duration = if is_remote {
        transcript.last().map(|s| s.end).unwrap_or(0.0)
    } else {
        get_duration(input).await?
    };

    let segments = match load_cached_segments(&cache, &id, options) {
        Some(segments) => segments,
        None => {
            let segments = analyze(
                input,
                is_remote,
                &transcript,
                total_duration,
                config,
            )
            .await?;
            let record = AnalysisRecord::new(
                input,
                is_remote,
                &file_stem,
                segments.clone(),
                transcript.clone(),
            );
            cache.store(&id, &record)?;
            segments
        }
    };

    report_segments(&segments);

    let plan = CutPlan::new(&segments, total_duration)?;

    if options.dry_run {
        info!(
            removed_secs = format!("{:.1}", plan.removed_duration()),
            kept_secs = format!("{:.1}", plan.kept_duration()),
            "dry run, skipping edit"
        );
        return Ok(());
    }

    let script_path = if options.skip_script || options.play {
        let media_name = if is_remote {
            input.to_string()
        } else {
            Path::new(input)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| input.to_string())
        };
        Some(write_skip_script(&plan, &media_name, &options.output_dir)?)
    } else {
        None
    };

    if options.play {
        if let Some(script) = &script_path {
            play_with_skips(input, script, options.audio_only).await?;
        }
        return Ok(());
    }

    // Skip-script-only mode leaves the media untouched.
    if options.skip_script {
        return Ok(());
    }

    render_outputs(input, is_remote, &file_stem, &plan, &transcript, options).await
}

/// Cut the media and write the cleaned transcript.
async fn render_outputs(
    input: &str,
    is_remote: bool,
    file_stem: &str,
    plan: &CutPlan,
    transcript: &[TranscriptSegment],
    options: &ProcessOptions,
) -> AppResult<()> {
    let source = if is_remote {
        download_media(input, &options.output_dir, file_stem, options.audio_only).await?
    } else {
        PathBuf::from(input)
    };

    if plan.has_cuts() {
        let extension = source
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "mp3".to_string());
        let clean_path = options
            .output_dir
            .join(format!("{file_stem}_clean.{extension}"));

        apply_cut_list(&source, &clean_path, plan.trims()).await?;
        info!(
            output = %clean_path.display(),
            removed_secs = format!("{:.1}", plan.removed_duration()),
            "wrote cleaned media"
        );
    } else {
        info!("no segments to remove, leaving media as-is");
    }

    let clean_transcript = plan.filter_transcript(transcript);
    let transcript_path = options.output_dir.join(format!("{file_stem}_transcript.md"));
    write_transcript_markdown(&transcript_path, file_stem, &clean_transcript)?;
    info!(output = %transcript_path.display(), "wrote cleaned transcript");

    Ok(())
}

/// Run the windowed detection loop and return the accepted global segments.
async fn analyze(
    input: &str,
    is_remote: bool,
    transcript: &[TranscriptSegment],
    total_duration: f64,
    config: &AppConfig,
) -> AppResult<Vec<Segment>> {
    let plausibility = PlausibilityConfig {
        max_segment_secs: config.max_segment_secs,
        dedup_epsilon_secs: config.dedup_epsilon_secs,
    };

    let mut accepted: Vec<Segment> = Vec::new();

    // Crowd-sourced segments seed the accumulator so model duplicates of
    // known segments are dropped, but they get no special trust.
    if is_remote {
        let crowd = fetch_sponsorblock_segments(input).await;
        let crowd = filter_segments(crowd, total_duration, None, &plausibility);
        dedup_into(&mut accepted, crowd, plausibility.dedup_epsilon_secs);
    }

    let windows = plan_windows(
        transcript,
        total_duration,
        config.window_secs,
        config.overlap_secs,
    )?;
    info!(windows = windows.len(), "planned analysis windows");

    let chain = DetectorChain::new(
        config.model_chain.clone(),
        config.gemini_api_key.clone(),
        config.openrouter_api_key.clone(),
        config.openrouter_base_url.clone(),
    )?;

    for window in &windows {
        info!(window = window.index + 1, total = window.total, "analyzing window");

        // A failed window forfeits only its own detections.
        let raw = match chain.detect_window(window).await {
            Ok(raw) => raw,
            Err(err) => {
                error!(window = window.index + 1, error = %err, "window analysis failed, continuing");
                continue;
            }
        };

        let outcome = normalize_response(&raw);
        if let ParseOutcome::Recovered(_) = &outcome {
            warn!(window = window.index + 1, "recovered segments from malformed response");
        }

        let global = window.to_global(outcome.into_segments());
        let plausible = filter_segments(
            global,
            total_duration,
            Some(&window.context()),
            &plausibility,
        );
        dedup_into(&mut accepted, plausible, plausibility.dedup_epsilon_secs);
    }

    // The accumulator keeps arrival order (crowd seed first, then windows);
    // the persisted record is globally time-sorted.
    Ok(sort_and_dedup(accepted, plausibility.dedup_epsilon_secs))
}

/// Get the transcript: an explicit whisper JSON wins, then the transcript
/// cache, then caption download for remote inputs.
async fn acquire_transcript(
    input: &str,
    is_remote: bool,
    id: &str,
    cache: &AnalysisCache,
    options: &ProcessOptions,
) -> AppResult<Vec<TranscriptSegment>> {
    if let Some(path) = &options.transcript {
        return Ok(load_whisper_json(path)?);
    }

    if !options.no_cache {
        if let Some(raw) = cache.load_transcript(id) {
            if let Ok(segments) = serde_json::from_str::<Vec<TranscriptSegment>>(&raw) {
                info!("using cached transcript");
                return Ok(segments);
            }
        }
    }

    if !is_remote {
        return Err(AppError::NoTranscript(format!(
            "{input}: local files need --transcript with a whisper-style JSON"
        )));
    }

    let segments = download_captions(input, options.output_dir.join(".podcut-cache")).await?;
    if let Ok(raw) = serde_json::to_string(&segments) {
        if let Err(err) = cache.store_transcript(id, &raw) {
            warn!(error = %err, "failed to cache transcript");
        }
    }
    Ok(segments)
}

fn load_cached_segments(
    cache: &AnalysisCache,
    id: &str,
    options: &ProcessOptions,
) -> Option<Vec<Segment>> {
    if options.no_cache {
        return None;
    }
    let record = cache.load(id)?;
    info!("using cached analysis");
    Some(record.segments_to_remove)
}

fn report_segments(segments: &[Segment]) {
    if segments.is_empty() {
        info!("no removable segments identified");
        return;
    }
    info!(count = segments.len(), "segments to remove:");
    for segment in segments {
        info!(
            "  {}: {} -> {}",
            segment.kind,
            format_seconds(segment.start),
            format_seconds(segment.end)
        );
    }
}

fn write_transcript_markdown(
    path: &Path,
    file_stem: &str,
    segments: &[TranscriptSegment],
) -> AppResult<()> {
    let mut body = format!("# Transcript: {file_stem}\n\n");
    for segment in segments {
        body.push_str(&format!(
            "[{}] {}\n",
            format_seconds(segment.start),
            segment.text
        ));
    }
    std::fs::write(path, body)?;
    Ok(())
}

fn derive_file_stem(input: &str, is_remote: bool, id: &str) -> String {
    if is_remote {
        format!("episode-{}", &id[..12])
    } else {
        Path::new(input)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| id[..12].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_file_stem() {
        let id = "abcdef0123456789abcdef0123456789";
        assert_eq!(derive_file_stem("/tmp/show.mp3", false, id), "show");
        assert_eq!(
            derive_file_stem("https://example.com/feed", true, id),
            "episode-abcdef012345"
        );
    }

    #[test]
    fn test_transcript_markdown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let segments = vec![TranscriptSegment::new(61.5, 63.0, "welcome back")];

        write_transcript_markdown(&path, "show", &segments).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# Transcript: show"));
        assert!(body.contains("[00:01:01.500] welcome back"));
    }
}
