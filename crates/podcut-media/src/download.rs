//! yt-dlp media download and crowd-sourced segment lookup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

use podcut_models::{Segment, SegmentKind, SegmentSource};

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Subset of yt-dlp's `--dump-json` metadata we consume.
#[derive(Debug, Deserialize)]
struct VideoMetadata {
    #[serde(default)]
    sponsorblock_chapters: Vec<SponsorBlockChapter>,
}

#[derive(Debug, Deserialize)]
struct SponsorBlockChapter {
    start_time: f64,
    end_time: f64,
    /// Category label, e.g. "Sponsor" or "Intermission/Intro Animation"
    title: String,
}

/// Look up crowd-sourced skip segments for a URL.
///
/// The database only covers some feeds, and the lookup is an optimization,
/// so every failure mode degrades to "no segments" with a diagnostic rather
/// than failing the run. Results still go through the plausibility filter;
/// crowd data is not trusted more than model output.
pub async fn fetch_sponsorblock_segments(url: &str) -> Vec<Segment> {
    if check_ytdlp().is_err() {
        warn!("yt-dlp not found, skipping crowd-sourced segment lookup");
        return Vec::new();
    }

    info!(url, "checking crowd-sourced segment database");

    let output = Command::new("yt-dlp")
        .args([
            "--dump-json",
            "--sponsorblock-mark",
            "all",
            "--skip-download",
        ])
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match output {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            warn!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "crowd-sourced lookup failed"
            );
            return Vec::new();
        }
        Err(err) => {
            warn!(error = %err, "crowd-sourced lookup failed");
            return Vec::new();
        }
    };

    let metadata: VideoMetadata = match serde_json::from_slice(&output.stdout) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!(error = %err, "unparseable yt-dlp metadata");
            return Vec::new();
        }
    };

    let segments: Vec<Segment> = metadata
        .sponsorblock_chapters
        .into_iter()
        .map(|c| {
            Segment::new(SegmentKind::parse(&c.title), c.start_time, c.end_time)
                .with_source(SegmentSource::CrowdDb)
        })
        .collect();

    if segments.is_empty() {
        info!("no crowd-sourced segments found");
    } else {
        info!(count = segments.len(), "found crowd-sourced segments");
    }
    segments
}

/// Download the media behind a URL into `output_dir`.
///
/// `audio_only` extracts a 192k mp3; otherwise the best mp4 is fetched.
/// Returns the path of the downloaded file as reported by yt-dlp itself,
/// which accounts for post-processor extension changes.
pub async fn download_media(
    url: &str,
    output_dir: impl AsRef<Path>,
    file_stem: &str,
    audio_only: bool,
) -> MediaResult<PathBuf> {
    check_ytdlp()?;
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let template = output_dir.join(format!("{file_stem}.%(ext)s"));
    info!(url, audio_only, "downloading media");

    let mut cmd = Command::new("yt-dlp");
    cmd.args(["--no-progress", "--print", "after_move:filepath"]);

    if audio_only {
        cmd.args([
            "-f",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
            "192K",
        ]);
    } else {
        cmd.args(["-f", "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best"]);
    }

    cmd.arg("-o").arg(&template).arg(url);

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // `--print after_move:filepath` emits the final path on stdout
    let path_line = String::from_utf8_lossy(&output.stdout);
    let path = PathBuf::from(path_line.trim());
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(MediaError::download_failed(
            "yt-dlp did not report a downloaded file",
        ));
    }

    info!(path = %path.display(), "download complete");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sponsorblock_chapter_mapping() {
        let raw = r#"{"sponsorblock_chapters": [
            {"start_time": 12.5, "end_time": 45.0, "title": "Sponsor"},
            {"start_time": 100.0, "end_time": 130.0, "title": "Intro"}
        ]}"#;
        let metadata: VideoMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(metadata.sponsorblock_chapters.len(), 2);

        let segment = Segment::new(
            SegmentKind::parse(&metadata.sponsorblock_chapters[0].title),
            metadata.sponsorblock_chapters[0].start_time,
            metadata.sponsorblock_chapters[0].end_time,
        )
        .with_source(SegmentSource::CrowdDb);
        assert_eq!(segment.kind, SegmentKind::Sponsor);
        assert_eq!(segment.source, Some(SegmentSource::CrowdDb));
    }

    #[test]
    fn test_metadata_without_chapters() {
        let metadata: VideoMetadata = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert!(metadata.sponsorblock_chapters.is_empty());
    }
}
