//! Transcript acquisition.
//!
//! Two sources produce the same `{start, end, text}` stream: a local
//! whisper-style JSON file, or YouTube captions fetched with yt-dlp in its
//! `json3` format and converted.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use podcut_models::TranscriptSegment;

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Whisper-style transcript file: `{"segments": [{"start", "end", "text"}]}`.
#[derive(Debug, Deserialize)]
struct WhisperFile {
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

/// yt-dlp `json3` caption file.
#[derive(Debug, Deserialize)]
struct Json3File {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: i64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: i64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Load a whisper-style transcript JSON file.
pub fn load_whisper_json(path: impl AsRef<Path>) -> MediaResult<Vec<TranscriptSegment>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    let file: WhisperFile = serde_json::from_str(&raw)?;
    Ok(file
        .segments
        .into_iter()
        .map(|s| TranscriptSegment::new(s.start, s.end, s.text.trim()))
        .collect())
}

/// Convert yt-dlp `json3` caption JSON into transcript segments.
///
/// Events without text (styling or window events) are skipped.
pub fn parse_json3(raw: &str) -> MediaResult<Vec<TranscriptSegment>> {
    let file: Json3File = serde_json::from_str(raw)?;

    let mut segments = Vec::new();
    for event in file.events {
        let Some(segs) = event.segs else { continue };
        let text: String = segs.iter().map(|s| s.utf8.as_str()).collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let start = event.start_ms as f64 / 1000.0;
        let end = start + event.duration_ms as f64 / 1000.0;
        segments.push(TranscriptSegment::new(start, end, text));
    }
    Ok(segments)
}

/// Fetch captions for a URL with yt-dlp and return them as transcript
/// segments. Prefers manual subtitles, falls back to auto-generated ones.
pub async fn download_captions(
    url: &str,
    work_dir: impl AsRef<Path>,
) -> MediaResult<Vec<TranscriptSegment>> {
    check_ytdlp()?;
    let work_dir = work_dir.as_ref();
    std::fs::create_dir_all(work_dir)?;

    let template = work_dir.join("captions.%(ext)s");
    info!(url, "fetching captions");

    let output = Command::new("yt-dlp")
        .args([
            "--skip-download",
            "--write-subs",
            "--write-auto-subs",
            "--sub-langs",
            "en.*,en",
            "--sub-format",
            "json3",
            "-o",
        ])
        .arg(&template)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::download_failed(format!(
            "yt-dlp subtitle fetch failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let caption_file = find_json3_file(work_dir)?
        .ok_or_else(|| MediaError::NoSubtitles(url.to_string()))?;
    debug!(file = %caption_file.display(), "parsing captions");

    let raw = std::fs::read_to_string(&caption_file)?;
    parse_json3(&raw)
}

/// Locate the caption file yt-dlp wrote; the language suffix varies
/// (`captions.en.json3`, `captions.en-US.json3`, ...).
fn find_json3_file(dir: &Path) -> MediaResult<Option<PathBuf>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("captions") && name.ends_with(".json3") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json3() {
        let raw = r#"{"events": [
            {"tStartMs": 0, "dDurationMs": 2000, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
            {"tStartMs": 500, "dDurationMs": 100},
            {"tStartMs": 3000, "dDurationMs": 1500, "segs": [{"utf8": "  "}]},
            {"tStartMs": 5000, "dDurationMs": 2500, "segs": [{"utf8": "second line"}]}
        ]}"#;
        let segments = parse_json3(raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello world");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 2.0);
        assert_eq!(segments[1].start, 5.0);
        assert_eq!(segments[1].end, 7.5);
    }

    #[test]
    fn test_load_whisper_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"segments": [{{"start": 1.0, "end": 2.5, "text": " hi "}}]}}"#
        )
        .unwrap();

        let segments = load_whisper_json(file.path()).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hi");
        assert_eq!(segments[0].end, 2.5);
    }

    #[test]
    fn test_missing_whisper_file() {
        let result = load_whisper_json("/nonexistent/transcript.json");
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
