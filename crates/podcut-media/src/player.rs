//! mpv playback with a skip script attached.

use std::path::Path;
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Launch mpv on `media` with the given Lua skip script loaded, and wait
/// for the player to exit.
pub async fn play_with_skips(
    media: &str,
    script_path: impl AsRef<Path>,
    audio_only: bool,
) -> MediaResult<()> {
    which::which("mpv").map_err(|_| MediaError::MpvNotFound)?;

    let script_path = script_path.as_ref();
    info!(media, script = %script_path.display(), "launching mpv");

    let mut cmd = tokio::process::Command::new("mpv");
    cmd.arg(media)
        .arg(format!("--script={}", script_path.display()))
        .arg("--force-window=immediate");

    if audio_only {
        cmd.arg("--no-video");
    }

    let status = cmd.status().await?;
    if !status.success() {
        info!(code = ?status.code(), "mpv exited with non-zero status");
    }
    Ok(())
}
