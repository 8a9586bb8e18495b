//! External media tooling for podcut.
//!
//! Wraps the external binaries the pipeline shells out to: ffmpeg/ffprobe
//! for cutting and probing, yt-dlp for downloads, captions, and the
//! crowd-sourced segment database, and mpv for skip-script playback.
//! Everything here is async and returns [`MediaResult`].

pub mod captions;
pub mod command;
pub mod cut;
pub mod download;
pub mod error;
pub mod player;
pub mod probe;

pub use captions::{download_captions, load_whisper_json, parse_json3};
pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand};
pub use cut::{apply_cut_list, build_filter_graph};
pub use download::{download_media, fetch_sponsorblock_segments};
pub use error::{MediaError, MediaResult};
pub use player::play_with_skips;
pub use probe::{get_duration, probe_audio, AudioInfo};
