//! On-disk cache for analysis records and transcripts.
//!
//! Detector calls are the expensive part of a run, so a successful analysis
//! is persisted and keyed by a stable identity derived from the input. A
//! cache hit skips straight to the edit; any unreadable or out-of-date entry
//! is a miss, never an error. Writes go through a temp file and an atomic
//! rename so a crash cannot leave a half-written record behind.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use podcut_models::AnalysisRecord;

pub mod error;

pub use error::{CacheError, CacheResult};

/// Stable cache identity for an input path or URL.
pub fn cache_id(input: &str) -> String {
    let digest = Sha256::digest(input.trim().as_bytes());
    format!("{:x}", digest)
}

/// Directory of persisted analysis records and compressed transcripts.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    root: PathBuf,
}

impl AnalysisCache {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.analysis.json"))
    }

    fn transcript_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.transcript.json.gz"))
    }

    /// Load a cached analysis record.
    ///
    /// Missing files, unreadable JSON, and schema-version mismatches are all
    /// cache misses.
    pub fn load(&self, id: &str) -> Option<AnalysisRecord> {
        let path = self.record_path(id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        let record: AnalysisRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable cache record, ignoring");
                return None;
            }
        };

        if !record.is_current_schema() {
            debug!(
                path = %path.display(),
                version = record.input_meta.schema_version,
                "cache record has stale schema, ignoring"
            );
            return None;
        }

        debug!(path = %path.display(), "analysis cache hit");
        Some(record)
    }

    /// Persist an analysis record atomically.
    pub fn store(&self, id: &str, record: &AnalysisRecord) -> CacheResult<()> {
        std::fs::create_dir_all(&self.root)?;

        let mut file = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(&mut file, record)?;
        file.flush()?;
        file.persist(self.record_path(id))?;

        debug!(id, "stored analysis record");
        Ok(())
    }

    /// Load a cached gzip-compressed transcript payload.
    ///
    /// Corrupt data is a cache miss.
    pub fn load_transcript(&self, id: &str) -> Option<String> {
        let data = std::fs::read(self.transcript_path(id)).ok()?;

        let mut decoder = GzDecoder::new(data.as_slice());
        let mut text = String::new();
        if let Err(err) = decoder.read_to_string(&mut text) {
            warn!(id, error = %err, "failed to decompress transcript cache");
            return None;
        }
        Some(text)
    }

    /// Persist a transcript payload, gzip-compressed, atomically.
    pub fn store_transcript(&self, id: &str, transcript: &str) -> CacheResult<()> {
        std::fs::create_dir_all(&self.root)?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(transcript.as_bytes())?;
        let compressed = encoder.finish()?;

        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(&compressed)?;
        file.flush()?;
        file.persist(self.transcript_path(id))?;

        debug!(id, compressed_size = compressed.len(), "stored transcript");
        Ok(())
    }
}
