//! Transcript segments from the upstream speech/caption engine.

use serde::{Deserialize, Serialize};

/// One timestamped line of transcript. Produced upstream; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start in seconds.
    pub start: f64,
    /// End in seconds.
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Midpoint of the line, used to attribute it to one side of a cut.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let line = TranscriptSegment::new(100.0, 104.0, "hello");
        assert_eq!(line.midpoint(), 102.0);
    }

    #[test]
    fn test_serde_shape() {
        let line: TranscriptSegment =
            serde_json::from_str(r#"{"start": 1.0, "end": 2.5, "text": "hi"}"#).unwrap();
        assert_eq!(line, TranscriptSegment::new(1.0, 2.5, "hi"));
    }
}
