//! Transcript files for the replay tool.
//!
//! A transcript is JSON Lines: one object per user turn with the message
//! text and the extraction recorded for it.
//!
//! ```text
//! {"message": "Sydney to Tokyo", "extraction": {"origin_code": "SYD", "destination_code": "NRT"}}
//! {"message": "Just me"}
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::search::ExtractedParameters;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTurn {
    pub message: String,
    pub extraction: ExtractedParameters,
}

#[derive(Deserialize)]
struct RawTurn {
    message: String,
    #[serde(default)]
    extraction: Value,
}

/// Parses transcript text. Blank lines are skipped.
pub fn parse_transcript(text: &str) -> Result<Vec<TranscriptTurn>, TranscriptError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let raw: RawTurn = serde_json::from_str(line)
                .map_err(|source| TranscriptError::Parse { line: i + 1, source })?;
            Ok(TranscriptTurn {
                message: raw.message,
                extraction: ExtractedParameters::from_json(&raw.extraction),
            })
        })
        .collect()
}

/// Reads and parses a transcript file.
pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptTurn>, TranscriptError> {
    let text = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transcript(&text)
}
