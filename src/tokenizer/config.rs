use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::stop_words::{DEFAULT_STOP_WORDS, MIN_LENGTH};
use crate::table::DEFAULT_OFFSET;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid tokenizer config: {0}")]
    Json(#[from] serde_json::Error),
}

// Serializable, explicit defaults; fields missing from a config file fall
// back to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Words shorter than this many characters are dropped.
    pub min_length: usize,
    /// Words ignored entirely.
    pub stop_words: BTreeSet<String>,
    /// First id of the table a tokenizer creates for itself. Ignored when
    /// the tokenizer is handed an existing table.
    pub offset: u32,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_length: MIN_LENGTH,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            offset: DEFAULT_OFFSET,
        }
    }
}

impl TokenizerConfig {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Replace the stop-word set.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
