use std::collections::BTreeSet;

use crate::table::{SharedTable, TokenTable};
use crate::types::identifiers::TokenId;

use super::config::TokenizerConfig;

/// Converts pre-processed text into a sequence of token ids.
///
/// Input is expected to be normalized already (case, punctuation,
/// transliteration). The tokenizer splits on whitespace, drops words that
/// are too short or are stop words, and resolves the rest through its table.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    table: SharedTable,
    stop_words: BTreeSet<String>,
    min_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Tokenizer with the default configuration and a table of its own.
    pub fn new() -> Self {
        Self::with_config(TokenizerConfig::default())
    }

    pub fn with_config(config: TokenizerConfig) -> Self {
        let table = SharedTable::new(TokenTable::with_offset(config.offset));
        Self::with_table(table, config)
    }

    /// Tokenizer resolving words through an existing, possibly shared, table.
    pub fn with_table(table: SharedTable, config: TokenizerConfig) -> Self {
        Self {
            table,
            stop_words: config.stop_words,
            min_length: config.min_length,
        }
    }

    pub fn table(&self) -> &SharedTable {
        &self.table
    }

    pub fn stop_words(&self) -> &BTreeSet<String> {
        &self.stop_words
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Ids for the words of `text`, in order, duplicates included.
    ///
    /// Words unknown to a frozen table are left out.
    pub fn get(&self, text: &str) -> Vec<TokenId> {
        self.get_prefixed(text, "")
    }

    /// Like [`get`](Self::get), resolving every word under `prefix`.
    pub fn get_prefixed(&self, text: &str, prefix: &str) -> Vec<TokenId> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut table = self.table.lock();
        text.split_whitespace()
            .filter(|word| self.keep(word))
            .filter_map(|word| table.get_prefixed(word, prefix))
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        word.chars().count() >= self.min_length && !self.stop_words.contains(word)
    }
}
