use indexmap::IndexMap;
use log::{debug, warn};
use sha2::{Digest, Sha256};

use super::entry::TokenEntry;
use super::limit::{prune, LimitOptions};
use super::persist::format_line;
use crate::types::identifiers::{TableVersion, TokenId};

/// First identifier handed out by a table built with [`TokenTable::new`].
///
/// Linear classifiers such as liblinear reject feature index 0.
pub const DEFAULT_OFFSET: u32 = 1;

/// Interns string tokens as sequential integer identifiers.
///
/// While open, every resolved token is recorded and counted. Once frozen,
/// the table only answers lookups for tokens it already knows.
#[derive(Debug, Clone)]
pub struct TokenTable {
    pub(super) entries: IndexMap<String, TokenEntry>,
    offset: TokenId,
    /// `None` once every `u32` id has been handed out.
    pub(super) next_id: Option<TokenId>,
    pub(super) frozen: bool,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::with_offset(DEFAULT_OFFSET)
    }

    pub fn with_offset(offset: u32) -> Self {
        Self {
            entries: IndexMap::new(),
            offset: TokenId::new(offset),
            next_id: Some(TokenId::new(offset)),
            frozen: false,
        }
    }

    pub fn offset(&self) -> TokenId {
        self.offset
    }

    /// Identifier the next unseen token will receive, or `None` when the
    /// id space is exhausted.
    ///
    /// Never decreases: pruned identifiers are retired, not reused.
    pub fn next_id(&self) -> Option<TokenId> {
        self.next_id
    }

    /// Empty table with the same offset, id counter and frozen state.
    pub(super) fn empty_like(&self) -> Self {
        Self {
            entries: IndexMap::new(),
            offset: self.offset,
            next_id: self.next_id,
            frozen: self.frozen,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stop assigning identifiers to unseen tokens.
    pub fn freeze(&mut self) {
        self.frozen = true;
        debug!("token table frozen with {} entries", self.entries.len());
    }

    /// Allow unseen tokens to be assigned identifiers again.
    pub fn thaw(&mut self) {
        self.frozen = false;
        debug!("token table thawed at next id {:?}", self.next_id);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Resolve a token to its identifier.
    ///
    /// Blank tokens resolve to `None`. An open table assigns the next
    /// identifier to an unseen token and counts the occurrence; a frozen
    /// table returns `None` for unseen tokens and counts nothing. Once the
    /// id space is exhausted, unseen tokens resolve to `None` as well.
    pub fn get(&mut self, token: &str) -> Option<TokenId> {
        self.get_prefixed(token, "")
    }

    /// Like [`get`](Self::get), with `prefix` prepended to the token.
    ///
    /// The prefix namespaces tokens: `"bar"` and `"title:bar"` are distinct
    /// entries, while `get_prefixed("bar", "title:")` and `get("title:bar")`
    /// are the same one.
    pub fn get_prefixed(&mut self, token: &str, prefix: &str) -> Option<TokenId> {
        if is_blank(token) {
            return None;
        }
        if self.frozen {
            return self.lookup(token, prefix);
        }

        let key = format!("{prefix}{token}");
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.count += 1;
            return Some(entry.id);
        }

        let Some(id) = self.next_id else {
            warn!("token id space exhausted, not assigning an id to {key:?}");
            return None;
        };
        self.next_id = id.checked_next();
        self.entries.insert(key, TokenEntry { id, count: 1 });
        Some(id)
    }

    /// Identifier of a known token, without recording an occurrence.
    pub fn lookup(&self, token: &str, prefix: &str) -> Option<TokenId> {
        if is_blank(token) {
            return None;
        }
        self.entries
            .get(format!("{prefix}{token}").as_str())
            .map(|entry| entry.id)
    }

    /// Token carrying `id`, if it is still retained.
    ///
    /// This is a linear scan; the table is indexed by token, not by id.
    pub fn find(&self, id: TokenId) -> Option<&str> {
        self.find_prefixed(id, "")
    }

    /// Token carrying `id` within the `prefix` namespace, prefix stripped.
    pub fn find_prefixed(&self, id: TokenId, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.id == id)
            .and_then(|(key, _)| key.strip_prefix(prefix))
    }

    /// Identifiers of all retained tokens, in insertion order.
    pub fn indexes(&self) -> Vec<TokenId> {
        self.entries.values().map(|entry| entry.id).collect()
    }

    /// Occurrence count recorded for a full key (prefix included).
    pub fn count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.count)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TokenEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Prune the table and return the number of entries left.
    ///
    /// Allowed on a frozen table. `next_id` is not touched.
    pub fn limit(&mut self, options: LimitOptions) -> usize {
        let before = self.entries.len();
        prune(&mut self.entries, options);
        debug!(
            "token table pruned from {} to {} entries ({:?})",
            before,
            self.entries.len(),
            options
        );
        self.entries.len()
    }

    /// Fingerprint of the table's persisted form.
    pub fn version(&self) -> TableVersion {
        let mut hasher = Sha256::new();
        for (key, entry) in &self.entries {
            hasher.update(format_line(key, entry).as_bytes());
        }
        TableVersion::from_digest(&hasher.finalize())
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(token: &str) -> bool {
    token.trim().is_empty()
}
