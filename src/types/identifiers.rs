use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Integer feature identifier assigned to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u32);

impl TokenId {
    pub const fn new(id: u32) -> Self {
        TokenId(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The identifier directly after this one, `None` past `u32::MAX`.
    pub(crate) fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(TokenId)
    }
}

impl From<u32> for TokenId {
    fn from(id: u32) -> Self {
        TokenId(id)
    }
}

impl From<TokenId> for u32 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(TokenId)
    }
}

/// Content hash of a serialized token table.
///
/// Store it next to a model trained on the table and hand it back to
/// [`TokenTable::load_verified`](crate::TokenTable::load_verified) at
/// prediction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableVersion(String);

#[derive(Debug, Error)]
#[error("Invalid table version {0:?}: expected sha256:<64 hex digits>")]
pub struct InvalidTableVersion(String);

impl TableVersion {
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        TableVersion(format!("sha256:{}", hex::encode(digest)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableVersion {
    type Err = InvalidTableVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix("sha256:")
            .and_then(|digest| hex::decode(digest).ok())
            .is_some_and(|bytes| bytes.len() == 32);
        if valid {
            Ok(TableVersion(s.to_ascii_lowercase()))
        } else {
            Err(InvalidTableVersion(s.to_string()))
        }
    }
}

impl TryFrom<String> for TableVersion {
    type Error = InvalidTableVersion;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TableVersion> for String {
    fn from(version: TableVersion) -> Self {
        version.0
    }
}

impl fmt::Display for TableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
