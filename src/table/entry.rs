use serde::{Deserialize, Serialize};

use crate::types::identifiers::TokenId;

/// Identifier and occurrence count stored for one distinct key.
///
/// The key itself (prefix included) is the table's map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub id: TokenId,
    pub count: u64,
}
