use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::table::TokenTable;

/// Handle to a [`TokenTable`] shared by several owners.
///
/// Cloning the handle shares the table. Every operation runs under one lock,
/// so a lookup-or-insert can never hand the same id to two tokens.
#[derive(Debug, Clone, Default)]
pub struct SharedTable {
    inner: Arc<Mutex<TokenTable>>,
}

impl SharedTable {
    pub fn new(table: TokenTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Lock the table for the duration of the returned guard.
    pub fn lock(&self) -> MutexGuard<'_, TokenTable> {
        // Table operations never leave a half-applied mutation behind, so a
        // poisoned lock still guards a consistent table.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles point at the same table.
    pub fn ptr_eq(&self, other: &SharedTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<TokenTable> for SharedTable {
    fn from(table: TokenTable) -> Self {
        Self::new(table)
    }
}
