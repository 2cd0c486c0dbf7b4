//! Storage-layer types for record identity and store configuration.
//!
//! [`RecordId`] is defined here (not in timetravel-core) because record
//! identity is a storage concern: snapshots only gain an ID when persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store name used when none is configured.
pub const DEFAULT_STORE_NAME: &str = "default_store_name";

/// Store version used when none is configured.
pub const DEFAULT_STORE_VERSION: u32 = 1;

/// Identifier assigned to an appended snapshot.
///
/// The inner `i64` aligns with SQLite's `INTEGER PRIMARY KEY`. IDs grow with
/// insertion order and are never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

/// Storage identifiers handed to a backend at construction.
///
/// None of this affects history or navigation semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the snapshot store inside the database.
    pub store_name: String,
    /// Schema version the caller expects. Opening a store that was written
    /// with a newer version fails.
    pub version: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: DEFAULT_STORE_NAME.to_string(),
            version: DEFAULT_STORE_VERSION,
        }
    }
}

impl StoreConfig {
    pub fn new(store_name: impl Into<String>, version: u32) -> Self {
        StoreConfig {
            store_name: store_name.into(),
            version,
        }
    }
}
