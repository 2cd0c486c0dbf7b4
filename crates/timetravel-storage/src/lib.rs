//! Storage abstraction for time-travel playground snapshots.
//!
//! Provides the [`SnapshotStore`] trait defining the persistence contract
//! that all backends implement, the [`InMemoryStore`] and [`SqliteStore`]
//! backends, and the [`HistoryStore`] that keeps a navigable timeline in
//! sync with a store.
//!
//! # Modules
//!
//! - [`error`]: StorageError with the three failure classes
//! - [`types`]: RecordId and StoreConfig storage-layer types
//! - [`traits`]: SnapshotStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema and migration setup
//! - [`sqlite`]: SqliteStore implementation
//! - [`history`]: HistoryStore, the store-backed timeline

pub mod error;
pub mod history;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use history::HistoryStore;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::SnapshotStore;
pub use types::{RecordId, StoreConfig, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION};
