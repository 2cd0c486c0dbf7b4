//! SQLite implementation of [`SnapshotStore`].
//!
//! [`SqliteStore`] persists snapshots in a SQLite database with WAL mode and
//! automatic schema migrations. Several named stores can share one file;
//! each store only ever sees its own rows. Rows are ordered by their
//! autoincrement id, so arrival order survives equal timestamps.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use timetravel_core::Snapshot;

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::{RecordId, StoreConfig};

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    /// A private in-memory database; its contents die with the connection.
    Memory,
}

/// SQLite-backed implementation of [`SnapshotStore`].
///
/// Construction does not touch the database; [`SnapshotStore::open`] does.
pub struct SqliteStore {
    location: Location,
    config: StoreConfig,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// A store backed by the database file at `path`.
    pub fn new(path: impl AsRef<Path>, config: StoreConfig) -> Self {
        SqliteStore {
            location: Location::File(path.as_ref().to_path_buf()),
            config,
            conn: None,
        }
    }

    /// A store backed by an in-memory database (for testing).
    ///
    /// Closing the store discards everything it held.
    pub fn in_memory(config: StoreConfig) -> Self {
        SqliteStore {
            location: Location::Memory,
            config,
            conn: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn conn(&self) -> Result<&Connection, StorageError> {
        self.conn.as_ref().ok_or_else(StorageError::not_open)
    }

    /// Registers the configured store name, enforcing the version rule:
    /// a newer stored version is refused, an older one is bumped.
    fn register_store(conn: &Connection, config: &StoreConfig) -> Result<(), StorageError> {
        let stored: Option<u32> = conn
            .query_row(
                "SELECT version FROM stores WHERE name = ?1",
                params![config.store_name],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::unavailable)?;

        match stored {
            None => {
                conn.execute(
                    "INSERT INTO stores (name, version) VALUES (?1, ?2)",
                    params![config.store_name, config.version],
                )
                .map_err(StorageError::unavailable)?;
            }
            Some(version) if version > config.version => {
                return Err(StorageError::unavailable(format!(
                    "store '{}' is at version {}, newer than requested version {}",
                    config.store_name, version, config.version
                )));
            }
            Some(version) if version < config.version => {
                conn.execute(
                    "UPDATE stores SET version = ?1 WHERE name = ?2",
                    params![config.version, config.store_name],
                )
                .map_err(StorageError::unavailable)?;
                tracing::info!(
                    store = %config.store_name,
                    from = version,
                    to = config.version,
                    "upgraded snapshot store version"
                );
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| StorageError::read(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

impl SnapshotStore for SqliteStore {
    fn open(&mut self) -> Result<(), StorageError> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = match &self.location {
            Location::File(path) => crate::schema::open_database(path)?,
            Location::Memory => crate::schema::open_in_memory()?,
        };
        Self::register_store(&conn, &self.config)?;

        tracing::debug!(store = %self.config.store_name, "snapshot store opened");
        self.conn = Some(conn);
        Ok(())
    }

    fn append(&mut self, snapshot: &Snapshot) -> Result<RecordId, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO snapshots (store_name, code, timestamp) VALUES (?1, ?2, ?3)",
            params![
                self.config.store_name,
                snapshot.code,
                Self::format_timestamp(&snapshot.timestamp),
            ],
        )
        .map_err(StorageError::write)?;
        Ok(RecordId(conn.last_insert_rowid()))
    }

    fn list_all(&self) -> Result<Vec<Snapshot>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare_cached(
                "SELECT code, timestamp FROM snapshots WHERE store_name = ?1 ORDER BY id ASC",
            )
            .map_err(StorageError::read)?;

        let rows = stmt
            .query_map(params![self.config.store_name], |row| {
                let code: String = row.get(0)?;
                let timestamp: String = row.get(1)?;
                Ok((code, timestamp))
            })
            .map_err(StorageError::read)?;

        let mut snapshots = Vec::new();
        for row in rows {
            let (code, timestamp) = row.map_err(StorageError::read)?;
            snapshots.push(Snapshot::at(code, Self::parse_timestamp(&timestamp)?));
        }
        Ok(snapshots)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM snapshots WHERE store_name = ?1",
            params![self.config.store_name],
        )
        .map_err(StorageError::write)?;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                tracing::warn!(
                    store = %self.config.store_name,
                    error = %e,
                    "failed to close snapshot store cleanly"
                );
            }
            tracing::debug!(store = %self.config.store_name, "snapshot store closed");
        }
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}
