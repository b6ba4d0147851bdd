//! SQLite-backed bucketed key-value store.
//!
//! All state lives in one table keyed by `(bucket, key)`. Values are opaque
//! byte blobs; JSON helpers sit on top. Keys compare with SQLite's BINARY
//! collation, so iteration order is plain byte order.
//!
//! Every access happens inside a [`Txn`]: [`Database::view`] for reads,
//! [`Database::update`] for read-modify-write. An update commits only if the
//! closure returns `Ok`; any error rolls the whole transaction back.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DatabaseError, Result};

/// Default database file name inside the data directory.
pub const DEFAULT_DB_FILE: &str = "pushups.db";

/// Named partition of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// One JSON [`DailyRecord`](crate::DailyRecord) per `YYYY-MM-DD` key.
    Days,
    /// Streak singleton under `"current"`.
    Streak,
    /// Raw configuration values such as `"firstDay"`.
    Config,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Days => "Days",
            Bucket::Streak => "Streak",
            Bucket::Config => "Config",
        }
    }
}

/// Embedded record store.
///
/// Single writer: the connection is owned, and callers that share it across
/// tasks wrap the owner in a mutex.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be created.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self {
            conn,
            path: Some(path),
        };
        db.init_schema()?;
        tracing::debug!(path = ?db.path, "database opened");
        Ok(db)
    }

    /// Open an in-memory database (tests and dry runs).
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, path: None };
        db.init_schema()?;
        Ok(db)
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                bucket TEXT NOT NULL,
                key    TEXT NOT NULL,
                value  BLOB NOT NULL,
                PRIMARY KEY (bucket, key)
            ) WITHOUT ROWID;",
        )
    }

    /// Run `f` in a read transaction. Nothing it does is committed.
    pub fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Txn<'_>) -> Result<T>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Deferred)?;
        let txn = Txn { tx };
        f(&txn)
    }

    /// Run `f` in a write transaction and commit if it returns `Ok`.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Txn<'_>) -> Result<T>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let txn = Txn { tx };
        let value = f(&txn)?;
        txn.tx.commit()?;
        Ok(value)
    }
}

/// An open transaction over the store.
pub struct Txn<'conn> {
    tx: Transaction<'conn>,
}

impl Txn<'_> {
    /// Raw value under `key`, if any.
    pub fn get(&self, bucket: Bucket, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .tx
            .query_row(
                "SELECT value FROM records WHERE bucket = ?1 AND key = ?2",
                params![bucket.as_str(), key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite the value under `key`.
    pub fn put(&self, bucket: Bucket, key: &str, value: &[u8]) -> Result<()> {
        self.tx.execute(
            "INSERT OR REPLACE INTO records (bucket, key, value) VALUES (?1, ?2, ?3)",
            params![bucket.as_str(), key, value],
        )?;
        Ok(())
    }

    /// Smallest key in the bucket.
    pub fn first_key(&self, bucket: Bucket) -> Result<Option<String>> {
        let key = self
            .tx
            .query_row(
                "SELECT key FROM records WHERE bucket = ?1 ORDER BY key ASC LIMIT 1",
                params![bucket.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(key)
    }

    /// All entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix(&self, bucket: Bucket, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut stmt = self.tx.prepare(
            "SELECT key, value FROM records
             WHERE bucket = ?1 AND substr(key, 1, ?2) = ?3
             ORDER BY key ASC",
        )?;
        let rows = stmt.query_map(
            params![bucket.as_str(), prefix.chars().count() as i64, prefix],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)),
        )?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Decode the JSON value under `key`. A malformed value is an error.
    pub fn get_json<T: DeserializeOwned>(&self, bucket: Bucket, key: &str) -> Result<Option<T>> {
        match self.get(bucket, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub fn put_json<T: Serialize>(&self, bucket: Bucket, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.put(bucket, key, &bytes)
    }
}
