//! Flat-file JSON store
//!
//! Each ledger is one JSON document on disk holding a list of records.
//! The whole document is read and rewritten on every operation; there is
//! no partial update. A missing document is created containing an empty
//! list, so a fresh work dir behaves like empty ledgers. Read or parse
//! failures are surfaced as [`StoreError`] instead of being masked as an
//! empty list, so callers can tell "no data" from "storage broke".

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Flat-file store error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for shared::ApiError {
    fn from(err: StoreError) -> Self {
        shared::ApiError::storage(err.to_string())
    }
}

/// One JSON document holding a list of records
///
/// The store is path-injectable: tests point it at a temp directory and
/// the production server at `<work_dir>/data`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Read the full record list
    ///
    /// A missing document is created holding `[]`; an empty document
    /// also reads as an empty list.
    pub fn read<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Document missing, creating empty list");
            fs::write(&self.path, "[]").map_err(|e| self.io_err(e))?;
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Serialize and overwrite the entire document
    pub fn write<T: Serialize>(&self, records: &[T]) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(records).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|e| self.io_err(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Product;

    fn product(id: i64, stock: i64) -> Product {
        Product {
            id: Some(id),
            name: format!("p{}", id),
            price: rust_decimal::Decimal::from(10),
            stock,
        }
    }

    #[test]
    fn test_missing_document_reads_empty_and_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("inventory.json"));

        let list: Vec<Product> = store.read().unwrap();
        assert!(list.is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("inventory.json"));

        let products = vec![product(1, 5), product(3, 0)];
        store.write(&products).unwrap();

        let read: Vec<Product> = store.read().unwrap();
        assert_eq!(read, products);
    }

    #[test]
    fn test_empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.json");
        fs::write(&path, "").unwrap();

        let list: Vec<Product> = JsonStore::new(path).read().unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{not json").unwrap();

        let result: StoreResult<Vec<Product>> = JsonStore::new(path).read();
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }
}
