//! Content store module
//!
//! Loads the CERT dataset from its backing JSON file, validates it, and hands out
//! immutable snapshots through the dataset cache. A reload replaces the snapshot
//! wholesale; records are never mutated in place.

mod record;
mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use record::{PgpKey, Record, Sector, DATE_FORMAT};
pub use validate::{validate_records, Violation, ViolationKind};

use crate::cache::{Clock, SystemClock, TtlCache, DATASET_KEY};
use crate::logger;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Reasons the dataset cannot be served
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset {} rejected with {} violation(s)", .path.display(), .violations.len())]
    Invalid {
        path: PathBuf,
        violations: Vec<Violation>,
    },
}

/// Immutable, validated record set
#[derive(Debug, Clone)]
pub struct ContentStore {
    records: Vec<Record>,
    loaded_at: DateTime<Utc>,
}

impl ContentStore {
    /// Build a store from already-parsed records, validating them first
    pub fn from_records(records: Vec<Record>) -> Result<Self, Vec<Violation>> {
        let violations = validate_records(&records);
        if !violations.is_empty() {
            return Err(violations);
        }
        Ok(Self {
            records,
            loaded_at: Utc::now(),
        })
    }

    /// Read, parse and validate the backing file
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<Record> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        match Self::from_records(records) {
            Ok(store) => {
                logger::log_dataset_loaded(path, store.len());
                Ok(store)
            }
            Err(violations) => {
                for violation in &violations {
                    logger::log_warning(&format!("Dataset violation: {violation}"));
                }
                Err(StoreError::Invalid {
                    path: path.to_path_buf(),
                    violations,
                })
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// The backing file plus the dataset cache in front of it
pub struct DataSource {
    path: PathBuf,
    cache: TtlCache<&'static str, Arc<ContentStore>>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self::with_clock(path, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot, reloading from disk when the cached one has expired.
    ///
    /// A failed load is not cached, so the next request retries the read.
    pub async fn snapshot(&self) -> Result<Arc<ContentStore>, StoreError> {
        self.cache
            .get_or_try_insert_with(DATASET_KEY, || async {
                ContentStore::load(&self.path).await.map(Arc::new)
            })
            .await
    }
}
