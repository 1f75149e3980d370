//! Store contract and the blob-backed implementation.
//!
//! Each collection is one JSON array stored under a single key, the way a
//! browser's local storage would hold it. Every call re-reads the blob, so a
//! store never caches anything between calls.

use super::backend::KeyValueBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use thiserror::Error;

/// Failures surfaced by stores and backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("no {collection} record with id {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
    #[error("corrupt {collection} data: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A persisted record type.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Partial update merged by `Store::update`.
    type Patch: Send + 'static;
    /// Backend key the collection lives under.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn apply(&mut self, patch: Self::Patch);
}

/// Query over records of one type.
pub trait Filter<R> {
    fn matches(&self, record: &R) -> bool;

    /// Optional ordering of the matched records.
    fn order(&self, _records: &mut Vec<R>) {}
}

/// CRUD contract shared by every store. Each call may fail on its own.
pub trait Store<R: Record>: Send {
    /// Persists `record` under a freshly generated id and returns it.
    fn create(&mut self, record: R) -> Result<R, StoreError>;
    fn list(&self) -> Result<Vec<R>, StoreError>;
    fn filter(&self, filter: &dyn Filter<R>) -> Result<Vec<R>, StoreError>;
    /// Merges `patch` into the record with `id`. Fails if absent.
    fn update(&mut self, id: &str, patch: R::Patch) -> Result<R, StoreError>;
}

/// Store that keeps a whole collection as one JSON blob.
pub struct BlobStore<R, B> {
    backend: B,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, B: KeyValueBackend> BlobStore<R, B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    fn load_all(&self) -> Result<Vec<R>, StoreError> {
        match self.backend.read(R::COLLECTION)? {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                collection: R::COLLECTION,
                source,
            }),
        }
    }

    fn save_all(&mut self, records: &[R]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records).map_err(|source| StoreError::Corrupt {
            collection: R::COLLECTION,
            source,
        })?;
        self.backend.write(R::COLLECTION, &json)
    }
}

impl<R: Record, B: KeyValueBackend> Store<R> for BlobStore<R, B> {
    fn create(&mut self, mut record: R) -> Result<R, StoreError> {
        let mut records = self.load_all()?;
        record.set_id(uuid::Uuid::new_v4().to_string());
        records.push(record.clone());
        self.save_all(&records)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<R>, StoreError> {
        self.load_all()
    }

    fn filter(&self, filter: &dyn Filter<R>) -> Result<Vec<R>, StoreError> {
        let mut records: Vec<R> = self
            .load_all()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        filter.order(&mut records);
        Ok(records)
    }

    fn update(&mut self, id: &str, patch: R::Patch) -> Result<R, StoreError> {
        let mut records = self.load_all()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION,
                id: id.to_string(),
            })?;
        record.apply(patch);
        let merged = record.clone();
        self.save_all(&records)?;
        Ok(merged)
    }
}
