//! Single-document JSON store shared by all modules.
//!
//! The whole database is one JSON object whose top-level keys are named
//! collections (`users`, `listings`, `likes`, `matches`, `messages`).
//! Repositories never touch the file format; they receive an `Arc<DocStore>`
//! and work through [`DocStore::view`] / [`DocStore::commit`].
//!
//! `commit` applies the mutation to a draft copy of the document, persists
//! the draft atomically (temp file + rename) and only then swaps it in, so
//! a failed write leaves both memory and disk untouched. The write lock
//! serializes every mutation in the process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum DocStoreError {
    #[error("document i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("document encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// The in-memory form of the document: collection name to record array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collections {
    map: BTreeMap<String, Vec<Value>>,
}

impl Collections {
    /// Decode a whole collection. A missing collection reads as empty.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, DocStoreError> {
        match self.map.get(name) {
            Some(items) => items
                .iter()
                .map(|v| serde_json::from_value(v.clone()).map_err(DocStoreError::from))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection.
    pub fn set<T: Serialize>(&mut self, name: &str, items: &[T]) -> Result<(), DocStoreError> {
        let encoded = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.map.insert(name.to_string(), encoded);
        Ok(())
    }

    pub fn len(&self, name: &str) -> usize {
        self.map.get(name).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.map.values().all(Vec::is_empty)
    }
}

pub struct DocStore {
    state: RwLock<Collections>,
    path: Option<PathBuf>,
}

impl DocStore {
    /// Volatile store used by tests and `--mock` runs. Same code path as
    /// the file-backed store, minus persistence.
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(Collections::default()),
            path: None,
        }
    }

    /// Open (or initialize) a file-backed store. The parent directory is
    /// created if needed; a missing file starts as an empty document.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DocStoreError> {
        let path = path.into();
        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                Collections::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            state: RwLock::new(initial),
            path: Some(path),
        })
    }

    /// Run a read-only closure under the shared lock.
    pub async fn view<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.state.read().await;
        f(&guard)
    }

    /// Run a mutation as a single all-or-nothing unit.
    pub async fn commit<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> Result<R, DocStoreError>,
    ) -> Result<R, DocStoreError> {
        let mut guard = self.state.write().await;
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        if let Some(path) = &self.path {
            persist(path, &draft).await?;
        }
        *guard = draft;
        Ok(out)
    }
}

async fn persist(path: &Path, doc: &Collections) -> Result<(), DocStoreError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
