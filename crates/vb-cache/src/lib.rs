//! # vb-cache
//!
//! Capture store for raw API response bodies.
//!
//! Every successful live call persists one record: the exact response text
//! plus the type tag of the model it decoded into. Records are written once
//! and never mutated; the offline verifier is their only reader. One JSON
//! file per record under the cache directory, named by a process-monotonic
//! nanosecond identifier.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of one cache record: the nanosecond timestamp its file is
/// named after.
pub type RecordId = u64;

/// One captured call: the exact raw body and the decoded model's type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Exact response body text as received from the server.
    pub raw: String,
    /// Type tag naming the model variant the body decoded into.
    #[serde(rename = "type")]
    pub type_tag: String,
}

/// Errors raised by the store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record file that does not parse as the expected format. Scoped to
    /// that record; siblings are unaffected.
    #[error("corrupt cache record {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// Last identifier handed out by this process. Forcing each id past the
// previous one keeps ids strictly increasing even when the clock ticks
// coarser than the call rate. Two *processes* writing the same directory in
// the same nanosecond can still collide; records are immutable, so the
// second writer wins the name and one capture is lost.
static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn next_record_id() -> RecordId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
        });
    LAST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now.max(last + 1))
        })
        .map_or(now, |last| now.max(last + 1))
}

/// File-per-record store rooted at a cache directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one record, creating the cache directory on first use.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] if the directory cannot be created or the record
    /// cannot be written.
    pub fn persist(&self, raw: &str, type_tag: &str) -> Result<RecordId, CacheError> {
        fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let id = next_record_id();
        let path = self.record_path(id);
        let record = CacheRecord {
            raw: raw.to_owned(),
            type_tag: type_tag.to_owned(),
        };
        let body = serde_json::to_string_pretty(&record)
            .expect("cache record of two strings always serializes");
        fs::write(&path, body).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(id, type_tag, path = %path.display(), "persisted cache record");
        Ok(id)
    }

    /// Identifiers of every record currently in the store, ascending.
    ///
    /// Files that do not follow the `<id>.json` naming are ignored.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] if the directory cannot be read. A missing
    /// directory is an empty store, not an error.
    pub fn list(&self) -> Result<Vec<RecordId>, CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut ids: Vec<RecordId> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_suffix(".json")?.parse().ok()
            })
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Load one record by identifier.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] if the file cannot be read, [`CacheError::Corrupt`]
    /// if it does not parse as a record.
    pub fn load(&self, id: RecordId) -> Result<CacheRecord, CacheError> {
        let path = self.record_path(id);
        let body = fs::read_to_string(&path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| CacheError::Corrupt { path, source })
    }

    fn record_path(&self, id: RecordId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());

        let id = store
            .persist(r#"{"data":{"user":null}}"#, "UserResponse")
            .expect("persist");
        let record = store.load(id).expect("load");

        assert_eq!(record.raw, r#"{"data":{"user":null}}"#);
        assert_eq!(record.type_tag, "UserResponse");
    }

    #[test]
    fn record_file_format_is_raw_and_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());

        let id = store.persist("{}", "TweetDetailResponse").expect("persist");
        let body = std::fs::read_to_string(dir.path().join(format!("{id}.json"))).expect("read");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("parse");

        assert_eq!(parsed["raw"], "{}");
        assert_eq!(parsed["type"], "TweetDetailResponse");
    }

    #[test]
    fn identifiers_strictly_increase_within_the_process() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());

        let mut previous = 0;
        for _ in 0..64 {
            let id = store.persist("{}", "UserResponse").expect("persist");
            assert!(id > previous, "{id} should exceed {previous}");
            previous = id;
        }
    }

    #[test]
    fn list_returns_ascending_ids_and_skips_foreign_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());

        let first = store.persist("{}", "UserResponse").expect("persist");
        let second = store.persist("{}", "UserResponse").expect("persist");
        std::fs::write(dir.path().join("notes.txt"), "not a record").expect("write");
        std::fs::write(dir.path().join("README.json"), "{}").expect("write");

        assert_eq!(store.list().expect("list"), vec![first, second]);
    }

    #[test]
    fn missing_directory_lists_empty() {
        let store = CacheStore::new("/nonexistent/verbatim-cache");
        assert!(store.list().expect("list").is_empty());
    }

    #[test]
    fn corrupt_record_is_scoped_to_its_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(dir.path());

        std::fs::write(dir.path().join("123.json"), "not json at all").expect("write");
        let err = store.load(123).expect_err("corrupt");
        assert!(matches!(err, CacheError::Corrupt { .. }));
    }
}
