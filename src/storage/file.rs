//! Directory-backed snapshot store.
//!
//! Each identity gets one file, `<encoded identity>.json`, holding a JSON
//! array of tags. Identities are percent-encoded so arbitrary provider
//! strings (`guest:…`, `oauth2|…`) map to safe, distinct file names.
//! Uppercase letters are encoded too, so identities differing only in case
//! stay distinct on case-insensitive filesystems.
//! Writes go to a temporary sibling first and are renamed into place.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::RecencyStore;
use crate::error::persistence::{PersistenceError, PersistenceResult};

const SNAPSHOT_EXTENSION: &str = "json";

/// Stores each identity's recent tags as a JSON file inside `dir`.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            write_seq: AtomicU64::new(0),
        }
    }

    /// Path of the snapshot file for `identity`.
    pub fn snapshot_path(&self, identity: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{SNAPSHOT_EXTENSION}", encode_identity(identity)))
    }
}

#[async_trait]
impl RecencyStore for JsonFileStore {
    async fn load(&self, identity: &str) -> PersistenceResult<Option<Vec<String>>> {
        let path = self.snapshot_path(identity);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    identity: identity.to_string(),
                    source,
                })
            }
        };

        let tags: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Corrupt {
                identity: identity.to_string(),
                source,
            })?;
        Ok(Some(tags))
    }

    async fn save(&self, identity: &str, tags: &[String]) -> PersistenceResult<()> {
        let io_error = |source| PersistenceError::Io {
            identity: identity.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_error)?;

        let body = serde_json::to_vec(tags)
            .map_err(|e| PersistenceError::Backend(format!("Failed to encode snapshot: {e}")))?;

        let path = self.snapshot_path(identity);
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let staging = path.with_extension(format!("{SNAPSHOT_EXTENSION}.{seq}.tmp"));

        tokio::fs::write(&staging, &body).await.map_err(io_error)?;
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_error(e));
        }

        tracing::debug!(identity = %identity, path = ?path, count = tags.len(), "Snapshot written");
        Ok(())
    }
}

/// Percent-encodes every byte outside `[a-z0-9_-]`.
fn encode_identity(identity: &str) -> String {
    let mut encoded = String::with_capacity(identity.len());
    for byte in identity.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("alice", "alice" ; "plain")]
    #[test_case("guest:1f-2", "guest%3A1f-2" ; "guest prefix")]
    #[test_case("google-oauth2|42", "google-oauth2%7C42" ; "provider pipe")]
    #[test_case("../etc", "%2E%2E%2Fetc" ; "path traversal")]
    #[test_case("é", "%C3%A9" ; "multibyte")]
    #[test_case("Alice", "%41lice" ; "uppercase")]
    fn test_encode_identity(identity: &str, expected: &str) {
        assert_eq!(encode_identity(identity), expected);
    }

    #[test_case("Alice", "alice" ; "leading capital")]
    #[test_case("GUEST:AB", "guest:ab" ; "all caps")]
    #[test_case("oauth2|X", "oauth2|x" ; "provider suffix")]
    fn test_case_variants_get_distinct_paths(upper: &str, lower: &str) {
        let store = JsonFileStore::new("/snapshots");
        let upper = store.snapshot_path(upper);
        let lower = store.snapshot_path(lower);

        let upper = upper.to_string_lossy();
        let lower = lower.to_string_lossy();
        assert!(!upper.eq_ignore_ascii_case(&lower), "{upper} vs {lower}");
    }

    #[tokio::test]
    async fn test_case_variants_keep_separate_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save("Alice", &["upper".to_string()]).await.unwrap();
        store.save("alice", &["lower".to_string()]).await.unwrap();

        assert_eq!(store.load("Alice").await.unwrap(), Some(vec!["upper".to_string()]));
        assert_eq!(store.load("alice").await.unwrap(), Some(vec!["lower".to_string()]));
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.load("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_round_trip_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("recents"));
        let tags = vec!["rust".to_string(), "tokio".to_string()];

        store.save("guest:abc", &tags).await.unwrap();
        assert_eq!(store.load("guest:abc").await.unwrap(), Some(tags));

        let raw = std::fs::read_to_string(store.snapshot_path("guest:abc")).unwrap();
        assert_eq!(raw, r#"["rust","tokio"]"#);
    }

    #[tokio::test]
    async fn test_save_replaces_and_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save("user", &["a".to_string()]).await.unwrap();
        store.save("user", &["b".to_string(), "a".to_string()]).await.unwrap();

        assert_eq!(
            store.load("user").await.unwrap(),
            Some(vec!["b".to_string(), "a".to_string()])
        );
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.snapshot_path("user"), b"{not json").unwrap();

        let err = store.load("user").await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
    }
}
