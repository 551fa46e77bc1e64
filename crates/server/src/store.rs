//! Thin JSON key-value store.
//!
//! Persistence here mirrors the browser-local storage the product started
//! with: one JSON document per key, no schema versioning, no migrations.
//! A missing key reads as `None`; a write replaces the whole document.
//! Writes go to a temp file first and are renamed into place so a crash
//! never leaves a half-written document behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur in the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document no longer parses as the expected shape.
    #[error("corrupt document for key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value failed to serialize.
    #[error("serialize error for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A directory of JSON documents addressed by string keys.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Path of the document backing `key`.
    ///
    /// Alphanumerics and `-` pass through; every other byte (the `:`
    /// namespace separator, the `@` and `.` of email-index keys) is
    /// escaped as `_xx` hex. The escape is injective, so distinct keys
    /// never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        use std::fmt::Write;

        let mut file = String::with_capacity(key.len());
        for byte in key.bytes() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => file.push(byte as char),
                _ => {
                    let _ = write!(file, "_{byte:02x}");
                }
            }
        }
        self.root.join(format!("{file}.json"))
    }

    /// Read and deserialize the document at `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the document exists but fails to
    /// parse, or an I/O error for anything other than a missing file.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` and replace the document at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_owned(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Delete the document at `key`. Missing keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The directory backing this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Well-known store keys.
pub mod keys {
    use dabeeha_core::UserId;

    /// Catalog document, written by `dabeeha-cli seed`.
    pub const CATALOG: &str = "catalog";

    /// Per-user profile document.
    #[must_use]
    pub fn user(id: &UserId) -> String {
        format!("user:{id}")
    }

    /// Per-user order list.
    #[must_use]
    pub fn orders(id: &UserId) -> String {
        format!("orders:{id}")
    }

    /// Per-user notification list.
    #[must_use]
    pub fn notifications(id: &UserId) -> String {
        format!("notifications:{id}")
    }

    /// Per-user language preference.
    #[must_use]
    pub fn language(id: &UserId) -> String {
        format!("lang:{id}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_round_trip_and_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        assert_eq!(store.get::<Doc>("absent").await.unwrap(), None);

        let doc = Doc {
            name: "orders".into(),
            count: 2,
        };
        store.put("orders:u-1", &doc).await.unwrap();
        assert_eq!(store.get::<Doc>("orders:u-1").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        store.put("lang:u-1", &"ar").await.unwrap();
        store.delete("lang:u-1").await.unwrap();
        store.delete("lang:u-1").await.unwrap();
        assert_eq!(store.get::<String>("lang:u-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_similar_keys_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        // These collapse to the same name under a lossy escape.
        store.put("email:a.b@com", &1_u32).await.unwrap();
        store.put("email:a@b.com", &2_u32).await.unwrap();
        store.put("email:a_b_com", &3_u32).await.unwrap();

        assert_eq!(store.get::<u32>("email:a.b@com").await.unwrap(), Some(1));
        assert_eq!(store.get::<u32>("email:a@b.com").await.unwrap(), Some(2));
        assert_eq!(store.get::<u32>("email:a_b_com").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        std::fs::write(dir.path().join("catalog.json"), b"{not json").unwrap();
        let err = store.get::<Doc>("catalog").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
