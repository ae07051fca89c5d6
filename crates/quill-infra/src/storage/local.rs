//! Local filesystem image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use quill_core::ports::{ImageStore, StorageError};

/// Writes uploads under a root directory and hands out URLs below `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    /// Create the store, making sure the root directory exists.
    pub async fn new(root: impl AsRef<Path>, public_base_url: &str) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Io(format!(
                "failed to create upload dir {}: {e}",
                root.display()
            ))
        })?;

        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Keep only the final path component and a conservative character set.
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Rejected("empty upload".to_string()));
        }

        let stored_name = format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&stored_name);

        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))?;

        tracing::debug!(file = %stored_name, size = bytes.len(), "Stored upload");
        Ok(format!("{}/uploads/{}", self.public_base_url, stored_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\cat.png"), "cat.png");
        assert_eq!(sanitize_file_name("my holiday (1).jpg"), "my_holiday__1_.jpg");
        assert_eq!(sanitize_file_name(".."), "image");
        assert_eq!(sanitize_file_name(""), "image");
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "http://localhost:8080/")
            .await
            .unwrap();

        let url = store.save("cover.png", b"\x89PNG").await.unwrap();

        assert!(url.starts_with("http://localhost:8080/uploads/"));
        assert!(url.ends_with("_cover.png"));

        let stored_name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join(stored_name)).unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "http://localhost")
            .await
            .unwrap();

        assert!(matches!(
            store.save("empty.png", b"").await,
            Err(StorageError::Rejected(_))
        ));
    }
}
