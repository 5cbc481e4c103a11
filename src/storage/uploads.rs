//! On-disk storage for uploaded diary photos.
//!
//! Accepted files are renamed `<date>_<microseconds>_<sanitized name>`
//! and written to a single flat directory; the database records the
//! stored filename only.

use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tokio::fs;

use crate::error::AppResult;

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the upload directory if needed.
    pub async fn initialize(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Upload store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Extension allow-list, case-insensitive. Names without an
    /// extension are rejected.
    pub fn is_allowed(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Write an accepted file under a collision-resistant stored name
    /// and return that name.
    pub async fn store(&self, date: NaiveDate, original: &str, data: &[u8]) -> AppResult<String> {
        let name = stored_name(date, original);
        fs::write(self.root.join(&name), data).await?;
        tracing::debug!(file = %name, bytes = data.len(), "Stored upload");
        Ok(name)
    }

    /// Remove a stored file. Failure (e.g. already missing) is tolerated
    /// and ignored.
    pub async fn remove(&self, name: &str) {
        if let Err(e) = fs::remove_file(self.root.join(name)).await {
            tracing::debug!(file = %name, error = %e, "Upload removal skipped");
        }
    }
}

fn stored_name(date: NaiveDate, original: &str) -> String {
    let micros = Utc::now().timestamp_subsec_micros();
    format!("{}_{}_{}", date, micros, sanitize(original))
}

/// Strip path components and reduce the name to a safe character set.
fn sanitize(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_allow_list_accepts_known_extensions() {
        for name in ["a.png", "b.jpg", "c.jpeg", "d.gif", "e.PNG", "f.JpEg"] {
            assert!(UploadStore::is_allowed(name), "{name} should be allowed");
        }
    }

    #[test]
    fn test_allow_list_rejects_everything_else() {
        for name in ["a.txt", "b.pdf", "noext", "", "archive.tar.gz"] {
            assert!(!UploadStore::is_allowed(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_stored_name_is_date_prefixed_and_flat() {
        let name = stored_name(date(), "../evil/pic one.jpg");
        assert!(name.starts_with("2024-06-15_"));
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(name.ends_with("pic_one.jpg"));
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        store.initialize().await.unwrap();

        let name = store.store(date(), "pic.jpg", b"bytes").await.unwrap();
        let data = fs::read(dir.path().join(&name)).await.unwrap();
        assert_eq!(data, b"bytes");
    }

    #[tokio::test]
    async fn test_remove_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        store.initialize().await.unwrap();

        // Must not panic or error outward.
        store.remove("2024-06-15_0_not_there.png").await;
    }
}
