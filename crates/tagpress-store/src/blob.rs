//! # Flat-File Blob Store
//!
//! Category-partitioned artifact storage on the local filesystem.
//!
//! ## Directory Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Root Layout                                  │
//! │                                                                         │
//! │  <root>/                                                                │
//! │  ├── exports-json/     ← structured snapshot exports (archive source)  │
//! │  │   ├── stok_april.json                                               │
//! │  │   └── promo_mei.json                                                │
//! │  ├── exports-csv/      ← tabular snapshot exports                      │
//! │  │   └── stok_april.csv                                                │
//! │  └── documents/        ← rendered print documents                      │
//! │      └── stok_april_1714380000.pdf                                     │
//! │                                                                         │
//! │  Names are validated before touching the disk: no separators, no       │
//! │  traversal. Listing returns file names only, newest first.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never interprets blob contents; encoding and decoding belong
//! to tagpress-core.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Categories
// =============================================================================

/// Artifact categories, each mapping to one subdirectory of the store root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Structured snapshot exports; doubles as the browsable archive.
    JsonExport,
    /// Tabular snapshot exports.
    CsvExport,
    /// Rendered print documents.
    Document,
}

impl Category {
    /// The subdirectory name for this category.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::JsonExport => "exports-json",
            Category::CsvExport => "exports-csv",
            Category::Document => "documents",
        }
    }

    /// All categories, used to create the directory layout on open.
    pub fn all() -> [Category; 3] {
        [Category::JsonExport, Category::CsvExport, Category::Document]
    }
}

// =============================================================================
// BlobStore Trait
// =============================================================================

/// Byte-oriented artifact storage.
///
/// Trait-based so the service layer can swap in an in-memory store for
/// tests. All methods take the category explicitly; names are plain file
/// names, never paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes a blob, replacing any existing blob of the same name.
    async fn write(&self, category: Category, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Reads a blob's full contents.
    async fn read(&self, category: Category, name: &str) -> StoreResult<Vec<u8>>;

    /// Lists blob names in a category, most recently written first.
    async fn list(&self, category: Category) -> StoreResult<Vec<String>>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    async fn write(&self, category: Category, name: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).write(category, name, bytes).await
    }

    async fn read(&self, category: Category, name: &str) -> StoreResult<Vec<u8>> {
        (**self).read(category, name).await
    }

    async fn list(&self, category: Category) -> StoreResult<Vec<String>> {
        (**self).list(category).await
    }
}

// =============================================================================
// Filesystem Implementation
// =============================================================================

/// Flat-file [`BlobStore`] rooted at a single directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Opens a store at `root`, creating the category directories if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        for category in Category::all() {
            let dir = root.join(category.dir_name());
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| StoreError::InitFailed {
                    path: dir.display().to_string(),
                    source,
                })?;
        }
        debug!(root = %root.display(), "Blob store opened");
        Ok(FsBlobStore { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a validated blob path. Names with separators or traversal
    /// components never reach the filesystem.
    fn path_for(&self, category: Category, name: &str) -> StoreResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(category.dir_name()).join(name))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn write(&self, category: Category, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(category, name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::WriteFailed {
                name: name.to_string(),
                source,
            })?;
        debug!(category = category.dir_name(), name, size = bytes.len(), "Blob written");
        Ok(())
    }

    async fn read(&self, category: Category, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(category, name)?;
        tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    name: name.to_string(),
                }
            } else {
                StoreError::ReadFailed {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }

    async fn list(&self, category: Category) -> StoreResult<Vec<String>> {
        let dir = self.root.join(category.dir_name());
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(StoreError::ListFailed)?;

        let mut found: Vec<(String, SystemTime)> = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StoreError::ListFailed)? {
            let metadata = entry.metadata().await.map_err(StoreError::ListFailed)?;
            if !metadata.is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                // Non-UTF-8 names were not written by this store
                Err(_) => continue,
            };
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((name, modified));
        }

        // Newest first; name as tiebreaker keeps the order deterministic
        found.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(found.into_iter().map(|(name, _)| name).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_temp() -> (tempfile::TempDir, FsBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_creates_category_dirs() {
        let (dir, _store) = open_temp().await;
        for category in Category::all() {
            assert!(dir.path().join(category.dir_name()).is_dir());
        }
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let (_dir, store) = open_temp().await;
        store
            .write(Category::JsonExport, "stok.json", b"{\"a\":1}")
            .await
            .unwrap();

        let bytes = store.read(Category::JsonExport, "stok.json").await.unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_write_replaces_existing_blob() {
        let (_dir, store) = open_temp().await;
        store.write(Category::CsvExport, "x.csv", b"old").await.unwrap();
        store.write(Category::CsvExport, "x.csv", b"new").await.unwrap();

        let bytes = store.read(Category::CsvExport, "x.csv").await.unwrap();
        assert_eq!(bytes, b"new");
    }

    #[tokio::test]
    async fn test_read_missing_blob_is_not_found() {
        let (_dir, store) = open_temp().await;
        assert!(matches!(
            store.read(Category::Document, "nope.pdf").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_categories_are_isolated() {
        let (_dir, store) = open_temp().await;
        store.write(Category::JsonExport, "a.json", b"x").await.unwrap();

        assert!(matches!(
            store.read(Category::CsvExport, "a.json").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_traversal_names_are_rejected() {
        let (_dir, store) = open_temp().await;
        for name in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            assert!(
                matches!(
                    store.write(Category::JsonExport, name, b"x").await,
                    Err(StoreError::InvalidName { .. })
                ),
                "name {:?} should be rejected",
                name
            );
        }
        // A dot inside the name is an ordinary extension separator
        assert!(store.write(Category::JsonExport, "a.b.json", b"x").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let (_dir, store) = open_temp().await;
        store.write(Category::JsonExport, "first.json", b"1").await.unwrap();
        // Filesystem mtime granularity can be coarse
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        store.write(Category::JsonExport, "second.json", b"2").await.unwrap();

        let names = store.list(Category::JsonExport).await.unwrap();
        assert_eq!(names, vec!["second.json", "first.json"]);
    }

    #[tokio::test]
    async fn test_list_empty_category() {
        let (_dir, store) = open_temp().await;
        assert!(store.list(Category::Document).await.unwrap().is_empty());
    }
}
