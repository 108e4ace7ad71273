//! Media storage for uploaded covers, portfolio media and the CV.
//!
//! Objects are addressed by a relative [`StoragePath`] such as
//! `projects/1700000000000-poster.png` and exposed to visitors under a public
//! URL prefix.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use thiserror::Error;

/// Prefix for category cover images.
pub const CATEGORIES_PREFIX: &str = "categories";
/// Prefix for portfolio media.
pub const PROJECTS_PREFIX: &str = "projects";
/// Fixed location of the CV. Always written with overwrite so that links to
/// it resolve to the latest upload.
pub const CV_PATH: &str = "cv/cv.pdf";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Relative, traversal-free object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new<S: Into<String>>(value: S) -> StorageResult<Self> {
        let value = value.into();
        let valid = !value.is_empty()
            && !value.starts_with('/')
            && !value.contains('\\')
            && value
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if valid {
            Ok(Self(value))
        } else {
            Err(StorageError::InvalidPath(value))
        }
    }

    /// `categories/<millis>-<file name>`
    pub fn category_cover(file_name: &str, timestamp_millis: i64) -> Self {
        Self(format!(
            "{CATEGORIES_PREFIX}/{timestamp_millis}-{}",
            sanitize_file_name(file_name)
        ))
    }

    /// `projects/<millis>-<file name>`
    pub fn project_media(file_name: &str, timestamp_millis: i64) -> Self {
        Self(format!(
            "{PROJECTS_PREFIX}/{timestamp_millis}-{}",
            sanitize_file_name(file_name)
        ))
    }

    pub fn cv() -> Self {
        Self(CV_PATH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Keeps the last path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
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
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Blob store used by the dashboard uploads.
pub trait MediaStorage {
    /// Store `bytes` under `path`. Without `overwrite` an existing object is
    /// an error.
    fn upload(&self, path: &StoragePath, bytes: &[u8], overwrite: bool) -> StorageResult<()>;
    /// Public URL visitors use to fetch the object.
    fn public_url(&self, path: &StoragePath) -> String;
    /// Whether an object is stored under `path`.
    fn exists(&self, path: &StoragePath) -> bool;
}

/// Filesystem-backed storage served by `actix-files`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn full_path(&self, path: &StoragePath) -> PathBuf {
        self.root.join(path.as_str())
    }
}

impl MediaStorage for LocalMediaStorage {
    fn upload(&self, path: &StoragePath, bytes: &[u8], overwrite: bool) -> StorageResult<()> {
        let full_path = self.full_path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if overwrite {
            fs::write(&full_path, bytes)?;
        } else {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => {
                        StorageError::AlreadyExists(path.as_str().to_string())
                    }
                    _ => StorageError::Io(e),
                })?;
            file.write_all(bytes)?;
        }

        log::info!("Stored {} bytes at {}", bytes.len(), path.as_str());
        Ok(())
    }

    fn public_url(&self, path: &StoragePath) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.as_str())
    }

    fn exists(&self, path: &StoragePath) -> bool {
        self.full_path(path).is_file()
    }
}

#[cfg(test)]
pub mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::{MediaStorage, StorageError, StoragePath, StorageResult};

    /// In-memory storage used by unit tests.
    #[derive(Default)]
    pub struct MemoryStorage {
        pub objects: RefCell<HashMap<String, Vec<u8>>>,
        pub fail: bool,
    }

    impl MemoryStorage {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl MediaStorage for MemoryStorage {
        fn upload(&self, path: &StoragePath, bytes: &[u8], overwrite: bool) -> StorageResult<()> {
            if self.fail {
                return Err(StorageError::Io(std::io::Error::other("bucket not found")));
            }
            let mut objects = self.objects.borrow_mut();
            if !overwrite && objects.contains_key(path.as_str()) {
                return Err(StorageError::AlreadyExists(path.as_str().to_string()));
            }
            objects.insert(path.as_str().to_string(), bytes.to_vec());
            Ok(())
        }

        fn public_url(&self, path: &StoragePath) -> String {
            format!("/media/{}", path.as_str())
        }

        fn exists(&self, path: &StoragePath) -> bool {
            self.objects.borrow().contains_key(path.as_str())
        }
    }
}
