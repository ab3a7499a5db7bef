//! Atomic single-file storage.
//!
//! Provides a thin layer for safe access to the JSON and TOML files that
//! back the history store and the settings.
//!
//! Guarantees:
//! - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
//! - **Isolation**: an exclusive lock file prevents concurrent writers
//! - **Durability**: explicit fsync before rename

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum StorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "I/O error: {}", e),
            StorageError::JsonError(e) => write!(f, "JSON error: {}", e),
            StorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            StorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            StorageError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::JsonError(e)
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(e: toml::de::Error) -> Self {
        StorageError::TomlParseError(e)
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(e: toml::ser::Error) -> Self {
        StorageError::TomlSerError(e)
    }
}

impl From<StorageError> for carewell_core::CareError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::IoError(io) => carewell_core::CareError::io(io.to_string()),
            StorageError::JsonError(err) => carewell_core::CareError::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            },
            StorageError::TomlParseError(err) => carewell_core::CareError::Serialization {
                format: "TOML".to_string(),
                message: err.to_string(),
            },
            StorageError::TomlSerError(err) => carewell_core::CareError::Serialization {
                format: "TOML".to_string(),
                message: err.to_string(),
            },
            StorageError::LockError(msg) => carewell_core::CareError::data_access(msg),
        }
    }
}

/// Writes `content` to `path` atomically: exclusive lock, tmp file, fsync,
/// rename.
fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let lock_path = path.with_extension("lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)?;
    lock_file
        .lock_exclusive()
        .map_err(|e| StorageError::LockError(e.to_string()))?;

    let tmp_path = path.with_extension("tmp");
    let result = (|| -> Result<(), StorageError> {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(content.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        // Leave no stale tmp file behind on failure.
        let _ = fs::remove_file(&tmp_path);
    }
    let _ = FileExt::unlock(&lock_file);
    result
}

fn read_nonempty(path: &Path) -> Result<Option<String>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(content))
}

/// A handle to an atomically updated JSON file.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// Returns `Ok(None)` when the file is missing or empty.
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        match read_nonempty(&self.path)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Serializes and saves the data atomically.
    pub fn save(&self, data: &T) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(data)?;
        write_atomic(&self.path, &content)
    }
}

/// A handle to an atomically updated TOML file.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// Returns `Ok(None)` when the file is missing or empty.
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        match read_nonempty(&self.path)? {
            Some(content) => Ok(Some(toml::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Serializes and saves the data atomically.
    pub fn save(&self, data: &T) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(data)?;
        write_atomic(&self.path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn json_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = AtomicJsonFile::<Sample>::new(dir.path().join("sample.json"));

        assert!(file.load().unwrap().is_none());

        let data = Sample {
            name: "neck".into(),
            count: 3,
        };
        file.save(&data).unwrap();
        assert_eq!(file.load().unwrap(), Some(data));
    }

    #[test]
    fn toml_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = AtomicTomlFile::<Sample>::new(dir.path().join("sample.toml"));

        let data = Sample {
            name: "settings".into(),
            count: 1,
        };
        file.save(&data).unwrap();
        assert_eq!(file.load().unwrap(), Some(data));
    }

    #[test]
    fn empty_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "  \n").unwrap();
        let file = AtomicJsonFile::<Sample>::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json at all").unwrap();
        let file = AtomicJsonFile::<Sample>::new(path);
        assert!(file.load().is_err());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = AtomicJsonFile::<Sample>::new(dir.path().join("a/b/sample.json"));
        file.save(&Sample {
            name: "x".into(),
            count: 0,
        })
        .unwrap();
        assert!(file.load().unwrap().is_some());
    }
}
