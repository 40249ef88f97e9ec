use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::errors::StoreError;

mod memory;

pub use memory::MemoryStore;

/// A key-value store holding one serialized document per key.
pub trait Store: Send + Sync {
    /// Returns the document saved under the given key, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Saves the given document under the given key, replacing any
    /// previous one.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// A store that saves each document to `<key>.json` in a directory.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new instance. The directory is created on the first
    /// write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the path of the file holding the given key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write {
            key: key.to_owned(),
            source,
        };

        fs::create_dir_all(&self.directory).map_err(write_error)?;

        // the temporary file must live on the same filesystem for the
        // rename to be atomic
        let mut file = NamedTempFile::new_in(&self.directory).map_err(write_error)?;
        file.write_all(value.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;

        file.persist(self.path_for(key))
            .map(|_| ())
            .map_err(|source| StoreError::Persist {
                key: key.to_owned(),
                source,
            })
    }
}
