use crate::RoiError;
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Whole-value string storage. Each call reads or replaces a single key;
/// nothing spans keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, RoiError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), RoiError>;
    fn remove(&mut self, key: &str) -> Result<(), RoiError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RoiError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RoiError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), RoiError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

fn storage_error(key: &str, err: impl std::fmt::Display) -> RoiError {
    RoiError::Storage {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, RoiError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    /// Writes to `<key>.json.tmp` and renames over the target so readers
    /// never see a partial list.
    fn set(&mut self, key: &str, value: &str) -> Result<(), RoiError> {
        fs::create_dir_all(&self.root).map_err(|e| storage_error(key, e))?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        let mut file = File::create(&tmp_path).map_err(|e| storage_error(key, e))?;
        file.write_all(value.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| storage_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| storage_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), RoiError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, e)),
        }
    }
}
