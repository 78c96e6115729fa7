//! JSON file storage backend
//!
//! All keys live in one JSON object on disk. Every write re-reads the file
//! under an exclusive advisory lock, applies the change and rewrites it.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

type Items = BTreeMap<String, String>;

/// Key-value store persisted to a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    /// The file itself is created on first write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        debug!(?path, "FileStore::open: opened");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> StoreResult<Items> {
        if content.trim().is_empty() {
            return Ok(Items::new());
        }
        serde_json::from_str(content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn read_items(&self) -> StoreResult<Items> {
        match fs::read_to_string(&self.path) {
            Ok(content) => self.parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Items::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn modify(&self, change: impl FnOnce(&mut Items)) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        FileExt::lock_exclusive(&file)?;
        let result = self.rewrite(&mut file, change);
        FileExt::unlock(&file)?;
        result
    }

    fn rewrite(&self, file: &mut File, change: impl FnOnce(&mut Items)) -> StoreResult<()> {
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        let mut items = self.parse(&content)?;

        change(&mut items);

        let serialized = serde_json::to_string_pretty(&items)?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(serialized.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(%key, len = value.len(), "FileStore::set_item: called");
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        debug!(%key, "FileStore::remove_item: called");
        self.modify(|items| {
            items.remove(key);
        })
    }
}
