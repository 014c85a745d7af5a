// One JSON file per slot inside a data directory

use super::{Storage, validate_slot};
use crate::error::PersistenceError;
use eyre::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open or create file storage rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create storage directory")?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, PersistenceError> {
        validate_slot(slot)?;
        Ok(self.base_path.join(format!("{}.json", slot)))
    }
}

impl Storage for FileStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.slot_path(slot)?;

        // Writers swap the file in with a rename, so a plain read sees a whole snapshot
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        debug!(file = ?path, bytes = content.len(), "Read slot file");
        Ok(Some(content))
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.slot_path(slot)?;
        let tmp_path = path.with_extension("json.tmp");
        let lock_path = path.with_extension("json.lock");

        // Serialize writers on a side file; the slot file itself gets replaced
        let lock = OpenOptions::new().create(true).write(true).truncate(false).open(&lock_path)?;
        lock.lock_exclusive()?;

        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.sync_all()?; // Ensure data is flushed to disk before it becomes visible
        fs::rename(&tmp_path, &path)?;

        debug!(file = ?path, bytes = value.len(), "Wrote slot file");
        // Lock is released when `lock` is dropped
        Ok(())
    }
}
