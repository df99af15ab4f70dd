//! JSON-file preference store.
//!
//! The whole store is a flat JSON object. Every mutation rewrites the file
//! through a temporary sibling and an atomic rename, so a crash mid-write
//! leaves the previous contents intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tvgrid_types::error::{LauncherError, Result};

use crate::{PrefStore, PrefValue};

/// Durable preference store backed by a JSON file.
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl FilePrefs {
    /// Open the store at `path`. A missing file yields an empty store; the
    /// file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No preferences at {}, starting empty", path.display());
                BTreeMap::new()
            },
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened {} preference keys from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
            _ => {},
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| LauncherError::Prefs(format!("not a file path: {}", self.path.display())))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);
        let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Flush, putting `key` back to `previous` if the write fails so memory
    /// never runs ahead of disk.
    fn flush_or_restore(&mut self, key: &str, previous: Option<PrefValue>) -> Result<()> {
        let result = self.flush();
        if let Err(e) = &result {
            log::warn!("Failed to persist {key} to {}: {e}", self.path.display());
            match previous {
                Some(value) => self.values.insert(key.to_string(), value),
                None => self.values.remove(key),
            };
        }
        result
    }
}

impl PrefStore for FilePrefs {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: PrefValue) -> Result<()> {
        if self.values.get(key) == Some(&value) {
            return Ok(());
        }
        let previous = self.values.insert(key.to_string(), value);
        self.flush_or_restore(key, previous)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match self.values.remove(key) {
            Some(previous) => self.flush_or_restore(key, Some(previous)),
            None => Ok(()),
        }
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
