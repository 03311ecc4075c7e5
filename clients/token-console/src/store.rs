//! Local key/value storage.
//!
//! One JSON object per file, values are arbitrary JSON. Writes go to a
//! sibling temp file first and are renamed into place.

use crate::error::ConsoleResult;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ConsoleResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, map: &Map<String, Value>) -> ConsoleResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = map.len(), "store saved");
        Ok(())
    }

    /// Read `key`, `None` when absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ConsoleResult<Option<T>> {
        match self.load()?.remove(key) {
            None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> ConsoleResult<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.save(&map)
    }

    pub fn remove(&self, key: &str) -> ConsoleResult<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_store(name: &str) -> LocalStore {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "token-console-{}-{}-{}.json",
        name,
        std::process::id(),
        n
    ));
    let _ = fs::remove_file(&path);
    LocalStore::open(path)
}
