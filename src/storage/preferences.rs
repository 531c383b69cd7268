//! Preference store
//!
//! A small string key/value store kept in preferences.json. Individual keys
//! can be observed through subscriptions.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;

use super::file_io::{read_json, write_json_atomic};
use super::watch::{Subscription, Watchers};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PreferenceData {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Key/value preference persistence
pub struct PreferenceStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
    watchers: Watchers<String, Option<String>>,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            watchers: Watchers::new(),
        }
    }

    /// Load preferences from disk
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: PreferenceData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.values;
        Ok(())
    }

    /// Save preferences to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.write_file(&data)
    }

    fn write_file(&self, data: &BTreeMap<String, String>) -> Result<(), SpendlogError> {
        write_json_atomic(
            &self.path,
            &PreferenceData {
                values: data.clone(),
            },
        )
    }

    /// Read a value
    pub fn get(&self, key: &str) -> Result<Option<String>, SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(key).cloned())
    }

    /// Write a value to memory and disk, returning the previous one
    ///
    /// A failed disk write leaves the stored value unchanged.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<Option<String>, SpendlogError> {
        let previous = {
            let mut data = self.data.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let previous = data.insert(key.to_string(), value.into());
            if let Err(e) = self.write_file(&data) {
                match previous {
                    Some(old) => data.insert(key.to_string(), old),
                    None => data.remove(key),
                };
                return Err(e);
            }
            previous
        };
        self.notify()?;
        Ok(previous)
    }

    /// Remove a value from memory and disk, returning it if present
    pub fn remove(&self, key: &str) -> Result<Option<String>, SpendlogError> {
        let removed = {
            let mut data = self.data.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let removed = match data.remove(key) {
                Some(old) => old,
                None => return Ok(None),
            };
            if let Err(e) = self.write_file(&data) {
                data.insert(key.to_string(), removed);
                return Err(e);
            }
            removed
        };
        self.notify()?;
        Ok(Some(removed))
    }

    /// Observe a single key
    pub fn subscribe(&self, key: &str) -> Result<Subscription<Option<String>>, SpendlogError> {
        let initial = self.get(key)?;
        self.watchers.add(key.to_string(), initial)
    }

    fn notify(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.watchers.notify(|key| data.get(key).cloned())
    }
}
