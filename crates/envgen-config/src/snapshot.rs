//! Parameter snapshots stored as JSON.
//!
//! A snapshot is the same flat `{id: normalized}` object the backend returns
//! from `getState`, so a saved file can be fed straight back to it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use envgen_core::{ParamState, param_meta_by_id};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::{find_snapshot, find_snapshot_in};

/// Normalized value per host parameter id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: BTreeMap<String, f64>,
}

impl Snapshot {
    /// Snapshot of every entry in `state`.
    pub fn from_state(state: &ParamState) -> Self {
        state.iter().map(|(key, value)| (key.to_string(), value)).collect()
    }

    /// Converts to editor state, dropping ids outside the layout.
    ///
    /// Returns the state and the number of entries dropped.
    pub fn to_state(&self) -> (ParamState, usize) {
        ParamState::from_ids(self.values.iter().map(|(id, &value)| (id.as_str(), value)))
    }

    /// Ids that do not name a host parameter.
    pub fn unknown_ids(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|id| param_meta_by_id(id).is_none())
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_json(&content)
    }

    /// Find a snapshot by name or path and load it.
    ///
    /// Bare names are looked up in the user snapshots directory. Returns the
    /// resolved path alongside the snapshot.
    pub fn find(name: &str) -> Result<(PathBuf, Self), ConfigError> {
        let path =
            find_snapshot(name).ok_or_else(|| ConfigError::SnapshotNotFound(name.to_string()))?;
        let snapshot = Self::load(&path)?;
        Ok((path, snapshot))
    }

    /// Like [`find`](Self::find), looking up bare names in `dir`.
    pub fn find_in(name: &str, dir: &Path) -> Result<(PathBuf, Self), ConfigError> {
        let path = find_snapshot_in(name, dir)
            .ok_or_else(|| ConfigError::SnapshotNotFound(name.to_string()))?;
        let snapshot = Self::load(&path)?;
        Ok((path, snapshot))
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the snapshot as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the snapshot to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(id, &value)| (id.as_str(), value))
    }
}

impl FromIterator<(String, f64)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, f64>> for Snapshot {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }
}
