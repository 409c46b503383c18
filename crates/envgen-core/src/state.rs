//! The surface's mirror of the host parameter values.
//!
//! [`ParamState`] maps each [`ParamKey`] to its normalized value. It is not
//! authoritative: the host owns the real parameter set, every local write is
//! forwarded to it, and the host may push replacements at any time. Keys that
//! were never written read as `0.0`.

use alloc::collections::BTreeMap;

use crate::layout::all_params;
use crate::param_key::ParamKey;

/// One normalized write, ready to forward to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    /// Target parameter.
    pub key: ParamKey,
    /// New normalized value.
    pub value: f64,
}

impl ParamChange {
    /// Creates a change.
    pub const fn new(key: ParamKey, value: f64) -> Self {
        Self { key, value }
    }
}

/// Normalized value per parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamState {
    values: BTreeMap<ParamKey, f64>,
}

impl ParamState {
    /// Empty state; every key reads as `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding every parameter's default.
    pub fn with_defaults() -> Self {
        all_params()
            .map(|meta| (meta.key, meta.default_normalized()))
            .collect()
    }

    /// Builds state from host string ids, dropping ids outside the layout.
    ///
    /// Returns the state and the number of entries dropped.
    pub fn from_ids<I, S>(entries: I) -> (Self, usize)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut state = Self::new();
        let mut dropped = 0;
        for (id, value) in entries {
            match id.as_ref().parse::<ParamKey>() {
                Ok(key) => {
                    state.values.insert(key, value);
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("state: dropping {_err}");
                    dropped += 1;
                }
            }
        }
        (state, dropped)
    }

    /// Normalized value for `key`, `0.0` if absent.
    #[inline]
    pub fn get(&self, key: ParamKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    /// Whether `key` has ever been written.
    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Writes a normalized value, returning the previous one.
    pub fn set(&mut self, key: ParamKey, value: f64) -> Option<f64> {
        self.values.insert(key, value)
    }

    /// Writes a [`ParamChange`].
    pub fn apply(&mut self, change: ParamChange) {
        self.values.insert(change.key, change.value);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f64)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(ParamKey, f64)> for ParamState {
    fn from_iter<T: IntoIterator<Item = (ParamKey, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(ParamKey, f64)> for ParamState {
    fn extend<T: IntoIterator<Item = (ParamKey, f64)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}
