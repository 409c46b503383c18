//! Typed wrappers around the three native functions.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::pending::PendingCall;
use crate::protocol::{GET_STATE, RESET_ALL_PARAMETERS, SET_PARAMETER};

/// Full parameter snapshot as the backend reports it: string id to
/// normalized value.
pub type StateSnapshot = BTreeMap<String, f64>;

/// Decodes a `getState` result.
///
/// Anything other than a JSON object is an empty snapshot. Entries whose
/// value is not a number are skipped.
pub fn decode_state(result: &Value) -> StateSnapshot {
    let Some(object) = result.as_object() else {
        tracing::warn!("getState: expected an object, got {result}");
        return StateSnapshot::new();
    };
    object
        .iter()
        .filter_map(|(id, value)| match value.as_f64() {
            Some(n) => Some((id.clone(), n)),
            None => {
                tracing::warn!("getState: skipping non-numeric {id}");
                None
            }
        })
        .collect()
}

/// Client for the native backend functions.
#[derive(Clone)]
pub struct BackendClient {
    bridge: Arc<dyn Bridge>,
}

impl BackendClient {
    /// Wraps a bridge.
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// The underlying bridge.
    pub fn bridge(&self) -> &Arc<dyn Bridge> {
        &self.bridge
    }

    /// Requests the full snapshot. Decode the result with [`decode_state`].
    pub fn request_state(&self) -> Result<PendingCall, BridgeError> {
        self.bridge.invoke(GET_STATE, Vec::new())
    }

    /// Requests the full snapshot and blocks until it arrives.
    pub fn get_state(&self) -> Result<StateSnapshot, BridgeError> {
        let result = self.request_state()?.wait()?;
        Ok(decode_state(&result))
    }

    /// Writes one normalized value. The result is the backend's
    /// acknowledgement (`true`, or `false` for an unknown id); callers that
    /// fire and forget may drop it.
    pub fn set_parameter(&self, id: &str, value: f64) -> Result<PendingCall, BridgeError> {
        self.bridge.invoke(SET_PARAMETER, vec![json!(id), json!(value)])
    }

    /// Asks the backend to reset every parameter to its default.
    pub fn reset_all_parameters(&self) -> Result<PendingCall, BridgeError> {
        self.bridge.invoke(RESET_ALL_PARAMETERS, Vec::new())
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient").finish_non_exhaustive()
    }
}
