//! Wire format shared with the native backend.
//!
//! The surface calls native functions by emitting an [`INVOKE_EVENT`] whose
//! payload names the function, carries its arguments and a fresh result id.
//! The backend answers each call exactly once with a [`COMPLETE_EVENT`]
//! echoing that id. Both payloads are JSON objects with camelCase keys:
//!
//! ```text
//! surface ──► __juce__invoke   {"name": "setParameter", "params": ["lane1_attack", 0.5], "resultId": 3}
//! surface ◄── __juce__complete {"promiseId": 3, "result": true}
//! surface ◄── updateParams("lane1_attack", 0.5)
//! ```
//!
//! Parameter pushes do not travel as events; the backend calls the
//! registered update callback directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event the surface emits to call a native function.
pub const INVOKE_EVENT: &str = "__juce__invoke";

/// Event the backend emits to answer a call.
pub const COMPLETE_EVENT: &str = "__juce__complete";

/// Native function returning every parameter's normalized value.
pub const GET_STATE: &str = "getState";

/// Native function writing one normalized value: `(id, value) -> bool`.
pub const SET_PARAMETER: &str = "setParameter";

/// Native function resetting every parameter to its default.
pub const RESET_ALL_PARAMETERS: &str = "resetAllParameters";

/// Payload of [`INVOKE_EVENT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    /// Native function name.
    pub name: String,
    /// Positional arguments.
    #[serde(default)]
    pub params: Vec<Value>,
    /// Id the completion must echo.
    pub result_id: u64,
}

/// Payload of [`COMPLETE_EVENT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Result id of the call being answered.
    pub promise_id: u64,
    /// Function result; `null` when the function returns nothing.
    #[serde(default)]
    pub result: Value,
}
