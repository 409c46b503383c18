//! Native bridge for the envgen control surface.
//!
//! The surface runs apart from the plugin and reaches it only through a
//! small message protocol: it calls named native functions and receives
//! parameter pushes. This crate holds both ends of that contract.
//!
//! - [`Bridge`] - The seam the editor depends on: `invoke` plus the push
//!   callback
//! - [`JuceBridge`] - `Bridge` over the invoke/complete event protocol and a
//!   pluggable [`Transport`]
//! - [`BackendClient`] - Typed `getState` / `setParameter` /
//!   `resetAllParameters`
//! - [`LoopbackHost`] - In-process backend for tests and the CLI
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use envgen_bridge::{BackendClient, LoopbackHost};
//!
//! let (_host, bridge) = LoopbackHost::attach();
//! let client = BackendClient::new(Arc::new(bridge));
//! client.set_parameter("outputGain", 0.25).unwrap();
//! assert_eq!(client.get_state().unwrap()["outputGain"], 0.25);
//! ```

pub mod bridge;
pub mod client;
pub mod error;
pub mod loopback;
pub mod pending;
pub mod protocol;

pub use bridge::{Bridge, Inbound, JuceBridge, Transport, UpdateCallback};
pub use client::{BackendClient, StateSnapshot, decode_state};
pub use error::BridgeError;
pub use loopback::LoopbackHost;
pub use pending::{PendingCall, PendingCalls};
pub use protocol::{
    COMPLETE_EVENT, Completion, GET_STATE, INVOKE_EVENT, InvokeRequest, RESET_ALL_PARAMETERS,
    SET_PARAMETER,
};
