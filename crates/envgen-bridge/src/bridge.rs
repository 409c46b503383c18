//! The bridge between the surface and the native backend.
//!
//! ```text
//! Editor ──► Bridge::invoke(name, params) ──► Transport::emit_event(__juce__invoke)
//!                     │                                   │
//!               PendingCall ◄── Inbound::deliver ◄── backend (__juce__complete)
//!                                      │
//! Editor ◄── update callback ◄── Inbound::update_params ◄── backend push
//! ```
//!
//! [`Bridge`] is the seam the editor depends on. [`JuceBridge`] implements it
//! over any [`Transport`]; the backend talks back through the cloneable
//! [`Inbound`] handle.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::BridgeError;
use crate::pending::{PendingCall, PendingCalls};
use crate::protocol::{COMPLETE_EVENT, Completion, INVOKE_EVENT, InvokeRequest};

/// Callback receiving backend pushes: `(id, normalized value)`.
pub type UpdateCallback = Arc<dyn Fn(&str, f64) + Send + Sync>;

/// Outgoing half of the native connection.
///
/// Implementations must be thread-safe. The backend may answer from inside
/// `emit_event`, so implementations must not hold locks the [`Inbound`]
/// handle needs while calling back.
pub trait Transport: Send + Sync {
    /// Sends one event to the backend.
    fn emit_event(&self, event: &str, payload: Value);
}

/// Trait for calling the backend and receiving its pushes.
pub trait Bridge: Send + Sync {
    /// Calls native function `name` with positional `params`.
    ///
    /// Fails immediately with [`BridgeError::Unavailable`] when no backend is
    /// attached. Otherwise the returned call resolves when the backend
    /// answers; there is no cancellation.
    fn invoke(&self, name: &str, params: Vec<Value>) -> Result<PendingCall, BridgeError>;

    /// Registers the push callback, replacing any previous one.
    fn register_callback(&self, callback: UpdateCallback);
}

#[derive(Default)]
struct Shared {
    pending: PendingCalls,
    callback: Mutex<Option<UpdateCallback>>,
}

/// Backend-facing handle: completions and pushes enter the bridge here.
#[derive(Clone, Default)]
pub struct Inbound {
    shared: Arc<Shared>,
}

impl Inbound {
    /// Handles one event emitted by the backend.
    ///
    /// Only [`COMPLETE_EVENT`] is understood; malformed completions and other
    /// events are logged and dropped.
    pub fn deliver(&self, event: &str, payload: Value) {
        if event != COMPLETE_EVENT {
            tracing::debug!("bridge: ignoring event {event}");
            return;
        }
        match serde_json::from_value::<Completion>(payload) {
            Ok(completion) => {
                if !self
                    .shared
                    .pending
                    .resolve(completion.promise_id, completion.result)
                {
                    tracing::debug!(
                        "bridge: completion for unknown call {}",
                        completion.promise_id
                    );
                }
            }
            Err(source) => {
                tracing::warn!("{}", BridgeError::payload(COMPLETE_EVENT, source));
            }
        }
    }

    /// Forwards a parameter push to the registered callback, if any.
    pub fn update_params(&self, id: &str, value: f64) {
        // Clone out so the callback runs without the lock held.
        let callback = self.shared.callback.lock().clone();
        match callback {
            Some(callback) => callback(id, value),
            None => tracing::debug!("bridge: push for {id} with no callback registered"),
        }
    }

    /// Number of calls still awaiting completion.
    pub fn pending_calls(&self) -> usize {
        self.shared.pending.len()
    }
}

impl fmt::Debug for Inbound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inbound")
            .field("pending", &self.shared.pending.len())
            .field("callback", &self.shared.callback.lock().is_some())
            .finish()
    }
}

/// [`Bridge`] over the native invoke/complete protocol.
#[derive(Clone, Default)]
pub struct JuceBridge {
    inbound: Inbound,
    transport: Option<Arc<dyn Transport>>,
}

impl JuceBridge {
    /// Bridge with no transport; every call fails with
    /// [`BridgeError::Unavailable`] until one is attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the outgoing transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Handle for the backend to deliver completions and pushes.
    pub fn inbound(&self) -> Inbound {
        self.inbound.clone()
    }

    /// Whether a transport is attached.
    pub fn is_available(&self) -> bool {
        self.transport.is_some()
    }
}

impl Bridge for JuceBridge {
    fn invoke(&self, name: &str, params: Vec<Value>) -> Result<PendingCall, BridgeError> {
        let Some(transport) = &self.transport else {
            return Err(BridgeError::Unavailable);
        };

        // Register before emitting: the backend may answer synchronously.
        let call = self.inbound.shared.pending.register();
        let request = InvokeRequest {
            name: name.to_string(),
            params,
            result_id: call.id(),
        };
        let payload = match serde_json::to_value(&request) {
            Ok(payload) => payload,
            Err(source) => {
                self.inbound.shared.pending.abandon(call.id());
                return Err(BridgeError::payload(INVOKE_EVENT, source));
            }
        };
        tracing::debug!("bridge: invoke {name} as call {}", call.id());
        transport.emit_event(INVOKE_EVENT, payload);
        Ok(call)
    }

    fn register_callback(&self, callback: UpdateCallback) {
        *self.inbound.shared.callback.lock() = Some(callback);
    }
}

impl fmt::Debug for JuceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JuceBridge")
            .field("inbound", &self.inbound)
            .field("available", &self.is_available())
            .finish()
    }
}
