//! In-process stand-in for the native backend.
//!
//! [`LoopbackHost`] owns a full parameter set initialised to the catalogue
//! defaults and answers the three native functions the way the plugin does:
//!
//! - `getState` returns every parameter's normalized value.
//! - `setParameter(id, value)` clamps to \[0, 1\], stores, pushes the new
//!   value back through `updateParams`, and answers `true`. Unknown ids and
//!   short argument lists answer `false`.
//! - `resetAllParameters` restores every default, pushing each one, and
//!   answers `true`.
//!
//! Unknown function names are answered with `null`. Completions are delivered
//! synchronously from inside [`Transport::emit_event`], after any pushes the
//! call caused.

use std::sync::Arc;

use envgen_core::{ParamKey, ParamState, all_params};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use crate::bridge::{Inbound, JuceBridge, Transport};
use crate::error::BridgeError;
use crate::protocol::{
    COMPLETE_EVENT, Completion, GET_STATE, INVOKE_EVENT, InvokeRequest, RESET_ALL_PARAMETERS,
    SET_PARAMETER,
};

/// Simulated native side of the bridge.
#[derive(Debug)]
pub struct LoopbackHost {
    values: Mutex<ParamState>,
    inbound: Inbound,
}

impl LoopbackHost {
    /// Host answering through `inbound`, with every parameter at its default.
    pub fn new(inbound: Inbound) -> Self {
        Self {
            values: Mutex::new(ParamState::with_defaults()),
            inbound,
        }
    }

    /// Creates a host and a bridge wired to it.
    pub fn attach() -> (Arc<LoopbackHost>, JuceBridge) {
        let bridge = JuceBridge::new();
        let host = Arc::new(LoopbackHost::new(bridge.inbound()));
        let bridge = bridge.with_transport(host.clone());
        (host, bridge)
    }

    /// Current normalized value of `key`.
    pub fn value(&self, key: ParamKey) -> f64 {
        self.values.lock().get(key)
    }

    /// Copy of the whole parameter set.
    pub fn snapshot(&self) -> ParamState {
        self.values.lock().clone()
    }

    /// Changes a parameter from the host side, as automation or a preset load
    /// would, and pushes it to the surface.
    pub fn automate(&self, key: ParamKey, value: f64) {
        let value = value.clamp(0.0, 1.0);
        self.values.lock().set(key, value);
        tracing::debug!("loopback: automate {key} = {value}");
        self.inbound.update_params(&key.to_string(), value);
    }

    fn set_parameter(&self, params: &[Value]) -> bool {
        let (Some(id), Some(value)) = (
            params.first().and_then(Value::as_str),
            params.get(1).and_then(Value::as_f64),
        ) else {
            return false;
        };
        let Ok(key) = id.parse::<ParamKey>() else {
            tracing::warn!("loopback: setParameter for unknown id {id}");
            return false;
        };
        let value = value.clamp(0.0, 1.0);
        self.values.lock().set(key, value);
        self.inbound.update_params(id, value);
        true
    }

    fn get_state(&self) -> Value {
        let values = self.values.lock();
        let object: Map<String, Value> = values
            .iter()
            .map(|(key, value)| (key.to_string(), json!(value)))
            .collect();
        Value::Object(object)
    }

    fn reset_all(&self) {
        let defaults = ParamState::with_defaults();
        *self.values.lock() = defaults.clone();
        for meta in all_params() {
            self.inbound
                .update_params(&meta.key.to_string(), defaults.get(meta.key));
        }
    }

    fn call(&self, request: &InvokeRequest) -> Value {
        match request.name.as_str() {
            GET_STATE => self.get_state(),
            SET_PARAMETER => json!(self.set_parameter(&request.params)),
            RESET_ALL_PARAMETERS => {
                self.reset_all();
                json!(true)
            }
            other => {
                tracing::warn!("loopback: no native function {other}");
                Value::Null
            }
        }
    }
}

impl Transport for LoopbackHost {
    fn emit_event(&self, event: &str, payload: Value) {
        if event != INVOKE_EVENT {
            return;
        }
        let request = match serde_json::from_value::<InvokeRequest>(payload) {
            Ok(request) => request,
            Err(source) => {
                tracing::warn!("{}", BridgeError::payload(INVOKE_EVENT, source));
                return;
            }
        };
        let result = self.call(&request);
        let completion = Completion {
            promise_id: request.result_id,
            result,
        };
        match serde_json::to_value(&completion) {
            Ok(payload) => self.inbound.deliver(COMPLETE_EVENT, payload),
            Err(source) => tracing::warn!("{}", BridgeError::payload(COMPLETE_EVENT, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use crate::client::BackendClient;
    use envgen_core::{LaneField, LaneNumber, PARAM_COUNT};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> (Arc<LoopbackHost>, BackendClient) {
        let (host, bridge) = LoopbackHost::attach();
        (host, BackendClient::new(Arc::new(bridge)))
    }

    #[test]
    fn state_starts_at_defaults() {
        let (_host, client) = client();
        let state = client.get_state().unwrap();
        assert_eq!(state.len(), PARAM_COUNT);
        assert_eq!(state["inputGain"], 0.5);
        assert_eq!(state["numLanes"], 0.125);
    }

    #[test]
    fn set_parameter_clamps_and_acknowledges() {
        let (host, client) = client();
        let ack = client.set_parameter("lane2_amount", 1.7).unwrap().wait().unwrap();
        assert_eq!(ack, json!(true));
        let key = ParamKey::lane(LaneNumber::new(2).unwrap(), LaneField::Amount);
        assert_eq!(host.value(key), 1.0);
    }

    #[test]
    fn unknown_id_answers_false() {
        let (_host, client) = client();
        let ack = client.set_parameter("lane9_amount", 0.5).unwrap().wait().unwrap();
        assert_eq!(ack, json!(false));
    }

    #[test]
    fn short_arguments_answer_false() {
        let (_host, client) = client();
        let ack = client
            .bridge()
            .invoke(SET_PARAMETER, vec![json!("inputGain")])
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(ack, json!(false));
    }

    #[test]
    fn writes_are_echoed() {
        let (_host, bridge) = LoopbackHost::attach();
        let pushes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pushes);
        bridge.register_callback(Arc::new(move |id: &str, value: f64| {
            sink.lock().push((id.to_string(), value));
        }));

        let client = BackendClient::new(Arc::new(bridge));
        client.set_parameter("dryPass", 1.0).unwrap().wait().unwrap();
        assert_eq!(*pushes.lock(), vec![("dryPass".to_string(), 1.0)]);
    }

    #[test]
    fn reset_pushes_every_default() {
        let (host, bridge) = LoopbackHost::attach();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        bridge.register_callback(Arc::new(move |_: &str, _: f64| {
            counter.fetch_add(1, Ordering::Relaxed);
        }));
        host.automate(ParamKey::InputGain, 0.9);

        let client = BackendClient::new(Arc::new(bridge));
        let ack = client.reset_all_parameters().unwrap().wait().unwrap();
        assert_eq!(ack, json!(true));
        assert_eq!(count.load(Ordering::Relaxed), 1 + PARAM_COUNT);
        assert_eq!(host.value(ParamKey::InputGain), 0.5);
    }

    #[test]
    fn unknown_function_answers_null() {
        let (_host, client) = client();
        let result = client.bridge().invoke("launchRockets", vec![]).unwrap().wait().unwrap();
        assert!(result.is_null());
    }
}
