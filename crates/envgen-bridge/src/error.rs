//! Error types for bridge operations.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the native backend.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No native transport is attached
    #[error("native backend not available")]
    Unavailable,

    /// The pending call was dropped before the backend answered
    #[error("call {id} was abandoned before completing")]
    Abandoned {
        /// Result id of the abandoned call.
        id: u64,
    },

    /// The backend did not answer in time
    #[error("call {id} did not complete within {timeout:?}")]
    Timeout {
        /// Result id of the call.
        id: u64,
        /// How long the caller waited.
        timeout: Duration,
    },

    /// A payload could not be encoded or decoded
    #[error("malformed {event} payload: {source}")]
    Payload {
        /// Event or function the payload belonged to.
        event: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl BridgeError {
    /// Create a payload error.
    pub fn payload(event: impl Into<String>, source: serde_json::Error) -> Self {
        BridgeError::Payload {
            event: event.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unavailable_display() {
        assert_eq!(
            BridgeError::Unavailable.to_string(),
            "native backend not available"
        );
    }

    #[test]
    fn timeout_display() {
        let err = BridgeError::Timeout {
            id: 7,
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "call 7 did not complete within 250ms");
    }

    #[test]
    fn payload_has_source() {
        let json_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err = BridgeError::payload("__juce__complete", json_err);
        assert!(err.to_string().starts_with("malformed __juce__complete payload"));
        assert!(err.source().is_some());
    }
}
