//! Calls awaiting a completion from the backend.
//!
//! Each call gets an id from a monotonically increasing counter and a
//! one-shot channel. The table keeps the sending half until the matching
//! completion arrives; the caller keeps the receiving half as a
//! [`PendingCall`]. A completion resolves its call at most once, and
//! completions for unknown ids are ignored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::BridgeError;

/// Outstanding calls, keyed by result id.
///
/// Dropping a [`PendingCall`] does not remove its entry. A call the backend
/// never completes stays in the table until [`abandon`](Self::abandon) is
/// called for it, so fire-and-forget writes to a silent backend accumulate.
#[derive(Debug, Default)]
pub struct PendingCalls {
    next_id: AtomicU64,
    waiting: Mutex<HashMap<u64, Sender<Value>>>,
}

impl PendingCalls {
    /// Empty table; the first call gets id `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id and registers a one-shot slot for its result.
    pub fn register(&self) -> PendingCall {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = bounded(1);
        self.waiting.lock().insert(id, tx);
        PendingCall { id, rx }
    }

    /// Delivers `result` to call `id`.
    ///
    /// Returns `false` if no such call is outstanding. The caller may have
    /// dropped its [`PendingCall`]; the result is then discarded.
    pub fn resolve(&self, id: u64, result: Value) -> bool {
        // Take the sender out before sending so the lock is not held while
        // the receiver wakes.
        let Some(tx) = self.waiting.lock().remove(&id) else {
            return false;
        };
        let _ = tx.send(result);
        true
    }

    /// Forgets call `id` without resolving it. Its waiter sees
    /// [`BridgeError::Abandoned`].
    pub fn abandon(&self, id: u64) -> bool {
        self.waiting.lock().remove(&id).is_some()
    }

    /// Number of calls still waiting.
    pub fn len(&self) -> usize {
        self.waiting.lock().len()
    }

    /// Whether no call is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.lock().is_empty()
    }
}

/// Receiving half of one backend call.
#[derive(Debug)]
pub struct PendingCall {
    id: u64,
    rx: Receiver<Value>,
}

impl PendingCall {
    /// Result id of this call.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Blocks until the backend answers.
    ///
    /// There is no timeout: a backend that never answers blocks forever.
    pub fn wait(self) -> Result<Value, BridgeError> {
        self.rx
            .recv()
            .map_err(|_| BridgeError::Abandoned { id: self.id })
    }

    /// Blocks until the backend answers or `timeout` elapses.
    pub fn wait_timeout(self, timeout: Duration) -> Result<Value, BridgeError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => BridgeError::Timeout {
                id: self.id,
                timeout,
            },
            RecvTimeoutError::Disconnected => BridgeError::Abandoned { id: self.id },
        })
    }

    /// The result if it has arrived, without blocking.
    ///
    /// `Ok(None)` means still pending.
    pub fn try_result(&self) -> Result<Option<Value>, BridgeError> {
        match self.rx.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BridgeError::Abandoned { id: self.id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_increase() {
        let calls = PendingCalls::new();
        let a = calls.register();
        let b = calls.register();
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn resolve_once() {
        let calls = PendingCalls::new();
        let call = calls.register();
        assert!(calls.resolve(call.id(), json!(true)));
        assert!(!calls.resolve(call.id(), json!(false)));
        assert_eq!(call.wait().unwrap(), json!(true));
        assert!(calls.is_empty());
    }

    #[test]
    fn unknown_id_is_ignored() {
        let calls = PendingCalls::new();
        let call = calls.register();
        assert!(!calls.resolve(42, json!(1)));
        assert_eq!(call.try_result().unwrap(), None);
    }

    #[test]
    fn dropped_caller_still_clears_entry() {
        let calls = PendingCalls::new();
        let id = calls.register().id();
        assert!(calls.resolve(id, json!(null)));
        assert!(calls.is_empty());
    }

    #[test]
    fn abandoned_call_errors() {
        let calls = PendingCalls::new();
        let call = calls.register();
        assert!(calls.abandon(call.id()));
        assert!(matches!(
            call.try_result(),
            Err(BridgeError::Abandoned { id: 0 })
        ));
    }

    #[test]
    fn dropped_call_stays_registered_until_abandoned() {
        let calls = PendingCalls::new();
        let id = calls.register().id();
        assert_eq!(calls.len(), 1);
        assert!(calls.abandon(id));
        assert!(calls.is_empty());
    }

    #[test]
    fn wait_timeout_expires() {
        let calls = PendingCalls::new();
        let call = calls.register();
        let err = call.wait_timeout(Duration::from_millis(5)).unwrap_err();
        assert!(matches!(err, BridgeError::Timeout { id: 0, .. }));
    }

    #[test]
    fn resolves_across_threads() {
        let calls = std::sync::Arc::new(PendingCalls::new());
        let call = calls.register();
        let id = call.id();
        let resolver = std::sync::Arc::clone(&calls);
        let handle = std::thread::spawn(move || resolver.resolve(id, json!({"inputGain": 0.5})));
        assert_eq!(
            call.wait_timeout(Duration::from_secs(5)).unwrap(),
            json!({"inputGain": 0.5})
        );
        assert!(handle.join().unwrap());
    }
}
