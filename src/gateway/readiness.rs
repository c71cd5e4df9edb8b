use std::sync::{Arc, Condvar, Mutex};

/// One-shot ready latch for the engine's command channel.
///
/// The engine signals the gate once its command loop is accepting commands;
/// every dispatch waits on it first. When the gate is already open the wait
/// returns immediately off a single mutex check, so the common case adds no
/// latency. There is no timeout: an engine that never comes up leaves
/// callers waiting, which is the documented contract.
#[derive(Clone, Default)]
pub struct ReadinessGate {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    ready: Mutex<bool>,
    cv: Condvar,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the gate and wake every waiter. Idempotent.
    pub fn signal_ready(&self) {
        let mut ready = self
            .inner
            .ready
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *ready = true;
        self.inner.cv.notify_all();
    }

    pub fn is_ready(&self) -> bool {
        *self.inner.ready.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until the gate opens; returns immediately if it already has.
    pub fn wait_ready(&self) {
        let mut ready = self
            .inner
            .ready
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        while !*ready {
            ready = self.inner.cv.wait(ready).unwrap_or_else(|e| e.into_inner());
        }
    }
}
