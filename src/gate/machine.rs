//! Core gate state machine shared by every platform adapter

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::relay::ActionSink;

/// Capability interface every platform gate exposes
pub trait ReadinessGate: Send + Sync {
    /// A shortcut was activated while the process is alive
    fn on_activation(&self, action: &str);

    /// The consumer side can now accept actions
    fn on_consumer_ready(&self);

    /// The process itself was started by a shortcut tap
    fn on_cold_launch(&self, action: Option<&str>) {
        if let Some(action) = action {
            self.on_activation(action);
        }
    }
}

#[derive(Debug, Default)]
struct GateState {
    is_ready: bool,
    pending: Option<String>,
}

/// Flag-and-slot gate in front of an [`ActionSink`]
///
/// Deliveries happen while the state lock is held, so an activation racing
/// the readiness transition is either queued and flushed by it, or observes
/// readiness and is delivered after the flushed action.
pub struct GateCore {
    state: Mutex<GateState>,
    sink: Arc<dyn ActionSink>,
}

impl GateCore {
    pub fn new(sink: Arc<dyn ActionSink>) -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            sink,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lock().is_ready
    }

    /// Peek at the buffered action
    pub fn pending(&self) -> Option<String> {
        self.lock().pending.clone()
    }

    /// Remove and return the buffered action
    pub fn take_pending(&self) -> Option<String> {
        let taken = self.lock().pending.take();
        if let Some(action) = &taken {
            debug!(%action, "pending action taken by query");
        }
        taken
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn deliver(&self, action: &str) {
        // Delivery is handed off once; failures are not retried
        if let Err(e) = self.sink.deliver(action) {
            warn!(%action, ?e, "failed to deliver action across relay");
        }
    }
}

impl ReadinessGate for GateCore {
    fn on_activation(&self, action: &str) {
        let mut state = self.lock();
        if state.is_ready {
            debug!(%action, "delivering action");
            self.deliver(action);
        } else if let Some(previous) = state.pending.replace(action.to_owned()) {
            debug!(%previous, %action, "pending action overwritten");
        } else {
            debug!(%action, "action queued until consumer is ready");
        }
    }

    fn on_consumer_ready(&self) {
        let mut state = self.lock();
        if state.is_ready {
            debug!("consumer already ready");
            return;
        }

        state.is_ready = true;
        info!(pending = state.pending.is_some(), "consumer ready");

        if let Some(action) = state.pending.take() {
            self.deliver(&action);
        }
    }
}
