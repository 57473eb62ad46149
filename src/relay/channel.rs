//! In-process relay from the native gates to the application side
//!
//! Actions are encoded as length-prefixed frames on the native side and
//! decoded on the application side, so both ends only share the wire
//! protocol. Delivery is ordered, unbounded and fire-and-forget for the
//! sender.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::RelayError;

use super::protocol::{decode_frame, encode_frame, AppCall};
use super::{ActionSink, LaunchActionApi};

/// Create a relay
pub fn channel() -> (RelaySender, RelayReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RelaySender { tx }, RelayReceiver { rx })
}

/// Native-side endpoint of the relay
#[derive(Debug, Clone)]
pub struct RelaySender {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ActionSink for RelaySender {
    fn deliver(&self, action: &str) -> Result<(), RelayError> {
        let frame = encode_frame(&AppCall::LaunchAction {
            action: action.to_owned(),
        })?;

        self.tx.send(frame).map_err(|_| RelayError::Closed)
    }
}

/// Application-side endpoint of the relay
#[derive(Debug)]
pub struct RelayReceiver {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl RelayReceiver {
    /// Hand every frame already queued to `target` without waiting.
    ///
    /// Returns the number of frames consumed.
    pub fn drain(&mut self, target: &dyn LaunchActionApi) -> usize {
        let mut consumed = 0;
        while let Ok(frame) = self.rx.try_recv() {
            dispatch(&frame, target);
            consumed += 1;
        }
        consumed
    }

    /// Pump inbound calls into `target` until every sender is dropped
    pub async fn run(mut self, target: Arc<dyn LaunchActionApi>) {
        info!("relay receiver started");

        while let Some(frame) = self.rx.recv().await {
            dispatch(&frame, target.as_ref());
        }

        info!("relay receiver stopped");
    }
}

fn dispatch(frame: &[u8], target: &dyn LaunchActionApi) {
    match decode_frame::<AppCall>(frame) {
        Ok(AppCall::LaunchAction { action }) => {
            debug!(%action, "relay delivering launch action");
            target.launch_action(action);
        }
        Err(e) => {
            warn!(?e, "dropping malformed relay frame");
        }
    }
}
