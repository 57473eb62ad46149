//! Cross-boundary relay between the native host and the application
//!
//! The relay is a reliable, ordered conduit. Its two directions are
//! modelled as traits so either side can be replaced by a test double.

mod channel;
mod protocol;

pub use channel::{channel, RelayReceiver, RelaySender};
pub use protocol::{
    decode_frame, encode_frame, validate_batch, AppCall, HostRequest, Platform, PlatformExtras,
    ShortcutDescriptor, MAX_FRAME_LEN,
};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{HostError, RelayError};

/// Application-to-native surface of a platform host
#[async_trait]
pub trait ShortcutHost: Send + Sync {
    /// Platform this host runs on
    fn platform(&self) -> Platform;

    /// Replace the registered shortcut list
    async fn set_shortcut_items(&self, items: Vec<ShortcutDescriptor>) -> Result<(), HostError>;

    /// Remove every registered shortcut
    fn clear_shortcut_items(&self) -> Result<(), HostError>;

    /// Signal that the application accepts delivered actions
    async fn set_consumer_ready(&self) -> Result<(), HostError>;

    /// Take the action the process was cold-launched with, if any
    fn get_launch_action(&self) -> Result<Option<String>, HostError> {
        Err(HostError::Unsupported(self.platform().name()))
    }

    /// Route a typed request to the matching operation.
    ///
    /// Only `GetLaunchAction` produces a value.
    async fn dispatch(&self, request: HostRequest) -> Result<Option<String>, HostError> {
        debug!(platform = %self.platform(), ?request, "host request");
        match request {
            HostRequest::SetShortcutItems { items } => {
                self.set_shortcut_items(items).await.map(|_| None)
            }
            HostRequest::ClearShortcutItems => self.clear_shortcut_items().map(|_| None),
            HostRequest::SetConsumerReady => self.set_consumer_ready().await.map(|_| None),
            HostRequest::GetLaunchAction => self.get_launch_action(),
        }
    }
}

/// Native-to-application surface: the single inbound call
pub trait LaunchActionApi: Send + Sync {
    /// Deliver one activated action identifier
    fn launch_action(&self, action: String);
}

/// Where a readiness gate hands released actions
pub trait ActionSink: Send + Sync {
    /// Fire-and-forget delivery across the boundary
    fn deliver(&self, action: &str) -> Result<(), RelayError>;
}
