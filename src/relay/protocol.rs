//! Relay message protocol definitions
//!
//! All messages are JSON-encoded. A frame is one message prefixed with its
//! 4-byte little-endian length; frames are always handled whole.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Upper bound on a single frame body
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

const LEN_PREFIX: usize = 4;

/// Native platform a host belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Whether the host answers a synchronous cold-launch query
    pub fn supports_launch_query(self) -> bool {
        matches!(self, Platform::Android)
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(format!("unknown platform `{other}`")),
        }
    }
}

/// Platform-specific presentation hints for a shortcut
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformExtras {
    /// Icon resource name (drawable on Android, asset/system name on iOS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Long label on Android, subtitle on iOS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_label: Option<String>,
}

/// One registrable launcher shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutDescriptor {
    /// Application-defined identifier, echoed back on activation
    pub id: String,

    /// User-visible label
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_extras: Option<PlatformExtras>,
}

impl ShortcutDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            platform_extras: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.platform_extras.get_or_insert_with(Default::default).icon = Some(icon.into());
        self
    }

    pub fn with_secondary_label(mut self, label: impl Into<String>) -> Self {
        self.platform_extras
            .get_or_insert_with(Default::default)
            .secondary_label = Some(label.into());
        self
    }

    pub fn icon(&self) -> Option<&str> {
        self.platform_extras.as_ref()?.icon.as_deref()
    }

    pub fn secondary_label(&self) -> Option<&str> {
        self.platform_extras.as_ref()?.secondary_label.as_deref()
    }
}

/// Check a registration batch before it crosses the boundary.
///
/// Ids and titles must be non-empty and ids unique within the batch.
pub fn validate_batch(items: &[ShortcutDescriptor]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id.trim().is_empty() {
            return Err("shortcut id must not be empty".to_string());
        }
        if item.title.trim().is_empty() {
            return Err(format!("shortcut `{}` has an empty title", item.id));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(format!("duplicate shortcut id `{}`", item.id));
        }
    }
    Ok(())
}

/// Requests from the application to the native host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Replace the registered shortcut list
    SetShortcutItems { items: Vec<ShortcutDescriptor> },

    /// Remove every registered shortcut
    ClearShortcutItems,

    /// The application can now accept delivered actions
    SetConsumerReady,

    /// Query the action the process was cold-launched with (Android)
    GetLaunchAction,
}

/// Calls from the native host into the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppCall {
    /// A shortcut was activated
    LaunchAction { action: String },
}

/// Encode a message as a length-prefixed JSON frame
pub fn encode_frame<T: Serialize>(msg: &T) -> Result<Vec<u8>, RelayError> {
    let body = serde_json::to_vec(msg).map_err(|e| RelayError::Frame(e.to_string()))?;
    if body.len() > MAX_FRAME_LEN {
        return Err(RelayError::Frame(format!(
            "frame of {} bytes exceeds limit",
            body.len()
        )));
    }

    let mut frame = Vec::with_capacity(LEN_PREFIX + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode a single complete frame
pub fn decode_frame<T: DeserializeOwned>(frame: &[u8]) -> Result<T, RelayError> {
    if frame.len() < LEN_PREFIX {
        return Err(RelayError::Frame("missing length prefix".to_string()));
    }
    let (prefix, body) = frame.split_at(LEN_PREFIX);

    let mut len_buf = [0u8; LEN_PREFIX];
    len_buf.copy_from_slice(prefix);
    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        return Err(RelayError::Frame(format!("frame of {len} bytes exceeds limit")));
    }
    if len != body.len() {
        return Err(RelayError::Frame(format!(
            "length prefix {len} does not match body of {} bytes",
            body.len()
        )));
    }

    serde_json::from_slice(body).map_err(|e| RelayError::Frame(e.to_string()))
}
