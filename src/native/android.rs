//! Android host: dynamic shortcuts backed by launch intents
//!
//! Every registered shortcut launches the activity with an intent that
//! carries the shortcut id in [`EXTRA_ACTION`]. The activity forwards the
//! launch intent and any later `onNewIntent` to the gate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::HostError;
use crate::gate::{GateCore, ReadinessGate};
use crate::relay::{ActionSink, Platform, ShortcutDescriptor, ShortcutHost};

use super::ShortcutService;

/// Intent extra carrying the shortcut id
pub const EXTRA_ACTION: &str = "launcher_shortcuts.action";

/// Intent action used by shortcut launch intents
pub const ACTION_SHORTCUT: &str = "launcher_shortcuts.intent.action.SHORTCUT";

/// Intent action of a plain launcher start
pub const ACTION_MAIN: &str = "android.intent.action.MAIN";

/// Minimal view of an Android intent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub action: Option<String>,
    pub extras: HashMap<String, String>,
}

impl Intent {
    /// Intent of a regular launcher start
    pub fn main() -> Self {
        Self {
            action: Some(ACTION_MAIN.to_string()),
            extras: HashMap::new(),
        }
    }

    /// Intent fired by tapping the shortcut `id`
    pub fn for_shortcut(id: impl Into<String>) -> Self {
        let mut extras = HashMap::new();
        extras.insert(EXTRA_ACTION.to_string(), id.into());
        Self {
            action: Some(ACTION_SHORTCUT.to_string()),
            extras,
        }
    }

    /// Shortcut id carried by this intent, if any
    pub fn shortcut_action(&self) -> Option<&str> {
        self.extras
            .get(EXTRA_ACTION)
            .map(String::as_str)
            .filter(|action| !action.is_empty())
    }
}

/// Dynamic shortcut record handed to the shortcut manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicShortcut {
    pub id: String,
    pub short_label: String,
    pub long_label: Option<String>,
    pub icon: Option<String>,
    pub intent: Intent,
}

impl From<&ShortcutDescriptor> for DynamicShortcut {
    fn from(item: &ShortcutDescriptor) -> Self {
        Self {
            id: item.id.clone(),
            short_label: item.title.clone(),
            long_label: item.secondary_label().map(str::to_owned),
            icon: item.icon().map(str::to_owned),
            intent: Intent::for_shortcut(item.id.clone()),
        }
    }
}

/// Readiness gate fed by activity intents
pub struct AndroidGate {
    core: GateCore,
}

impl AndroidGate {
    pub fn new(sink: Arc<dyn ActionSink>) -> Self {
        Self {
            core: GateCore::new(sink),
        }
    }

    /// Intent the activity was created with
    pub fn on_launch_intent(&self, intent: &Intent) {
        let action = intent.shortcut_action();
        debug!(?action, "activity created");
        self.on_cold_launch(action);
    }

    /// Intent delivered to the running activity.
    ///
    /// Returns whether the intent carried a shortcut.
    pub fn on_new_intent(&self, intent: &Intent) -> bool {
        match intent.shortcut_action() {
            Some(action) => {
                self.on_activation(action);
                true
            }
            None => false,
        }
    }

    /// Take the cold-launch action if readiness has not flushed it yet
    pub fn take_launch_action(&self) -> Option<String> {
        self.core.take_pending()
    }

    pub fn is_ready(&self) -> bool {
        self.core.is_ready()
    }
}

impl ReadinessGate for AndroidGate {
    fn on_activation(&self, action: &str) {
        self.core.on_activation(action);
    }

    fn on_consumer_ready(&self) {
        self.core.on_consumer_ready();
    }
}

/// Android side of the relay
pub struct AndroidShortcutHost<S> {
    gate: AndroidGate,
    service: S,
}

impl<S: ShortcutService<DynamicShortcut>> AndroidShortcutHost<S> {
    pub fn new(sink: Arc<dyn ActionSink>, service: S) -> Self {
        Self {
            gate: AndroidGate::new(sink),
            service,
        }
    }

    pub fn gate(&self) -> &AndroidGate {
        &self.gate
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

#[async_trait]
impl<S: ShortcutService<DynamicShortcut>> ShortcutHost for AndroidShortcutHost<S> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    async fn set_shortcut_items(&self, items: Vec<ShortcutDescriptor>) -> Result<(), HostError> {
        let shortcuts: Vec<DynamicShortcut> = items.iter().map(DynamicShortcut::from).collect();
        info!(count = shortcuts.len(), "setting dynamic shortcuts");
        self.service.set_items(shortcuts)
    }

    fn clear_shortcut_items(&self) -> Result<(), HostError> {
        info!("removing all dynamic shortcuts");
        self.service.clear()
    }

    async fn set_consumer_ready(&self) -> Result<(), HostError> {
        self.gate.on_consumer_ready();
        Ok(())
    }

    fn get_launch_action(&self) -> Result<Option<String>, HostError> {
        Ok(self.gate.take_launch_action())
    }
}
