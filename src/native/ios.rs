//! iOS host: home-screen quick actions
//!
//! A cold launch hands the shortcut item over in the launch options; a
//! tap while running arrives through `performActionForShortcutItem`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::HostError;
use crate::gate::{GateCore, ReadinessGate};
use crate::relay::{ActionSink, Platform, ShortcutDescriptor, ShortcutHost};

use super::ShortcutService;

/// Quick-action item as registered with the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutItem {
    /// Item type, carries the shortcut id
    pub kind: String,
    pub localized_title: String,
    pub localized_subtitle: Option<String>,
    pub icon: Option<String>,
}

impl ShortcutItem {
    pub fn new(kind: impl Into<String>, localized_title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            localized_title: localized_title.into(),
            localized_subtitle: None,
            icon: None,
        }
    }
}

impl From<&ShortcutDescriptor> for ShortcutItem {
    fn from(item: &ShortcutDescriptor) -> Self {
        Self {
            kind: item.id.clone(),
            localized_title: item.title.clone(),
            localized_subtitle: item.secondary_label().map(str::to_owned),
            icon: item.icon().map(str::to_owned),
        }
    }
}

/// The part of the launch options this host reads
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub shortcut_item: Option<ShortcutItem>,
}

/// Readiness gate fed by application delegate callbacks
pub struct IosGate {
    core: GateCore,
}

impl IosGate {
    pub fn new(sink: Arc<dyn ActionSink>) -> Self {
        Self {
            core: GateCore::new(sink),
        }
    }

    /// `application(_:didFinishLaunchingWithOptions:)`
    ///
    /// Returns `false` when a shortcut item was consumed, so the system
    /// does not also call `perform_action`.
    pub fn did_finish_launching(&self, options: &LaunchOptions) -> bool {
        match &options.shortcut_item {
            Some(item) => {
                debug!(kind = %item.kind, "launched from quick action");
                self.on_cold_launch(Some(item.kind.as_str()));
                false
            }
            None => true,
        }
    }

    /// `application(_:performActionFor:completionHandler:)`
    pub fn perform_action(&self, item: &ShortcutItem) -> bool {
        if item.kind.is_empty() {
            return false;
        }
        self.on_activation(&item.kind);
        true
    }

    pub fn is_ready(&self) -> bool {
        self.core.is_ready()
    }
}

impl ReadinessGate for IosGate {
    fn on_activation(&self, action: &str) {
        self.core.on_activation(action);
    }

    fn on_consumer_ready(&self) {
        self.core.on_consumer_ready();
    }
}

/// iOS side of the relay
pub struct IosShortcutHost<S> {
    gate: IosGate,
    service: S,
}

impl<S: ShortcutService<ShortcutItem>> IosShortcutHost<S> {
    pub fn new(sink: Arc<dyn ActionSink>, service: S) -> Self {
        Self {
            gate: IosGate::new(sink),
            service,
        }
    }

    pub fn gate(&self) -> &IosGate {
        &self.gate
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

#[async_trait]
impl<S: ShortcutService<ShortcutItem>> ShortcutHost for IosShortcutHost<S> {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    async fn set_shortcut_items(&self, items: Vec<ShortcutDescriptor>) -> Result<(), HostError> {
        let items: Vec<ShortcutItem> = items.iter().map(ShortcutItem::from).collect();
        info!(count = items.len(), "setting quick actions");
        self.service.set_items(items)
    }

    fn clear_shortcut_items(&self) -> Result<(), HostError> {
        info!("removing all quick actions");
        self.service.clear()
    }

    async fn set_consumer_ready(&self) -> Result<(), HostError> {
        self.gate.on_consumer_ready();
        Ok(())
    }
}
