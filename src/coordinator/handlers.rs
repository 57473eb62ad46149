//! Inbound activation handlers, one variant per native platform

use tracing::debug;

use crate::relay::{LaunchActionApi, Platform};

use super::machine::WeakCoordinator;

/// Receives `launchAction` calls from a native host
#[derive(Clone)]
pub enum ActivationHandler {
    Android(WeakCoordinator),
    Ios(WeakCoordinator),
}

impl ActivationHandler {
    pub fn for_platform(platform: Platform, coordinator: WeakCoordinator) -> Self {
        match platform {
            Platform::Android => Self::Android(coordinator),
            Platform::Ios => Self::Ios(coordinator),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Self::Android(_) => Platform::Android,
            Self::Ios(_) => Platform::Ios,
        }
    }

    fn coordinator(&self) -> &WeakCoordinator {
        match self {
            Self::Android(coordinator) | Self::Ios(coordinator) => coordinator,
        }
    }
}

impl LaunchActionApi for ActivationHandler {
    fn launch_action(&self, action: String) {
        let Some(coordinator) = self.coordinator().upgrade() else {
            debug!(%action, "coordinator dropped, ignoring action");
            return;
        };

        debug!(platform = %self.platform(), %action, "launch action received");
        coordinator.ingest(action);
        coordinator.notify_listeners_changed();
    }
}

impl std::fmt::Debug for ActivationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ActivationHandler")
            .field(&self.platform())
            .finish()
    }
}
