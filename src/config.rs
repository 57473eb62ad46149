//! Configuration loading and management

use std::env;

use anyhow::{Context, Result};

use crate::coordinator::{ActionFilter, CoordinatorOptions};
use crate::relay::Platform;

/// Host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform the simulated host runs as
    pub platform: Platform,

    /// Action the process is cold-launched with
    pub cold_launch_action: Option<String>,

    /// Extra denylisted action prefixes
    pub deny_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::Android,
            cold_launch_action: None,
            deny_prefixes: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(platform) = lookup("SHORTCUTS_PLATFORM") {
            config.platform = platform
                .parse()
                .map_err(anyhow::Error::msg)
                .context("invalid SHORTCUTS_PLATFORM")?;
        }

        config.cold_launch_action = lookup("SHORTCUTS_COLD_LAUNCH")
            .map(|action| action.trim().to_string())
            .filter(|action| !action.is_empty());

        if let Some(prefixes) = lookup("SHORTCUTS_DENY_PREFIXES") {
            config.deny_prefixes = prefixes
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    /// Coordinator options derived from this configuration
    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            filter: ActionFilter::with_prefixes(self.deny_prefixes.clone()),
        }
    }
}
