//! Denylist applied to incoming action identifiers

use std::sync::Arc;

/// Prefixes of identifiers that belong to the platform rather than to
/// application-defined shortcuts
pub const SYSTEM_ACTION_PREFIXES: &[&str] = &["android.intent.", "com.apple."];

/// Predicate deciding whether an incoming action is dropped
#[derive(Clone)]
pub struct ActionFilter {
    deny: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl ActionFilter {
    /// Build a filter from a predicate returning `true` for denied actions
    pub fn new<F>(deny: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self { deny: Arc::new(deny) }
    }

    /// Drops blank identifiers and generic platform actions
    pub fn system_actions() -> Self {
        Self::new(is_system_action)
    }

    /// System-action filter extended with extra denied prefixes
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra: Vec<String> = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();
        Self::new(move |action| {
            is_system_action(action) || extra.iter().any(|p| action.starts_with(p.as_str()))
        })
    }

    /// Accept everything
    pub fn allow_all() -> Self {
        Self::new(|_| false)
    }

    pub fn is_denied(&self, action: &str) -> bool {
        (self.deny)(action)
    }
}

impl Default for ActionFilter {
    fn default() -> Self {
        Self::system_actions()
    }
}

impl std::fmt::Debug for ActionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionFilter").finish_non_exhaustive()
    }
}

fn is_system_action(action: &str) -> bool {
    action.trim().is_empty() || SYSTEM_ACTION_PREFIXES.iter().any(|p| action.starts_with(p))
}
