//! Native platform hosts
//!
//! Each platform module pairs an action source (intents on Android,
//! quick-action callbacks on iOS) with a readiness gate and implements
//! the host side of the relay. The OS registration API sits behind
//! [`ShortcutService`].

pub mod android;
pub mod ios;

use std::sync::Mutex;

use crate::error::HostError;

/// OS service that owns the launcher's shortcut list
pub trait ShortcutService<T>: Send + Sync {
    /// Replace the whole list; either all items are accepted or none are
    fn set_items(&self, items: Vec<T>) -> Result<(), HostError>;

    /// Remove every item
    fn clear(&self) -> Result<(), HostError>;
}

/// Shortcut service that keeps the list in memory
#[derive(Debug)]
pub struct InMemoryShortcutService<T> {
    items: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryShortcutService<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> InMemoryShortcutService<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered items
    pub fn items(&self) -> Vec<T> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_default()
    }
}

impl<T: Send> ShortcutService<T> for InMemoryShortcutService<T> {
    fn set_items(&self, items: Vec<T>) -> Result<(), HostError> {
        let mut current = self
            .items
            .lock()
            .map_err(|_| HostError::Unavailable("shortcut store poisoned".into()))?;
        *current = items;
        Ok(())
    }

    fn clear(&self) -> Result<(), HostError> {
        let mut current = self
            .items
            .lock()
            .map_err(|_| HostError::Unavailable("shortcut store poisoned".into()))?;
        current.clear();
        Ok(())
    }
}
