//! Application-side shortcut coordination
//!
//! Provides the coordinator the host application integrates with:
//! - a single pending-action slot filled before any listener attaches
//! - a multicast event stream that replays the pending action to the
//!   first listener
//! - one-shot initialization shared by every caller
//! - registration of the shortcut list with the native host

mod filter;
mod handlers;
mod machine;

pub use filter::{ActionFilter, SYSTEM_ACTION_PREFIXES};
pub use handlers::ActivationHandler;
pub use machine::{CoordinatorOptions, ShortcutCoordinator, WeakCoordinator};
