//! launcher-shortcuts: OS launcher shortcuts with loss-free activation delivery
//!
//! Applications register shortcuts (Android dynamic shortcuts, iOS quick
//! actions) and receive the id of the shortcut the user tapped, whether
//! the tap started the process or reached it while running.
//!
//! Data flows leaf-first:
//! - native action sources feed a per-platform [`gate::ReadinessGate`]
//! - the gate releases actions over the [`relay`] once the app is ready
//! - the [`coordinator::ShortcutCoordinator`] turns them into a stream with
//!   replay for the first listener and a one-shot cold-start query

pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod gate;
pub mod lifecycle;
pub mod native;
pub mod relay;

pub use coordinator::{ActionFilter, CoordinatorOptions, ShortcutCoordinator};
pub use error::CoordinatorError;
pub use events::ShortcutStream;
pub use relay::{PlatformExtras, ShortcutDescriptor};
