//! Readiness gate for natively-originated shortcut activations
//!
//! A gate buffers at most one action until the application signals that
//! it is ready, then hands every action straight to the relay:
//! - before readiness: the latest activation wins the single slot
//! - on readiness: the slot is flushed exactly once
//! - after readiness: activations are delivered immediately

mod machine;

pub use machine::{GateCore, ReadinessGate};
