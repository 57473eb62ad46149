//! Error types for the shortcut subsystem
//!
//! `HostError` and `RelayError` describe failures on the native side of the
//! boundary. Application code only ever sees `CoordinatorError`.

/// Failures raised by a native host or the OS shortcut service
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("shortcut service unavailable: {0}")]
    Unavailable(String),

    #[error("shortcut service rejected request: {0}")]
    Rejected(String),

    #[error("operation not supported on {0}")]
    Unsupported(&'static str),

    #[error("relay failure: {0}")]
    Relay(#[from] RelayError),
}

/// Failures of the cross-boundary conduit
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay endpoint closed")]
    Closed,

    #[error("malformed frame: {0}")]
    Frame(String),
}

/// Errors surfaced to application code by the coordinator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    /// A native setup call failed during `initialize`
    #[error("shortcut initialization failed: {message}")]
    Initialization { message: String },

    /// Registering or clearing shortcuts failed
    #[error("shortcut registration failed: {message}")]
    Registration { message: String },

    /// The coordinator has been shut down
    #[error("shortcut coordinator is closed")]
    Closed,
}

impl CoordinatorError {
    pub(crate) fn initialization(err: impl std::fmt::Display) -> Self {
        Self::Initialization {
            message: err.to_string(),
        }
    }

    pub(crate) fn registration(err: impl std::fmt::Display) -> Self {
        Self::Registration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_is_flattened_into_message() {
        let err = CoordinatorError::registration(HostError::Unavailable("binder died".into()));
        assert_eq!(
            err.to_string(),
            "shortcut registration failed: shortcut service unavailable: binder died"
        );
    }

    #[test]
    fn test_relay_error_converts_to_host_error() {
        let err: HostError = RelayError::Closed.into();
        assert!(matches!(err, HostError::Relay(RelayError::Closed)));
    }
}
