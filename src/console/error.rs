use std::fmt;

use thiserror::Error;

/// Failure taxonomy for the console core. Every variant is local to the
/// operation that raised it; none leaves the transcript half-appended.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConsoleError {
    #[error("message text is empty after trimming")]
    EmptyMessage,
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),
    /// Reserved for a selected backend the service cannot resolve at all.
    /// Unreachable while backend ids are a closed enum.
    #[allow(dead_code)]
    #[error("backend '{0}' is not resolvable")]
    BackendUnavailable(String),
    /// Reserved for transport-backed integrations.
    #[allow(dead_code)]
    #[error("backend '{backend}' failed ({kind})")]
    Backend {
        backend: String,
        kind: BackendErrorKind,
    },
    #[error("a submission is already in flight")]
    SessionBusy,
    #[error("host main window is unavailable")]
    HostUnavailable,
}

/// Failure classes a transport-backed backend reports. Nothing in-tree
/// constructs these yet; the mock backend cannot time out by construction.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendErrorKind {
    Timeout,
    Transport,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendErrorKind::Timeout => f.write_str("timeout"),
            BackendErrorKind::Transport => f.write_str("transport"),
        }
    }
}
