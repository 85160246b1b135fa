use std::collections::HashMap;

use crate::host::{HostShell, WindowId};

use super::error::ConsoleError;
use super::session::ConsoleSession;

/// How an activation was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Activation {
    /// A new session/panel pairing was created for the window.
    Created,
    /// An existing pairing was brought to the foreground.
    Raised,
}

/// Guarantees at most one live session/panel pairing per host window.
/// "Is present" is an O(1) map lookup keyed by window identity, not a scan
/// of the host's widget tree.
pub(crate) struct ConsoleInstanceManager {
    sessions: HashMap<WindowId, ConsoleSession>,
}

impl ConsoleInstanceManager {
    pub(crate) fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Find-or-create for the host's main window. Repeated activation raises
    /// the existing panel and returns the same session; it never duplicates a
    /// transcript. A host without a main window aborts with no state created.
    pub(crate) fn activate(
        &mut self,
        host: &mut dyn HostShell,
    ) -> Result<(WindowId, Activation), ConsoleError> {
        let window = host.main_window().ok_or(ConsoleError::HostUnavailable)?;
        if self.sessions.contains_key(&window) {
            host.raise_panel(window);
            return Ok((window, Activation::Raised));
        }
        self.sessions.insert(window, ConsoleSession::new());
        host.attach_panel(window);
        Ok((window, Activation::Created))
    }

    /// Tears down the pairing for a window, discarding its session and
    /// transcript together. Returns whether anything was present.
    pub(crate) fn close(&mut self, host: &mut dyn HostShell, window: WindowId) -> bool {
        if self.sessions.remove(&window).is_some() {
            host.detach_panel(window);
            true
        } else {
            false
        }
    }

    pub(crate) fn is_present(&self, window: WindowId) -> bool {
        self.sessions.contains_key(&window)
    }

    pub(crate) fn session(&self, window: WindowId) -> Option<&ConsoleSession> {
        self.sessions.get(&window)
    }

    pub(crate) fn session_mut(&mut self, window: WindowId) -> Option<&mut ConsoleSession> {
        self.sessions.get_mut(&window)
    }
}
