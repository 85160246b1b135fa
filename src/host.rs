use std::collections::HashSet;

/// Identity of one host window. Opaque to the console core; the host hands
/// these out and the instance manager keys sessions by them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct WindowId(pub(crate) u32);

/// What the console needs from the embedding application: a main window to
/// anchor the panel to, and dock/raise/detach operations on that panel. The
/// core never sees a widget type through this seam.
pub(crate) trait HostShell {
    fn main_window(&self) -> Option<WindowId>;
    fn attach_panel(&mut self, window: WindowId);
    fn raise_panel(&mut self, window: WindowId);
    fn detach_panel(&mut self, window: WindowId);
}

/// In-process host used by the binary: the terminal is the one main window.
pub(crate) struct TerminalHost {
    main: Option<WindowId>,
    panels: HashSet<WindowId>,
}

impl TerminalHost {
    pub(crate) fn new() -> Self {
        Self {
            main: Some(WindowId(1)),
            panels: HashSet::new(),
        }
    }

    pub(crate) fn has_panel(&self, window: WindowId) -> bool {
        self.panels.contains(&window)
    }
}

impl HostShell for TerminalHost {
    fn main_window(&self) -> Option<WindowId> {
        self.main
    }

    fn attach_panel(&mut self, window: WindowId) {
        self.panels.insert(window);
    }

    fn raise_panel(&mut self, window: WindowId) {
        // Single fullscreen panel; attach already implies foreground.
        debug_assert!(self.panels.contains(&window));
    }

    fn detach_panel(&mut self, window: WindowId) {
        self.panels.remove(&window);
    }
}

/// Menu metadata for a registrable host command. The terminal host carries it
/// without rendering a menu; a widget-bearing host would consume every field.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CommandSpec {
    pub(crate) name: &'static str,
    pub(crate) menu_text: &'static str,
    pub(crate) tooltip: &'static str,
    pub(crate) icon_path: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HostAction {
    OpenConsole,
}

/// Process-wide command registration state with explicit init: the host owns
/// one registry, commands are registered once at startup, and there is no
/// runtime teardown.
pub(crate) struct CommandRegistry {
    commands: Vec<(CommandSpec, HostAction)>,
}

impl CommandRegistry {
    pub(crate) fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, spec: CommandSpec, action: HostAction) {
        self.commands.push((spec, action));
    }

    pub(crate) fn action(&self, name: &str) -> Option<HostAction> {
        self.commands
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, action)| *action)
    }

    /// Menu metadata a widget-bearing host would consume; the terminal host
    /// has no menu surface.
    #[cfg(test)]
    pub(crate) fn specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().map(|(spec, _)| spec)
    }
}

pub(crate) const SHOW_CONSOLE_COMMAND: &str = "ShowConsole";

/// Registers the single command this crate exposes to the host menu.
pub(crate) fn register_console_command(registry: &mut CommandRegistry) {
    registry.register(
        CommandSpec {
            name: SHOW_CONSOLE_COMMAND,
            menu_text: "Console",
            tooltip: "Open the Stormy console",
            icon_path: "",
        },
        HostAction::OpenConsole,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_command_is_registered_with_menu_metadata() {
        let mut registry = CommandRegistry::new();
        register_console_command(&mut registry);

        assert_eq!(
            registry.action(SHOW_CONSOLE_COMMAND),
            Some(HostAction::OpenConsole)
        );
        let spec = registry
            .specs()
            .find(|spec| spec.name == SHOW_CONSOLE_COMMAND)
            .expect("spec registered");
        assert_eq!(spec.menu_text, "Console");
        assert!(!spec.tooltip.is_empty());
    }

    #[test]
    fn unknown_command_has_no_action() {
        let mut registry = CommandRegistry::new();
        register_console_command(&mut registry);
        assert_eq!(registry.action("HideConsole"), None);
    }

    #[test]
    fn terminal_host_tracks_attached_panels() {
        let mut host = TerminalHost::new();
        let window = host.main_window().expect("main window");
        assert!(!host.has_panel(window));

        host.attach_panel(window);
        assert!(host.has_panel(window));

        host.detach_panel(window);
        assert!(!host.has_panel(window));
    }
}
