use crate::console::{BackendId, ConsoleSession, Exchange};
use crate::truncate;

use super::theme::ThemePreset;
use super::ConsolePanel;

impl ConsolePanel {
    /// Takes the composer content and routes it: slash commands are handled
    /// by the panel, anything else goes to the session as a prompt. Blank
    /// input is dropped without touching the transcript.
    pub(super) fn submit_current_line(&mut self, session: &mut ConsoleSession) {
        let typed_line = self.input.trim().to_string();
        if typed_line.is_empty() {
            return;
        }

        if typed_line == "/quit" || typed_line == "/exit" {
            self.should_quit = true;
            return;
        }

        if typed_line.starts_with('/') {
            self.execute_slash_command(session, &typed_line);
            self.clear_input_buffer();
            self.follow_scroll(session);
            return;
        }

        self.record_history(&typed_line);
        match session.submit(&typed_line) {
            Ok(Some(Exchange { user, response })) => {
                let via = response
                    .backend
                    .map(|id| id.as_str())
                    .unwrap_or("backend");
                self.last_status = format!("#{} answered via {}", user.sequence, via);
            }
            Ok(None) => {}
            Err(err) => {
                self.last_status = truncate(&err.to_string(), 60);
            }
        }
        self.clear_input_buffer();
        self.follow_scroll(session);
    }

    fn execute_slash_command(&mut self, session: &mut ConsoleSession, line: &str) {
        if line == "/help" {
            let listing = self.commands.join("\n");
            push_note(session, &format!("commands:\n{listing}"));
            self.last_status = "help".to_string();
            return;
        }

        if line == "/backends" {
            let current = session.backend().id;
            let listing = session
                .backends()
                .iter()
                .map(|b| {
                    let marker = if b.id == current { "*" } else { " " };
                    let kind = if b.is_mock { " (mock)" } else { "" };
                    format!("{marker} {} - {}{kind}", b.id.as_str(), b.display_name)
                })
                .collect::<Vec<_>>()
                .join("\n");
            push_note(session, &format!("backends:\n{listing}"));
            self.last_status = "backends listed".to_string();
            return;
        }

        if let Some(rest) = line.strip_prefix("/backend") {
            self.handle_backend_change(session, rest.trim());
            return;
        }

        if let Some(rest) = line.strip_prefix("/theme") {
            self.handle_theme_change(rest.trim());
            return;
        }

        if line == "/clear" {
            session.clear_transcript();
            self.needs_screen_clear = true;
            self.last_status = "cleared".to_string();
            return;
        }

        self.last_status = format!("unknown command {}; try /help", truncate(line, 24));
    }

    fn handle_backend_change(&mut self, session: &mut ConsoleSession, target: &str) {
        if target.is_empty() {
            let ids = BackendId::all()
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join("|");
            self.last_status = format!("usage: /backend <{ids}>");
            return;
        }
        match session.set_backend(target) {
            Ok(descriptor) => {
                push_note(
                    session,
                    &format!(
                        "backend switched to {} ({})",
                        descriptor.display_name,
                        descriptor.id.as_str()
                    ),
                );
                self.last_status = format!("backend -> {}", descriptor.id.as_str());
            }
            Err(err) => {
                // Rejected selection: registry state is unchanged.
                self.last_status = truncate(&err.to_string(), 60);
            }
        }
    }

    fn handle_theme_change(&mut self, target: &str) {
        match ThemePreset::parse(target) {
            Some(theme) => {
                self.set_theme(theme);
                self.last_status = format!("theme -> {}", theme.as_str());
            }
            None => {
                let names = ThemePreset::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join("|");
                self.last_status = format!("usage: /theme <{names}>");
            }
        }
    }
}

/// Inline feedback goes into the transcript as a system message, never as a
/// fake exchange.
fn push_note(session: &mut ConsoleSession, text: &str) {
    let _ = session.push_system_note(text);
}
