use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::console::ConsoleInstanceManager;
use crate::host::{TerminalHost, WindowId};
use crate::prefs::{self, PrefsSnapshot};

use super::{render, ConsolePanel};

const IDLE_POLL_MS: u64 = 100;
const WHEEL_SCROLL_LINES: u16 = 3;

/// Drives the panel for one activated window until the user quits, then
/// persists preferences and tears the pairing down.
pub(crate) fn run_console(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    host: &mut TerminalHost,
    manager: &mut ConsoleInstanceManager,
    window: WindowId,
) -> Result<()> {
    debug_assert!(manager.is_present(window));
    debug_assert!(host.has_panel(window));

    let mut panel = ConsolePanel::new(window);
    restore_prefs(&mut panel, manager);

    let mut needs_draw = true;
    loop {
        let Some(session) = manager.session_mut(panel.window()) else {
            break;
        };

        if panel.take_screen_clear() {
            terminal.clear().context("clear terminal")?;
            needs_draw = true;
        }

        if needs_draw {
            let area = terminal.size().context("terminal size")?;
            panel.update_viewport(area.width, area.height, session);
            panel.ensure_render_cache(session);
            terminal
                .draw(|f| render::draw(f, &panel, session))
                .context("draw frame")?;
            needs_draw = false;
        }

        if panel.should_quit() {
            break;
        }

        if !event::poll(Duration::from_millis(IDLE_POLL_MS)).context("event poll")? {
            continue;
        }

        match event::read().context("event read")? {
            Event::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Release) {
                    panel.handle_key(session, key);
                    needs_draw = true;
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    panel.scroll_up(WHEEL_SCROLL_LINES, session);
                    needs_draw = true;
                }
                MouseEventKind::ScrollDown => {
                    panel.scroll_down(WHEEL_SCROLL_LINES, session);
                    needs_draw = true;
                }
                _ => {}
            },
            Event::Paste(text) => {
                panel.handle_paste_event(&text);
                needs_draw = true;
            }
            Event::Resize(_, _) => {
                needs_draw = true;
            }
            _ => {}
        }
    }

    persist_prefs(&panel, manager);
    manager.close(host, window);
    Ok(())
}

fn restore_prefs(panel: &mut ConsolePanel, manager: &mut ConsoleInstanceManager) {
    let Some(snapshot) = prefs::restore() else {
        return;
    };
    panel.set_theme(snapshot.theme);
    panel.restore_history(snapshot.history);
    if let Some(session) = manager.session_mut(panel.window()) {
        // Ids in a parsed snapshot are always registered; a stale selection
        // falls back to the default silently.
        let _ = session.set_backend(snapshot.backend.as_str());
    }
    panel.set_status("restored preferences");
}

fn persist_prefs(panel: &ConsolePanel, manager: &ConsoleInstanceManager) {
    let Some(session) = manager.session(panel.window()) else {
        return;
    };
    prefs::persist(&PrefsSnapshot {
        backend: session.backend().id,
        theme: panel.theme(),
        history: panel.history().to_vec(),
    });
}
