use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::console::ConsoleSession;
use crate::host::WindowId;
use crate::input_cursor_position;

mod commands;
mod input;
mod render;
mod runtime;
pub(crate) mod theme;

pub(crate) use runtime::run_console;
pub(crate) use theme::{default_theme, ThemePreset};

use theme::ThemePalette;

const SCROLL_PAGE_LINES: u16 = 5;
const MAX_HISTORY_ENTRIES: usize = 400;
const MAX_SLASH_HINTS: usize = 6;

/// Cached rendering state to avoid recomputing transcript lines and scroll
/// bounds every frame.
struct RenderCache {
    /// Generation counter at the time of last cache build.
    generation: u64,
    /// Viewport width used for the cached lines.
    width: u16,
    /// Viewport height used for the cached scroll_max.
    height: u16,
    /// The cached rendered lines.
    lines: Vec<Line<'static>>,
    /// The cached maximum scroll offset.
    scroll_max: u16,
}

impl RenderCache {
    fn new() -> Self {
        Self {
            generation: u64::MAX, // force first rebuild
            width: 0,
            height: 0,
            lines: Vec::new(),
            scroll_max: 0,
        }
    }
}

/// Presentation-layer adapter for one console session. Holds view state only;
/// every message it renders lives in the session's transcript.
pub(crate) struct ConsolePanel {
    window: WindowId,

    input: String,
    cursor: usize,
    scroll: u16,
    autoscroll: bool,
    viewport_width: u16,
    viewport_height: u16,

    history: Vec<String>,
    history_pos: Option<usize>,

    commands: Vec<String>,
    slash_hint_idx: usize,

    theme: ThemePreset,
    last_status: String,
    should_quit: bool,

    /// Set by /clear to request a full terminal repaint.
    needs_screen_clear: bool,

    /// Monotonically increasing counter bumped whenever rendered state changes.
    render_generation: u64,
    render_cache: RenderCache,
}

impl ConsolePanel {
    pub(crate) fn new(window: WindowId) -> Self {
        Self {
            window,
            input: String::new(),
            cursor: 0,
            scroll: 0,
            autoscroll: true,
            viewport_width: 120,
            viewport_height: 36,
            history: Vec::new(),
            history_pos: None,
            commands: default_commands(),
            slash_hint_idx: 0,
            theme: theme::default_theme(),
            last_status: "ready".to_string(),
            should_quit: false,
            needs_screen_clear: false,
            render_generation: 0,
            render_cache: RenderCache::new(),
        }
    }

    pub(crate) fn window(&self) -> WindowId {
        self.window
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn take_screen_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_screen_clear)
    }

    pub(super) fn theme_palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    pub(crate) fn set_theme(&mut self, theme: ThemePreset) {
        self.theme = theme;
        self.invalidate_render_cache();
    }

    pub(crate) fn theme(&self) -> ThemePreset {
        self.theme
    }

    pub(crate) fn history(&self) -> &[String] {
        &self.history
    }

    pub(crate) fn restore_history(&mut self, history: Vec<String>) {
        self.history = history;
        self.history_pos = None;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.last_status = status.into();
    }

    /// Bump the render generation to invalidate the render cache.
    fn invalidate_render_cache(&mut self) {
        self.render_generation = self.render_generation.wrapping_add(1);
    }

    /// Invalidate the cache and keep the view glued to the bottom while
    /// autoscroll is on. Call after any transcript or status mutation.
    pub(super) fn follow_scroll(&mut self, session: &ConsoleSession) {
        self.invalidate_render_cache();
        if self.autoscroll {
            self.scroll = self.scroll_max(session);
        } else {
            self.scroll = self.scroll.min(self.scroll_max(session));
        }
    }

    /// Ensure the render cache is up-to-date for the current state.
    /// Returns true if the cache was rebuilt.
    pub(super) fn ensure_render_cache(&mut self, session: &ConsoleSession) -> bool {
        let need_rebuild = self.render_cache.generation != self.render_generation
            || self.render_cache.width != self.viewport_width
            || self.render_cache.height != self.viewport_height;
        if !need_rebuild {
            return false;
        }

        let width = self.viewport_width.max(1);
        let lines = render::transcript_lines(self, session);

        let prompt_width = UnicodeWidthStr::width(render::PROMPT_PREFIX) as u16;
        let input_height = self
            .input_height(width, prompt_width)
            .saturating_add(2)
            .min(self.viewport_height.saturating_sub(6).max(3));
        let hints_h = if self.slash_hints().is_empty() {
            0
        } else {
            render::HINT_ROW_HEIGHT
        };
        // fixed rows: composer + hint row + status bar
        let fixed_rows = input_height
            .saturating_add(hints_h)
            .saturating_add(render::STATUS_ROW_HEIGHT);
        let log_height = self
            .viewport_height
            .saturating_sub(fixed_rows)
            .saturating_sub(2); // transcript panel borders
        let log_width = width.saturating_sub(2).max(1);
        let paragraph = Paragraph::new(lines.clone()).wrap(Wrap { trim: false });
        let rendered = paragraph.line_count(log_width) as u16;
        let scroll_max = rendered.saturating_sub(log_height.max(1));

        self.render_cache = RenderCache {
            generation: self.render_generation,
            width: self.viewport_width,
            height: self.viewport_height,
            lines,
            scroll_max,
        };
        true
    }

    pub(super) fn scroll_max(&mut self, session: &ConsoleSession) -> u16 {
        self.ensure_render_cache(session);
        self.render_cache.scroll_max
    }

    pub(super) fn cached_log_lines(&self) -> &[Line<'static>] {
        &self.render_cache.lines
    }

    pub(super) fn scroll_offset(&self) -> u16 {
        self.scroll
    }

    pub(crate) fn update_viewport(&mut self, width: u16, height: u16, session: &ConsoleSession) {
        self.viewport_width = width.max(1);
        self.viewport_height = height.max(1);
        let max_scroll = self.scroll_max(session);
        if self.autoscroll {
            self.scroll = max_scroll;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }

    pub(super) fn scroll_up(&mut self, n: u16, session: &ConsoleSession) {
        let from = if self.autoscroll {
            self.scroll_max(session)
        } else {
            self.scroll
        };
        self.autoscroll = false;
        self.scroll = from.saturating_sub(n);
    }

    pub(super) fn scroll_down(&mut self, n: u16, session: &ConsoleSession) {
        let max_scroll = self.scroll_max(session);
        self.scroll = self.scroll.saturating_add(n).min(max_scroll);
        if self.scroll >= max_scroll {
            self.autoscroll = true;
        }
    }

    pub(super) fn input_height(&self, width: u16, prompt_width: u16) -> u16 {
        if self.input.is_empty() {
            return 1;
        }
        let (_, end_y) = input_cursor_position(&self.input, self.input.len(), width, prompt_width);
        end_y.saturating_add(1).max(1)
    }

    pub(super) fn record_history(&mut self, line: &str) {
        self.history.push(line.to_string());
        if self.history.len() > MAX_HISTORY_ENTRIES {
            let excess = self.history.len() - MAX_HISTORY_ENTRIES;
            self.history.drain(..excess);
        }
        self.history_pos = None;
    }
}

fn default_commands() -> Vec<String> {
    vec![
        "/help".to_string(),
        "/backends".to_string(),
        "/backend mock".to_string(),
        "/backend model-a".to_string(),
        "/backend model-b".to_string(),
        "/theme graphite".to_string(),
        "/theme fjord".to_string(),
        "/theme ember".to_string(),
        "/clear".to_string(),
        "/quit".to_string(),
    ]
}
