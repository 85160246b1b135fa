use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::console::ConsoleSession;

use super::{ConsolePanel, MAX_SLASH_HINTS, SCROLL_PAGE_LINES};

impl ConsolePanel {
    pub(crate) fn handle_key(&mut self, session: &mut ConsoleSession, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit_current_line(session),
            KeyCode::Tab => self.complete_slash_hint(),
            KeyCode::BackTab => self.cycle_slash_hint(),
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.len(),
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            KeyCode::PageUp => self.scroll_up(SCROLL_PAGE_LINES, session),
            KeyCode::PageDown => self.scroll_down(SCROLL_PAGE_LINES, session),
            KeyCode::Esc => self.clear_input_buffer(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
            }
            _ => {}
        }
    }

    pub(crate) fn handle_paste_event(&mut self, raw: &str) {
        let normalized = if raw.contains('\r') {
            raw.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            raw.to_string()
        };
        if normalized.is_empty() {
            return;
        }
        self.insert_str(&normalized);
        self.last_status = format!("pasted {} chars", normalized.chars().count());
    }

    pub(super) fn clear_input_buffer(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.slash_hint_idx = 0;
        self.history_pos = None;
    }

    fn insert_char(&mut self, ch: char) {
        self.input.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.slash_hint_idx = 0;
    }

    pub(super) fn insert_str(&mut self, text: &str) {
        self.input.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.slash_hint_idx = 0;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.input, self.cursor);
        self.input.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        self.slash_hint_idx = 0;
    }

    fn delete_at_cursor(&mut self) {
        if self.cursor >= self.input.len() {
            return;
        }
        let next = next_char_boundary(&self.input, self.cursor);
        self.input.replace_range(self.cursor..next, "");
        self.slash_hint_idx = 0;
    }

    fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(&self.input, self.cursor);
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.input.len() {
            self.cursor = next_char_boundary(&self.input, self.cursor);
        }
    }

    /// Completion candidates while the composer starts with '/'.
    pub(super) fn slash_hints(&self) -> Vec<String> {
        if !self.input.starts_with('/') {
            return Vec::new();
        }
        let query = self.input.trim();
        let mut matches: Vec<String> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(query))
            .cloned()
            .collect();
        if matches.is_empty() && query == "/" {
            matches = self.commands.clone();
        }
        matches.into_iter().take(MAX_SLASH_HINTS).collect()
    }

    fn complete_slash_hint(&mut self) {
        let hints = self.slash_hints();
        let Some(hint) = hints.get(self.slash_hint_idx.min(hints.len().saturating_sub(1))) else {
            return;
        };
        self.input = hint.clone();
        self.cursor = self.input.len();
        self.slash_hint_idx = 0;
    }

    fn cycle_slash_hint(&mut self) {
        let count = self.slash_hints().len();
        if count > 0 {
            self.slash_hint_idx = (self.slash_hint_idx + 1) % count;
        }
    }

    fn recall_older(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next_pos = match self.history_pos {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(pos) => pos - 1,
        };
        self.history_pos = Some(next_pos);
        self.input = self.history[next_pos].clone();
        self.cursor = self.input.len();
    }

    fn recall_newer(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            self.input = self.history[pos + 1].clone();
        } else {
            self.history_pos = None;
            self.input.clear();
        }
        self.cursor = self.input.len();
    }
}

fn prev_char_boundary(text: &str, idx: usize) -> usize {
    let mut i = idx.saturating_sub(1);
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(text: &str, idx: usize) -> usize {
    let mut i = idx + 1;
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i.min(text.len())
}
