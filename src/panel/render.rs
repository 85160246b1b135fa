use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::console::{BackendId, ConsoleSession, Message, Role};
use crate::input_cursor_position;

use super::theme::ThemePalette;
use super::ConsolePanel;

pub(super) const PROMPT_PREFIX: &str = "> ";
pub(super) const HINT_ROW_HEIGHT: u16 = 3;
pub(super) const STATUS_ROW_HEIGHT: u16 = 3;

const PANEL_PADDING_X: u16 = 1;
const PANEL_HORIZONTAL_INSET: u16 = 2 + PANEL_PADDING_X * 2;

fn panel_block(theme: ThemePalette, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.panel_border_style())
        .padding(Padding::horizontal(PANEL_PADDING_X))
        .title(Span::styled(title, theme.secondary_style()))
}

fn backend_label_style(theme: ThemePalette, backend: Option<BackendId>) -> Style {
    let color = match backend {
        Some(BackendId::Mock) => theme.mock_label,
        Some(BackendId::ModelA) | Some(BackendId::ModelB) => theme.model_label,
        None => theme.system_text,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn push_system_lines(lines: &mut Vec<Line<'static>>, text: &str, style: Style) {
    let mut parts = text.split('\n');
    let first = parts.next().unwrap_or_default();
    let first_content = if first.is_empty() { " " } else { first };
    lines.push(Line::from(Span::styled(
        format!("[sys] {first_content}"),
        style,
    )));
    for part in parts {
        let content = if part.is_empty() { " " } else { part };
        lines.push(Line::from(Span::styled(format!("      {content}"), style)));
    }
}

fn push_message_lines(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    theme: ThemePalette,
    label: &str,
) {
    match message.role {
        Role::User => {
            let style = Style::default()
                .fg(theme.user_fg)
                .bg(theme.user_bg)
                .add_modifier(Modifier::BOLD);
            for part in message.text.split('\n') {
                let content = if part.is_empty() { " " } else { part };
                lines.push(Line::from(Span::styled(format!(" {content} "), style)));
            }
        }
        Role::Assistant => {
            lines.push(Line::from(Span::styled(
                format!("[{label}]"),
                backend_label_style(theme, message.backend),
            )));
            for part in message.text.split('\n') {
                let content = if part.is_empty() { " " } else { part };
                lines.push(Line::from(Span::styled(
                    content.to_string(),
                    theme.body_style(),
                )));
            }
        }
        Role::System => push_system_lines(lines, &message.text, theme.secondary_style()),
    }
    lines.push(Line::from(""));
}

/// Startup banner drawn above the transcript. Never stored in the transcript,
/// so it does not consume sequence numbers.
fn banner_lines(session: &ConsoleSession, theme: ThemePalette) -> Vec<Line<'static>> {
    let backends = session
        .backends()
        .iter()
        .map(|b| b.id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    vec![
        Line::from(Span::styled(
            format!("Stormy Console {}", env!("CARGO_PKG_VERSION")),
            theme.title_style(),
        )),
        Line::from(Span::styled(
            format!(
                "backends: {} | selected: {}",
                backends,
                session.backend().id.as_str()
            ),
            theme.secondary_style(),
        )),
        Line::from(Span::styled(
            "keys: Enter send | Tab complete | PgUp/PgDn scroll | /help".to_string(),
            theme.muted_style(),
        )),
        Line::from(""),
    ]
}

pub(super) fn transcript_lines(panel: &ConsolePanel, session: &ConsoleSession) -> Vec<Line<'static>> {
    let theme = panel.theme_palette();
    let mut lines = banner_lines(session, theme);
    for message in session.transcript().all() {
        let label = message
            .backend
            .and_then(|id| session.backends().iter().find(|b| b.id == id).copied())
            .map(|b| b.display_name)
            .unwrap_or_else(|| message.role.as_str());
        push_message_lines(&mut lines, message, theme, label);
    }
    lines
}

fn build_input_lines(panel: &ConsolePanel, theme: ThemePalette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut parts = panel.input.split('\n');
    let first = parts.next().unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(PROMPT_PREFIX.to_string(), theme.prompt_style()),
        Span::styled(first.to_string(), theme.input_surface_style()),
    ]));
    for part in parts {
        lines.push(Line::from(Span::styled(
            part.to_string(),
            theme.input_surface_style(),
        )));
    }
    lines
}

fn build_hint_line(panel: &ConsolePanel, theme: ThemePalette) -> Line<'static> {
    let hints = panel.slash_hints();
    let mut spans = Vec::new();
    for (idx, hint) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ".to_string(), theme.muted_style()));
        }
        let style = if idx == panel.slash_hint_idx {
            theme.hint_selected_style()
        } else {
            theme.muted_style()
        };
        spans.push(Span::styled(hint.clone(), style));
    }
    Line::from(spans)
}

pub(super) fn draw(f: &mut Frame, panel: &ConsolePanel, session: &ConsoleSession) {
    let frame_area = f.area();
    let theme = panel.theme_palette();
    let prompt_width = UnicodeWidthStr::width(PROMPT_PREFIX) as u16;
    let composer_width = frame_area
        .width
        .saturating_sub(PANEL_HORIZONTAL_INSET)
        .max(1);

    let hints = panel.slash_hints();
    let hints_h = if hints.is_empty() { 0 } else { HINT_ROW_HEIGHT };
    let input_height = panel
        .input_height(composer_width, prompt_width)
        .saturating_add(2)
        .min(frame_area.height.saturating_sub(6).max(3));

    let mut constraints = vec![Constraint::Min(3), Constraint::Length(input_height)];
    if hints_h > 0 {
        constraints.push(Constraint::Length(hints_h));
    }
    constraints.push(Constraint::Length(STATUS_ROW_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame_area);

    let log_chunk = chunks[0];
    let input_chunk = chunks[1];
    let hint_chunk = if hints_h > 0 { Some(chunks[2]) } else { None };
    let status_chunk = chunks[chunks.len() - 1];

    // Transcript panel
    let log = Paragraph::new(Text::from(panel.cached_log_lines().to_vec()))
        .style(theme.panel_surface_style())
        .block(panel_block(theme, "console"))
        .wrap(Wrap { trim: false })
        .scroll((panel.scroll_offset(), 0));
    f.render_widget(log, log_chunk);

    // Composer
    let input = Paragraph::new(Text::from(build_input_lines(panel, theme)))
        .style(theme.input_surface_style())
        .block(panel_block(theme, "compose"))
        .wrap(Wrap { trim: false });
    f.render_widget(input, input_chunk);

    // Hints
    if let Some(area) = hint_chunk {
        let hint_panel = Paragraph::new(Text::from(vec![build_hint_line(panel, theme)]))
            .style(theme.panel_surface_style())
            .block(panel_block(theme, "suggestions"));
        f.render_widget(hint_panel, area);
    }

    // Cursor
    let content_width = input_chunk
        .width
        .saturating_sub(PANEL_HORIZONTAL_INSET)
        .max(1);
    let content_height = input_chunk.height.saturating_sub(2).max(1);
    let (cx, cy) = input_cursor_position(&panel.input, panel.cursor, content_width, prompt_width);
    let cursor_x = input_chunk.x + 1 + PANEL_PADDING_X + cx.min(content_width.saturating_sub(1));
    let cursor_y = input_chunk.y + 1 + cy.min(content_height.saturating_sub(1));
    f.set_cursor_position((cursor_x, cursor_y));

    // Status bar
    let backends = session
        .backends()
        .iter()
        .map(|b| b.id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let status = Paragraph::new(format!(
        "{} | backend: {} | {} | Ctrl+C exit",
        panel.last_status,
        session.backend().id.as_str(),
        backends,
    ))
    .style(theme.status_style())
    .block(panel_block(theme, "status"));
    f.render_widget(status, status_chunk);
}
