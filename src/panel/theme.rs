use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ThemePreset {
    Graphite,
    Fjord,
    Ember,
}

impl ThemePreset {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ThemePreset::Graphite => "graphite",
            ThemePreset::Fjord => "fjord",
            ThemePreset::Ember => "ember",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "graphite" | "slate" | "gray" => Some(ThemePreset::Graphite),
            "fjord" | "nord" | "blue" => Some(ThemePreset::Fjord),
            "ember" | "warm" | "copper" => Some(ThemePreset::Ember),
            _ => None,
        }
    }

    pub(crate) fn all() -> [ThemePreset; 3] {
        [ThemePreset::Graphite, ThemePreset::Fjord, ThemePreset::Ember]
    }

    pub(crate) fn palette(self) -> ThemePalette {
        match self {
            ThemePreset::Graphite => ThemePalette {
                prompt: Color::Rgb(100, 150, 200),
                input_text: Color::Rgb(180, 200, 220),
                muted_text: Color::Rgb(80, 100, 120),
                highlight_fg: Color::Rgb(200, 220, 240),
                highlight_bg: Color::Rgb(40, 60, 80),
                status_text: Color::Rgb(90, 110, 130),
                user_fg: Color::Rgb(200, 220, 240),
                user_bg: Color::Rgb(25, 35, 45),
                mock_label: Color::Rgb(120, 190, 140),
                model_label: Color::Rgb(65, 105, 225),
                assistant_text: Color::Rgb(170, 190, 210),
                system_text: Color::Rgb(100, 120, 140),
                banner_title: Color::Rgb(150, 170, 190),
                panel_bg: Color::Rgb(10, 20, 30),
                panel_fg: Color::Rgb(170, 190, 210),
            },
            ThemePreset::Fjord => ThemePalette {
                prompt: Color::Rgb(192, 192, 192),
                input_text: Color::Rgb(224, 224, 224),
                muted_text: Color::Rgb(128, 128, 128),
                highlight_fg: Color::Rgb(255, 255, 255),
                highlight_bg: Color::Rgb(64, 64, 64),
                status_text: Color::Rgb(140, 140, 140),
                user_fg: Color::Rgb(255, 255, 255),
                user_bg: Color::Rgb(25, 25, 25),
                mock_label: Color::Rgb(150, 200, 150),
                model_label: Color::Rgb(255, 127, 80),
                assistant_text: Color::Rgb(210, 210, 210),
                system_text: Color::Rgb(160, 160, 160),
                banner_title: Color::Rgb(200, 200, 200),
                panel_bg: Color::Rgb(10, 10, 10),
                panel_fg: Color::Rgb(210, 210, 210),
            },
            ThemePreset::Ember => ThemePalette {
                prompt: Color::Rgb(204, 204, 204),
                input_text: Color::Rgb(238, 238, 238),
                muted_text: Color::Rgb(153, 153, 153),
                highlight_fg: Color::Rgb(255, 255, 255),
                highlight_bg: Color::Rgb(64, 64, 64),
                status_text: Color::Rgb(170, 170, 170),
                user_fg: Color::Rgb(255, 255, 255),
                user_bg: Color::Rgb(26, 26, 26),
                mock_label: Color::Rgb(180, 210, 150),
                model_label: Color::Rgb(230, 150, 90),
                assistant_text: Color::Rgb(220, 220, 220),
                system_text: Color::Rgb(170, 170, 170),
                banner_title: Color::Rgb(210, 210, 210),
                panel_bg: Color::Rgb(12, 12, 12),
                panel_fg: Color::Rgb(220, 220, 220),
            },
        }
    }
}

pub(crate) fn default_theme() -> ThemePreset {
    ThemePreset::Graphite
}

#[derive(Clone, Copy)]
pub(crate) struct ThemePalette {
    pub(crate) prompt: Color,
    pub(crate) input_text: Color,
    pub(crate) muted_text: Color,
    pub(crate) highlight_fg: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) status_text: Color,
    pub(crate) user_fg: Color,
    pub(crate) user_bg: Color,
    pub(crate) mock_label: Color,
    pub(crate) model_label: Color,
    pub(crate) assistant_text: Color,
    pub(crate) system_text: Color,
    pub(crate) banner_title: Color,
    pub(crate) panel_bg: Color,
    pub(crate) panel_fg: Color,
}

impl ThemePalette {
    pub(crate) fn prompt_style(self) -> Style {
        Style::default()
            .fg(self.prompt)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn title_style(self) -> Style {
        Style::default()
            .fg(self.banner_title)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn body_style(self) -> Style {
        Style::default().fg(self.assistant_text)
    }

    pub(crate) fn secondary_style(self) -> Style {
        Style::default().fg(self.system_text)
    }

    pub(crate) fn muted_style(self) -> Style {
        Style::default().fg(self.muted_text)
    }

    pub(crate) fn status_style(self) -> Style {
        Style::default().fg(self.status_text)
    }

    pub(crate) fn panel_surface_style(self) -> Style {
        Style::default().bg(self.panel_bg).fg(self.panel_fg)
    }

    pub(crate) fn panel_border_style(self) -> Style {
        Style::default().fg(self.highlight_bg)
    }

    pub(crate) fn input_surface_style(self) -> Style {
        Style::default().fg(self.input_text)
    }

    pub(crate) fn hint_selected_style(self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}
