//! Site styling.
//!
//! Maps document tones and chrome (header, drawer, status bar) to ratatui
//! styles. With colors disabled only modifiers remain, so focus and the
//! active section stay distinguishable.

use crate::view_state::Tone;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether colors may be used.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SiteStyles =====

/// Brand navy used for headings and the header.
const NAVY: Color = Color::Rgb(0x1e, 0x3a, 0x5f);
/// Accent used for the call-to-action and the active section.
const GOLD: Color = Color::Rgb(0xc8, 0x9b, 0x3c);

/// Styles for every element the terminal host draws.
#[derive(Debug, Clone, Copy)]
pub struct SiteStyles {
    colors: bool,
}

impl SiteStyles {
    /// Styles honoring `config`.
    pub fn new(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Style for a document line.
    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Title => self.fg(NAVY).add_modifier(Modifier::BOLD),
            Tone::Heading => self.fg(NAVY).add_modifier(Modifier::BOLD),
            Tone::Kicker => self.fg(GOLD).add_modifier(Modifier::ITALIC),
            Tone::Body => Style::default(),
            Tone::Muted => self.fg(Color::DarkGray),
            Tone::Accent => self.fg(GOLD).add_modifier(Modifier::BOLD),
            Tone::Frame => self.fg(Color::Gray),
        }
    }

    /// Logo text.
    pub fn brand(&self) -> Style {
        self.fg(NAVY).add_modifier(Modifier::BOLD)
    }

    /// Header border; the scrolled mobile header is drawn elevated.
    pub fn header_border(&self, scrolled: bool) -> Style {
        if scrolled {
            self.fg(NAVY).add_modifier(Modifier::BOLD)
        } else {
            self.fg(Color::Gray)
        }
    }

    /// Plain menu entry.
    pub fn menu_item(&self) -> Style {
        Style::default()
    }

    /// Call-to-action link.
    pub fn cta(&self) -> Style {
        self.fg(GOLD).add_modifier(Modifier::BOLD)
    }

    /// Keyboard-focused menu entry.
    pub fn focused(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Highlighted entry of the services navigation.
    pub fn active_section(&self) -> Style {
        self.fg(GOLD).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Dimmed backdrop behind the open drawer.
    pub fn overlay(&self) -> Style {
        if self.colors {
            Style::default().bg(Color::Black).fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    }

    /// Bottom status bar.
    pub fn status(&self) -> Style {
        if self.colors {
            Style::default().bg(NAVY).fg(Color::White)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }
}

impl Default for SiteStyles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}
