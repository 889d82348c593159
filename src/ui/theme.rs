use crossterm::style::{Color, Stylize};

/// Design tokens for the process tree.
///
/// All colors and glyphs used by the renderer are sourced from this module.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const FAILURE: Color = Color::Red;
    pub const RUNNING: Color = Color::Blue;
    /// Rolling log lines.
    pub const LOG: Color = Color::Grey;
    /// Timers and hints.
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[+]";
    pub const FAILURE: &str = "<!>";
}

/// Semantic role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    Running,
    Log,
    Dim,
}

/// Colors the renderer paints with, passed explicitly into every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
    pub success: Color,
    pub failure: Color,
    pub running: Color,
    pub log: Color,
    pub dim: Color,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            success: colors::SUCCESS,
            failure: colors::FAILURE,
            running: colors::RUNNING,
            log: colors::LOG,
            dim: colors::DIM,
        }
    }

    /// No escape sequences at all.
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Failure => self.failure,
            Tone::Running => self.running,
            Tone::Log => self.log,
            Tone::Dim => self.dim,
        }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        format!("{}", text.with(self.color(tone)))
    }

    pub fn bold(&self, text: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        format!("{}", text.bold())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}
