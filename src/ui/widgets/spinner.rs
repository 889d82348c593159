//! Spinner glyphs driven by the tree's global tick.
//!
//! The spinner holds no animation state of its own: the refresh loop advances
//! one counter and every running row samples it at render time.

use serde::{Deserialize, Serialize};

const SPINNER_FRAMES_BRAILLE: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAMES_DOTS: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const SPINNER_FRAMES_ARROW: &[char] = &['←', '↖', '↑', '↗', '→', '↘', '↓', '↙'];
const SPINNER_FRAMES_LINE: &[char] = &['─', '╲', '│', '╱'];
const SPINNER_FRAMES_ASCII: &[char] = &['-', '\\', '|', '/'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerStyle {
    #[default]
    Braille,
    Dots,
    Line,
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spinner {
    style: SpinnerStyle,
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        Self { style }
    }

    /// Glyph shown at `tick`. ASCII frames are bracketed so they line up with
    /// the three-column ASCII status icons.
    pub fn frame(&self, tick: u64, supports_unicode: bool) -> String {
        let frames = self.frames(supports_unicode);
        let frame = frames[(tick % frames.len() as u64) as usize];
        if supports_unicode {
            frame.to_string()
        } else {
            format!("({frame})")
        }
    }

    fn frames(&self, supports_unicode: bool) -> &'static [char] {
        if !supports_unicode {
            return SPINNER_FRAMES_ASCII;
        }

        match self.style {
            SpinnerStyle::Braille => SPINNER_FRAMES_BRAILLE,
            SpinnerStyle::Dots => SPINNER_FRAMES_DOTS,
            SpinnerStyle::Line => SPINNER_FRAMES_LINE,
            SpinnerStyle::Arrow => SPINNER_FRAMES_ARROW,
        }
    }
}
