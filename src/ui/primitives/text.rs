use std::fmt;

use crate::ui::theme::{Palette, Tone};

/// Text with an optional semantic tone, rendered against a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    tone: Option<Tone>,
    bold: bool,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            bold: false,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn render(&self, palette: &Palette) -> String {
        let colored = match self.tone {
            Some(tone) => palette.paint(&self.text, tone),
            None => self.text.clone(),
        };
        if self.bold {
            return palette.bold(&colored);
        }
        colored
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_color_returns_plain_text() {
        let t = StyledText::toned("ok", Tone::Success).bold();
        assert_eq!(t.render(&Palette::plain()), "ok");
    }

    #[test]
    fn render_with_color_includes_ansi_escape() {
        let t = StyledText::toned("no", Tone::Failure);
        assert!(t.render(&Palette::new(true)).contains("\u{1b}["));
    }

    #[test]
    fn untoned_text_is_left_alone_unless_bold() {
        let palette = Palette::new(true);
        assert_eq!(StyledText::plain("x").render(&palette), "x");
        assert_ne!(StyledText::plain("x").bold().render(&palette), "x");
    }
}
