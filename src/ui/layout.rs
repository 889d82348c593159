//! Width-aware helpers for fitting text into terminal columns.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One output row: an indentation depth plus already-styled text.
///
/// Indentation is applied once, when the frame is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// Display width of `s`, ignoring ANSI escape sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // ESC [ ... <final>
            if matches!(chars.peek(), Some('[') | Some(']')) {
                let _ = chars.next();
            }
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    Cow::Owned(out)
}

/// Cut plain text so it occupies at most `width` columns.
///
/// Wide characters that would straddle the limit are dropped whole.
pub fn truncate_to_width(s: &str, width: usize) -> Cow<'_, str> {
    if s.width() <= width {
        return Cow::Borrowed(s);
    }

    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    Cow::Owned(out)
}

/// Truncate or right-pad plain text to exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let pad = width.saturating_sub(cut.width());
    let mut out = String::with_capacity(cut.len() + pad);
    out.push_str(&cut);
    out.push_str(&" ".repeat(pad));
    out
}

/// Left-pad plain text to `width` columns (right alignment).
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(pad), s)
}

/// Single-row text: tabs become spaces, other control characters are removed.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    let stripped = strip_ansi(s);
    if !stripped.chars().any(|c| c.is_control()) {
        return stripped;
    }
    Cow::Owned(
        stripped
            .chars()
            .filter_map(|c| match c {
                '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_ignores_ansi_sequences() {
        assert_eq!(visible_width("\u{1b}[32mok\u{1b}[0m"), 2);
    }

    #[test]
    fn truncate_respects_wide_characters() {
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn fit_pads_and_truncates_to_exact_width() {
        assert_eq!(fit_to_width("abc", 5), "abc  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
        assert_eq!(fit_to_width("abc", 0), "");
    }

    #[test]
    fn pad_left_right_aligns() {
        assert_eq!(pad_left("0:02", 7), "   0:02");
        assert_eq!(pad_left("10:02", 3), "10:02");
    }

    #[test]
    fn sanitize_removes_control_characters() {
        assert_eq!(sanitize("a\tb\rc\u{1b}[1md"), "a bcd");
        assert!(matches!(sanitize("plain"), Cow::Borrowed(_)));
    }
}
