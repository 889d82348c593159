//! A block of terminal rows repainted in place.

use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};

#[derive(Debug, Default)]
pub struct LiveRegion {
    last_lines: usize,
    cursor_hidden: bool,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows painted by the last update.
    pub fn height(&self) -> usize {
        self.last_lines
    }

    /// Replace the previously painted rows with `content`.
    pub fn update(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        let mut content = content.to_string();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }

        if !self.cursor_hidden {
            out.queue(cursor::Hide)?;
            self.cursor_hidden = true;
        }

        let lines_to_clear = self.last_lines.min(u16::MAX as usize) as u16;
        if lines_to_clear > 0 {
            out.queue(cursor::MoveUp(lines_to_clear))?;
            out.queue(cursor::MoveToColumn(0))?;
            out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }

        out.write_all(content.as_bytes())?;
        out.flush()?;

        self.last_lines = content.chars().filter(|&c| c == '\n').count();
        Ok(())
    }

    /// Paint `content` one last time and leave it on screen.
    pub fn finish(&mut self, out: &mut impl Write, content: &str) -> io::Result<()> {
        self.update(out, content)?;
        self.last_lines = 0;
        self.restore_cursor(out)
    }

    fn restore_cursor(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.cursor_hidden {
            out.queue(cursor::Show)?;
            out.flush()?;
            self.cursor_hidden = false;
        }
        Ok(())
    }
}
