//! Frame rendering for a process tree.
//!
//! One pass derives displayed statuses, counts completions, then walks the
//! derived view and writes each node's rows to the sink. Everything the pass
//! needs (palette, glyph set, clock reading, spinner tick) is passed in, so
//! the same snapshot always renders to the same bytes.

use std::convert::Infallible;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{ProcTreeError, ProcTreeResult};
use crate::tree::{walk, DerivedNode, TaskStatus, TreeModel};
use crate::ui::layout::{fit_to_width, pad_left, sanitize, truncate_to_width, visible_width, Line};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::StyledText;
use crate::ui::theme::{Palette, Tone};
use crate::ui::widgets::spinner::Spinner;

pub const DEFAULT_LOG_TAIL: usize = 5;
pub const DEFAULT_INDENT: usize = 4;

const CANCEL_HINT: &str = "ctrl+c to cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub palette: Palette,
    pub unicode: bool,
    /// Log lines shown under an unfinished or failed node.
    pub log_tail: usize,
    /// Columns per depth level.
    pub indent: usize,
    pub spinner: Spinner,
}

impl RenderOptions {
    /// ASCII glyphs and no escape sequences.
    pub fn plain() -> Self {
        Self {
            palette: Palette::plain(),
            unicode: false,
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            unicode: true,
            log_tail: DEFAULT_LOG_TAIL,
            indent: DEFAULT_INDENT,
            spinner: Spinner::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render one frame of `model` as seen at `now` into `out`.
    ///
    /// Returns the elapsed-column width this frame used, which the caller
    /// records so later frames never shrink the column.
    pub fn render_into(
        &self,
        model: &TreeModel,
        width: usize,
        now: Instant,
        out: &mut impl fmt::Write,
    ) -> ProcTreeResult<usize> {
        let forest = model.derive();

        let mut finished = 0;
        let mut elapsed_width = model.elapsed_width();
        let counted = walk(&forest, |view: &DerivedNode<'_>, _| {
            if view.status.is_finished() {
                finished += 1;
            }
            elapsed_width = elapsed_width.max(visible_width(&format_elapsed(view.node.elapsed(now))));
            Ok::<_, Infallible>(())
        });
        if let Err(err) = counted {
            match err.source {}
        }

        if !model.verb().is_empty() {
            let title = format!(
                "{} {} ({}/{})",
                model.verb(),
                format_elapsed(now.saturating_duration_since(model.started_at())),
                finished,
                model.expected_total()
            );
            let title = StyledText::plain(truncate_to_width(&title, width)).bold();
            writeln!(out, "{}", title.render(&self.options.palette)).map_err(|e| sink_failed(0, e))?;
        }

        let frame = Frame {
            options: &self.options,
            width,
            elapsed_width,
            tick: model.tick(),
            now,
        };
        let visited = walk(&forest, |view: &DerivedNode<'_>, depth| {
            for line in frame.node_lines(view, depth) {
                frame.emit(&line, &mut *out)?;
            }
            Ok::<_, fmt::Error>(())
        })?;

        // Finished or quitting frames carry no hint.
        let done = forest.iter().all(|root| root.status.is_finished());
        if !done && !model.is_cancelled() {
            let hint = self.options.palette.paint(&truncate_to_width(CANCEL_HINT, width), Tone::Dim);
            writeln!(out, "{hint}").map_err(|e| sink_failed(visited, e))?;
        }

        Ok(elapsed_width)
    }
}

fn sink_failed(visited: usize, err: fmt::Error) -> ProcTreeError {
    ProcTreeError::TraversalAborted {
        visited,
        reason: err.to_string(),
    }
}

/// Per-frame constants shared by every row.
struct Frame<'a> {
    options: &'a RenderOptions,
    width: usize,
    elapsed_width: usize,
    tick: u64,
    now: Instant,
}

impl Frame<'_> {
    fn emit(&self, line: &Line, out: &mut impl fmt::Write) -> fmt::Result {
        let indent = line.depth * self.options.indent;
        writeln!(out, "{:indent$}{}", "", line.text)
    }

    fn node_lines(&self, view: &DerivedNode<'_>, depth: usize) -> Vec<Line> {
        let mut lines = vec![Line::new(depth, self.row(view, depth))];

        if view.status != TaskStatus::Success {
            let available = self.width.saturating_sub((depth + 1) * self.options.indent);
            for log in view.node.log_tail(self.options.log_tail) {
                let text = sanitize(log);
                let text = truncate_to_width(&text, available);
                lines.push(Line::new(depth + 1, self.options.palette.paint(&text, Tone::Log)));
            }
        }

        lines
    }

    fn glyph(&self, status: TaskStatus) -> (String, Option<Tone>) {
        let unicode = self.options.unicode;
        match status {
            TaskStatus::Success => (Icon::Success.render(unicode).to_string(), Some(Icon::Success.tone())),
            TaskStatus::Failed | TaskStatus::FailedChild => {
                (Icon::Failure.render(unicode).to_string(), Some(Icon::Failure.tone()))
            }
            s if s.is_running_class() => (self.options.spinner.frame(self.tick, unicode), None),
            _ => {
                let blank = visible_width(Icon::Success.render(unicode));
                (" ".repeat(blank), None)
            }
        }
    }

    fn row(&self, view: &DerivedNode<'_>, depth: usize) -> String {
        let palette = &self.options.palette;
        let available = self.width.saturating_sub(depth * self.options.indent);

        let (glyph, glyph_tone) = self.glyph(view.status);
        let glyph_width = visible_width(&glyph);
        let left = format!("{glyph} {}", sanitize(view.node.left_text()));

        let right_text = sanitize(view.node.right_text()).into_owned();
        let right_tone = status_tone(view.status);
        let elapsed = format_elapsed(view.node.elapsed(self.now));
        let timer = format!(" [{}]", pad_left(&elapsed, self.elapsed_width));

        let key = view.node.key().as_str();
        let (right_text, timer) = if available >= visible_width(&right_text) + visible_width(&timer) + glyph_width {
            (right_text, timer)
        } else if available >= visible_width(&timer) + glyph_width {
            debug!(key, width = self.width, "row too narrow, dropping right text");
            (String::new(), timer)
        } else {
            debug!(key, width = self.width, "row too narrow, dropping timer");
            (String::new(), String::new())
        };
        let right_width = visible_width(&right_text) + visible_width(&timer);

        let fitted = fit_to_width(&left, available.saturating_sub(right_width));
        let left = match glyph_tone {
            Some(tone) if fitted.starts_with(glyph.as_str()) => {
                format!("{}{}", palette.paint(&glyph, tone), &fitted[glyph.len()..])
            }
            _ => fitted,
        };

        let right_text = match right_tone {
            Some(tone) => StyledText::toned(right_text, tone),
            None => StyledText::plain(right_text),
        };
        format!(
            "{left}{}{}",
            right_text.render(palette),
            palette.paint(&timer, Tone::Dim)
        )
    }
}

fn status_tone(status: TaskStatus) -> Option<Tone> {
    match status {
        TaskStatus::Success => Some(Tone::Success),
        TaskStatus::Failed | TaskStatus::FailedChild => Some(Tone::Failure),
        s if s.is_running_class() => Some(Tone::Running),
        _ => None,
    }
}

/// `m:ss` below an hour, `h:mm:ss` from then on.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
