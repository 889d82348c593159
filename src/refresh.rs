//! The ticker thread that keeps a process tree on screen.
//!
//! Each tick advances the spinner, renders one frame and repaints the live
//! region. A failed frame is logged and retried on the next tick; the work
//! being tracked is never affected.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::tree::ProcessTree;
use crate::ui::live_region::LiveRegion;
use crate::ui::terminal;

/// Terminal width or height at the moment a frame is rendered.
pub type SizeSource = Box<dyn Fn() -> u16 + Send>;

pub struct RefreshOptions {
    pub interval: Duration,
    /// Repaint in place every tick. When off, only the final frame is written.
    pub animate: bool,
    pub width: SizeSource,
    /// Live frames are cut to the bottom `height - 1` rows so the cursor can
    /// always climb back over them.
    pub height: SizeSource,
}

impl RefreshOptions {
    pub fn fixed_width(mut self, width: u16) -> Self {
        self.width = Box::new(move || width);
        self
    }

    pub fn fixed_height(mut self, height: u16) -> Self {
        self.height = Box::new(move || height);
        self
    }
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            animate: true,
            width: Box::new(terminal::current_width),
            height: Box::new(terminal::current_height),
        }
    }
}

impl fmt::Debug for RefreshOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshOptions")
            .field("interval", &self.interval)
            .field("animate", &self.animate)
            .finish_non_exhaustive()
    }
}

pub struct RefreshLoop;

impl RefreshLoop {
    /// Start painting `tree` to `writer` on a dedicated thread.
    pub fn spawn<W>(tree: ProcessTree, options: RefreshOptions, writer: W) -> io::Result<RefreshHandle<W>>
    where
        W: Write + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = {
            let tree = tree.clone();
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("proctree-refresh".to_string())
                .spawn(move || run(tree, options, writer, &stop))?
        };

        Ok(RefreshHandle {
            tree,
            stop,
            thread: Some(thread),
        })
    }
}

pub struct RefreshHandle<W> {
    tree: ProcessTree,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<W>>,
}

impl<W> RefreshHandle<W> {
    /// Paint the final frame now instead of waiting for the tree to finish.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.tree.wake();
    }

    /// Wait for the final frame and get the writer back.
    pub fn join(mut self) -> io::Result<W> {
        let thread = self
            .thread
            .take()
            .ok_or_else(|| io::Error::other("refresh thread already joined"))?;
        thread
            .join()
            .map_err(|_| io::Error::other("refresh thread panicked"))
    }
}

impl<W> Drop for RefreshHandle<W> {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.stop();
            let _ = thread.join();
        }
    }
}

fn run<W: Write>(tree: ProcessTree, options: RefreshOptions, mut writer: W, stop: &AtomicBool) -> W {
    let mut region = LiveRegion::new();
    debug!(animate = options.animate, interval_ms = options.interval.as_millis() as u64, "refresh loop started");

    loop {
        let last = stop.load(Ordering::Acquire) || tree.is_done();
        if options.animate {
            tree.tick();
        }

        if options.animate || last {
            let width = (options.width)();
            let mut frame = String::new();
            match tree.render_into(width, &mut frame) {
                Ok(()) => {
                    let painted = match (options.animate, last) {
                        (true, false) => {
                            let rows = usize::from((options.height)().saturating_sub(1)).max(1);
                            region.update(&mut writer, bottom_rows(&frame, rows))
                        }
                        (true, true) => region.finish(&mut writer, &frame),
                        (false, _) => writer.write_all(frame.as_bytes()).and_then(|()| writer.flush()),
                    };
                    if let Err(err) = painted {
                        warn!(error = %err, "failed to repaint process tree");
                    }
                }
                Err(err) => warn!(error = %err, "failed to render process tree frame"),
            }
        }

        if last {
            break;
        }
        tree.park(options.interval, stop);
    }

    debug!("refresh loop finished");
    writer
}

/// The last `rows` lines of `frame`.
fn bottom_rows(frame: &str, rows: usize) -> &str {
    let body = frame.strip_suffix('\n').unwrap_or(frame);
    match rows.checked_sub(1).and_then(|skip| body.rmatch_indices('\n').nth(skip)) {
        Some((at, _)) => &frame[at + 1..],
        None => frame,
    }
}
