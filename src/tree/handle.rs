//! Shared handle to a process tree.
//!
//! Every worker, the refresh loop and the cancel handler hold a clone of the
//! same [`ProcessTree`]. One lock covers the whole forest, so a render always
//! reads a consistent snapshot and a status change is never half-visible.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::aggregate::DerivedNode;
use super::clock::{Clock, SystemClock};
use super::model::TreeModel;
use super::node::TaskDescriptor;
use super::status::{Progress, TaskStatus};
use super::traverse::walk;
use crate::error::ProcTreeResult;
use crate::ui::render::{RenderOptions, Renderer};

/// How a blocking wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Done,
    Cancelled,
    TimedOut,
}

#[derive(Clone)]
pub struct ProcessTree {
    shared: Arc<Shared>,
}

struct Shared {
    model: Mutex<TreeModel>,
    changed: Condvar,
    clock: Arc<dyn Clock>,
    renderer: Mutex<Renderer>,
}

impl fmt::Debug for ProcessTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.shared.model.lock();
        f.debug_struct("ProcessTree")
            .field("verb", &model.verb())
            .field("nodes", &model.node_count())
            .field("cancelled", &model.is_cancelled())
            .finish()
    }
}

impl ProcessTree {
    pub fn new(verb: impl Into<String>, expected_total: usize, roots: Vec<TaskDescriptor>) -> ProcTreeResult<Self> {
        Self::with_clock(verb, expected_total, roots, Arc::new(SystemClock))
    }

    pub fn with_clock(
        verb: impl Into<String>,
        expected_total: usize,
        roots: Vec<TaskDescriptor>,
        clock: Arc<dyn Clock>,
    ) -> ProcTreeResult<Self> {
        let model = TreeModel::new(verb, expected_total, roots, clock.now())?;
        Ok(Self {
            shared: Arc::new(Shared {
                model: Mutex::new(model),
                changed: Condvar::new(),
                clock,
                renderer: Mutex::new(Renderer::default()),
            }),
        })
    }

    pub fn with_render_options(self, options: RenderOptions) -> Self {
        self.set_render_options(options);
        self
    }

    pub fn set_render_options(&self, options: RenderOptions) {
        *self.shared.renderer.lock() = Renderer::new(options);
    }

    pub fn now(&self) -> Instant {
        self.shared.clock.now()
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut TreeModel, Instant) -> ProcTreeResult<T>) -> ProcTreeResult<T> {
        let now = self.shared.clock.now();
        let mut model = self.shared.model.lock();
        let out = f(&mut model, now)?;
        drop(model);
        self.shared.changed.notify_all();
        Ok(out)
    }

    /// Report progress for a task. Returns `false` when the status was already set.
    pub fn update_status(&self, key: &str, progress: Progress) -> ProcTreeResult<bool> {
        self.mutate(|model, now| model.update_status(key, progress, now))
    }

    pub fn append_log(&self, key: &str, text: &str) -> ProcTreeResult<()> {
        self.mutate(|model, _| model.append_log(key, text))
    }

    pub fn set_left_text(&self, key: &str, text: impl Into<String>) -> ProcTreeResult<()> {
        self.mutate(|model, _| model.set_left_text(key, text))
    }

    pub fn set_right_text(&self, key: &str, text: impl Into<String>) -> ProcTreeResult<()> {
        self.mutate(|model, _| model.set_right_text(key, text))
    }

    pub fn add_child(&self, parent: &str, descriptor: TaskDescriptor) -> ProcTreeResult<()> {
        self.mutate(|model, now| model.add_child(parent, descriptor, now))
    }

    /// Ask everyone to stop. Workers see it through [`ProcessTree::is_cancelled`].
    pub fn cancel(&self) {
        self.shared.model.lock().cancel();
        self.shared.changed.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.model.lock().is_cancelled()
    }

    /// Advance the spinner by one frame.
    pub fn tick(&self) -> u64 {
        self.shared.model.lock().advance_tick()
    }

    pub fn status_of(&self, key: &str) -> Option<TaskStatus> {
        self.shared.model.lock().node(key).map(|node| node.status())
    }

    pub fn displayed_status_of(&self, key: &str) -> Option<TaskStatus> {
        self.shared.model.lock().displayed_status(key)
    }

    pub fn finished_count(&self) -> usize {
        self.shared.model.lock().finished_count()
    }

    pub fn is_done(&self) -> bool {
        self.shared.model.lock().is_done()
    }

    /// A detached copy of the current state.
    pub fn snapshot(&self) -> TreeModel {
        self.shared.model.lock().clone()
    }

    /// Walk the displayed view of the forest in pre-order under the lock.
    pub fn walk<E, F>(&self, visit: F) -> ProcTreeResult<usize>
    where
        E: fmt::Display,
        F: FnMut(&DerivedNode<'_>, usize) -> Result<(), E>,
    {
        let model = self.shared.model.lock();
        let forest = model.derive();
        Ok(walk(&forest, visit)?)
    }

    /// Render one frame for a terminal `width` columns wide.
    pub fn render(&self, width: u16) -> ProcTreeResult<String> {
        let mut out = String::new();
        self.render_into(width, &mut out)?;
        Ok(out)
    }

    pub fn render_into(&self, width: u16, out: &mut impl fmt::Write) -> ProcTreeResult<()> {
        let renderer = *self.shared.renderer.lock();
        let now = self.shared.clock.now();
        let mut model = self.shared.model.lock();
        let elapsed_width = renderer.render_into(&model, usize::from(width), now, out)?;
        model.record_elapsed_width(elapsed_width);
        Ok(())
    }

    /// Block until every root is finished or the tree is cancelled.
    pub fn wait(&self) -> WaitOutcome {
        let mut model = self.shared.model.lock();
        loop {
            if let Some(outcome) = settled(&model) {
                return outcome;
            }
            self.shared.changed.wait(&mut model);
        }
    }

    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome {
        let deadline = Instant::now() + timeout;
        let mut model = self.shared.model.lock();
        loop {
            if let Some(outcome) = settled(&model) {
                return outcome;
            }
            if self.shared.changed.wait_until(&mut model, deadline).timed_out() {
                return settled(&model).unwrap_or(WaitOutcome::TimedOut);
            }
        }
    }

    /// Sleep for up to `timeout`, waking early on cancellation. Returns whether
    /// the tree is cancelled.
    pub fn sleep_unless_cancelled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut model = self.shared.model.lock();
        while !model.is_cancelled() {
            if self.shared.changed.wait_until(&mut model, deadline).timed_out() {
                break;
            }
        }
        model.is_cancelled()
    }

    /// Sleep for up to `timeout`, returning early once the tree is done or
    /// `stop` is raised.
    pub(crate) fn park(&self, timeout: Duration, stop: &AtomicBool) {
        let deadline = Instant::now() + timeout;
        let mut model = self.shared.model.lock();
        while !model.is_done() && !stop.load(Ordering::Acquire) {
            if self.shared.changed.wait_until(&mut model, deadline).timed_out() {
                break;
            }
        }
    }

    pub(crate) fn wake(&self) {
        let _model = self.shared.model.lock();
        self.shared.changed.notify_all();
    }
}

fn settled(model: &TreeModel) -> Option<WaitOutcome> {
    if model.is_done() {
        Some(WaitOutcome::Done)
    } else if model.is_cancelled() {
        Some(WaitOutcome::Cancelled)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ManualClock;
    use std::thread;

    fn tree() -> ProcessTree {
        ProcessTree::new(
            "testing",
            2,
            vec![TaskDescriptor::new("a", "A"), TaskDescriptor::new("b", "B")],
        )
        .unwrap()
    }

    #[test]
    fn clones_share_state() {
        let t = tree();
        let other = t.clone();
        other.update_status("a", Progress::Running).unwrap();
        assert_eq!(t.status_of("a"), Some(TaskStatus::Running));
    }

    #[test]
    fn repeated_status_is_a_no_op() {
        let t = tree();
        assert!(t.update_status("a", Progress::Running).unwrap());
        assert!(!t.update_status("a", Progress::Running).unwrap());
    }

    #[test]
    fn wait_returns_done_once_roots_finish() {
        let t = tree();
        let worker = {
            let t = t.clone();
            thread::spawn(move || {
                for key in ["a", "b"] {
                    t.update_status(key, Progress::Running).unwrap();
                    t.update_status(key, Progress::Success).unwrap();
                }
            })
        };
        assert_eq!(t.wait(), WaitOutcome::Done);
        worker.join().unwrap();
        assert_eq!(t.finished_count(), 2);
    }

    #[test]
    fn wait_returns_cancelled_after_cancel() {
        let t = tree();
        let canceller = {
            let t = t.clone();
            thread::spawn(move || t.cancel())
        };
        assert_eq!(t.wait(), WaitOutcome::Cancelled);
        canceller.join().unwrap();
        assert!(t.is_cancelled());
    }

    #[test]
    fn wait_timeout_expires_when_nothing_happens() {
        let t = tree();
        assert_eq!(t.wait_timeout(Duration::from_millis(10)), WaitOutcome::TimedOut);
    }

    #[test]
    fn sleep_unless_cancelled_wakes_on_cancel() {
        let t = tree();
        t.cancel();
        assert!(t.sleep_unless_cancelled(Duration::from_secs(5)));
    }

    #[test]
    fn walk_sees_displayed_status() {
        let t = ProcessTree::new(
            "x",
            2,
            vec![TaskDescriptor::new("p", "P").with_child(TaskDescriptor::new("c", "C"))],
        )
        .unwrap();
        t.update_status("c", Progress::Running).unwrap();

        let mut seen = Vec::new();
        let visited = t
            .walk(|view, depth| {
                seen.push((view.node.key().to_string(), view.status, depth));
                Ok::<_, std::convert::Infallible>(())
            })
            .unwrap();
        assert_eq!(visited, 2);
        assert_eq!(
            seen,
            vec![
                ("p".to_string(), TaskStatus::RunningChild, 0),
                ("c".to_string(), TaskStatus::Running, 1),
            ]
        );
    }

    #[test]
    fn manual_clock_drives_elapsed_time() {
        let clock = ManualClock::new();
        let t = ProcessTree::with_clock("x", 1, vec![TaskDescriptor::new("a", "A")], Arc::new(clock.clone()))
            .unwrap();
        t.update_status("a", Progress::Running).unwrap();
        clock.advance(Duration::from_secs(5));
        let snapshot = t.snapshot();
        let node = snapshot.node("a").unwrap();
        assert_eq!(node.elapsed(t.now()), Duration::from_secs(5));
    }
}
