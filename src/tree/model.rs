//! The forest and the bookkeeping around it.
//!
//! `TreeModel` is plain data with no locking of its own; [`ProcessTree`]
//! wraps it in the single tree-wide lock.
//!
//! [`ProcessTree`]: super::ProcessTree

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::time::Instant;

use tracing::{debug, trace};

use super::aggregate::{derive_forest, DerivedNode};
use super::node::{NodeKey, TaskDescriptor, TaskNode};
use super::status::{Progress, TaskStatus};
use super::traverse::walk;
use crate::error::{ProcTreeError, ProcTreeResult};

#[derive(Debug, Clone)]
pub struct TreeModel {
    verb: String,
    expected_total: usize,
    roots: Vec<TaskNode>,
    /// Child-index path from the forest down to each node.
    index: HashMap<NodeKey, Vec<usize>>,
    started_at: Instant,
    cancelled: bool,
    tick: u64,
    elapsed_width: usize,
}

impl TreeModel {
    pub fn new(
        verb: impl Into<String>,
        expected_total: usize,
        roots: Vec<TaskDescriptor>,
        now: Instant,
    ) -> ProcTreeResult<Self> {
        let mut model = Self {
            verb: verb.into(),
            expected_total,
            roots: Vec::with_capacity(roots.len()),
            index: HashMap::new(),
            started_at: now,
            cancelled: false,
            tick: 0,
            elapsed_width: 0,
        };

        for descriptor in roots {
            model.check_new_keys(&descriptor)?;
            let node = TaskNode::from_descriptor(descriptor, now);
            let path = vec![model.roots.len()];
            index_subtree(&mut model.index, &node, path);
            model.roots.push(node);
        }

        Ok(model)
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn expected_total(&self) -> usize {
        self.expected_total
    }

    pub fn roots(&self) -> &[TaskNode] {
        &self.roots
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Current spinner phase.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Widest elapsed-time text seen so far in this tree.
    pub fn elapsed_width(&self) -> usize {
        self.elapsed_width
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&TaskNode> {
        let path = self.index.get(key)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, key: &str) -> ProcTreeResult<&mut TaskNode> {
        let invalid = || ProcTreeError::InvalidNodeKey {
            key: NodeKey::from(key),
        };
        let path = self.index.get(key).ok_or_else(invalid)?;
        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.roots.get_mut(*first).ok_or_else(invalid)?;
        for &i in rest {
            node = node.child_mut(i).ok_or_else(invalid)?;
        }
        Ok(node)
    }

    /// Apply an authored status change. Returns whether anything changed.
    pub fn update_status(&mut self, key: &str, progress: Progress, now: Instant) -> ProcTreeResult<bool> {
        let next = TaskStatus::from(progress);
        let node = self.node_mut(key).inspect_err(|_| {
            debug!(key, status = %next, "status update for unknown task");
        })?;

        match node.set_status(next, now) {
            Ok(changed) => {
                if changed {
                    trace!(key, status = %next, "task status changed");
                }
                Ok(changed)
            }
            Err(from) => {
                debug!(key, %from, to = %next, "rejected status transition");
                Err(ProcTreeError::InvalidTransition {
                    key: NodeKey::from(key),
                    from,
                    to: next,
                })
            }
        }
    }

    /// Append to a node's rolling log; multi-line input becomes one entry per line.
    pub fn append_log(&mut self, key: &str, text: &str) -> ProcTreeResult<()> {
        let node = self.node_mut(key)?;
        if text.is_empty() {
            node.append_log(String::new());
            return Ok(());
        }
        for line in text.lines() {
            node.append_log(line.to_string());
        }
        Ok(())
    }

    pub fn set_left_text(&mut self, key: &str, text: impl Into<String>) -> ProcTreeResult<()> {
        self.node_mut(key)?.set_left_text(text.into());
        Ok(())
    }

    pub fn set_right_text(&mut self, key: &str, text: impl Into<String>) -> ProcTreeResult<()> {
        self.node_mut(key)?.set_right_text(text.into());
        Ok(())
    }

    /// Schedule new work underneath an existing node.
    pub fn add_child(&mut self, parent: &str, descriptor: TaskDescriptor, now: Instant) -> ProcTreeResult<()> {
        let mut path = self
            .index
            .get(parent)
            .cloned()
            .ok_or_else(|| ProcTreeError::InvalidNodeKey {
                key: NodeKey::from(parent),
            })?;
        self.check_new_keys(&descriptor)?;

        let node = TaskNode::from_descriptor(descriptor, now);
        let parent_node = self.node_mut(parent)?;
        let child_index = parent_node.push_child(node);
        path.push(child_index);

        // Re-borrow immutably to index the freshly attached subtree.
        let mut index = std::mem::take(&mut self.index);
        if let Some(child) = self.node_at(&path) {
            index_subtree(&mut index, child, path.clone());
        }
        self.index = index;
        debug!(parent, depth = path.len(), "task scheduled");
        Ok(())
    }

    fn node_at(&self, path: &[usize]) -> Option<&TaskNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    fn check_new_keys(&self, descriptor: &TaskDescriptor) -> ProcTreeResult<()> {
        let mut seen = HashSet::new();
        let mut stack = vec![descriptor];
        while let Some(d) = stack.pop() {
            if self.index.contains_key(d.key.as_str()) || !seen.insert(&d.key) {
                return Err(ProcTreeError::DuplicateNodeKey { key: d.key.clone() });
            }
            stack.extend(d.children.iter());
        }
        Ok(())
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!(verb = %self.verb, "process tree cancelled");
        }
        self.cancelled = true;
    }

    /// Advance the spinner by one frame.
    pub fn advance_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    /// Grow the elapsed-text column; it never shrinks.
    pub fn record_elapsed_width(&mut self, width: usize) {
        self.elapsed_width = self.elapsed_width.max(width);
    }

    /// Displayed statuses for this instant.
    pub fn derive(&self) -> Vec<DerivedNode<'_>> {
        derive_forest(&self.roots)
    }

    pub fn displayed_status(&self, key: &str) -> Option<TaskStatus> {
        let path = self.index.get(key)?;
        let (first, rest) = path.split_first()?;
        let forest = self.derive();
        let mut view = forest.get(*first)?;
        for &i in rest {
            view = view.children.get(i)?;
        }
        Some(view.status)
    }

    /// Nodes anywhere in the forest whose displayed status counts as finished.
    pub fn finished_count(&self) -> usize {
        count_finished(&self.derive())
    }

    /// Every root displays a finished status (vacuously true with no roots).
    pub fn is_done(&self) -> bool {
        self.derive().iter().all(|root| root.status.is_finished())
    }
}

fn count_finished(forest: &[DerivedNode<'_>]) -> usize {
    let mut finished = 0;
    let walked = walk(forest, |view: &DerivedNode<'_>, _| {
        if view.status.is_finished() {
            finished += 1;
        }
        Ok::<_, Infallible>(())
    });
    match walked {
        Ok(_) => finished,
        Err(err) => match err.source {},
    }
}

fn index_subtree(index: &mut HashMap<NodeKey, Vec<usize>>, node: &TaskNode, path: Vec<usize>) {
    for (i, child) in node.children().iter().enumerate() {
        let mut child_path = path.clone();
        child_path.push(i);
        index_subtree(index, child, child_path);
    }
    index.insert(node.key().clone(), path);
}
