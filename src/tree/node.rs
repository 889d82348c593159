//! Task nodes and the descriptors they are built from.

use std::borrow::Borrow;
use std::fmt;
use std::time::{Duration, Instant};

use super::status::TaskStatus;

/// Identity of a node, unique across the whole forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(key: &NodeKey) -> Self {
        key.clone()
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What a collaborator supplies when scheduling a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub key: NodeKey,
    pub left_text: String,
    pub right_text: String,
    pub children: Vec<TaskDescriptor>,
}

impl TaskDescriptor {
    pub fn new(key: impl Into<NodeKey>, left_text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            left_text: left_text.into(),
            right_text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_right_text(mut self, text: impl Into<String>) -> Self {
        self.right_text = text.into();
        self
    }

    pub fn with_child(mut self, child: TaskDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TaskDescriptor) {
        self.children.push(child);
    }

    /// Number of nodes in this descriptor's subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// One tracked unit of work.
#[derive(Debug, Clone)]
pub struct TaskNode {
    key: NodeKey,
    status: TaskStatus,
    started_at: Instant,
    ended_at: Option<Instant>,
    left_text: String,
    right_text: String,
    logs: Vec<String>,
    children: Vec<TaskNode>,
}

impl TaskNode {
    pub(crate) fn from_descriptor(descriptor: TaskDescriptor, now: Instant) -> Self {
        Self {
            key: descriptor.key,
            status: TaskStatus::Pending,
            started_at: now,
            ended_at: None,
            left_text: descriptor.left_text,
            right_text: descriptor.right_text,
            logs: Vec::new(),
            children: descriptor
                .children
                .into_iter()
                .map(|child| TaskNode::from_descriptor(child, now))
                .collect(),
        }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// The status authored by the node's owner (never a derived value).
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn left_text(&self) -> &str {
        &self.left_text
    }

    pub fn right_text(&self) -> &str {
        &self.right_text
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// The last `k` log lines, in append order.
    pub fn log_tail(&self, k: usize) -> &[String] {
        let skip = self.logs.len().saturating_sub(k);
        &self.logs[skip..]
    }

    pub fn children(&self) -> &[TaskNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Time spent so far, frozen once the node reached a terminal status.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.ended_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
    }

    /// Apply an authored transition. Returns the previous status on rejection.
    ///
    /// Status and timestamps change together; callers hold the tree lock.
    pub(crate) fn set_status(&mut self, next: TaskStatus, now: Instant) -> Result<bool, TaskStatus> {
        if !self.status.can_transition_to(next) {
            return Err(self.status);
        }
        if self.status == next {
            return Ok(false);
        }

        if next == TaskStatus::Running {
            self.started_at = now;
        }
        if next.is_terminal() {
            self.ended_at = Some(now);
        }
        self.status = next;
        Ok(true)
    }

    pub(crate) fn append_log(&mut self, line: String) {
        self.logs.push(line);
    }

    pub(crate) fn set_left_text(&mut self, text: String) {
        self.left_text = text;
    }

    pub(crate) fn set_right_text(&mut self, text: String) {
        self.right_text = text;
    }

    pub(crate) fn push_child(&mut self, child: TaskNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut TaskNode> {
        self.children.get_mut(index)
    }
}
