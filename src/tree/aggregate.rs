//! Displayed status of composite nodes.
//!
//! Derivation never writes back into the nodes: each pass builds a borrowed
//! [`DerivedNode`] view next to the snapshot and the renderer reads only that.

use super::node::TaskNode;
use super::status::TaskStatus;
use super::traverse::Walkable;

/// Displayed status for a node with the given immediate children.
///
/// Precedence: a failed branch next to a running one wins, then running,
/// then failed. When every child succeeded (or nothing matched) the node keeps
/// its own authored status.
pub fn derive_status(own: TaskStatus, children: impl IntoIterator<Item = TaskStatus>) -> TaskStatus {
    let mut failed = false;
    let mut running = false;
    let mut any = false;

    for child in children {
        any = true;
        failed |= child.is_failed_class();
        running |= child.is_running_class();
    }

    if !any {
        return own;
    }

    match (failed, running) {
        (true, true) => TaskStatus::RunningWithFailedChild,
        (false, true) => TaskStatus::RunningChild,
        (true, false) => TaskStatus::FailedChild,
        (false, false) => own,
    }
}

/// A node paired with the status it displays during one render pass.
#[derive(Debug)]
pub struct DerivedNode<'a> {
    pub node: &'a TaskNode,
    pub status: TaskStatus,
    pub children: Vec<DerivedNode<'a>>,
}

impl<'a> DerivedNode<'a> {
    /// Derive bottom-up: children first, then this node from their results.
    pub fn derive(node: &'a TaskNode) -> Self {
        let children: Vec<DerivedNode<'a>> = node.children().iter().map(DerivedNode::derive).collect();
        let status = derive_status(node.status(), children.iter().map(|c| c.status));
        Self {
            node,
            status,
            children,
        }
    }
}

impl Walkable for DerivedNode<'_> {
    fn walk_children(&self) -> &[Self] {
        &self.children
    }
}

pub fn derive_forest(roots: &[TaskNode]) -> Vec<DerivedNode<'_>> {
    roots.iter().map(DerivedNode::derive).collect()
}
