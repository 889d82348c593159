//! Depth-first, pre-order traversal over a forest.
//!
//! A node is visited strictly before its children and siblings keep their
//! order, so repeated walks over the same snapshot see the same sequence. The
//! visitor may fail; the first failure stops the walk.

use thiserror::Error;

use super::node::TaskNode;
use crate::error::ProcTreeError;

/// Anything with ordered, owned children of its own type.
pub trait Walkable: Sized {
    fn walk_children(&self) -> &[Self];
}

impl Walkable for TaskNode {
    fn walk_children(&self) -> &[Self] {
        self.children()
    }
}

/// The visitor failed on the `visited`-th node (1-based).
#[derive(Debug, Error)]
#[error("visitor failed on node {visited}: {source}")]
pub struct TraversalAborted<E> {
    pub visited: usize,
    #[source]
    pub source: E,
}

impl<E: std::fmt::Display> From<TraversalAborted<E>> for ProcTreeError {
    fn from(err: TraversalAborted<E>) -> Self {
        ProcTreeError::TraversalAborted {
            visited: err.visited,
            reason: err.source.to_string(),
        }
    }
}

/// Visit every node of `roots` in pre-order, passing its depth (roots are 0).
///
/// Returns the number of nodes visited.
pub fn walk<T, E, F>(roots: &[T], mut visit: F) -> Result<usize, TraversalAborted<E>>
where
    T: Walkable,
    F: FnMut(&T, usize) -> Result<(), E>,
{
    let mut stack: Vec<(&T, usize)> = roots.iter().rev().map(|root| (root, 0)).collect();
    let mut visited = 0;

    while let Some((node, depth)) = stack.pop() {
        visited += 1;
        visit(node, depth).map_err(|source| TraversalAborted { visited, source })?;
        stack.extend(
            node.walk_children()
                .iter()
                .rev()
                .map(|child| (child, depth + 1)),
        );
    }

    Ok(visited)
}
