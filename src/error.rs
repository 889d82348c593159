//! Error types for proctree
//!
//! Uses `thiserror` for library errors. None of these are fatal to the work
//! being tracked: they only affect what the operator gets to see.

use std::path::PathBuf;
use thiserror::Error;

use crate::tree::{NodeKey, TaskStatus};

/// Result type alias for proctree operations
pub type ProcTreeResult<T> = Result<T, ProcTreeError>;

/// Main error type for proctree operations
#[derive(Error, Debug)]
pub enum ProcTreeError {
    /// An update referenced a node that is not part of the tree
    #[error("no task with key '{key}' in the tree")]
    InvalidNodeKey { key: NodeKey },

    /// A node was scheduled under a key that is already taken
    #[error("task key '{key}' is already in use")]
    DuplicateNodeKey { key: NodeKey },

    /// The authored status cannot move from `from` to `to`
    #[error("task '{key}' cannot move from {from} to {to}")]
    InvalidTransition {
        key: NodeKey,
        from: TaskStatus,
        to: TaskStatus,
    },

    /// A traversal visitor failed and the walk was abandoned
    #[error("tree traversal aborted after {visited} node(s): {reason}")]
    TraversalAborted { visited: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Invalid plan file
    #[error("invalid plan in {file}: {message}")]
    PlanParse { file: PathBuf, message: String },
}
