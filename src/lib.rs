//! proctree - live hierarchical task-status tracking for the terminal
//!
//! Collaborators report progress for nested units of work through a shared
//! [`ProcessTree`]; a refresh loop renders the forest as an indented tree
//! with spinners, elapsed times, rolling logs and a completion counter.

pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod refresh;
pub mod tree;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use error::{ProcTreeError, ProcTreeResult};
pub use plan::{Plan, PlanTask};
pub use refresh::{RefreshHandle, RefreshLoop, RefreshOptions};
pub use tree::{
    Clock, ManualClock, NodeKey, ProcessTree, Progress, SystemClock, TaskDescriptor, TaskNode, TaskStatus,
    TreeModel, WaitOutcome,
};
pub use ui::render::{format_elapsed, RenderOptions, Renderer};
