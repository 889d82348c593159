//! The task forest: nodes, status rules, traversal and the shared handle.

mod aggregate;
mod clock;
mod handle;
mod model;
mod node;
mod status;
mod traverse;

pub use aggregate::{derive_forest, derive_status, DerivedNode};
pub use clock::{Clock, ManualClock, SystemClock};
pub use handle::{ProcessTree, WaitOutcome};
pub use model::TreeModel;
pub use node::{NodeKey, TaskDescriptor, TaskNode};
pub use status::{Progress, TaskStatus};
pub use traverse::{walk, TraversalAborted, Walkable};
