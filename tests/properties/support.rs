//! Random forest generation shared by the property tests.

use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::Index;

use proctree::{ManualClock, ProcessTree, Progress, RenderOptions, TaskDescriptor, TaskStatus};

/// Authored statuses a worker can leave a node in.
pub fn authored_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::Running),
        Just(TaskStatus::Success),
        Just(TaskStatus::Failed),
    ]
}

/// One entry per node: an optional parent among the earlier nodes, and the
/// status its owner last reported.
pub fn forest_shape() -> impl Strategy<Value = Vec<(Option<Index>, TaskStatus)>> {
    proptest::collection::vec((any::<Option<Index>>(), authored_status()), 1..24)
}

pub fn key(i: usize) -> String {
    format!("n{i}")
}

/// Build the forest and drive each node to its authored status.
pub fn build(shape: &[(Option<Index>, TaskStatus)]) -> ProcessTree {
    build_with_clock(shape, &ManualClock::new())
}

/// Like [`build`], with timers read from `clock`.
pub fn build_with_clock(shape: &[(Option<Index>, TaskStatus)], clock: &ManualClock) -> ProcessTree {
    let mut roots = Vec::new();
    let mut parents = Vec::with_capacity(shape.len());
    for (i, (parent, _)) in shape.iter().enumerate() {
        let parent = parent.as_ref().filter(|_| i > 0).map(|idx| idx.index(i));
        if parent.is_none() {
            roots.push(TaskDescriptor::new(key(i), format!("task {i}")));
        }
        parents.push(parent);
    }

    let tree = ProcessTree::with_clock("testing", shape.len(), roots, Arc::new(clock.clone()))
        .expect("generated keys are unique")
        .with_render_options(RenderOptions::plain());

    for (i, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            tree.add_child(&key(*parent), TaskDescriptor::new(key(i), format!("task {i}")))
                .expect("parent was added earlier");
        }
    }

    for (i, (_, status)) in shape.iter().enumerate() {
        let k = key(i);
        match status {
            TaskStatus::Running => {
                tree.update_status(&k, Progress::Running).unwrap();
            }
            TaskStatus::Success | TaskStatus::Failed => {
                tree.update_status(&k, Progress::Running).unwrap();
                let done = if *status == TaskStatus::Success {
                    Progress::Success
                } else {
                    Progress::Failed
                };
                tree.update_status(&k, done).unwrap();
            }
            _ => {}
        }
    }

    tree
}
