use std::sync::Arc;
use std::time::Duration;

use proctree::{ManualClock, ProcessTree, Progress, RenderOptions, TaskDescriptor, TaskStatus};

fn building(clock: &ManualClock) -> ProcessTree {
    ProcessTree::with_clock(
        "building",
        2,
        vec![
            TaskDescriptor::new("a", "A"),
            TaskDescriptor::new("b", "B").with_child(TaskDescriptor::new("b1", "B1")),
        ],
        Arc::new(clock.clone()),
    )
    .unwrap()
    .with_render_options(RenderOptions::plain())
}

#[test]
fn leaf_done_and_child_running_after_two_seconds() {
    let clock = ManualClock::new();
    let tree = building(&clock);

    tree.update_status("a", Progress::Running).unwrap();
    tree.update_status("b1", Progress::Running).unwrap();
    clock.advance(Duration::from_secs(2));
    tree.update_status("a", Progress::Success).unwrap();

    assert_eq!(tree.finished_count(), 1);
    assert_eq!(tree.displayed_status_of("b"), Some(TaskStatus::RunningChild));
    assert_eq!(tree.status_of("b"), Some(TaskStatus::Pending));
    assert!(!tree.is_done());

    let frame = tree.render(60).unwrap();
    assert_eq!(frame.lines().next(), Some("building 0:02 (1/2)"));
}

#[test]
fn finished_tree_freezes_node_timers() {
    let clock = ManualClock::new();
    let tree = building(&clock);

    for key in ["a", "b1"] {
        tree.update_status(key, Progress::Running).unwrap();
    }
    clock.advance(Duration::from_secs(3));
    tree.update_status("a", Progress::Success).unwrap();
    tree.update_status("b1", Progress::Failed).unwrap();
    clock.advance(Duration::from_secs(60));

    assert!(tree.is_done());
    assert_eq!(tree.displayed_status_of("b"), Some(TaskStatus::FailedChild));

    let frame = tree.render(60).unwrap();
    let a_row = frame.lines().nth(1).unwrap();
    assert!(a_row.starts_with("[+] A"), "{a_row}");
    assert!(a_row.ends_with("[0:03]"), "{a_row}");
    let b_row = frame.lines().nth(2).unwrap();
    assert!(b_row.starts_with("<!> B"), "{b_row}");
    // b never ran, so its timer keeps counting from creation.
    assert!(b_row.ends_with("[1:03]"), "{b_row}");
}

#[test]
fn work_scheduled_later_joins_the_tree() {
    let clock = ManualClock::new();
    let tree = building(&clock);

    tree.add_child("b1", TaskDescriptor::new("b1-link", "linking").with_right_text("ld"))
        .unwrap();
    tree.update_status("b1-link", Progress::Running).unwrap();

    assert_eq!(tree.displayed_status_of("b1"), Some(TaskStatus::RunningChild));
    assert_eq!(tree.displayed_status_of("b"), Some(TaskStatus::RunningChild));
    let frame = tree.render(60).unwrap();
    assert!(frame.contains("        (-) linking"), "{frame}");
}
