use proctree::{ProcessTree, Progress, RenderOptions, TaskDescriptor, WaitOutcome};

#[test]
fn cancel_hides_hint_but_keeps_accepting_updates() {
    let tree = ProcessTree::new("pulling", 1, vec![TaskDescriptor::new("img", "image")])
        .unwrap()
        .with_render_options(RenderOptions::plain());

    assert!(tree.render(50).unwrap().contains("ctrl+c to cancel"));

    tree.cancel();
    assert!(tree.is_cancelled());
    assert_eq!(tree.wait(), WaitOutcome::Cancelled);

    tree.update_status("img", Progress::Running).unwrap();
    tree.append_log("img", "aborting download").unwrap();

    let frame = tree.render(50).unwrap();
    assert!(!frame.contains("ctrl+c to cancel"));
    assert!(frame.contains("aborting download"));

    tree.update_status("img", Progress::Failed).unwrap();
    assert!(tree.render(50).unwrap().contains("<!> image"));
    assert_eq!(tree.wait(), WaitOutcome::Done);
}
