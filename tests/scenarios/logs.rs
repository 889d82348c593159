use proctree::{ProcessTree, Progress, RenderOptions, TaskDescriptor};

#[test]
fn ten_lines_with_tail_of_five_show_the_last_five() {
    let tree = ProcessTree::new("", 1, vec![TaskDescriptor::new("a", "A")])
        .unwrap()
        .with_render_options(RenderOptions::plain());
    tree.update_status("a", Progress::Running).unwrap();
    for i in 1..=10 {
        tree.append_log("a", &format!("line {i}")).unwrap();
    }

    let frame = tree.render(40).unwrap();
    let logs: Vec<&str> = frame
        .lines()
        .filter(|line| line.trim_start().starts_with("line "))
        .map(str::trim)
        .collect();
    assert_eq!(logs, vec!["line 6", "line 7", "line 8", "line 9", "line 10"]);
}

#[test]
fn control_characters_never_reach_the_terminal() {
    let tree = ProcessTree::new("", 1, vec![TaskDescriptor::new("a", "A")])
        .unwrap()
        .with_render_options(RenderOptions::plain());
    tree.append_log("a", "\u{1b}[31mred\u{1b}[0m\tand\u{7}bell").unwrap();

    let frame = tree.render(40).unwrap();
    assert!(frame.contains("red andbell"), "{frame:?}");
    assert!(!frame.contains('\u{1b}'));
}
