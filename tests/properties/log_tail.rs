//! Property tests for the rolling log view.

use proptest::prelude::*;

use proctree::{ProcessTree, Progress, RenderOptions, TaskDescriptor};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a running node shows exactly the last K log lines, in order.
    #[test]
    fn property_log_tail_is_last_k(n in 0usize..30, k in 0usize..10) {
        let tree = ProcessTree::new("", 1, vec![TaskDescriptor::new("a", "A")])
            .unwrap()
            .with_render_options(RenderOptions { log_tail: k, ..RenderOptions::plain() });
        tree.update_status("a", Progress::Running).unwrap();
        for i in 1..=n {
            tree.append_log("a", &format!("entry-{i}")).unwrap();
        }

        let frame = tree.render(100).unwrap();
        let shown: Vec<usize> = frame
            .lines()
            .filter_map(|line| line.trim().strip_prefix("entry-"))
            .map(|i| i.parse().unwrap())
            .collect();
        let expected: Vec<usize> = (n.saturating_sub(k) + 1..=n).collect();
        prop_assert_eq!(shown, expected);

        let stored = tree.snapshot();
        prop_assert_eq!(stored.node("a").unwrap().logs().len(), n);
    }
}
