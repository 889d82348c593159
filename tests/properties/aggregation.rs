//! Property tests for composite status derivation.

use std::convert::Infallible;

use proptest::prelude::*;

use proctree::tree::derive_status;
use proctree::TaskStatus;

use crate::support::{authored_status, build, forest_shape, key};

fn any_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        authored_status(),
        Just(TaskStatus::RunningChild),
        Just(TaskStatus::FailedChild),
        Just(TaskStatus::RunningWithFailedChild),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: precedence is failed+running, then running, then failed, else own.
    #[test]
    fn property_precedence(
        own in authored_status(),
        children in proptest::collection::vec(any_status(), 0..8),
    ) {
        let failed = children.iter().any(|s| s.is_failed_class());
        let running = children.iter().any(|s| s.is_running_class());
        let expected = match (failed, running) {
            (true, true) => TaskStatus::RunningWithFailedChild,
            (false, true) => TaskStatus::RunningChild,
            (true, false) => TaskStatus::FailedChild,
            (false, false) => own,
        };
        prop_assert_eq!(derive_status(own, children.iter().copied()), expected);
    }

    /// PROPERTY: child order never changes the derived status.
    #[test]
    fn property_order_independent(
        own in authored_status(),
        mut children in proptest::collection::vec(any_status(), 0..8),
    ) {
        let forward = derive_status(own, children.iter().copied());
        children.reverse();
        prop_assert_eq!(derive_status(own, children.iter().copied()), forward);
    }

    /// PROPERTY: every node displays the derivation of its children's displayed
    /// statuses, and deriving never rewrites what owners reported.
    #[test]
    fn property_forest_derivation_is_pure(shape in forest_shape()) {
        let tree = build(&shape);
        let before: Vec<_> = (0..shape.len()).map(|i| tree.status_of(&key(i))).collect();

        tree.walk(|view, _| {
            let expected = derive_status(view.node.status(), view.children.iter().map(|c| c.status));
            assert_eq!(view.status, expected, "node {}", view.node.key());
            Ok::<_, Infallible>(())
        }).unwrap();
        tree.render(80).unwrap();

        let after: Vec<_> = (0..shape.len()).map(|i| tree.status_of(&key(i))).collect();
        prop_assert_eq!(&before, &after);
        for (i, (_, status)) in shape.iter().enumerate() {
            prop_assert_eq!(after[i], Some(*status));
        }
    }
}
