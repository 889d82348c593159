//! Property tests for the completion counter.

use std::convert::Infallible;

use proptest::prelude::*;

use proctree::TaskStatus;

use crate::support::{build, forest_shape};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: finished never exceeds the node count, and reaches it exactly
    /// when every node displays a finished status.
    #[test]
    fn property_finished_bounded_by_total(shape in forest_shape()) {
        let tree = build(&shape);
        let finished = tree.finished_count();
        prop_assert!(finished <= shape.len());

        let mut all_finished = true;
        tree.walk(|view, _| {
            all_finished &= view.status.is_finished();
            Ok::<_, Infallible>(())
        }).unwrap();
        prop_assert_eq!(finished == shape.len(), all_finished);
        if all_finished {
            prop_assert!(tree.is_done());
        }
    }

    /// PROPERTY: when every owner reported a terminal status, the tree is done
    /// and the title shows total/total.
    #[test]
    fn property_all_terminal_means_done(
        shape in forest_shape().prop_map(|shape| {
            shape.into_iter()
                .map(|(parent, status)| {
                    let status = if status == TaskStatus::Failed { status } else { TaskStatus::Success };
                    (parent, status)
                })
                .collect::<Vec<_>>()
        })
    ) {
        let tree = build(&shape);
        prop_assert!(tree.is_done());
        prop_assert_eq!(tree.finished_count(), shape.len());

        let frame = tree.render(120).unwrap();
        let expected = format!("({}/{})", shape.len(), shape.len());
        let title = frame.lines().next().unwrap_or_default();
        prop_assert!(title.ends_with(&expected), "title {:?}", title);
    }
}
