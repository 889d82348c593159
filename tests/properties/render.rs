//! Property tests for frame rendering.

use std::convert::Infallible;
use std::time::Duration;

use proptest::prelude::*;

use proctree::ui::layout::visible_width;
use proctree::ui::render::DEFAULT_INDENT;

use proctree::ManualClock;

use crate::support::{build, build_with_clock, forest_shape};

/// Blank out everything allowed to change between two frames of an idle
/// tree: timer digits and ASCII spinner glyphs.
fn mask_time(frame: &str) -> Vec<String> {
    frame
        .lines()
        .map(|line| {
            line.chars()
                .map(|c| match c {
                    '0'..='9' => '#',
                    '-' | '\\' | '|' | '/' => '~',
                    other => other,
                })
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identical snapshot, tick and clock give byte-identical frames.
    #[test]
    fn property_render_is_deterministic(shape in forest_shape(), width in 10u16..160) {
        let tree = build(&shape);
        // The first frame may widen the elapsed column; later ones must agree.
        let first = tree.render(width).unwrap();
        let second = tree.render(width).unwrap();
        let third = tree.render(width).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&second, &third);
    }

    /// PROPERTY: every node row spans the requested width (plus its indent
    /// when the indent alone is wider).
    #[test]
    fn property_rows_fill_width(
        shape in forest_shape().prop_map(|shape| {
            shape.into_iter().map(|(parent, _)| (parent, proctree::TaskStatus::Success)).collect::<Vec<_>>()
        }),
        width in 10u16..160,
    ) {
        // All-success forests render no logs, so rows map 1:1 onto nodes.
        let tree = build(&shape);
        let mut depths = Vec::new();
        tree.walk(|_, depth| {
            depths.push(depth);
            Ok::<_, Infallible>(())
        }).unwrap();

        let frame = tree.render(width).unwrap();
        let rows: Vec<&str> = frame.lines().skip(1).take(depths.len()).collect();
        prop_assert_eq!(rows.len(), depths.len());
        for (row, depth) in rows.iter().zip(&depths) {
            let expected = usize::from(width).max(depth * DEFAULT_INDENT);
            prop_assert_eq!(visible_width(row), expected, "row {:?}", row);
        }
    }

    /// PROPERTY: with no updates in between, two frames differ only in
    /// elapsed times and spinner phase.
    #[test]
    fn property_idle_frames_differ_only_in_time(
        shape in forest_shape(),
        width in 10u16..160,
        secs in 1u64..50,
    ) {
        let clock = ManualClock::new();
        let tree = build_with_clock(&shape, &clock);
        let before = tree.render(width).unwrap();

        clock.advance(Duration::from_secs(secs));
        tree.tick();
        let after = tree.render(width).unwrap();

        prop_assert_eq!(before.lines().count(), after.lines().count());
        for (old, new) in before.lines().zip(after.lines()) {
            prop_assert_eq!(visible_width(old), visible_width(new));
        }
        prop_assert_eq!(mask_time(&before), mask_time(&after));
    }
}
