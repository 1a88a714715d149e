//! Property tests for the list, table, range and placement engines.

use horizon_loom::event::Key;
use horizon_loom::navigator::{KeyboardNavigator, SelectionMode};
use horizon_loom::positioner::{Side, compute};
use horizon_loom::range::{DualThumb, RangeSelection};
use horizon_loom::table::{CellValue, SortDirection, SortSpec, TableRow, project, sorted_indices};
use horizon_loom::Rect;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    score: i64,
}

impl TableRow for Row {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::Int(self.id),
            "score" => CellValue::Int(self.score),
            _ => CellValue::Empty,
        }
    }
}

fn rows_from(scores: &[i64]) -> Vec<Row> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| Row { id: i as i64, score })
        .collect()
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![
        Just(SortDirection::Ascending),
        Just(SortDirection::Descending),
        Just(SortDirection::None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn highlight_stays_in_bounds(len in 0usize..20, downs in prop::collection::vec(any::<bool>(), 0..60)) {
        let mut nav = KeyboardNavigator::new(SelectionMode::Single);
        nav.set_len(len);
        for down in downs {
            nav.handle_key(if down { Key::ArrowDown } else { Key::ArrowUp });
            prop_assert!(nav.index() >= -1);
            prop_assert!(nav.index() <= len as i32 - 1);
        }
    }

    #[test]
    fn sorting_is_idempotent(scores in prop::collection::vec(-5i64..5, 0..30), dir in direction()) {
        let rows = rows_from(&scores);
        let spec = SortSpec::new("score", dir);
        let sorted: Vec<Row> = sorted_indices(&rows, &spec).into_iter().map(|i| rows[i].clone()).collect();
        let again = sorted_indices(&sorted, &spec);
        prop_assert_eq!(again, (0..sorted.len()).collect::<Vec<_>>());
    }

    #[test]
    fn descending_reverses_unique_keys(ids in Just((0i64..25).collect::<Vec<_>>()).prop_shuffle()) {
        let rows: Vec<Row> = ids.iter().map(|&id| Row { id, score: 0 }).collect();
        let asc = sorted_indices(&rows, &SortSpec::new("id", SortDirection::Ascending));
        let mut desc = sorted_indices(&rows, &SortSpec::new("id", SortDirection::Descending));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn pages_partition_rows(scores in prop::collection::vec(-50i64..50, 0..40), page_size in 1usize..10, dir in direction()) {
        let rows = rows_from(&scores);
        let spec = SortSpec::new("score", dir);
        let first = project(&rows, &spec, 1, page_size);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            seen.extend(project(&rows, &spec, page, page_size).indices);
        }
        prop_assert_eq!(seen, sorted_indices(&rows, &spec));
    }

    #[test]
    fn two_picks_are_ordered(a in any::<i32>(), b in any::<i32>()) {
        let mut selection = RangeSelection::new();
        selection.pick(a);
        selection.pick(b);
        let range = selection.value().unwrap();
        prop_assert!(range.to.is_some_and(|to| range.from <= to));
    }

    #[test]
    fn thumbs_never_cross(moves in prop::collection::vec((any::<bool>(), 0u32..100), 0..30)) {
        let mut thumbs = DualThumb::new(25u32, 75);
        for (low, value) in moves {
            if low { thumbs.set_lo(value) } else { thumbs.set_hi(value) }
            prop_assert!(thumbs.lo() <= thumbs.hi());
        }
    }

    #[test]
    fn vertical_sides_clear_the_anchor(
        x in -500f32..500.0,
        y in -500f32..500.0,
        w in 0f32..300.0,
        h in 0f32..300.0,
        gap in 1f32..32.0,
    ) {
        let anchor = Rect::new(x, y, w, h);
        prop_assert!(compute(&anchor, Side::Top, gap).top < anchor.top());
        prop_assert!(compute(&anchor, Side::Bottom, gap).top > anchor.bottom());
    }
}
