//! Property-based invariant tests for grid geometry.
//!
//! 1. slot_of and cell_of are inverse inside the grid.
//! 2. Every slot past the capacity is rejected.
//! 3. offset followed by relative_to returns the original cell.
//! 4. cells() yields exactly width * height distinct cells, sorted row-major.
//! 5. fits() agrees with checking the far corner.
//! 6. Direction steps cover 0..length exactly once per row/column.

use gridmenu_core::geometry::{Cell, Direction, Size};
use proptest::prelude::*;

fn size_strategy() -> impl Strategy<Value = Size> {
    (1u16..=32, 1u16..=32).prop_map(|(w, h)| Size::new(w, h).unwrap())
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ]
}

proptest! {
    #[test]
    fn slot_cell_inverse(size in size_strategy(), seed in any::<usize>()) {
        let slot = seed % size.capacity();
        let cell = size.cell_of(slot).unwrap();
        prop_assert!(size.contains(cell));
        prop_assert_eq!(size.slot_of(cell), Some(slot));
    }

    #[test]
    fn slots_past_capacity_rejected(size in size_strategy(), extra in 0usize..100) {
        prop_assert_eq!(size.cell_of(size.capacity() + extra), None);
    }

    #[test]
    fn offset_relative_inverse(x in 0u16..1000, y in 0u16..1000, ax in 0u16..1000, ay in 0u16..1000) {
        let local = Cell::new(x, y);
        let anchor = Cell::new(ax, ay);
        prop_assert_eq!(local.offset(anchor).relative_to(anchor), Some(local));
    }

    #[test]
    fn cells_cover_area(size in size_strategy()) {
        let cells: Vec<Cell> = size.cells().collect();
        prop_assert_eq!(cells.len(), size.capacity());
        let mut sorted = cells.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted, cells);
    }

    #[test]
    fn fits_matches_far_corner(grid in size_strategy(), child in size_strategy(), x in 0u16..40, y in 0u16..40) {
        let anchor = Cell::new(x, y);
        let far = Cell::new(x + child.width() - 1, y + child.height() - 1);
        prop_assert_eq!(grid.fits(anchor, child), grid.contains(far));
    }

    #[test]
    fn direction_steps_are_a_permutation(size in size_strategy(), direction in direction_strategy()) {
        let length = direction.length(size) as usize;
        let mut counts = vec![0usize; length];
        for cell in size.cells() {
            counts[direction.step(size, cell) as usize] += 1;
        }
        let across = size.capacity() / length;
        prop_assert!(counts.iter().all(|&c| c == across));
    }
}
