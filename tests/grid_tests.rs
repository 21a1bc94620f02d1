//! Stack grid tests - bounds, commits, and row clearing

use arcade_core::core::StackGrid;
use arcade_core::types::PieceId;

fn fill_row(grid: &mut StackGrid, row: i32, owner: PieceId) {
    let cells: Vec<(i32, i32)> = (0..grid.width() as i32).map(|col| (col, row)).collect();
    grid.commit(&cells, owner);
}

#[test]
fn test_bounds_clamp_columns_and_floor_only() {
    let grid = StackGrid::new(10, 20);

    for col in 0..10 {
        assert!(grid.is_inside_bounds(col, 0));
        assert!(grid.is_inside_bounds(col, 19));
        // No upper clamp: a piece may poke above the visible well.
        assert!(grid.is_inside_bounds(col, 20));
        assert!(grid.is_inside_bounds(col, 500));
    }

    assert!(!grid.is_inside_bounds(-1, 5));
    assert!(!grid.is_inside_bounds(10, 5));
    assert!(!grid.is_inside_bounds(3, -1));
}

#[test]
fn test_commit_replaces_previous_shape_without_residue() {
    let mut grid = StackGrid::new(10, 20);
    let owner = 1;

    // A horizontal bar, then the same piece rotated to vertical.
    let horizontal = [(3, 5), (4, 5), (5, 5), (6, 5)];
    let vertical = [(4, 4), (4, 5), (4, 6), (4, 7)];

    grid.commit(&horizontal, owner);
    grid.commit(&vertical, owner);

    for &(col, row) in &vertical {
        assert_eq!(grid.occupant(col, row), Some(owner));
    }
    // No cell of the old shape survives outside the new one.
    for &(col, row) in &horizontal {
        if !vertical.contains(&(col, row)) {
            assert_eq!(grid.occupant(col, row), None, "stale cell at ({col},{row})");
        }
    }
}

#[test]
fn test_commit_does_not_disturb_other_owners() {
    let mut grid = StackGrid::new(6, 8);
    grid.commit(&[(0, 0), (1, 0)], 1);
    grid.commit(&[(4, 0), (5, 0)], 2);

    grid.commit(&[(0, 1), (1, 1)], 1);
    assert_eq!(grid.occupant(4, 0), Some(2));
    assert_eq!(grid.occupant(5, 0), Some(2));
    assert_eq!(grid.occupant(0, 0), None);
}

#[test]
fn test_placement_rejects_other_owner_and_walls() {
    let mut grid = StackGrid::new(6, 8);
    grid.commit(&[(2, 0)], 1);

    assert!(grid.is_valid_placement(&[(2, 0), (3, 0)], 1));
    assert!(!grid.is_valid_placement(&[(2, 0)], 2));
    assert!(!grid.is_valid_placement(&[(-1, 0)], 2));
    assert!(!grid.is_valid_placement(&[(6, 0)], 2));
    assert!(!grid.is_valid_placement(&[(0, -1)], 2));
    // Above the top is legal and empty.
    assert!(grid.is_valid_placement(&[(0, 100)], 2));
}

#[test]
fn test_delete_row_empties_it() {
    let mut grid = StackGrid::new(4, 6);
    fill_row(&mut grid, 2, 9);
    assert!(grid.is_row_full(2));

    grid.delete_row(2);
    assert!(!grid.is_row_full(2));
    for col in 0..4 {
        assert_eq!(grid.occupant(col, 2), None);
    }
}

#[test]
fn test_compact_row_shifts_down_one() {
    let mut grid = StackGrid::new(4, 6);
    grid.commit(&[(1, 3), (2, 3)], 5);

    grid.compact_row(3);
    assert_eq!(grid.occupant(1, 2), Some(5));
    assert_eq!(grid.occupant(2, 2), Some(5));
    assert_eq!(grid.occupant(1, 3), None);
}

#[test]
fn test_two_full_rows_clear_and_stack_drops_by_two() {
    // Height-6 well with exactly rows 2 and 3 full.
    let mut grid = StackGrid::new(4, 6);
    fill_row(&mut grid, 2, 1);
    fill_row(&mut grid, 3, 2);
    grid.commit(&[(0, 4), (1, 4)], 3);
    grid.commit(&[(3, 5)], 4);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[2, 3]);

    // Everything that sat above row 3 dropped by exactly two rows.
    assert_eq!(grid.occupant(0, 2), Some(3));
    assert_eq!(grid.occupant(1, 2), Some(3));
    assert_eq!(grid.occupant(3, 3), Some(4));

    // The compacted well has no full rows left anywhere.
    for row in 0..6 {
        assert!(!grid.is_row_full(row));
    }
    for row in 4..6 {
        for col in 0..4 {
            assert_eq!(grid.occupant(col, row as i32), None);
        }
    }
}

#[test]
fn test_triple_clear_does_not_skip_shifted_rows() {
    // Rows 0, 1, 2 all full in a height-10 well. A scan that advances past a
    // freshly shifted row would clear only two of them.
    let mut grid = StackGrid::new(4, 10);
    fill_row(&mut grid, 0, 1);
    fill_row(&mut grid, 1, 2);
    fill_row(&mut grid, 2, 3);
    for row in 3..10 {
        // A single marker per row above the full block.
        grid.commit(&[(0, row)], 10 + row as PieceId);
    }

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[0, 1, 2]);

    // All seven markers dropped by exactly three.
    for row in 3..10 {
        assert_eq!(grid.occupant(0, row - 3), Some(10 + row as PieceId));
    }
    for row in 7..10 {
        assert_eq!(grid.occupant(0, row), None);
    }
}

#[test]
fn test_clear_resets_the_well() {
    let mut grid = StackGrid::new(4, 6);
    fill_row(&mut grid, 0, 1);
    grid.commit(&[(2, 3)], 2);

    grid.clear();
    for row in 0..6 {
        for col in 0..4 {
            assert_eq!(grid.occupant(col, row), None);
        }
    }
}
