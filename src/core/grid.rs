//! Stack grid - committed-cell bookkeeping for the falling-block game
//!
//! Tracks which piece owns each cell, detects completed rows, and compacts
//! the stack downward after a deletion. Row 0 is the bottom of the well;
//! columns run left to right. There is deliberately no upper bound on row
//! indices: pieces may extend above the visible grid while falling, and such
//! cells simply are not stored.

use arrayvec::ArrayVec;

use crate::types::PieceId;

/// A single commit can complete at most this many rows (piece shapes span
/// four rows at most).
pub const MAX_CLEARED_ROWS: usize = 4;

/// Fixed-size occupancy grid. Width and height are set once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackGrid {
    width: u32,
    height: u32,
    /// Row-major with row 0 at the bottom: `cells[row * width + col]`.
    cells: Vec<Option<PieceId>>,
}

impl StackGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat index for a stored cell, or `None` above the top / outside.
    fn cell_index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.width as i32 || row < 0 || row >= self.height as i32 {
            return None;
        }
        Some((row as u32 * self.width + col as u32) as usize)
    }

    /// Inside the playable area: columns are clamped on both sides, rows only
    /// from below. Anything above the top counts as inside.
    pub fn is_inside_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.width as i32 && row >= 0
    }

    /// Owner of a stored cell, `None` if empty, outside, or above the top.
    pub fn occupant(&self, col: i32, row: i32) -> Option<PieceId> {
        self.cell_index(col, row).and_then(|i| self.cells[i])
    }

    /// A proposed cell set is valid when every cell is inside bounds and
    /// each stored cell is empty or already owned by `owner`. Callers revert
    /// the attempted transform when this returns false.
    pub fn is_valid_placement(&self, cells: &[(i32, i32)], owner: PieceId) -> bool {
        cells.iter().all(|&(col, row)| {
            self.is_inside_bounds(col, row)
                && match self.occupant(col, row) {
                    None => true,
                    Some(id) => id == owner,
                }
        })
    }

    /// Replace `owner`'s cells with `cells`.
    ///
    /// Two phases: every cell currently owned by `owner` is cleared first,
    /// then the new set is written. A move or rotation changes which cells
    /// the piece covers, and stale cells from the previous shape must not
    /// linger. Cells above the top are skipped.
    pub fn commit(&mut self, cells: &[(i32, i32)], owner: PieceId) {
        for cell in self.cells.iter_mut() {
            if *cell == Some(owner) {
                *cell = None;
            }
        }
        for &(col, row) in cells {
            if let Some(i) = self.cell_index(col, row) {
                self.cells[i] = Some(owner);
            }
        }
    }

    /// True when every column of `row` is occupied.
    pub fn is_row_full(&self, row: u32) -> bool {
        if row >= self.height {
            return false;
        }
        let start = (row * self.width) as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Empty every cell of `row`, dropping ownership of each occupant.
    pub fn delete_row(&mut self, row: u32) {
        if row >= self.height {
            return;
        }
        let start = (row * self.width) as usize;
        let end = start + self.width as usize;
        for cell in &mut self.cells[start..end] {
            *cell = None;
        }
    }

    /// Shift every occupied cell of `row` down one row.
    pub fn compact_row(&mut self, row: u32) {
        if row == 0 || row >= self.height {
            return;
        }
        for col in 0..self.width {
            let from = (row * self.width + col) as usize;
            if let Some(owner) = self.cells[from].take() {
                let to = ((row - 1) * self.width + col) as usize;
                self.cells[to] = Some(owner);
            }
        }
    }

    /// Propagate a collapse: compact `row` and every row stacked above it,
    /// in ascending order.
    pub fn compact_above(&mut self, row: u32) {
        for r in row..self.height {
            self.compact_row(r);
        }
    }

    /// Delete every completed row and compact the stack.
    ///
    /// Scans from the bottom up; after a deletion the rows above have shifted
    /// down into the current index, so the same index is checked again before
    /// the scan moves on. Skipping that re-check would miss the second row of
    /// a multi-row clear. Returns the completed rows' original indices in
    /// scan order.
    pub fn clear_full_rows(&mut self) -> ArrayVec<u32, MAX_CLEARED_ROWS> {
        let mut cleared = ArrayVec::new();
        let mut row = 0;
        while row < self.height {
            if self.is_row_full(row) {
                self.delete_row(row);
                self.compact_above(row + 1);
                cleared.push(row + cleared.len() as u32);
            } else {
                row += 1;
            }
        }
        cleared
    }

    /// Empty the whole grid. Used on round restart.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
