//! Scoring - points, level progression, and the clamped difficulty curves

use crate::types::{
    FALL_INTERVALS, FALL_INTERVAL_FLOOR_MS, PIECE_LOCK_POINTS, ROW_CLEAR_POINTS,
};

/// Points for deleting `rows` completed rows in one commit.
pub fn row_clear_points(rows: u32) -> u32 {
    rows * ROW_CLEAR_POINTS
}

/// Points for landing a piece on the stack.
pub fn piece_lock_points() -> u32 {
    PIECE_LOCK_POINTS
}

/// Level increases every 10 cleared rows.
pub fn level_for_rows(total_rows: u32) -> u32 {
    total_rows / 10
}

/// Gravity interval for a level, clamped at the floor beyond the table.
pub fn fall_interval_ms(level: u32) -> u32 {
    FALL_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(FALL_INTERVAL_FLOOR_MS)
}

/// One difficulty step for a spawn-wait range: both bounds shrink by
/// `step_ms` and clamp at `floor_ms`, so waits stay positive no matter how
/// long a round runs. `floor_ms` must be at least 1.
pub fn shrink_wait_bounds(min_ms: u32, max_ms: u32, step_ms: u32, floor_ms: u32) -> (u32, u32) {
    let floor = floor_ms.max(1);
    let min = min_ms.saturating_sub(step_ms).max(floor);
    let max = max_ms.saturating_sub(step_ms).max(min);
    (min, max)
}
