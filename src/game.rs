#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Spawn column for new pieces, counted from the left wall
pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32 - 2;
pub const SPAWN_Y: i32 = 0;

// Line clear scoring, indexed by rows cleared at once and multiplied by level
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

// Drop speed: the interval shrinks by one step per level down to a floor
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(700);
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(60);
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(120);

/// Level reached after clearing `lines` rows in total.
#[must_use]
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + STARTING_LEVEL
}

/// Gravity interval for `level`, never below [`MIN_DROP_INTERVAL`].
#[must_use]
pub fn drop_interval_for_level(level: u32) -> Duration {
    let steps = level.saturating_sub(STARTING_LEVEL);
    BASE_DROP_INTERVAL
        .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(steps))
        .max(MIN_DROP_INTERVAL)
}

/// Points for clearing `rows` rows at once on `level`.
#[must_use]
pub fn line_clear_points(rows: usize, level: u32) -> u32 {
    // A single piece spans at most four rows; anything beyond scores as four.
    let base = LINE_CLEAR_POINTS[rows.min(LINE_CLEAR_POINTS.len() - 1)];
    base.saturating_mul(level)
}
