#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are small enough that usize <-> i32 conversions never truncate
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::*;
use log::debug;
use ratatui::style::Color;
use std::time::Duration;

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Canonical spawn orientation as rows of filled flags.
    #[must_use]
    pub fn template(self) -> &'static [&'static [u8]] {
        match self {
            PieceType::I => &[&[1, 1, 1, 1]],
            PieceType::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceType::L => &[&[0, 0, 1], &[1, 1, 1]],
            PieceType::O => &[&[1, 1], &[1, 1]],
            PieceType::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceType::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceType::Z => &[&[1, 1, 0], &[0, 1, 1]],
        }
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            PieceType::I => Color::Rgb(0x39, 0xc5, 0xff),
            PieceType::J => Color::Rgb(0x51, 0x6c, 0xff),
            PieceType::L => Color::Rgb(0xff, 0xa9, 0x4d),
            PieceType::O => Color::Rgb(0xff, 0xe0, 0x66),
            PieceType::S => Color::Rgb(0x62, 0xe3, 0x6f),
            PieceType::T => Color::Rgb(0xcf, 0x72, 0xff),
            PieceType::Z => Color::Rgb(0xff, 0x6b, 0x6b),
        }
    }
}

/// A board cell: empty, or tagged with the type of the piece that locked there.
pub type Cell = Option<PieceType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Rectangular occupancy matrix stored row-major (`row * width + col`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Builds a shape from rows of filled flags.
    ///
    /// # Panics
    /// Panics if `rows` is empty or ragged.
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        assert!(width > 0 && height > 0, "shape must not be empty");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "shape rows must share one width"
        );

        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&value| value != 0))
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row * self.width + col]
    }

    /// Local `(col, row)` offsets of every filled cell.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(index, _)| ((index % self.width) as i32, (index / self.width) as i32))
    }

    /// Quarter turn: transpose, then mirror columns (clockwise) or rows (counter-clockwise).
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let width = self.height;
        let height = self.width;
        let mut cells = vec![false; width * height];

        for row in 0..height {
            for col in 0..width {
                let (src_row, src_col) = match direction {
                    RotationDirection::Clockwise => (width - 1 - col, row),
                    RotationDirection::CounterClockwise => (col, height - 1 - row),
                };
                cells[row * width + col] = self.cells[src_row * self.width + src_col];
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn spawn() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The falling piece. Its shape is owned, so rotating it never touches the template.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub shape: Shape,
}

impl Piece {
    #[must_use]
    pub fn new(piece_type: PieceType) -> Self {
        Self {
            piece_type,
            shape: Shape::from_rows(piece_type.template()),
        }
    }

    /// Absolute board coordinates of every filled cell at `position`.
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(col, row)| (position.x + col, position.y + row))
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows from top (index 0) to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the board.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the board.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(Option::is_some)
    }

    /// Removes row `y` and pushes an empty row in at the top, shifting everything above down.
    pub fn remove_row(&mut self, y: usize) -> Vec<Cell> {
        let removed = self.rows.remove(y);
        self.rows.insert(0, vec![None; self.width]);
        removed
    }

    /// True when any filled cell of `piece` at `position` leaves the board sideways or
    /// through the floor, or lands on an occupied cell. Cells above the top edge only
    /// take part in the sideways check.
    #[must_use]
    pub fn collides(&self, piece: &Piece, position: Position) -> bool {
        let width = self.width as i32;
        let height = self.height as i32;

        piece.cells_at(position).any(|(x, y)| {
            x < 0
                || x >= width
                || y >= height
                || (y >= 0 && self.get(x as usize, y as usize).is_some())
        })
    }

    /// Writes the piece into the board. Cells above the top edge are dropped.
    pub fn merge(&mut self, piece: &Piece, position: Position) {
        let width = self.width as i32;
        for (x, y) in piece.cells_at(position) {
            if y >= 0 && (0..width).contains(&x) {
                self.set(x as usize, y as usize, Some(piece.piece_type));
            }
        }
    }

    /// Removes every full row, scanning bottom-up and re-checking a row index after
    /// a removal. Returns how many rows were removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Lowest position straight below `position` where `piece` still fits.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece, position: Position) -> Position {
        let mut landing = position;
        while !self.collides(piece, landing.offset(0, 1)) {
            landing.y += 1;
        }
        landing
    }

    /// Rotates `piece` in place and sweeps sideways (+1, -2, +3, ...) until it fits.
    /// When the sweep grows wider than the rotated shape, the piece and position are
    /// restored and `false` is returned.
    pub fn rotate_with_kick(
        &self,
        piece: &mut Piece,
        position: &mut Position,
        direction: RotationDirection,
    ) -> bool {
        let original_x = position.x;
        piece.shape = piece.shape.rotated(direction);

        let mut offset: i32 = 1;
        while self.collides(piece, *position) {
            position.x += offset;
            offset = -(offset + offset.signum());
            if offset.unsigned_abs() as usize > piece.shape.width() {
                debug!("Rotation of {:?} blocked, reverting", piece.piece_type);
                piece.shape = piece.shape.rotated(direction.opposite());
                position.x = original_x;
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub drop_interval: Duration,
    pub drop_timer: Duration,
    pub status: GameStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            level: crate::game::STARTING_LEVEL,
            drop_interval: crate::game::BASE_DROP_INTERVAL,
            drop_timer: Duration::ZERO,
            status: GameStatus::NotStarted,
        }
    }
}

impl GameState {
    /// Fresh counters for a new round, already running.
    pub fn restart(&mut self) {
        *self = Self {
            status: GameStatus::Running,
            ..Self::default()
        };
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Scores `rows` rows cleared by a single lock and updates level and speed.
    /// Returns the points awarded.
    pub fn apply_line_clear(&mut self, rows: usize) -> u32 {
        if rows == 0 {
            return 0;
        }

        let points = crate::game::line_clear_points(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self
            .lines_cleared
            .saturating_add(u32::try_from(rows).unwrap_or(u32::MAX));
        self.level = crate::game::level_for_lines(self.lines_cleared);
        self.drop_interval = crate::game::drop_interval_for_level(self.level);

        points
    }
}

/// Source of piece types. Seed it for reproducible games.
#[derive(Resource, Debug, Clone)]
pub struct PieceRng(fastrand::Rng);

impl PieceRng {
    #[must_use]
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    pub fn next_type(&mut self) -> PieceType {
        PieceType::ALL[self.0.usize(..PieceType::ALL.len())]
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new()
    }
}

/// Discrete player commands routed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateClockwise,
    RotateCounterClockwise,
    Start,
}
