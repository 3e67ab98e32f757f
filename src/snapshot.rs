//! Read-only view of the game for renderers.
//!
//! A snapshot is captured once per frame and owns copies of everything it shows, so
//! drawing never touches the simulation world.

use bevy_ecs::prelude::World;

use crate::components::{Board, Cell, GameState, GameStatus, Piece, Position};
use crate::systems::active_piece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece: Piece,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    /// Where the active piece would land if hard dropped now.
    pub ghost: Option<Position>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn capture(world: &mut World) -> Self {
        let game_state = world.resource::<GameState>().clone();
        let board = world.resource::<Board>().clone();

        let (active, ghost) = match active_piece(world) {
            Some((_, piece, position)) => {
                let ghost = game_state
                    .is_running()
                    .then(|| board.drop_position(&piece, position));
                let active = ActivePiece { piece, position };
                (Some(active), ghost)
            }
            None => (None, None),
        };

        Self {
            board,
            active,
            ghost,
            score: game_state.score,
            level: game_state.level,
            lines: game_state.lines_cleared,
            status: game_state.status,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board.get(x, y)
    }

    /// Ghost cells, skipping any that overlap the active piece.
    #[must_use]
    pub fn ghost_cells(&self) -> Vec<(i32, i32)> {
        let (Some(active), Some(ghost)) = (&self.active, self.ghost) else {
            return Vec::new();
        };

        let occupied: Vec<(i32, i32)> = active.piece.cells_at(active.position).collect();
        active
            .piece
            .cells_at(ghost)
            .filter(|cell| !occupied.contains(cell))
            .collect()
    }
}
