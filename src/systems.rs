use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::components::{
    Board, Command, GameState, GameStatus, Piece, PieceRng, PieceType, Position,
    RotationDirection,
};

/// Clears the board, resets the counters and spawns the first piece.
/// Works from any status, so it doubles as restart.
pub fn start_game(world: &mut World) {
    info!("Starting new game");

    despawn_active_piece(world);
    world.resource_mut::<Board>().clear();
    world.resource_mut::<GameState>().restart();

    spawn_piece(world);
}

pub fn spawn_piece(world: &mut World) {
    let piece_type = world.resource_mut::<PieceRng>().next_type();
    spawn_specific_piece(world, piece_type);
}

/// Replaces the active piece with a fresh `piece_type` at the spawn point. A blocked
/// spawn still becomes the active piece, but ends the game.
pub fn spawn_specific_piece(world: &mut World, piece_type: PieceType) {
    despawn_active_piece(world);

    let piece = Piece::new(piece_type);
    let position = Position::spawn();
    let blocked = world.resource::<Board>().collides(&piece, position);

    debug!("Spawning {piece_type:?} at ({}, {})", position.x, position.y);
    world.spawn((piece, position));

    if blocked {
        info!("Spawn of {piece_type:?} is blocked, game over");
        world.resource_mut::<GameState>().status = GameStatus::GameOver;
    }
}

/// The active piece with its entity, if one exists.
pub fn active_piece(world: &mut World) -> Option<(Entity, Piece, Position)> {
    let mut query = world.query::<(Entity, &Piece, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece, position)| (entity, piece.clone(), *position))
}

fn despawn_active_piece(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<Piece>>()
        .iter(world)
        .collect();

    for entity in entities {
        world.despawn(entity);
    }
}

// Input and gravity only act on a piece while the game runs
fn playable_piece(world: &mut World) -> Option<(Entity, Piece, Position)> {
    if !world.resource::<GameState>().is_running() {
        return None;
    }
    active_piece(world)
}

fn set_position(world: &mut World, entity: Entity, position: Position) {
    if let Some(mut current) = world.get_mut::<Position>(entity) {
        *current = position;
    }
}

/// Shifts the active piece `dx` columns. Returns `false` if the move was blocked.
pub fn move_piece(world: &mut World, dx: i32) -> bool {
    let Some((entity, piece, position)) = playable_piece(world) else {
        return false;
    };

    let target = position.offset(dx, 0);
    if world.resource::<Board>().collides(&piece, target) {
        return false;
    }

    set_position(world, entity, target);
    true
}

/// Moves the active piece one row down, locking it when the row below is blocked.
/// Resets the gravity timer either way.
pub fn soft_drop(world: &mut World) {
    let Some((entity, piece, position)) = playable_piece(world) else {
        return;
    };

    let below = position.offset(0, 1);
    if world.resource::<Board>().collides(&piece, below) {
        lock_piece(world, entity, &piece, position);
    } else {
        set_position(world, entity, below);
    }

    world.resource_mut::<GameState>().drop_timer = Duration::ZERO;
}

/// Drops the active piece straight to its landing row and locks it there.
/// Returns the number of rows travelled.
pub fn hard_drop(world: &mut World) -> u32 {
    let Some((entity, piece, position)) = playable_piece(world) else {
        return 0;
    };

    let landing = world.resource::<Board>().drop_position(&piece, position);
    let distance = u32::try_from(landing.y - position.y).unwrap_or(0);
    debug!("Hard drop of {:?} over {distance} rows", piece.piece_type);

    lock_piece(world, entity, &piece, landing);
    world.resource_mut::<GameState>().drop_timer = Duration::ZERO;

    distance
}

/// Rotates the active piece with kick correction. Returns `false` if it stayed put.
pub fn rotate_piece(world: &mut World, direction: RotationDirection) -> bool {
    let Some((entity, mut piece, mut position)) = playable_piece(world) else {
        return false;
    };

    let rotated = world
        .resource::<Board>()
        .rotate_with_kick(&mut piece, &mut position, direction);

    if rotated {
        world.entity_mut(entity).insert((piece, position));
    }
    rotated
}

fn lock_piece(world: &mut World, entity: Entity, piece: &Piece, position: Position) {
    info!(
        "Locking {:?} at ({}, {})",
        piece.piece_type, position.x, position.y
    );

    let rows = {
        let mut board = world.resource_mut::<Board>();
        board.merge(piece, position);
        board.clear_full_rows()
    };

    if rows > 0 {
        let mut game_state = world.resource_mut::<GameState>();
        let points = game_state.apply_line_clear(rows);
        info!(
            "Cleared {rows} rows for {points} points (lines {}, level {})",
            game_state.lines_cleared, game_state.level
        );
    }

    world.despawn(entity);
    spawn_piece(world);
}

/// Advances gravity by `delta`. Once the accumulated time exceeds the level's drop
/// interval the piece falls one row.
pub fn game_tick_system(world: &mut World, delta: Duration) {
    trace!("Game tick with delta: {delta:?}");

    let should_drop = {
        let mut game_state = world.resource_mut::<GameState>();
        if !game_state.is_running() {
            return;
        }
        game_state.drop_timer = game_state.drop_timer.saturating_add(delta);
        game_state.drop_timer > game_state.drop_interval
    };

    if should_drop {
        soft_drop(world);
    }
}

/// Routes one player command into the state machine. Everything but `Start` is
/// ignored unless the game is running.
pub fn apply_command(world: &mut World, command: Command) {
    let status = world.resource::<GameState>().status;
    if command != Command::Start && status != GameStatus::Running {
        debug!("Ignoring {command:?} while {status:?}");
        return;
    }

    debug!("Applying {command:?}");
    match command {
        Command::MoveLeft => {
            move_piece(world, -1);
        }
        Command::MoveRight => {
            move_piece(world, 1);
        }
        Command::SoftDrop => soft_drop(world),
        Command::HardDrop => {
            hard_drop(world);
        }
        Command::RotateClockwise => {
            rotate_piece(world, RotationDirection::Clockwise);
        }
        Command::RotateCounterClockwise => {
            rotate_piece(world, RotationDirection::CounterClockwise);
        }
        Command::Start => start_game(world),
    }
}
