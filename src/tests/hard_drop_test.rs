use crate::components::{Board, GameState, PieceType, Position};
use crate::systems::{active_piece, hard_drop};
use crate::tests::test_utils::{current, filled_in_row, running_world_with};
use std::time::Duration;

#[test]
fn test_hard_drop_lands_on_the_floor() {
    let mut world = running_world_with(PieceType::O);
    world.resource_mut::<GameState>().drop_timer = Duration::from_millis(650);
    let entity = active_piece(&mut world).unwrap().0;

    let distance = hard_drop(&mut world);

    assert_eq!(distance, 18);
    let board = world.resource::<Board>();
    for (x, y) in [(3, 18), (4, 18), (3, 19), (4, 19)] {
        assert_eq!(board.get(x, y), Some(PieceType::O));
    }
    assert_eq!(world.resource::<GameState>().drop_timer, Duration::ZERO);

    // A new piece replaced the locked one
    assert!(!world.entities().contains(entity));
    assert_eq!(current(&mut world).1, Position::spawn());
}

#[test]
fn test_hard_drop_stops_on_the_stack() {
    let mut world = running_world_with(PieceType::I);
    world.resource_mut::<Board>().set(5, 15, Some(PieceType::Z));

    let distance = hard_drop(&mut world);

    assert_eq!(distance, 14);
    let board = world.resource::<Board>();
    assert_eq!(filled_in_row(board, 14), 4);
    assert_eq!(board.get(5, 15), Some(PieceType::Z));
}

#[test]
fn test_hard_drop_without_room_locks_in_place() {
    let mut world = running_world_with(PieceType::O);
    world.resource_mut::<Board>().set(3, 2, Some(PieceType::T));

    assert_eq!(hard_drop(&mut world), 0);
    assert_eq!(world.resource::<Board>().get(3, 0), Some(PieceType::O));
}
