#[cfg(test)]
mod tests {
    use crate::components::{
        Board, GameState, GameStatus, PieceType, Position, RotationDirection,
    };
    use crate::snapshot::Snapshot;
    use crate::systems::{rotate_piece, spawn_piece};
    use crate::tests::test_utils::{create_test_world, current, running_world_with};

    #[test]
    fn test_snapshot_before_start() {
        let mut world = create_test_world();
        let snapshot = Snapshot::capture(&mut world);

        assert_eq!(snapshot.status, GameStatus::NotStarted);
        assert!(snapshot.active.is_none());
        assert!(snapshot.ghost.is_none());
        assert!(snapshot.ghost_cells().is_empty());
        assert_eq!((snapshot.score, snapshot.level, snapshot.lines), (0, 1, 0));
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut world = running_world_with(PieceType::S);
        world.resource_mut::<Board>().set(9, 19, Some(PieceType::J));
        world.resource_mut::<GameState>().score = 1200;

        let snapshot = Snapshot::capture(&mut world);

        assert!(snapshot.is_running());
        assert_eq!(snapshot.score, 1200);
        assert_eq!(snapshot.cell(9, 19), Some(PieceType::J));
        let active = snapshot.active.as_ref().unwrap();
        assert_eq!(active.piece.piece_type, PieceType::S);
        assert_eq!(active.position, Position::spawn());

        // Later changes to the world do not leak into the snapshot
        world.resource_mut::<Board>().clear();
        assert_eq!(snapshot.cell(9, 19), Some(PieceType::J));
    }

    #[test]
    fn test_snapshot_carries_rotated_piece() {
        let mut world = running_world_with(PieceType::T);
        assert!(rotate_piece(&mut world, RotationDirection::Clockwise));
        let (piece, position) = current(&mut world);

        let snapshot = Snapshot::capture(&mut world);
        let active = snapshot.active.as_ref().unwrap();

        assert_eq!(active.piece, piece);
        assert_eq!(active.position, position);
        let cells: Vec<(i32, i32)> = active.piece.cells_at(active.position).collect();
        let expected: Vec<(i32, i32)> = piece.cells_at(position).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_ghost_tracks_landing_row() {
        let mut world = running_world_with(PieceType::O);

        let snapshot = Snapshot::capture(&mut world);
        assert_eq!(snapshot.ghost, Some(Position { x: 3, y: 18 }));
        assert_eq!(snapshot.ghost_cells().len(), 4);

        world.resource_mut::<Board>().set(3, 5, Some(PieceType::T));
        let snapshot = Snapshot::capture(&mut world);
        assert_eq!(snapshot.ghost, Some(Position { x: 3, y: 3 }));
    }

    #[test]
    fn test_ghost_cells_skip_the_active_piece() {
        let mut world = running_world_with(PieceType::I);
        world.resource_mut::<Board>().set(4, 1, Some(PieceType::T));

        // Already resting: the ghost sits exactly on the piece
        let snapshot = Snapshot::capture(&mut world);
        assert_eq!(snapshot.ghost, Some(Position::spawn()));
        assert!(snapshot.ghost_cells().is_empty());
    }

    #[test]
    fn test_no_ghost_after_game_over() {
        let mut world = running_world_with(PieceType::O);
        {
            let mut board = world.resource_mut::<Board>();
            for y in 0..20 {
                board.set(3, y, Some(PieceType::Z));
                board.set(4, y, Some(PieceType::Z));
            }
        }
        spawn_piece(&mut world);

        let snapshot = Snapshot::capture(&mut world);
        assert!(snapshot.is_game_over());
        assert!(snapshot.active.is_some());
        assert!(snapshot.ghost.is_none());
    }
}
