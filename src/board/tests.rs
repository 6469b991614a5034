use super::*;
use crate::error::{GameError, MoveRejection};

fn board15() -> Board {
    Board::new(DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH)
}

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Human.opponent(), Stone::Ai);
    assert_eq!(Stone::Ai.opponent(), Stone::Human);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_chebyshev() {
    assert_eq!(Pos::new(7, 7).chebyshev(Pos::new(8, 6)), 1);
    assert_eq!(Pos::new(0, 0).chebyshev(Pos::new(3, 1)), 3);
    assert_eq!(Pos::new(4, 4).chebyshev(Pos::new(4, 4)), 0);
}

#[test]
fn test_board_center() {
    assert_eq!(board15().center(), Pos::new(7, 7));
    assert_eq!(Board::new(8, 5).center(), Pos::new(4, 4));
}

#[test]
fn test_apply_rejects_out_of_bounds() {
    let mut board = board15();
    let err = board.apply(Pos::new(15, 3), Stone::Human).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidMove { row: 15, col: 3, reason: MoveRejection::OutOfBounds }
    ));
    assert!(board.is_board_empty());
}

#[test]
fn test_pos_at_rejects_negative() {
    let board = board15();
    assert!(board.pos_at(-1, 0).is_err());
    assert!(board.pos_at(0, 15).is_err());
    assert_eq!(board.pos_at(14, 14).unwrap(), Pos::new(14, 14));
}

#[test]
fn test_apply_rejects_occupied() {
    let mut board = board15();
    board.apply(Pos::new(7, 7), Stone::Human).unwrap();
    let fp = board.fingerprint();

    let err = board.apply(Pos::new(7, 7), Stone::Ai).unwrap_err();
    assert!(matches!(err, GameError::InvalidMove { reason: MoveRejection::Occupied, .. }));
    assert_eq!(board.get(Pos::new(7, 7)), Stone::Human, "Occupant must be unchanged");
    assert_eq!(board.fingerprint(), fp);
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_apply_undo_round_trip() {
    let mut board = board15();
    board.apply(Pos::new(3, 4), Stone::Human).unwrap();
    board.apply(Pos::new(5, 5), Stone::Ai).unwrap();

    let before: Vec<Stone> = board.positions().map(|p| board.get(p)).collect();
    let fp_before = board.fingerprint();

    board.apply(Pos::new(9, 1), Stone::Ai).unwrap();
    assert_ne!(board.fingerprint(), fp_before);
    board.undo(Pos::new(9, 1));

    let after: Vec<Stone> = board.positions().map(|p| board.get(p)).collect();
    assert_eq!(before, after);
    assert_eq!(board.fingerprint(), fp_before);
    assert_eq!(board.stone_count(), 2);
    assert_eq!(board.last_move(), Some(Pos::new(5, 5)));
}

#[test]
fn test_fingerprint_is_content_hash() {
    // Same stones reached in different orders
    let mut a = board15();
    a.apply(Pos::new(1, 1), Stone::Human).unwrap();
    a.apply(Pos::new(2, 2), Stone::Ai).unwrap();

    let mut b = board15();
    b.apply(Pos::new(2, 2), Stone::Ai).unwrap();
    b.apply(Pos::new(1, 1), Stone::Human).unwrap();

    assert_eq!(a.fingerprint(), b.fingerprint());

    // Same cell, different side
    let mut c = board15();
    c.apply(Pos::new(1, 1), Stone::Ai).unwrap();
    c.apply(Pos::new(2, 2), Stone::Human).unwrap();
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn test_placed_guard_undoes_on_drop() {
    let mut board = board15();
    let fp = board.fingerprint();
    {
        let placed = board.place_scoped(Pos::new(4, 4), Stone::Ai).unwrap();
        assert_eq!(placed.get(Pos::new(4, 4)), Stone::Ai);
        assert_eq!(placed.stone_count(), 1);
    }
    assert!(board.is_empty(Pos::new(4, 4)));
    assert_eq!(board.fingerprint(), fp);
}

#[test]
fn test_placed_guard_undoes_on_early_return() {
    fn place_then_fail(board: &mut Board) -> Result<(), GameError> {
        let mut placed = board.place_scoped(Pos::new(0, 0), Stone::Human)?;
        // Second placement on the same cell fails and returns through `?`
        placed.apply(Pos::new(0, 0), Stone::Ai)?;
        Ok(())
    }

    let mut board = board15();
    assert!(place_then_fail(&mut board).is_err());
    assert!(board.is_board_empty());
    assert_eq!(board.fingerprint(), 0);
}

#[test]
fn test_nested_guards_restore_lifo() {
    let mut board = board15();
    {
        let mut outer = board.place_scoped(Pos::new(7, 7), Stone::Ai).unwrap();
        {
            let inner = outer.place_scoped(Pos::new(7, 8), Stone::Human).unwrap();
            assert_eq!(inner.stone_count(), 2);
        }
        assert_eq!(outer.stone_count(), 1);
        assert_eq!(outer.last_move(), Some(Pos::new(7, 7)));
    }
    assert!(board.is_board_empty());
}

#[test]
fn test_has_neighbor() {
    let mut board = board15();
    board.apply(Pos::new(0, 0), Stone::Human).unwrap();
    assert!(board.has_neighbor(Pos::new(1, 1)));
    assert!(board.has_neighbor(Pos::new(0, 1)));
    assert!(!board.has_neighbor(Pos::new(2, 2)));
    assert!(!board.has_neighbor(Pos::new(0, 0)), "A stone is not its own neighbor");
}

#[test]
fn test_stone_at_off_board_is_empty() {
    let mut board = board15();
    board.apply(Pos::new(0, 0), Stone::Ai).unwrap();
    assert_eq!(board.stone_at(0, 0), Stone::Ai);
    assert_eq!(board.stone_at(-1, 0), Stone::Empty);
    assert_eq!(board.stone_at(0, 15), Stone::Empty);
}

#[test]
fn test_full_board() {
    let mut board = Board::new(3, 3);
    let sides = [Stone::Human, Stone::Ai];
    for (i, pos) in board.positions().collect::<Vec<_>>().into_iter().enumerate() {
        board.apply(pos, sides[i % 2]).unwrap();
    }
    assert!(board.is_full());
    assert_eq!(board.stone_count(), 9);
}
