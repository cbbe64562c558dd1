use super::*;
use crate::rules::GameState;

fn params(rows: u16, cols: u16, k: u16) -> MnkParams {
    MnkParams::new(rows, cols, k)
}

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_move_equality_ignores_mark() {
    assert_eq!(Move::new(1, 2, Mark::X), Move::new(1, 2, Mark::O));
    assert_ne!(Move::new(1, 2, Mark::X), Move::new(2, 1, Mark::X));
}

#[test]
fn test_index_conversion() {
    let p = params(3, 5, 3);
    assert_eq!(p.cells(), 15);
    assert_eq!(p.to_index(Pos::new(2, 4)), 14);
    assert_eq!(p.from_index(7), Pos::new(1, 2));
    assert!(p.contains(Pos::new(2, 4)));
    assert!(!p.contains(Pos::new(3, 0)));
    assert!(!p.contains(Pos::new(0, 5)));
}

#[test]
fn test_offset_stays_on_board() {
    let p = params(3, 3, 3);
    assert_eq!(Pos::new(0, 0).offset(1, 1, &p), Some(Pos::new(1, 1)));
    assert_eq!(Pos::new(0, 0).offset(-1, 0, &p), None);
    assert_eq!(Pos::new(2, 2).offset(0, 1, &p), None);
}

#[test]
fn test_params_well_formed() {
    assert!(params(3, 3, 3).is_well_formed());
    assert!(!params(0, 3, 3).is_well_formed());
    assert!(!params(3, 3, 0).is_well_formed());
}

#[test]
fn test_place_and_remove() {
    let mut board = Board::new(params(3, 3, 3));
    assert!(board.is_board_empty());

    board.place(Pos::new(1, 1), Mark::X);
    assert_eq!(board.get(Pos::new(1, 1)), Mark::X);
    assert!(!board.is_free(Pos::new(1, 1)));
    assert_eq!(board.stone_count(), 1);

    board.remove(Pos::new(1, 1));
    assert!(board.is_free(Pos::new(1, 1)));
    assert!(board.is_board_empty());
}

#[test]
fn test_place_guard_restores_cell() {
    let mut board = Board::new(params(3, 3, 3));
    {
        let guard = board.place_guarded(Pos::new(0, 2), Mark::O);
        assert_eq!(guard.get(Pos::new(0, 2)), Mark::O);
    }
    assert!(board.is_free(Pos::new(0, 2)));
}

#[test]
fn test_lift_guard_restores_mark() {
    let mut board = Board::new(params(3, 3, 3));
    board.place(Pos::new(2, 0), Mark::X);
    {
        let guard = board.lift_guarded(Pos::new(2, 0));
        assert!(guard.is_free(Pos::new(2, 0)));
    }
    assert_eq!(board.get(Pos::new(2, 0)), Mark::X);
}

#[test]
fn test_guard_restores_on_loop_break() {
    let mut board = Board::new(params(3, 3, 3));
    board.place(Pos::new(1, 1), Mark::X);
    let cells: Vec<Pos> = board.params().positions().collect();

    let mut tried = 0;
    for pos in cells {
        if !board.is_free(pos) {
            continue;
        }
        let mut placed = board.place_guarded(pos, Mark::O);
        tried += 1;
        placed.refresh_distance_at(Pos::new(2, 2));
        if tried == 3 {
            break;
        }
    }

    assert_eq!(tried, 3);
    assert_eq!(board.stone_count(), 1);
    assert_eq!(board.get(Pos::new(1, 1)), Mark::X);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "read without refresh")]
fn test_stale_distance_read_panics() {
    let mut board = Board::new(params(3, 3, 3));
    board.refresh_distance_at(Pos::new(0, 0));
    board.place(Pos::new(1, 1), Mark::X);
    let _ = board.moves_to_win(Pos::new(0, 0), Mark::X);
}

#[test]
fn test_full_board_detection() {
    let mut board = Board::new(params(1, 2, 2));
    board.place(Pos::new(0, 0), Mark::X);
    assert!(!board.is_full());
    board.place(Pos::new(0, 1), Mark::O);
    assert!(board.is_full());
}

#[test]
fn test_distance_through_free_cell() {
    let mut board = Board::new(params(3, 3, 3));
    board.place(Pos::new(0, 0), Mark::X);
    board.place(Pos::new(0, 1), Mark::X);

    board.refresh_distance_at(Pos::new(0, 2));
    assert_eq!(board.moves_to_win(Pos::new(0, 2), Mark::X), 1);
    // Every line through (0, 2) that O could use is still empty
    assert_eq!(board.moves_to_win(Pos::new(0, 2), Mark::O), 3);
}

#[test]
fn test_distance_unreachable_is_k_plus_one() {
    // 2x2 board cannot hold a run of 3
    let mut board = Board::new(params(2, 2, 3));
    board.refresh_distance_at(Pos::new(0, 0));
    assert_eq!(board.moves_to_win(Pos::new(0, 0), Mark::X), 4);
    assert_eq!(board.moves_to_win(Pos::new(0, 0), Mark::O), 4);
}

#[test]
fn test_paired_mutation_is_idempotent() {
    let p = params(4, 4, 3);
    let mut board = Board::new(p);
    board.place(Pos::new(1, 1), Mark::X);
    board.place(Pos::new(2, 2), Mark::O);

    let snapshot = |board: &mut Board| -> Vec<(Mark, u32, u32)> {
        p.positions()
            .map(|pos| {
                board.refresh_distance_at(pos);
                (
                    board.get(pos),
                    board.moves_to_win(pos, Mark::X),
                    board.moves_to_win(pos, Mark::O),
                )
            })
            .collect()
    };
    let before = snapshot(&mut board);

    board.place(Pos::new(0, 3), Mark::X);
    board.remove(Pos::new(0, 3));
    {
        let _lifted = board.lift_guarded(Pos::new(1, 1));
    }
    {
        let _placed = board.place_guarded(Pos::new(3, 0), Mark::O);
    }

    assert_eq!(snapshot(&mut board), before);
}

#[test]
fn test_exact_status_delegates() {
    let mut board = Board::new(params(3, 3, 3));
    for c in 0..3 {
        board.place(Pos::new(1, c), Mark::O);
    }
    assert_eq!(board.exact_status(Pos::new(1, 2)), GameState::Won(Mark::O));
}
