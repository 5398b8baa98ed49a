//! Tests for board queries and win/draw rules.

use std::collections::HashSet;

use noughts::{Board, CELLS, Mark, Outcome, WIN_LINES};
use strum::IntoEnumIterator;

const P: Mark = Mark::Player;
const O: Mark = Mark::Opponent;
const E: Mark = Mark::Empty;

/// Every position reachable by alternating legal play from `board`.
fn reachable(board: Board, to_move: Mark, seen: &mut HashSet<Board>) {
    if !seen.insert(board) || board.outcome().is_over() {
        return;
    }
    for index in board.get_empty_spaces() {
        let mut next = board;
        next.insert_mark(to_move, index).unwrap();
        reachable(next, to_move.opponent(), seen);
    }
}

fn all_positions() -> HashSet<Board> {
    let mut seen = HashSet::new();
    reachable(Board::new(), Mark::Player, &mut seen);
    reachable(Board::new(), Mark::Opponent, &mut seen);
    seen
}

#[test]
fn test_no_winner_with_at_most_one_mark() {
    assert_eq!(Board::new().check_win_condition(), None);
    for mark in Mark::iter().filter(|m| !m.is_empty()) {
        for index in 0..CELLS {
            let mut board = Board::new();
            board.insert_mark(mark, index).unwrap();
            assert_eq!(board.check_win_condition(), None);
        }
    }
}

#[test]
fn test_every_line_wins_on_empty_board() {
    for mark in [P, O] {
        for line in WIN_LINES {
            let mut board = Board::new();
            for index in line {
                board.insert_mark(mark, index).unwrap();
            }
            assert_eq!(board.check_win_condition(), Some(mark), "line {line:?}");
        }
    }
}

#[test]
fn test_every_line_wins_with_other_cells_filled() {
    for mark in [P, O] {
        for line in WIN_LINES {
            let mut board = Board::new();
            for index in line {
                board.insert_mark(mark, index).unwrap();
            }
            // Fill the rest with the other mark wherever that does not
            // complete a line of its own.
            for index in board.get_empty_spaces() {
                let mut candidate = board;
                candidate.insert_mark(mark.opponent(), index).unwrap();
                let other_wins = WIN_LINES
                    .iter()
                    .any(|l| l.iter().all(|&i| candidate.mark_at(i).unwrap() == mark.opponent()));
                if !other_wins {
                    board = candidate;
                }
            }
            assert!(board.marked_count() > 3);
            assert_eq!(board.check_win_condition(), Some(mark), "line {line:?}");
        }
    }
}

#[test]
fn test_empty_spaces_partition_the_board() {
    for board in all_positions() {
        let empty = board.get_empty_spaces();
        assert_eq!(empty.len() + board.marked_count(), CELLS);
        assert!(empty.windows(2).all(|w| w[0] < w[1]));
        for index in empty {
            assert_eq!(board.mark_at(index).unwrap(), Mark::Empty);
        }
    }
}

#[test]
fn test_queries_are_idempotent() {
    for board in all_positions() {
        assert_eq!(board.check_win_condition(), board.check_win_condition());
        assert_eq!(board.get_empty_spaces(), board.get_empty_spaces());
    }
}

#[test]
fn test_completed_top_row() {
    let board = Board::from_marks([P, P, P, O, O, E, E, E, E]);
    assert_eq!(board.check_win_condition(), Some(Mark::Player));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = Board::from_marks([P, O, P, P, O, O, O, P, P]);
    assert_eq!(board.check_win_condition(), None);
    assert!(board.get_empty_spaces().is_empty());
    assert!(board.is_draw());
    assert_eq!(board.outcome(), Outcome::Draw);
}

#[test]
fn test_full_board_with_line_is_not_draw() {
    let board = Board::from_marks([O, P, O, O, P, O, P, P, P]);
    assert!(board.is_full());
    assert!(!board.is_draw());
    assert_eq!(board.outcome(), Outcome::PlayerWins);
}

#[test]
fn test_board_from_json_fixture() {
    let json = r#"{"cells":["Player","Player","Empty","Opponent","Opponent","Empty","Empty","Empty","Empty"]}"#;
    let board: Board = serde_json::from_str(json).unwrap();
    assert_eq!(board, Board::from_marks([P, P, E, O, O, E, E, E, E]));
    assert_eq!(board.get_empty_spaces(), vec![2, 5, 6, 7, 8]);
}
