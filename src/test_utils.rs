//! Test utilities for the board and the search

use crate::{BoardState, Move, Player};

/// Builds a board from three rows separated by `/`.
///
/// `X` marks player one, `O` player two and `.` an empty cell.
///
/// # Panics
/// On any other character, on rows of the wrong length, or on a wrong row count.
pub fn board_from(rows: &str) -> BoardState{
    let rows: Vec<&str> = rows.split('/').collect();
    assert_eq!(rows.len(), 3, "expected 3 rows");

    let mut board = BoardState::new();

    for (r, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count(), 3, "expected 3 cells in row {}", r);

        for (c, symbol) in row.chars().enumerate() {
            let mv = Move::ALL[r * 3 + c];

            match symbol {
                'X' => board.place(mv, Player::One).expect("fresh cell"),
                'O' => board.place(mv, Player::Two).expect("fresh cell"),
                '.' => {},
                other => panic!("unexpected cell symbol {:?}", other)
            }
        }
    }

    board
}

/// Converts `1..=9` encodings to moves.
pub fn moves(values: &[u8]) -> Vec<Move>{
    values.iter().map(|&v| Move::new(v).expect("valid move")).collect()
}

/// Compares floats with tolerance
pub fn assert_close(a: f64, b: f64){
    assert!((a - b).abs() < 1e-8, "{} != {}", a, b);
}
