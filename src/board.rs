//! The 3x3 grid, move legality and terminal-condition detection.
//!
//! A [`BoardState`] is a small `Copy` value. Search nodes hold their own
//! snapshot produced by [`BoardState::apply`]; only the driver's
//! authoritative board is ever changed in place through [`BoardState::place`].

use thiserror::Error;

use crate::{Cell, Move, Player};

/// Cell indices of the 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6]
];

/// Errors raised when addressing or updating a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError{
    /// The integer does not encode a cell (`1..=9`).
    #[error("move {0} is out of range, expected 1 to 9")]
    OutOfRange(u8),
    /// The targeted cell already carries a mark.
    #[error("cell {0} is already occupied")]
    Occupied(Move)
}

/// State of a 3x3 board.
///
/// `available` mirrors emptiness of `cells` so a single scan yields the
/// available moves: `available[i] == cells[i].is_empty()` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState{
    cells: [Cell; 9],
    available: [bool; 9]
}

impl BoardState{
    /// Creates an empty board.
    ///
    /// # Examples
    /// ```rust
    /// use ttt_mcts::BoardState;
    /// let board = BoardState::new();
    /// assert_eq!(board.available_moves().len(), 9);
    /// assert!(!board.has_winner());
    /// ```
    pub fn new() -> Self{
        BoardState { cells: [Cell::Empty; 9], available: [true; 9] }
    }

    /// Content of the cell addressed by `mv`.
    #[inline]
    pub fn cell(&self, mv: Move) -> Cell{
        self.cells[mv.index()]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell; 9]{
        &self.cells
    }

    /// `true` iff the target cell is empty.
    ///
    /// This does not look at whether the game is already won; see
    /// [`BoardState::available_moves`] for that.
    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool{
        self.available[mv.index()]
    }

    /// Returns a copy of this board with `player`'s mark on `mv`.
    ///
    /// `self` is left untouched.
    ///
    /// # Returns
    /// `Err(BoardError::Occupied(mv))` if the cell is not empty.
    ///
    /// # Examples
    /// ```rust
    /// use ttt_mcts::{BoardState, Move, Player};
    /// let board = BoardState::new();
    /// let center = Move::new(5)?;
    /// let next = board.apply(center, Player::One)?;
    ///
    /// assert!(!next.is_legal(center));
    /// assert!(board.is_legal(center));
    /// # Ok::<(), ttt_mcts::BoardError>(())
    /// ```
    pub fn apply(&self, mv: Move, player: Player) -> Result<BoardState, BoardError>{
        let mut next = *self;
        next.place(mv, player)?;
        Ok(next)
    }

    /// Puts `player`'s mark on `mv` in place.
    ///
    /// Meant for the single authoritative board owned by a game driver.
    /// Snapshots stored in the search tree are never changed this way.
    pub fn place(&mut self, mv: Move, player: Player) -> Result<(), BoardError>{
        if !self.is_legal(mv) {
            return Err(BoardError::Occupied(mv));
        }

        self.cells[mv.index()] = Cell::Mark(player);
        self.available[mv.index()] = false;
        Ok(())
    }

    /// Empty cells in row-major order.
    ///
    /// A board that already has a winner has no continuation: the result is
    /// empty even if some cells are still free.
    pub fn available_moves(&self) -> Vec<Move>{
        if self.has_winner() {
            return Vec::new();
        }

        self.available.iter()
            .enumerate()
            .filter(|(_, free)| **free)
            .map(|(index, _)| Move::from_index(index))
            .collect()
    }

    /// The 8 candidate lines, each as the 3 cell values along it.
    pub fn winning_lines(&self) -> [[Cell; 3]; 8]{
        LINES.map(|line| line.map(|index| self.cells[index]))
    }

    /// Owner of the first complete line, if any.
    pub fn winner(&self) -> Option<Player>{
        self.winning_lines().into_iter().find_map(|[a, b, c]| {
            match a {
                Cell::Mark(player) if a == b && b == c => Some(player),
                _ => None
            }
        })
    }

    #[inline]
    pub fn has_winner(&self) -> bool{
        self.winner().is_some()
    }

    /// `true` iff no cell is empty.
    #[inline]
    pub fn is_full(&self) -> bool{
        self.available.iter().all(|&free| !free)
    }

    /// Full board without a winner.
    #[inline]
    pub fn is_stalemate(&self) -> bool{
        self.is_full() && !self.has_winner()
    }

    /// Whether the game is over, by a win or by a full board.
    #[inline]
    pub fn is_terminal(&self) -> bool{
        self.has_winner() || self.is_full()
    }
}

impl Default for BoardState{
    fn default() -> Self{
        Self::new()
    }
}
