//! A Monte Carlo Tree Search (MCTS) move-selection engine for 3x3 tic-tac-toe.
//!
//! The engine grows a search tree from the current board with repeated
//! select, expand, simulate and backpropagate cycles. Selection follows the
//! UCB1 formula, simulations are uniformly random playouts, and the move
//! finally chosen is the most visited child of the root.
//!
//! # Modules
//! - `game`: Players, cells, moves (`1..=9`, row-major) and outcomes.
//! - `board`: The 3x3 board, move legality and win/stalemate detection.
//! - `tree`: Arena-backed tree used by the search.
//! - `mcts`: The search itself and its configuration.
//! - `heuristic`: A static "player has control" board evaluation.
//! - `utils`: Random selection helpers.
//! - `test_utils`: Board builders used by the tests.
//!
//! # Examples
//! ```rust
//! use ttt_mcts::{choose_move, BoardState, MctsError, Move, Player};
//!
//! fn main() -> Result<(), MctsError> {
//!     // Player one opened in the center; let the engine answer for player two.
//!     let mut board = BoardState::new();
//!     board.place(Move::new(5)?, Player::One)?;
//!
//!     let reply = choose_move(Player::One, &board, 700)?;
//!     board.place(reply, Player::Two)?;
//!
//!     assert_eq!(board.available_moves().len(), 7);
//!     Ok(())
//! }
//! ```
//!
//! The engine does not detect the end of the game: callers check
//! [`BoardState::has_winner`] and [`BoardState::is_full`] before asking for a move.

mod game;
mod board;
mod heuristic;
mod mcts;
pub mod tree;
pub mod utils;

#[doc(hidden)]
pub mod test_utils;

pub use game::*;
pub use board::*;
pub use heuristic::*;
pub use mcts::*;
