//! Static "player has control" evaluation of a board.
//!
//! The search itself scores moves with UCB1 and random playouts only; this
//! evaluation is available for alternative scoring policies and analysis.

use crate::{BoardState, Player};

/// Reward for each line where `player` holds two cells and the third is free.
pub const THREAT_REWARD: f64 = 0.5;

/// Scores how firmly `player` controls `board`.
///
/// - `f64::INFINITY` if `player` already owns a complete line.
/// - `f64::NEG_INFINITY` if the opponent holds two cells of a line with
///   the third one empty, i.e. threatens to win next turn.
/// - Otherwise [`THREAT_REWARD`] for each of `player`'s own open threats,
///   so a double threat scores `1.0`.
///
/// A completed line takes precedence over any opponent threat.
///
/// # Examples
/// ```rust
/// use ttt_mcts::{control_score, BoardState, Move, Player};
///
/// let board = BoardState::new()
///     .apply(Move::new(1)?, Player::One)?
///     .apply(Move::new(2)?, Player::One)?;
///
/// assert_eq!(control_score(&board, Player::One), 0.5);
/// assert_eq!(control_score(&board, Player::Two), f64::NEG_INFINITY);
/// # Ok::<(), ttt_mcts::BoardError>(())
/// ```
pub fn control_score(board: &BoardState, player: Player) -> f64{
    let opponent = player.opponent();
    let mut reward = 0.0;
    let mut opponent_to_win = false;

    for line in board.winning_lines() {
        let own = line.iter().filter(|cell| cell.is_marked_by(player)).count();
        let theirs = line.iter().filter(|cell| cell.is_marked_by(opponent)).count();

        if own == 3 {
            return f64::INFINITY;
        }
        else if theirs == 2 && own == 0 {
            opponent_to_win = true;
        }
        else if own == 2 && theirs == 0 {
            reward += THREAT_REWARD;
        }
    }

    if opponent_to_win { f64::NEG_INFINITY } else { reward }
}
