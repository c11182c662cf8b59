//! Value types shared by the board and the search: players, cells, moves and outcomes.

use std::fmt;

use crate::BoardError;

/// One of the two players.
///
/// Players are identified on the outside by the integers `1` and `2`.
/// `Player::One` traditionally plays `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player{
    One,
    Two
}

impl Player{
    /// Returns the other player.
    ///
    /// # Examples
    /// ```rust
    /// use ttt_mcts::Player;
    /// assert_eq!(Player::One.opponent(), Player::Two);
    /// assert_eq!(Player::Two.opponent(), Player::One);
    /// ```
    #[inline]
    pub fn opponent(self) -> Player{
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One
        }
    }

    /// Numeric identifier of the player (`1` or `2`).
    #[inline]
    pub fn id(self) -> u8{
        match self {
            Player::One => 1,
            Player::Two => 2
        }
    }

    /// Parses a numeric identifier. Anything other than `1` or `2` yields `None`.
    #[inline]
    pub fn from_id(id: u8) -> Option<Player>{
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None
        }
    }
}

impl fmt::Display for Player{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        write!(f, "{}", self.id())
    }
}

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell{
    #[default]
    Empty,
    Mark(Player)
}

impl Cell{
    #[inline]
    pub fn is_empty(self) -> bool{
        self == Cell::Empty
    }

    /// Whether the cell carries `player`'s mark.
    #[inline]
    pub fn is_marked_by(self, player: Player) -> bool{
        self == Cell::Mark(player)
    }
}

/// A move, addressing one of the nine cells.
///
/// Moves are encoded as the integers `1..=9` in row-major order:
///
/// ```text
/// 1 | 2 | 3
/// 4 | 5 | 6
/// 7 | 8 | 9
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move{
    /// Every move in row-major order.
    pub const ALL: [Move; 9] = [
        Move(1), Move(2), Move(3),
        Move(4), Move(5), Move(6),
        Move(7), Move(8), Move(9)
    ];

    /// Creates a move from its `1..=9` encoding.
    ///
    /// # Returns
    /// `Err(BoardError::OutOfRange(value))` if `value` does not address a cell.
    ///
    /// # Examples
    /// ```rust
    /// use ttt_mcts::Move;
    /// assert_eq!(Move::new(5).unwrap().index(), 4);
    /// assert!(Move::new(0).is_err());
    /// assert!(Move::new(10).is_err());
    /// ```
    #[inline]
    pub fn new(value: u8) -> Result<Move, BoardError>{
        if (1..=9).contains(&value) {
            Ok(Move(value))
        }
        else{
            Err(BoardError::OutOfRange(value))
        }
    }

    /// Builds the move addressing the cell at `index` (`0..9`).
    #[inline]
    pub(crate) fn from_index(index: usize) -> Move{
        Move::ALL[index]
    }

    /// The `1..=9` encoding.
    #[inline]
    pub fn value(self) -> u8{
        self.0
    }

    /// Zero-based cell index in row-major order.
    #[inline]
    pub fn index(self) -> usize{
        (self.0 - 1) as usize
    }

    #[inline]
    pub fn row(self) -> usize{
        self.index() / 3
    }

    #[inline]
    pub fn col(self) -> usize{
        self.index() % 3
    }
}

impl TryFrom<u8> for Move{
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error>{
        Move::new(value)
    }
}

impl fmt::Display for Move{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        write!(f, "{}", self.0)
    }
}

/// Result of a finished (real or simulated) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome{
    Win(Player),
    Draw
}

impl Outcome{
    /// Sentinel used for a drawn game, distinct from both player ids.
    pub const DRAW_CODE: u8 = 0;

    /// Numeric form: the winner's id, or [`Outcome::DRAW_CODE`] for a draw.
    ///
    /// # Examples
    /// ```rust
    /// use ttt_mcts::{Outcome, Player};
    /// assert_eq!(Outcome::Win(Player::Two).code(), 2);
    /// assert_eq!(Outcome::Draw.code(), 0);
    /// ```
    #[inline]
    pub fn code(self) -> u8{
        match self {
            Outcome::Win(player) => player.id(),
            Outcome::Draw => Self::DRAW_CODE
        }
    }

    /// Reward credited to a node whose move was made by `player`:
    /// `1` for a win, `0.5` for a draw, `0` for a loss.
    #[inline]
    pub fn reward_for(self, player: Player) -> f64{
        match self {
            Outcome::Win(winner) if winner == player => 1.0,
            Outcome::Win(_) => 0.0,
            Outcome::Draw => 0.5
        }
    }
}
