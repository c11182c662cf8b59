//! Monte Carlo Tree Search move selection for tic-tac-toe.
//!
//! A search grows a tree rooted at the current real board through repeated
//! playouts. Each playout runs four phases:
//!
//! 1. **Selection**: descend from the root with UCB1 until a node that still
//!    has untried moves, or has no children at all.
//! 2. **Expansion**: turn one untried move, drawn uniformly at random, into a
//!    new child.
//! 3. **Simulation**: play uniformly random moves from that child until the
//!    game ends.
//! 4. **Backpropagation**: credit every node on the way back to the root
//!    according to whether the player who made its move won, drew or lost.
//!
//! The move finally returned is the one of the most visited root child.
//! The whole tree is dropped afterwards; nothing is carried over to the next turn.

use std::f64::consts::SQRT_2;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::tree::{NodeId, Tree};
use crate::{control_score, utils, BoardError, BoardState, Move, Outcome, Player};

/// The textbook UCB1 exploration weight.
///
/// The search itself uses [`SearchConfig::exploration_coef`], which defaults to `1.0`.
pub const DEFAULT_EXPLORATION: f64 = SQRT_2;

/// Errors that can occur while choosing a move.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MctsError{
    /// The root board is already won or full. The caller is expected to
    /// detect the end of the game before asking for a move.
    #[error("no legal moves available from the root board")]
    NoLegalMoves,
    /// A search needs at least one playout to rank the root moves.
    #[error("playout budget must be at least 1")]
    ZeroBudget,
    /// A board update was rejected.
    #[error(transparent)]
    Board(#[from] BoardError)
}

/// Data stored in each node of the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode{
    /// Player whose move produced `board`. For the root, the player who made
    /// the latest real move.
    mover: Player,
    /// Snapshot owned by this node, never modified after creation.
    board: BoardState,
    /// Move that produced this node from its parent, `None` for the root.
    mv: Option<Move>,
    /// Legal moves not yet expanded into children. Only ever shrinks.
    untried: Vec<Move>,
    /// Accumulated reward: `1` per win of `mover`, `0.5` per draw.
    wins: f64,
    /// Number of playouts backpropagated through this node.
    visits: u32
}

impl SearchNode{
    fn new(mover: Player, board: BoardState, mv: Option<Move>) -> Self{
        SearchNode {
            mover,
            board,
            mv,
            untried: board.available_moves(),
            wins: 0.0,
            visits: 0
        }
    }

    #[inline]
    pub fn mover(&self) -> Player{
        self.mover
    }

    #[inline]
    pub fn board(&self) -> &BoardState{
        &self.board
    }

    /// Move that led to this node, `None` for the root.
    #[inline]
    pub fn last_move(&self) -> Option<Move>{
        self.mv
    }

    #[inline]
    pub fn untried(&self) -> &[Move]{
        &self.untried
    }

    #[inline]
    pub fn wins(&self) -> f64{
        self.wins
    }

    #[inline]
    pub fn visits(&self) -> u32{
        self.visits
    }

    /// Average reward (`wins / visits`). Returns `0.0` if the node was never visited.
    #[inline]
    pub fn value(&self) -> f64{
        if self.visits != 0 { self.wins / self.visits as f64 } else { 0.0 }
    }

    /// Static control evaluation of this node's board for its mover.
    ///
    /// See [`control_score`]. Not used by the search.
    #[inline]
    pub fn control(&self) -> f64{
        control_score(&self.board, self.mover)
    }

    /// Adds one playout result to the node's statistics.
    #[inline]
    fn record(&mut self, outcome: Outcome){
        self.visits += 1;
        self.wins += outcome.reward_for(self.mover);
    }
}

/// Configuration parameters for a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig{
    /// Number of select/expand/simulate/backpropagate cycles. Must be at least 1.
    pub playouts: usize,
    /// Weight of the exploration term in UCB1.
    pub exploration_coef: f64
}

impl SearchConfig{
    /// The default search configuration.
    ///
    /// - `playouts`: `700`.
    /// - `exploration_coef`: `1.0`.
    pub const DEFAULT: SearchConfig = SearchConfig {
        playouts: 700,
        exploration_coef: 1.0
    };

    /// Builder pattern: set the playout budget.
    pub fn with_playouts(mut self, playouts: usize) -> Self{
        self.playouts = playouts;
        self
    }

    /// Builder pattern: set the UCB1 exploration weight.
    pub fn with_exploration_coef(mut self, coef: f64) -> Self{
        self.exploration_coef = coef;
        self
    }
}

impl Default for SearchConfig{
    fn default() -> Self{
        Self::DEFAULT
    }
}

/// Statistics of one root move after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStatistics{
    pub mv: Move,
    pub visits: u32,
    pub wins: f64
}

impl MoveStatistics{
    /// Share of the reward won by the mover on this move, `0.0` if never visited.
    pub fn win_rate(&self) -> f64{
        if self.visits != 0 { self.wins / self.visits as f64 } else { 0.0 }
    }
}

/// The Upper Confidence Bound 1 (UCB1) selection score.
///
/// `wins / visits + exploration_coef * sqrt(ln(parent_visits) / visits)`
///
/// # Parameters
/// - `wins`: Accumulated reward of the child.
/// - `visits`: Number of visits of the child.
/// - `parent_visits`: Number of visits of the parent.
/// - `exploration_coef`: The exploration weight.
///
/// # Returns
/// The UCB1 score, or `f64::INFINITY` for a child that was never visited so
/// that every child is tried once before any is tried twice.
///
/// # Examples
/// ```rust
/// use ttt_mcts::ucb1;
/// assert_eq!(ucb1(0.0, 0, 10, 1.0), f64::INFINITY);
/// assert!((ucb1(2.0, 4, 4, 0.0) - 0.5).abs() < 1e-12);
/// ```
pub fn ucb1(wins: f64, visits: u32, parent_visits: u32, exploration_coef: f64) -> f64{
    if visits == 0 {
        return f64::INFINITY;
    }

    let visits = visits as f64;
    let exploitation = wins / visits;
    let exploration = exploration_coef * ((parent_visits as f64).ln() / visits).sqrt();

    exploitation + exploration
}

/// A search tree rooted at one real board.
///
/// Build one per turn with [`Mcts::new`] or [`Mcts::from_config`], run it,
/// read the move, and drop it.
///
/// # Examples
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
/// use ttt_mcts::{BoardState, Mcts, MctsError, Move, Player, SearchConfig};
///
/// fn main() -> Result<(), MctsError> {
///     let board = BoardState::new().apply(Move::new(5)?, Player::One)?;
///     let mut mcts = Mcts::from_config(Player::One, board, SearchConfig::DEFAULT.with_playouts(200));
///     let mut rng = StdRng::seed_from_u64(42);
///
///     let mv = mcts.run(&mut rng)?;
///
///     assert!(board.is_legal(mv));
///     assert_eq!(mcts.count_visit(), 200);
///     Ok(())
/// }
/// ```
pub struct Mcts{
    tree: Tree<SearchNode>,
    config: SearchConfig
}

impl Mcts{
    /// Creates a search with the default configuration.
    ///
    /// # Parameters
    /// - `root_player`: The player who made the latest real move on `board`.
    ///   The search chooses a move for their opponent.
    /// - `board`: The current real board.
    #[inline]
    pub fn new(root_player: Player, board: BoardState) -> Self{
        Self::from_config(root_player, board, SearchConfig::DEFAULT)
    }

    /// Creates a search with a specific configuration.
    pub fn from_config(root_player: Player, board: BoardState, config: SearchConfig) -> Self{
        Mcts {
            tree: Tree::new(SearchNode::new(root_player, board, None)),
            config
        }
    }

    /// Read-only view of the search tree.
    #[inline]
    pub fn tree(&self) -> &Tree<SearchNode>{
        &self.tree
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig{
        &self.config
    }

    /// Score of `child` seen from its parent during selection.
    #[inline]
    fn selection_score(&self, parent: NodeId, child: NodeId) -> f64{
        let parent_visits = self.tree.get(parent).visits;
        let child = self.tree.get(child);

        ucb1(child.wins, child.visits, parent_visits, self.config.exploration_coef)
    }

    /// Performs the selection phase.
    ///
    /// # Returns
    /// The first node on the UCB1 path that still has untried moves or has
    /// no children. Terminal nodes never get children, so they end the
    /// descent too.
    fn select(&self) -> NodeId{
        let mut current = self.tree.root();

        loop {
            let node = self.tree.node(current);

            if !node.get().untried.is_empty() || node.children().is_empty() {
                return current;
            }

            let best = utils::first_max_by_key(node.children().iter().copied(), |&child| {
                self.selection_score(current, child)
            });

            match best {
                Some(child) => current = child,
                None => return current
            }
        }
    }

    /// Performs the expansion phase.
    ///
    /// # Parameters
    /// - `leaf`: The node returned by the selection phase.
    /// - `rng`: The random source used to draw the untried move.
    ///
    /// # Returns
    /// The new child, or `leaf` itself if it has no untried move left.
    fn expand<R: Rng>(&mut self, leaf: NodeId, rng: &mut R) -> Result<NodeId, MctsError>{
        let node = self.tree.get_mut(leaf);

        let Some(mv) = utils::take(&mut node.untried, rng) else {
            return Ok(leaf);
        };

        let player = node.mover.opponent();
        let board = node.board.apply(mv, player)?;

        Ok(self.tree.add_child(leaf, SearchNode::new(player, board, Some(mv))))
    }

    /// Performs the simulation phase: a uniformly random rollout from `node`.
    ///
    /// The rollout works on a scratch copy of the node's board.
    ///
    /// # Returns
    /// The winner as soon as a line is completed, or [`Outcome::Draw`] once
    /// the board is full.
    fn simulate<R: Rng>(&self, node: NodeId, rng: &mut R) -> Result<Outcome, MctsError>{
        let start = self.tree.get(node);
        let mut board = start.board;
        let mut player = start.mover;

        loop {
            if let Some(winner) = board.winner() {
                return Ok(Outcome::Win(winner));
            }
            if board.is_full() {
                return Ok(Outcome::Draw);
            }

            player = player.opponent();
            let mv = utils::pick(&board.available_moves(), rng).ok_or(MctsError::NoLegalMoves)?;
            board.place(mv, player)?;
        }
    }

    /// Performs the backpropagation phase from `node` up to the root, included.
    fn backpropagate(&mut self, node: NodeId, outcome: Outcome){
        let path: Vec<NodeId> = self.tree.ancestors(node).collect();

        for id in path {
            self.tree.get_mut(id).record(outcome);
        }
    }

    /// Performs one full playout (selection, expansion, simulation, backpropagation).
    ///
    /// # Returns
    /// `Err(MctsError::Board(_))` if a board update was rejected, which
    /// only happens if the tree has been corrupted.
    pub fn playout<R: Rng>(&mut self, rng: &mut R) -> Result<(), MctsError>{
        let leaf = self.select();
        let child = self.expand(leaf, rng)?;
        let outcome = self.simulate(child, rng)?;
        self.backpropagate(child, outcome);

        trace!(
            node = child.index(),
            depth = self.tree.depth(child),
            result = outcome.code(),
            "playout complete"
        );

        Ok(())
    }

    /// Runs the configured number of playouts and returns the best move.
    ///
    /// # Returns
    /// `Ok(mv)` with the move of the most visited root child.
    /// `Err(MctsError::ZeroBudget)` if the configuration asks for no playout.
    /// `Err(MctsError::NoLegalMoves)` if the root board is already won or full.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<Move, MctsError>{
        if self.config.playouts == 0 {
            return Err(MctsError::ZeroBudget);
        }

        if self.tree.get(self.tree.root()).board.available_moves().is_empty() {
            return Err(MctsError::NoLegalMoves);
        }

        for _ in 0..self.config.playouts {
            self.playout(rng)?;
        }

        let best = self.best_move().ok_or(MctsError::NoLegalMoves)?;

        debug!(
            best = %best,
            root_visits = self.count_visit(),
            nodes = self.tree.len(),
            "search finished"
        );

        Ok(best)
    }

    /// Move of the most visited root child.
    ///
    /// Ties go to the child created first. Visit counts are preferred over
    /// win rates, which are noisy on children with few visits.
    ///
    /// # Returns
    /// `None` if the root has no children yet.
    pub fn best_move(&self) -> Option<Move>{
        let root = self.tree.node(self.tree.root());

        utils::first_max_by_key(root.children().iter().copied(), |&child| self.tree.get(child).visits as f64)
            .and_then(|child| self.tree.get(child).mv)
    }

    /// Statistics of every root child, in creation order.
    pub fn statistics(&self) -> Vec<MoveStatistics>{
        let root = self.tree.node(self.tree.root());

        root.children().iter()
            .filter_map(|&id| {
                let node = self.tree.get(id);
                node.mv.map(|mv| MoveStatistics { mv, visits: node.visits, wins: node.wins })
            })
            .collect()
    }

    /// Number of playouts backpropagated through the root.
    #[inline]
    pub fn count_visit(&self) -> u32{
        self.tree.get(self.tree.root()).visits
    }
}

/// Chooses a move for the opponent of `root_player` using the thread-local random source.
///
/// # Parameters
/// - `root_player`: The player who made the latest real move.
/// - `board`: The current real board. It is copied, never modified.
/// - `playouts`: Number of playouts to run, at least 1.
///
/// # Examples
/// ```rust
/// use ttt_mcts::{choose_move, BoardState, Player};
///
/// let board = BoardState::new();
/// let mv = choose_move(Player::One, &board, 100).unwrap();
/// assert!(board.is_legal(mv));
/// ```
pub fn choose_move(root_player: Player, board: &BoardState, playouts: usize) -> Result<Move, MctsError>{
    let mut rng = rand::rng();
    choose_move_with_rng(root_player, board, playouts, &mut rng)
}

/// Same as [`choose_move`] with a caller-provided random source, for reproducible searches.
pub fn choose_move_with_rng<R: Rng>(root_player: Player, board: &BoardState, playouts: usize, rng: &mut R) -> Result<Move, MctsError>{
    let config = SearchConfig::DEFAULT.with_playouts(playouts);
    Mcts::from_config(root_player, *board, config).run(rng)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::test_utils::{assert_close, board_from, moves};

    /// Checks the per-node statistic invariants on every node of the tree.
    fn check_invariants(mcts: &Mcts){
        for id in mcts.tree.ids() {
            let node = mcts.tree.node(id);
            let data = node.get();

            if data.visits == 0 {
                assert_eq!(data.wins, 0.0);
            }
            assert!(data.wins >= 0.0 && data.wins <= data.visits as f64);

            let children_visits: u32 = node.children().iter().map(|&c| mcts.tree.get(c).visits).sum();
            assert!(children_visits <= data.visits);

            for &child in node.children() {
                let child = mcts.tree.get(child);
                assert_eq!(child.mover, data.mover.opponent());
                assert!(!data.untried.contains(&child.mv.unwrap()));
            }
        }
    }

    #[test]
    fn test_new_root(){
        let board = board_from("X../.../...");
        let mcts = Mcts::new(Player::One, board);
        let root = mcts.tree.get(mcts.tree.root());

        assert_eq!(root.mover(), Player::One);
        assert_eq!(*root.board(), board);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.untried(), board.available_moves().as_slice());
        assert_eq!(root.wins(), 0.0);
        assert_eq!(root.visits(), 0);
        assert!(mcts.tree.node(mcts.tree.root()).children().is_empty());
        assert_eq!(mcts.best_move(), None);
    }

    #[test]
    fn test_select_root_with_untried(){
        let mcts = Mcts::new(Player::One, BoardState::new());
        assert_eq!(mcts.select(), mcts.tree.root());
    }

    #[test]
    fn test_expand() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(0);
        let mut mcts = Mcts::new(Player::One, BoardState::new());
        let root = mcts.tree.root();

        let child = mcts.expand(root, &mut rng)?;
        let data = mcts.tree.get(child);
        let mv = data.last_move().unwrap();

        assert_ne!(child, root);
        assert_eq!(data.mover(), Player::Two);
        assert_eq!(data.board().cell(mv), crate::Cell::Mark(Player::Two));
        assert_eq!(data.untried(), data.board().available_moves().as_slice());
        assert_eq!(data.visits(), 0);

        let root_data = mcts.tree.get(root);
        assert_eq!(root_data.untried().len(), 8);
        assert!(!root_data.untried().contains(&mv));
        assert!(root_data.board().is_legal(mv));
        assert_eq!(mcts.tree.node(root).children(), &[child]);
        Ok(())
    }

    #[test]
    fn test_expand_until_exhausted() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(1);
        let mut mcts = Mcts::new(Player::Two, board_from("XOX/OOX/X.."));
        let root = mcts.tree.root();

        let first = mcts.expand(root, &mut rng)?;
        let second = mcts.expand(root, &mut rng)?;
        let third = mcts.expand(root, &mut rng)?;

        let mut created = vec![mcts.tree.get(first).mv.unwrap(), mcts.tree.get(second).mv.unwrap()];
        created.sort();

        assert_eq!(created, moves(&[8, 9]));
        assert_eq!(third, root);
        assert!(mcts.tree.get(root).untried.is_empty());
        Ok(())
    }

    #[test]
    fn test_expand_terminal_returns_leaf() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(2);
        let mut mcts = Mcts::new(Player::One, board_from("XXX/OO./..."));
        let root = mcts.tree.root();

        assert!(mcts.tree.get(root).untried.is_empty());
        assert_eq!(mcts.expand(root, &mut rng)?, root);
        assert_eq!(mcts.tree.len(), 1);
        Ok(())
    }

    #[test]
    fn test_select_prefers_unvisited_child() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(3);
        let mut mcts = Mcts::new(Player::One, board_from("XOX/OOX/X.."));
        let root = mcts.tree.root();

        let visited = mcts.expand(root, &mut rng)?;
        let unvisited = mcts.expand(root, &mut rng)?;

        mcts.backpropagate(visited, Outcome::Win(Player::Two));
        mcts.backpropagate(visited, Outcome::Win(Player::Two));

        assert!(mcts.tree.get(root).untried.is_empty());
        assert_eq!(mcts.tree.get(visited).wins, 2.0);
        assert_eq!(mcts.selection_score(root, unvisited), f64::INFINITY);
        assert_eq!(mcts.select(), unvisited);
        Ok(())
    }

    #[test]
    fn test_select_descends_by_ucb1() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(4);
        let mut mcts = Mcts::new(Player::One, board_from("XOX/OOX/X.."));
        let root = mcts.tree.root();

        let a = mcts.expand(root, &mut rng)?;
        let b = mcts.expand(root, &mut rng)?;

        mcts.backpropagate(a, Outcome::Win(Player::One));
        mcts.backpropagate(b, Outcome::Win(Player::Two));

        // b won for its mover, a lost: same exploration term, b wins on exploitation.
        assert!(mcts.selection_score(root, b) > mcts.selection_score(root, a));
        assert_eq!(mcts.select(), b);
        Ok(())
    }

    #[test]
    fn test_simulate_winning_board(){
        let mut rng = StdRng::seed_from_u64(5);
        let mcts = Mcts::new(Player::One, board_from("XXX/OO./..."));

        for _ in 0..10 {
            assert_eq!(mcts.simulate(mcts.tree.root(), &mut rng), Ok(Outcome::Win(Player::One)));
        }
    }

    #[test]
    fn test_simulate_full_board_is_draw(){
        let mut rng = StdRng::seed_from_u64(6);
        let mcts = Mcts::new(Player::One, board_from("XOX/XOO/OXX"));

        assert_eq!(mcts.simulate(mcts.tree.root(), &mut rng), Ok(Outcome::Draw));
    }

    #[test]
    fn test_simulate_single_forced_move(){
        let mut rng = StdRng::seed_from_u64(7);
        // Two moves next and can only complete the middle column.
        let mcts = Mcts::new(Player::One, board_from("XOX/XOX/O.O"));

        assert_eq!(mcts.simulate(mcts.tree.root(), &mut rng), Ok(Outcome::Win(Player::Two)));
    }

    #[test]
    fn test_simulate_leaves_tree_untouched(){
        let mut rng = StdRng::seed_from_u64(8);
        let board = BoardState::new();
        let mcts = Mcts::new(Player::Two, board);

        let outcome = mcts.simulate(mcts.tree.root(), &mut rng);

        assert!(outcome.is_ok());
        assert_eq!(*mcts.tree.get(mcts.tree.root()).board(), board);
        assert_eq!(mcts.count_visit(), 0);
    }

    #[test]
    fn test_backpropagate_draw_adds_half() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(9);
        let mut mcts = Mcts::new(Player::Two, board_from("XOX/XOO/OX."));
        let root = mcts.tree.root();

        let child = mcts.expand(root, &mut rng)?;
        let outcome = mcts.simulate(child, &mut rng)?;
        assert_eq!(outcome, Outcome::Draw);

        mcts.backpropagate(child, outcome);

        assert_eq!(mcts.tree.get(child).wins, 0.5);
        assert_eq!(mcts.tree.get(child).visits, 1);
        assert_eq!(mcts.tree.get(root).wins, 0.5);
        assert_eq!(mcts.tree.get(root).visits, 1);
        Ok(())
    }

    #[test]
    fn test_backpropagate_credits_each_mover() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(10);
        let mut mcts = Mcts::new(Player::Two, BoardState::new());
        let root = mcts.tree.root();

        let child = mcts.expand(root, &mut rng)?;
        let grandchild = mcts.expand(child, &mut rng)?;

        mcts.backpropagate(grandchild, Outcome::Win(Player::One));

        assert_eq!(mcts.tree.get(child).mover, Player::One);
        assert_eq!(mcts.tree.get(grandchild).wins, 0.0);
        assert_eq!(mcts.tree.get(child).wins, 1.0);
        assert_eq!(mcts.tree.get(root).wins, 0.0);

        for id in [root, child, grandchild] {
            assert_eq!(mcts.tree.get(id).visits, 1);
        }
        Ok(())
    }

    #[test]
    fn test_playout_counts() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(11);
        let mut mcts = Mcts::new(Player::One, BoardState::new());

        for n in 1..=50u32 {
            mcts.playout(&mut rng)?;

            let root = mcts.tree.node(mcts.tree.root());
            let children_visits: u32 = root.children().iter().map(|&c| mcts.tree.get(c).visits).sum();

            assert_eq!(mcts.count_visit(), n);
            assert_eq!(children_visits, n);
        }

        // Nine root moves: the first nine playouts expand the root once each.
        assert_eq!(mcts.tree.node(mcts.tree.root()).children().len(), 9);
        check_invariants(&mcts);
        Ok(())
    }

    #[test]
    fn test_every_child_visited_before_revisit() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(12);
        let mut mcts = Mcts::new(Player::One, BoardState::new());

        for _ in 0..9 {
            mcts.playout(&mut rng)?;
        }

        let stats = mcts.statistics();
        assert_eq!(stats.len(), 9);
        assert!(stats.iter().all(|s| s.visits == 1));
        Ok(())
    }

    #[test]
    fn test_run_invariants() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(13);
        let config = SearchConfig::DEFAULT.with_playouts(500);
        let mut mcts = Mcts::from_config(Player::One, board_from(".../.X./..."), config);

        let mv = mcts.run(&mut rng)?;

        assert!(board_from(".../.X./...").is_legal(mv));
        assert_eq!(mcts.count_visit(), 500);

        let stats = mcts.statistics();
        assert_eq!(stats.iter().map(|s| s.visits).sum::<u32>(), 500);
        assert_eq!(stats.len(), 8);

        let most = stats.iter().map(|s| s.visits).max().unwrap();
        assert_eq!(stats.iter().find(|s| s.visits == most).map(|s| s.mv), Some(mv));

        check_invariants(&mcts);
        Ok(())
    }

    #[test]
    fn test_best_move_tie_goes_to_first_child() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(14);
        let mut mcts = Mcts::new(Player::One, board_from("XOX/OOX/X.."));
        let root = mcts.tree.root();

        let first = mcts.expand(root, &mut rng)?;
        let second = mcts.expand(root, &mut rng)?;

        mcts.backpropagate(first, Outcome::Draw);
        mcts.backpropagate(second, Outcome::Win(Player::Two));

        assert_eq!(mcts.best_move(), mcts.tree.get(first).mv);

        mcts.backpropagate(second, Outcome::Draw);
        assert_eq!(mcts.best_move(), mcts.tree.get(second).mv);
        Ok(())
    }

    #[test]
    fn test_run_zero_budget(){
        let mut rng = StdRng::seed_from_u64(15);
        let mut mcts = Mcts::from_config(Player::One, BoardState::new(), SearchConfig::DEFAULT.with_playouts(0));

        assert_eq!(mcts.run(&mut rng), Err(MctsError::ZeroBudget));
    }

    #[test]
    fn test_run_without_moves(){
        let mut rng = StdRng::seed_from_u64(16);

        let mut won = Mcts::new(Player::One, board_from("XXX/OO./..."));
        assert_eq!(won.run(&mut rng), Err(MctsError::NoLegalMoves));

        let mut full = Mcts::new(Player::One, board_from("XOX/XOO/OXX"));
        assert_eq!(full.run(&mut rng), Err(MctsError::NoLegalMoves));
    }

    #[test]
    fn test_single_move_left() -> Result<(), MctsError>{
        let mut rng = StdRng::seed_from_u64(17);
        let board = board_from("XOX/XOO/OX.");

        let mv = choose_move_with_rng(Player::Two, &board, 10, &mut rng)?;
        assert_eq!(mv, Move::new(9)?);
        Ok(())
    }

    #[test]
    fn test_takes_immediate_win(){
        // Two completes the top row with 3; One has no threat on the board.
        let board = board_from("OO./..X/X..");
        let winning = Move::new(3).unwrap();

        let hits = (0..10u64)
            .filter(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                choose_move_with_rng(Player::One, &board, 1000, &mut rng) == Ok(winning)
            })
            .count();

        assert!(hits >= 9, "winning move chosen {} times out of 10", hits);
    }

    #[test]
    fn test_same_seed_same_search() -> Result<(), MctsError>{
        let board = board_from("X../.../...");
        let config = SearchConfig::DEFAULT.with_playouts(300);

        let mut a = Mcts::from_config(Player::One, board, config.clone());
        let mut b = Mcts::from_config(Player::One, board, config);

        let move_a = a.run(&mut StdRng::seed_from_u64(99))?;
        let move_b = b.run(&mut StdRng::seed_from_u64(99))?;

        assert_eq!(move_a, move_b);
        assert_eq!(a.statistics(), b.statistics());
        Ok(())
    }

    #[test]
    fn test_ucb1(){
        assert_eq!(ucb1(0.0, 0, 0, 1.0), f64::INFINITY);
        assert_close(ucb1(3.0, 4, 10, 1.0), 0.75 + (10f64.ln() / 4.0).sqrt());
        assert_close(ucb1(3.0, 4, 10, DEFAULT_EXPLORATION), 0.75 + SQRT_2 * (10f64.ln() / 4.0).sqrt());
        assert_close(ucb1(1.0, 1, 1, 1.0), 1.0);
    }

    #[test]
    fn test_config(){
        let config = SearchConfig::default();
        assert_eq!(config, SearchConfig::DEFAULT);
        assert_eq!(config.playouts, 700);
        assert_close(config.exploration_coef, 1.0);

        let config = config.with_playouts(50).with_exploration_coef(DEFAULT_EXPLORATION);
        assert_eq!(config.playouts, 50);
        assert_close(config.exploration_coef, SQRT_2);
    }

    #[test]
    fn test_move_statistics_win_rate(){
        let stats = MoveStatistics { mv: Move::new(1).unwrap(), visits: 4, wins: 3.0 };
        assert_close(stats.win_rate(), 0.75);

        let stats = MoveStatistics { mv: Move::new(1).unwrap(), visits: 0, wins: 0.0 };
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn test_node_control(){
        let mcts = Mcts::new(Player::One, board_from("OO./X../X.."));
        let root = mcts.tree.get(mcts.tree.root());

        assert_eq!(root.control(), f64::NEG_INFINITY);
        assert_eq!(root.value(), 0.0);
    }

    #[test]
    fn test_error_from_board_error(){
        let mv = Move::new(4).unwrap();
        let err: MctsError = BoardError::Occupied(mv).into();

        assert_eq!(err, MctsError::Board(BoardError::Occupied(mv)));
        assert_eq!(err.to_string(), "cell 4 is already occupied");
    }
}
