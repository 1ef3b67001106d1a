use crate::rules::{play, Position, RulesError};
use crate::search::eval::EvaluationWeights;
use log::debug;
use thiserror::Error;

/// Stand-in for an unbounded score. Symmetric, so negating it never overflows.
pub const SCORE_INFINITY: i32 = 1_000_000;

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchLimits {
    pub depth: u32,
    /// Deepest quiescence ply that gets trace logging. Does not bound the search.
    pub qsearch_log_depth: Option<u32>,
}

impl SearchLimits {
    pub fn depth(depth: u32) -> Self { Self { depth, qsearch_log_depth: None } }
}

/// Score is from the point of view of the side to move at the searched node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub score: i32,
    pub best_move: Option<M>,
    pub nodes: u64,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Rules(#[from] RulesError),
}

pub struct Searcher<'w> {
    pub(super) weights: &'w EvaluationWeights,
    pub(super) limits: SearchLimits,
    pub(crate) nodes: u64,
}

impl<'w> Searcher<'w> {
    pub fn new(weights: &'w EvaluationWeights, limits: SearchLimits) -> Self {
        Self { weights, limits, nodes: 0 }
    }

    pub fn weights(&self) -> &EvaluationWeights { self.weights }

    pub fn limits(&self) -> SearchLimits { self.limits }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Negamax alpha-beta. At the horizon, or where the game is over, the node is
    /// resolved by quiescence and carries no move.
    ///
    /// Moves are tried in the order the rules engine lists them; nothing is reordered.
    pub fn search<P: Position>(
        &mut self,
        pos: &mut P,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<SearchResult<P::Move>, SearchError> {
        // A position with nothing to play is as terminal as one the rules call over.
        let moves = if depth == 0 || pos.is_game_over() { Vec::new() } else { pos.legal_moves() };
        if moves.is_empty() {
            let score = self.quiescence(pos, alpha, beta, 0)?;
            return Ok(SearchResult { score, best_move: None, nodes: self.nodes });
        }
        self.nodes += 1;

        let mut value = -SCORE_INFINITY;
        let mut best_move = None;
        for m in moves {
            let score = {
                let mut child = play(pos, m)?;
                -self.search(&mut *child, depth - 1, -beta, -alpha)?.score
            };
            if best_move.is_none() || score > value {
                value = score;
                best_move = Some(m);
            }
            alpha = alpha.max(value);
            if alpha >= beta { break; }
        }
        Ok(SearchResult { score: value, best_move, nodes: self.nodes })
    }

    /// Full-window search at the configured depth.
    pub fn search_root<P: Position>(&mut self, pos: &mut P) -> Result<SearchResult<P::Move>, SearchError> {
        self.nodes = 0;
        let depth = self.limits.depth;
        let res = self.search(pos, depth, -SCORE_INFINITY, SCORE_INFINITY)?;
        match res.best_move {
            Some(m) => debug!("depth {} best {} score {} nodes {}", depth, m, res.score, res.nodes),
            None => debug!("depth {} no move, score {} nodes {}", depth, res.score, res.nodes),
        }
        Ok(res)
    }

    /// Best move at the configured depth, or `None` when there is nothing legal to play.
    ///
    /// A depth of 0 is searched as depth 1, since a horizon node never yields a move.
    pub fn select_move<P: Position>(&mut self, pos: &mut P) -> Result<Option<P::Move>, SearchError> {
        if pos.legal_moves().is_empty() {
            debug!("no legal moves in {}, resigning", pos);
            return Ok(None);
        }
        let saved = self.limits;
        self.limits.depth = saved.depth.max(1);
        let res = self.search_root(pos);
        self.limits = saved;
        Ok(res?.best_move)
    }
}

/// Picks a move for the side to move at a fixed depth. `None` means resign.
///
/// `None` comes back only when the root has no legal moves. A `depth` of 0 is
/// raised to 1 so a playable root always yields a move.
pub fn select_move<P: Position>(
    pos: &mut P,
    depth: u32,
    weights: &EvaluationWeights,
) -> Result<Option<P::Move>, SearchError> {
    Searcher::new(weights, SearchLimits::depth(depth)).select_move(pos)
}
