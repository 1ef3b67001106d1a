use crate::rules::{is_capture, play, Position};
use crate::search::alphabeta::{SearchError, Searcher, SCORE_INFINITY};
use crate::search::eval::evaluate_relative;
use log::trace;

/// Hard ceiling on capture-chain length. Normal positions run out of captures long before.
pub const MAX_QSEARCH_PLY: u32 = 64;

impl Searcher<'_> {
    /// Capture-only negamax below the horizon, fail-hard on `[alpha, beta]`.
    ///
    /// `ply` counts plies below the horizon and is used for logging and the ceiling.
    pub fn quiescence<P: Position>(
        &mut self,
        pos: &mut P,
        mut alpha: i32,
        beta: i32,
        ply: u32,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        // Stand pat
        let stand = evaluate_relative(&*pos, self.weights);
        if self.limits.qsearch_log_depth.map_or(false, |d| ply <= d) {
            trace!("{:indent$}qsearch ply {}: eval {} alpha {} beta {}", "", ply, stand, alpha, beta, indent = 4 * ply as usize);
        }
        if stand >= beta { return Ok(beta); }
        if stand > alpha { alpha = stand; }
        if ply >= MAX_QSEARCH_PLY { return Ok(alpha); }

        // Captures only
        let caps: Vec<P::Move> = pos.legal_moves().into_iter().filter(|m| is_capture(&*pos, m)).collect();
        for m in caps {
            let score = {
                let mut child = play(pos, m)?;
                -self.quiescence(&mut *child, -beta, -alpha, ply + 1)?
            };
            if score >= beta { return Ok(beta); }
            if score > alpha { alpha = score; }
        }
        Ok(alpha)
    }

    /// Full-window quiescence value of `pos` for the side to move.
    pub fn qsearch_eval<P: Position>(&mut self, pos: &mut P) -> Result<i32, SearchError> {
        self.quiescence(pos, -SCORE_INFINITY, SCORE_INFINITY, 0)
    }
}
