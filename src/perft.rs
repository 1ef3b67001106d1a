// Exhaustive tree walk using make/unmake through the move guard (no cloning)
use crate::rules::{play, Position, RulesError};
use log::trace;

/// Number of leaves `depth` plies below `pos`. Each leaf is logged at trace level.
pub fn perft<P: Position>(pos: &mut P, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 {
        trace!("leaf {}", pos);
        return Ok(1);
    }
    let mut nodes = 0u64;
    for mv in pos.legal_moves() {
        let mut child = play(pos, mv)?;
        nodes += perft(&mut *child, depth - 1)?;
    }
    Ok(nodes)
}

/// Leaf counts split by root move, in move generation order.
pub fn divide<P: Position>(pos: &mut P, depth: u32) -> Result<Vec<(P::Move, u64)>, RulesError> {
    let mut out = Vec::new();
    if depth == 0 { return Ok(out); }
    for mv in pos.legal_moves() {
        let mut child = play(pos, mv)?;
        out.push((mv, perft(&mut *child, depth - 1)?));
    }
    Ok(out)
}
