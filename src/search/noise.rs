use crate::rules::Position;
use rand::rngs::SmallRng;
use rand::Rng;

/// Uniform choice among the legal moves; `None` when there are none to pick.
///
/// This is the weakest level the engine offers and does no search at all.
pub fn choose_random_move<P: Position>(pos: &P, rng: &mut SmallRng) -> Option<P::Move> {
    let moves = pos.legal_moves();
    if moves.is_empty() { return None; }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}
