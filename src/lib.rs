// Alpha-beta + quiescence search over an external rules engine
pub mod board;
pub mod perft;
pub mod rules;
pub mod search;
pub mod uci;

pub use rules::{Position, PieceKind, RulesError, Side};
pub use search::{select_move, EvaluationWeights, SearchLimits, Searcher};
