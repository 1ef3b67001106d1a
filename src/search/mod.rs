pub mod alphabeta;
pub mod eval;
pub mod noise;
pub mod quiescence;

pub use alphabeta::{select_move, SearchError, SearchLimits, SearchResult, Searcher, SCORE_INFINITY};
pub use eval::{evaluate, evaluate_relative, EvaluationWeights, WeightsError, EVAL_BOUND};
pub use quiescence::MAX_QSEARCH_PLY;
