use crate::rules::{PieceKind, Position, Side};
use crate::search::alphabeta::SCORE_INFINITY;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

// Material tables. Values are signed per owner: the second side's entries are negated.
const SHOGI_MATERIAL: [(&str, i32); 13] = [
    ("P", 1), ("L", 5), ("N", 5), ("S", 7), ("G", 8), ("B", 10), ("R", 12),
    ("+P", 2), ("+L", 6), ("+N", 6), ("+S", 9), ("+B", 15), ("+R", 18),
];

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;

/// Largest magnitude `evaluate` returns. Stays strictly inside the search window sentinels.
pub const EVAL_BOUND: i32 = SCORE_INFINITY - 1;

#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("reading weights file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing weights json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown piece key {0:?} in weights")]
    BadKey(String),
}

/// On-disk shape: piece tokens as keys, e.g. `{"material": {"P": 1, "p": -1}}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WeightsFile {
    #[serde(default)]
    material: HashMap<String, i32>,
    #[serde(default)]
    positional: Option<HashMap<String, Vec<i32>>>,
}

/// Material and optional per-square values, built once and only read during search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationWeights {
    pub material: HashMap<PieceKind, i32>,
    pub positional: Option<HashMap<PieceKind, Vec<i32>>>,
}

impl EvaluationWeights {
    /// Both sides from unsigned per-piece values; kings are left out.
    fn mirrored(values: &[(&str, i32)]) -> Self {
        let mut material = HashMap::new();
        for &(tok, v) in values {
            // Table tokens are fixed literals; a bad one would be skipped, not valued.
            if let Ok(kind) = tok.parse::<PieceKind>() {
                material.insert(kind, v);
                material.insert(kind.flip(), -v);
            }
        }
        Self { material, positional: None }
    }

    /// Shogi piece values, promoted pieces included.
    pub fn shogi_material() -> Self { Self::mirrored(&SHOGI_MATERIAL) }

    /// Centipawn values for chess.
    pub fn chess_material() -> Self {
        Self::mirrored(&[("P", PAWN), ("N", KNIGHT), ("B", BISHOP), ("R", ROOK), ("Q", QUEEN)])
    }

    pub fn with_positional(mut self, positional: HashMap<PieceKind, Vec<i32>>) -> Self {
        self.positional = Some(positional);
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, WeightsError> {
        let file: WeightsFile = serde_json::from_str(s)?;
        let parse = |k: &str| k.parse::<PieceKind>().map_err(|_| WeightsError::BadKey(k.to_string()));
        let mut material = HashMap::with_capacity(file.material.len());
        for (k, v) in &file.material { material.insert(parse(k)?, *v); }
        let positional = match file.positional {
            Some(table) => {
                let mut out = HashMap::with_capacity(table.len());
                for (k, v) in table { out.insert(parse(&k)?, v); }
                Some(out)
            }
            None => None,
        };
        Ok(Self { material, positional })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WeightsError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Unknown kinds are worth nothing.
    pub fn material_of(&self, kind: PieceKind) -> i32 {
        self.material.get(&kind).copied().unwrap_or(0)
    }

    pub fn positional_of(&self, kind: PieceKind, square: usize) -> i32 {
        self.positional.as_ref()
            .and_then(|t| t.get(&kind))
            .and_then(|row| row.get(square))
            .copied()
            .unwrap_or(0)
    }
}

// Side-agnostic score: positive means the first side is ahead. Board pieces plus pieces in hand.
// Sums saturate and the total is clamped to +-EVAL_BOUND, whatever the weights hold.
pub fn evaluate<P: Position>(pos: &P, weights: &EvaluationWeights) -> i32 {
    let mut score: i32 = 0;
    for sq in 0..pos.square_count() {
        if let Some(kind) = pos.piece_at(sq) {
            score = score
                .saturating_add(weights.material_of(kind))
                .saturating_add(weights.positional_of(kind, sq));
        }
    }
    for kind in pos.in_hand() {
        score = score.saturating_add(weights.material_of(kind));
    }
    score.clamp(-EVAL_BOUND, EVAL_BOUND)
}

// Score from side-to-move perspective (negamax-friendly)
pub fn evaluate_relative<P: Position>(pos: &P, weights: &EvaluationWeights) -> i32 {
    let base = evaluate(pos, weights);
    if pos.side_to_move() == Side::First { base } else { -base }
}
