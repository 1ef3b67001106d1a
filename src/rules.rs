//! Contract between the search and whatever rules engine owns the position.
//!
//! The search never generates or validates moves itself. It asks a [`Position`]
//! for legal moves, plays them through [`play`] and reads pieces back for
//! evaluation and capture detection.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use thiserror::Error;

/// Board index in `0..Position::square_count()`.
pub type Square = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Moves first; written in uppercase and counted positive by the evaluator.
    First,
    /// Written in lowercase and counted negative.
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self { Side::First => Side::Second, Side::Second => Side::First }
    }

    /// +1 for [`Side::First`], -1 for [`Side::Second`].
    pub fn sign(self) -> i32 {
        match self { Side::First => 1, Side::Second => -1 }
    }
}

/// Evaluation lookup key: piece letter, promotion flag and owner.
///
/// Text form follows the usual board notation: `P`, `+P`, `p`, `+p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceKind {
    letter: char,
    pub promoted: bool,
    pub side: Side,
}

impl PieceKind {
    /// ASCII letters are case-folded; anything else is kept as given.
    /// Ownership comes from `side` only.
    pub fn new(letter: char, promoted: bool, side: Side) -> Self {
        Self { letter: letter.to_ascii_uppercase(), promoted, side }
    }

    pub fn letter(&self) -> char { self.letter }

    pub fn promote(self) -> Self { Self { promoted: true, ..self } }

    pub fn unpromote(self) -> Self { Self { promoted: false, ..self } }

    /// Same piece changing hands, as when captured material goes to hand.
    pub fn flip(self) -> Self { Self { side: self.side.opponent(), ..self } }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.promoted { f.write_str("+")?; }
        let c = self.letter();
        match self.side {
            Side::First => write!(f, "{}", c),
            Side::Second => write!(f, "{}", c.to_ascii_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid piece token {0:?}")]
pub struct ParsePieceError(pub String);

impl FromStr for PieceKind {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (promoted, rest) = match s.strip_prefix('+') { Some(r) => (true, r), None => (false, s) };
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let side = if c.is_ascii_uppercase() { Side::First } else { Side::Second };
                Ok(PieceKind::new(c, promoted, side))
            }
            _ => Err(ParsePieceError(s.to_string())),
        }
    }
}

/// Failures reported by the rules engine. The search cannot continue past them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("malformed position: {0}")]
    Malformed(String),
}

/// A game position owned by an external rules engine.
///
/// `apply` and `undo` must be exact inverses. Search code should go through
/// [`play`] rather than calling them directly.
pub trait Position: fmt::Display {
    type Move: Copy + Eq + fmt::Debug + fmt::Display;

    /// All legal moves, in a deterministic order for a given position.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: Self::Move) -> Result<(), RulesError>;

    /// Reverts the most recent successful `apply`.
    fn undo(&mut self);

    /// Checkmate, stalemate or any other rules-defined end of game.
    fn is_game_over(&self) -> bool;

    fn piece_at(&self, square: Square) -> Option<PieceKind>;

    fn side_to_move(&self) -> Side;

    fn square_count(&self) -> usize;

    /// Target square of `mv`; drops report the square they drop onto.
    fn destination(&self, mv: &Self::Move) -> Square;

    /// Pieces held off-board, each tagged with its owner. Empty for variants without drops.
    fn in_hand(&self) -> Vec<PieceKind> { Vec::new() }
}

/// True when `mv` lands on a square occupied by the opponent of the side to move.
///
/// A move onto an empty square never counts, whatever the rules make of it.
pub fn is_capture<P: Position>(pos: &P, mv: &P::Move) -> bool {
    let them = pos.side_to_move().opponent();
    matches!(pos.piece_at(pos.destination(mv)), Some(p) if p.side == them)
}

/// A move in flight. Dereferences to the position and undoes the move on drop.
pub struct MoveGuard<'a, P: Position> {
    pos: &'a mut P,
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;
    fn deref(&self) -> &P { &*self.pos }
}

impl<P: Position> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P { &mut *self.pos }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) { self.pos.undo(); }
}

/// Applies `mv` and hands back a guard that restores the position when it goes out of scope.
pub fn play<P: Position>(pos: &mut P, mv: P::Move) -> Result<MoveGuard<'_, P>, RulesError> {
    pos.apply(mv)?;
    Ok(MoveGuard { pos })
}
