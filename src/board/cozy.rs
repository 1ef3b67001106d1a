use crate::rules::{PieceKind, Position, RulesError, Side, Square};
use cozy_chess::{Board as CozyBoard, Color, GameStatus, Move, Piece, Square as CozySquare};
use std::fmt;

/// Chess position over cozy-chess with a snapshot stack for undo.
///
/// White is [`Side::First`]. Squares are indexed a1 = 0 through h8 = 63.
#[derive(Clone, Debug)]
pub struct CozyPosition {
    board: CozyBoard,
    history: Vec<CozyBoard>,
}

fn letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn side(color: Color) -> Side {
    if color == Color::White { Side::First } else { Side::Second }
}

impl CozyPosition {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), history: Vec::with_capacity(64) }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b, history: Vec::with_capacity(64) })
            .map_err(|e| RulesError::Malformed(format!("FEN error: {e:?}")))
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    /// Plays a move given in UCI notation. Unlike [`Position::apply`] this
    /// is not undoable into the prior history.
    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), RulesError> {
        let found = self.legal_moves().into_iter().find(|m| format!("{}", m) == mv_uci);
        match found {
            Some(m) => { self.board.play(m); Ok(()) }
            None => Err(RulesError::IllegalMove(mv_uci.to_string())),
        }
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, RulesError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }
}

impl fmt::Display for CozyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.board) }
}

impl Position for CozyPosition {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    fn apply(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.board.is_legal(mv) { return Err(RulesError::IllegalMove(format!("{}", mv))); }
        self.history.push(self.board.clone());
        self.board.play_unchecked(mv);
        Ok(())
    }

    fn undo(&mut self) {
        if let Some(prev) = self.history.pop() { self.board = prev; }
    }

    fn is_game_over(&self) -> bool { self.board.status() != GameStatus::Ongoing }

    fn piece_at(&self, square: Square) -> Option<PieceKind> {
        let sq = *CozySquare::ALL.get(square)?;
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(PieceKind::new(letter(piece), false, side(color)))
    }

    fn side_to_move(&self) -> Side { side(self.board.side_to_move()) }

    fn square_count(&self) -> usize { CozySquare::NUM }

    fn destination(&self, mv: &Move) -> Square { mv.to as usize }
}
