#![allow(dead_code)]
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tesuji::rules::{play, PieceKind, Position, RulesError, Side, Square};
use tesuji::search::Searcher;

// ---------------------------------------------------------------------------
// Synthetic game tree: every node carries its own small board, so captures and
// static values are whatever the generator put there.

#[derive(Clone, Debug)]
pub struct Node {
    pub board: Vec<Option<PieceKind>>,
    pub side: Side,
    pub over: bool,
    pub edges: Vec<Edge>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub dest: Square,
    pub child: usize,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "@{}->{}", self.dest, self.child) }
}

#[derive(Clone, Debug)]
pub struct TreePosition {
    pub nodes: Vec<Node>,
    pub path: Vec<usize>,
}

const TREE_SQUARES: usize = 4;
const TREE_TOKENS: [&str; 8] = ["P", "p", "R", "r", "+B", "b", "G", "x"];

impl TreePosition {
    /// Random tree. Branching stops `max_depth + 2` plies down so that the
    /// quiescence layer below a `max_depth` search still finds captures.
    pub fn random(seed: u64, max_depth: u32) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut nodes = Vec::new();
        Self::grow(&mut rng, &mut nodes, Side::First, max_depth + 2);
        Self { nodes, path: vec![0] }
    }

    fn grow(rng: &mut SmallRng, nodes: &mut Vec<Node>, side: Side, plies_left: u32) -> usize {
        let board = (0..TREE_SQUARES)
            .map(|_| {
                if rng.gen_bool(0.35) { return None; }
                let tok = TREE_TOKENS[rng.gen_range(0..TREE_TOKENS.len())];
                tok.parse::<PieceKind>().ok()
            })
            .collect();
        let over = rng.gen_bool(0.05);
        let idx = nodes.len();
        nodes.push(Node { board, side, over, edges: Vec::new() });
        if plies_left == 0 { return idx; }
        let branching = rng.gen_range(0..=3);
        for _ in 0..branching {
            let dest = rng.gen_range(0..TREE_SQUARES);
            let child = Self::grow(rng, nodes, side.opponent(), plies_left - 1);
            nodes[idx].edges.push(Edge { dest, child });
        }
        idx
    }

    /// Single node with no moves at all.
    pub fn dead_end(board: Vec<Option<PieceKind>>, side: Side) -> Self {
        Self { nodes: vec![Node { board, side, over: false, edges: Vec::new() }], path: vec![0] }
    }

    /// Two nodes that capture into each other forever. Each side is a pawn down
    /// from its own point of view, so every stand pat is -1.
    pub fn capture_loop() -> Self {
        let p = |tok: &str| tok.parse::<PieceKind>().ok();
        let nodes = vec![
            Node { board: vec![None, p("p")], side: Side::First, over: false, edges: vec![Edge { dest: 1, child: 1 }] },
            Node { board: vec![None, p("P")], side: Side::Second, over: false, edges: vec![Edge { dest: 1, child: 0 }] },
        ];
        Self { nodes, path: vec![0] }
    }

    pub fn current(&self) -> usize { *self.path.last().unwrap() }

    fn node(&self) -> &Node { &self.nodes[self.current()] }
}

impl fmt::Display for TreePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "node {}", self.current()) }
}

impl Position for TreePosition {
    type Move = Edge;

    fn legal_moves(&self) -> Vec<Edge> { self.node().edges.clone() }

    fn apply(&mut self, mv: Edge) -> Result<(), RulesError> {
        if !self.node().edges.contains(&mv) { return Err(RulesError::IllegalMove(mv.to_string())); }
        self.path.push(mv.child);
        Ok(())
    }

    fn undo(&mut self) {
        assert!(self.path.len() > 1, "undo past the root");
        self.path.pop();
    }

    fn is_game_over(&self) -> bool { self.node().over }

    fn piece_at(&self, square: Square) -> Option<PieceKind> { self.node().board.get(square).copied().flatten() }

    fn side_to_move(&self) -> Side { self.node().side }

    fn square_count(&self) -> usize { TREE_SQUARES }

    fn destination(&self, mv: &Edge) -> Square { mv.dest }
}

/// Plain negamax over the same tree, no pruning. Leaves get full-window quiescence.
pub fn minimax<P: Position>(pos: &mut P, depth: u32, searcher: &mut Searcher) -> i32 {
    let moves = if depth == 0 || pos.is_game_over() { Vec::new() } else { pos.legal_moves() };
    if moves.is_empty() { return searcher.qsearch_eval(pos).unwrap(); }
    let mut best = i32::MIN;
    for m in moves {
        let mut child = play(pos, m).unwrap();
        best = best.max(-minimax(&mut *child, depth - 1, searcher));
    }
    best
}

// ---------------------------------------------------------------------------
// 9x9 shogi sketch: SFEN board placement, captures go to the capturer's hand.
// Move legality is not modelled; `legal_moves` offers whatever was scripted.

pub const HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SketchMove {
    pub from: Square,
    pub to: Square,
    pub promote: bool,
}

impl fmt::Display for SketchMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.to, if self.promote { "+" } else { "" })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    board: Vec<Option<PieceKind>>,
    hand: Vec<PieceKind>,
    side: Side,
}

#[derive(Clone, Debug)]
pub struct ShogiSketch {
    board: Vec<Option<PieceKind>>,
    hand: Vec<PieceKind>,
    side: Side,
    scripted: Vec<SketchMove>,
    history: Vec<Snapshot>,
}

/// Square index for SFEN row (0 = top) and column (0 = left).
pub fn sq(row: usize, col: usize) -> Square { row * 9 + col }

impl ShogiSketch {
    pub fn from_sfen_board(placement: &str, side: Side) -> Result<Self, RulesError> {
        let mut board = Vec::with_capacity(81);
        for row in placement.split('/') {
            let mut chars = row.chars();
            let start = board.len();
            while let Some(c) = chars.next() {
                if let Some(n) = c.to_digit(10) {
                    board.extend(std::iter::repeat(None).take(n as usize));
                } else if c == '+' {
                    let p = chars.next().ok_or_else(|| RulesError::Malformed(row.to_string()))?;
                    let kind: PieceKind = format!("+{p}").parse().map_err(|_| RulesError::Malformed(row.to_string()))?;
                    board.push(Some(kind));
                } else {
                    let kind: PieceKind = c.to_string().parse().map_err(|_| RulesError::Malformed(row.to_string()))?;
                    board.push(Some(kind));
                }
            }
            if board.len() - start != 9 { return Err(RulesError::Malformed(row.to_string())); }
        }
        if board.len() != 81 { return Err(RulesError::Malformed(placement.to_string())); }
        Ok(Self { board, hand: Vec::new(), side, scripted: Vec::new(), history: Vec::new() })
    }

    pub fn with_moves(mut self, moves: Vec<SketchMove>) -> Self {
        self.scripted = moves;
        self
    }

    pub fn hand(&self) -> &[PieceKind] { &self.hand }

    fn snapshot(&self) -> Snapshot {
        Snapshot { board: self.board.clone(), hand: self.hand.clone(), side: self.side }
    }
}

impl fmt::Display for ShogiSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 { f.write_str("/")?; }
            let mut empty = 0;
            for col in 0..9 {
                match self.board[sq(row, col)] {
                    Some(p) => {
                        if empty > 0 { write!(f, "{empty}")?; empty = 0; }
                        write!(f, "{p}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 { write!(f, "{empty}")?; }
        }
        f.write_str(if self.side == Side::First { " b" } else { " w" })
    }
}

impl Position for ShogiSketch {
    type Move = SketchMove;

    fn legal_moves(&self) -> Vec<SketchMove> {
        self.scripted.iter().copied()
            .filter(|m| matches!(self.board[m.from], Some(p) if p.side == self.side))
            .filter(|m| !matches!(self.board[m.to], Some(p) if p.side == self.side))
            .collect()
    }

    fn apply(&mut self, mv: SketchMove) -> Result<(), RulesError> {
        let piece = match self.board.get(mv.from).copied().flatten() {
            Some(p) if p.side == self.side => p,
            _ => return Err(RulesError::IllegalMove(mv.to_string())),
        };
        self.history.push(self.snapshot());
        if let Some(taken) = self.board[mv.to].take() {
            self.hand.push(taken.flip().unpromote());
        }
        self.board[mv.from] = None;
        self.board[mv.to] = Some(if mv.promote { piece.promote() } else { piece });
        self.side = self.side.opponent();
        Ok(())
    }

    fn undo(&mut self) {
        if let Some(s) = self.history.pop() {
            self.board = s.board;
            self.hand = s.hand;
            self.side = s.side;
        }
    }

    fn is_game_over(&self) -> bool {
        let king = PieceKind::new('K', false, self.side);
        !self.board.contains(&Some(king))
    }

    fn piece_at(&self, square: Square) -> Option<PieceKind> { self.board.get(square).copied().flatten() }

    fn side_to_move(&self) -> Side { self.side }

    fn square_count(&self) -> usize { 81 }

    fn destination(&self, mv: &SketchMove) -> Square { mv.to }

    fn in_hand(&self) -> Vec<PieceKind> { self.hand.clone() }
}
