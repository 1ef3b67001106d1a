use std::io::{self, BufRead, Write};
use crate::board::cozy::CozyPosition;
use crate::search::alphabeta::{SearchLimits, Searcher};
use crate::search::eval::EvaluationWeights;
use log::{debug, warn};

pub struct UciEngine {
    pos: CozyPosition,
    weights: EvaluationWeights,
    default_depth: u32,
}

impl UciEngine {
    pub fn new(weights: EvaluationWeights, default_depth: u32) -> Self {
        Self { pos: CozyPosition::startpos(), weights, default_depth }
    }

    pub fn position(&self) -> &CozyPosition { &self.pos }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Tesuji")?;
        writeln!(out, "id author Tesuji Team")?;
        writeln!(out, "uciok")
    }

    fn cmd_ucinewgame(&mut self) { self.pos = CozyPosition::startpos(); }

    /// `position startpos [moves ...]` or `position fen <fields> [moves ...]`.
    /// FEN fields stop at `moves`; missing clocks default to `0 1`.
    /// A command that fails to parse leaves the current position alone.
    pub fn cmd_position(&mut self, args: &str) {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        let (head, moves) = match tokens.iter().position(|t| *t == "moves") {
            Some(i) => (&tokens[..i], &tokens[i + 1..]),
            None => (&tokens[..], &[][..]),
        };
        let base = match head.split_first() {
            Some((&"startpos", _)) => Ok(CozyPosition::startpos()),
            Some((&"fen", fields)) => {
                let mut fen: Vec<&str> = fields.to_vec();
                if fen.len() == 4 { fen.push("0"); }
                if fen.len() == 5 { fen.push("1"); }
                CozyPosition::from_fen(&fen.join(" "))
            }
            other => { warn!("unsupported position command: {:?}", other.map(|(h, _)| *h)); return; }
        };
        let mut pos = match base {
            Ok(p) => p,
            Err(e) => { warn!("{}", e); return; }
        };
        for m in moves {
            if let Err(e) = pos.make_move_uci(m) { warn!("{}", e); return; }
        }
        self.pos = pos;
    }

    /// `go [depth N]`; prints `bestmove 0000` when there is nothing to play.
    pub fn cmd_go(&self, args: &str, out: &mut impl Write) -> io::Result<()> {
        let mut depth = self.default_depth;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { depth = d; }
            }
        }
        let mut searcher = Searcher::new(&self.weights, SearchLimits::depth(depth));
        let mut pos = self.pos.clone();
        match searcher.select_move(&mut pos) {
            Ok(Some(best)) => {
                debug!("searched {} nodes", searcher.nodes());
                writeln!(out, "bestmove {}", best)
            }
            Ok(None) => writeln!(out, "bestmove 0000"),
            Err(e) => { warn!("search failed: {}", e); writeln!(out, "bestmove 0000") }
        }
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() { continue; }
            if line == "uci" { self.cmd_uci(&mut out)?; }
            else if line == "isready" { writeln!(out, "readyok")?; }
            else if line == "ucinewgame" { self.cmd_ucinewgame(); }
            else if line == "quit" { break; }
            else if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
            else if line == "go" { self.cmd_go("", &mut out)?; }
            else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest, &mut out)?; }
            else { debug!("ignored: {}", line); }
            out.flush()?;
        }
        Ok(())
    }
}
