use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tesuji::board::cozy::CozyPosition;
use tesuji::perft::divide;
use tesuji::search::noise::choose_random_move;
use tesuji::search::{EvaluationWeights, SearchLimits, Searcher};
use tesuji::uci::UciEngine;
use tesuji::Position;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick a move with alpha-beta and quiescence search", long_about = None)]
struct Args {
    /// Search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Starting FEN position, or "startpos"
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// JSON evaluation weights; built-in material values when absent
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Trace quiescence nodes down to this ply (needs RUST_LOG=trace)
    #[arg(long)]
    qlog_depth: Option<u32>,

    /// Play a uniformly random legal move instead of searching
    #[arg(long)]
    random: bool,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Count leaf positions to --depth instead of searching
    #[arg(long)]
    perft: bool,

    /// Speak UCI on stdin/stdout
    #[arg(long)]
    uci: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let weights = match &args.weights {
        Some(path) => EvaluationWeights::from_json_file(path)
            .with_context(|| format!("loading weights from {}", path.display()))?,
        None => EvaluationWeights::chess_material(),
    };

    if args.uci {
        let mut engine = UciEngine::new(weights, args.depth);
        engine.run_loop()?;
        return Ok(());
    }

    let mut pos = if args.fen == "startpos" {
        CozyPosition::startpos()
    } else {
        CozyPosition::from_fen(&args.fen)?
    };

    if args.perft {
        let t0 = Instant::now();
        let split = divide(&mut pos, args.depth)?;
        let total: u64 = if args.depth == 0 { 1 } else { split.iter().map(|&(_, n)| n).sum() };
        for (mv, n) in &split { println!("{}: {}", mv, n); }
        println!("nodes: {}", total);
        info!("perft {} in {:.3}s", args.depth, t0.elapsed().as_secs_f64());
        return Ok(());
    }

    if args.random {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        match choose_random_move(&pos, &mut rng) {
            Some(mv) => println!("bestmove {}", mv),
            None => println!("bestmove resign"),
        }
        return Ok(());
    }

    if pos.legal_moves().is_empty() {
        println!("bestmove resign");
        return Ok(());
    }
    // A horizon node never carries a move, so search at least one ply.
    let limits = SearchLimits { depth: args.depth.max(1), qsearch_log_depth: args.qlog_depth };
    let mut searcher = Searcher::new(&weights, limits);
    let t0 = Instant::now();
    let res = searcher.search_root(&mut pos)?;
    let elapsed = t0.elapsed();
    println!("score: {}", res.score);
    match res.best_move {
        Some(mv) => println!("bestmove {}", mv),
        None => println!("bestmove resign"),
    }
    println!("nodes: {}", searcher.nodes());
    info!("depth {} searched in {:.3}s", args.depth, elapsed.as_secs_f64());
    Ok(())
}
