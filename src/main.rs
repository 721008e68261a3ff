use std::env;
use std::time::Instant;

use log::info;

use fianchetto::board::{Position, START_FEN};
use fianchetto::search::SearchEngine;

/// Dev harness: search a position to a fixed depth and print the verdict.
/// Usage: fianchetto [depth] [fen...]
fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let depth: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    let fen: String = {
        let rest: Vec<String> = args.collect();
        if rest.is_empty() {
            START_FEN.to_string()
        } else {
            rest.join(" ")
        }
    };

    let mut pos = match Position::from_fen(&fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("bad position '{}': {}", fen, err);
            std::process::exit(1);
        }
    };

    println!("{}", pos);
    info!("searching to depth {}", depth);

    let start = Instant::now();
    let mut engine = SearchEngine::new();
    let result = engine.search(&mut pos, depth);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(mv) => println!(
            "best {}  score {}  nodes {}  in {:.2?}",
            mv, result.score, result.nodes_searched, elapsed
        ),
        None => println!("no legal moves (score {})", result.score),
    }
}
