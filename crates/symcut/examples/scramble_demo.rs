//! Build a two-cutter puzzle, scramble it, then undo back to solved.
//!
//! Usage:
//!   cargo run -p symcut --example scramble_demo -- [moves] [seed]

use symcut::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let moves: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);

    let cutters = vec![
        Cutter::regular(4, vector![-0.5, 0.0], std::f64::consts::SQRT_2, 0.25 * std::f64::consts::PI),
        Cutter::regular(6, vector![0.6, 0.0], 1.0, 0.0),
    ];
    let mut puzzle = Puzzle::new(cutters).unwrap();
    println!(
        "solved: {} pieces, area {:.6}",
        puzzle.shapes().len(),
        puzzle.total_area()
    );

    let applied = puzzle.scramble(moves, &mut RandIndices::seeded(seed)).unwrap();
    let listed: Vec<String> = applied.iter().map(Move::to_string).collect();
    println!("moves: {}", listed.join(" "));
    println!(
        "scrambled: {} pieces, area {:.6}, solved={}",
        puzzle.shapes().len(),
        puzzle.total_area(),
        puzzle.is_solved()
    );

    while puzzle.undo().is_some() {}
    println!("after undo: solved={}", puzzle.is_solved());
}
