mod state;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use symcut::api::{GeomCfg, Move, Puzzle, PuzzleDef, RandIndices};
use tracing_subscriber::fmt::SubscriberBuilder;

use state::{read_state, write_state, StateDoc};

#[derive(Parser)]
#[command(name = "symcut")]
#[command(about = "Build, play, and scramble symmetry-group dissection puzzles")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the solved piece set from a puzzle definition
    Build {
        #[arg(long)]
        def: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Apply an explicit move list, e.g. `--moves 0:2,1:5`
    Play {
        #[arg(long)]
        def: PathBuf,
        #[arg(long, value_delimiter = ',', value_parser = parse_move)]
        moves: Vec<Move>,
        /// Undo this many moves after playing
        #[arg(long, default_value_t = 0)]
        undo: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Apply seeded random moves
    Scramble {
        #[arg(long)]
        def: PathBuf,
        #[arg(long, default_value_t = 20)]
        moves: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Summarize a saved state document
    Report {
        #[arg(long)]
        state: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build { def, out } => build(&def, &out),
        Action::Play {
            def,
            moves,
            undo,
            out,
        } => play(&def, &moves, undo, &out),
        Action::Scramble {
            def,
            moves,
            seed,
            out,
        } => scramble(&def, moves, seed, &out),
        Action::Report { state } => report(&state),
    }
}

/// `cutter:symmetry`
fn parse_move(s: &str) -> Result<Move> {
    let Some((c, sym)) = s.split_once(':') else {
        bail!("expected cutter:symmetry, got {s:?}");
    };
    Ok(Move {
        cutter: c.trim().parse().with_context(|| format!("cutter index in {s:?}"))?,
        symmetry: sym
            .trim()
            .parse()
            .with_context(|| format!("symmetry index in {s:?}"))?,
    })
}

fn load(def: &Path) -> Result<(PuzzleDef, Puzzle)> {
    let bytes = std::fs::read(def).with_context(|| format!("reading {}", def.display()))?;
    let parsed: PuzzleDef = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing puzzle definition {}", def.display()))?;
    let puzzle = parsed
        .build(GeomCfg::default())
        .with_context(|| format!("building {}", def.display()))?;
    tracing::info!(
        puzzle = %parsed.name,
        cutters = puzzle.cutters().len(),
        shapes = puzzle.shapes().len(),
        "loaded puzzle"
    );
    Ok((parsed, puzzle))
}

fn build(def: &Path, out: &Path) -> Result<()> {
    let (parsed, puzzle) = load(def)?;
    write_state(out, &StateDoc::capture(&parsed.name, &puzzle, None))?;
    tracing::info!(out = %out.display(), "build");
    Ok(())
}

fn play(def: &Path, moves: &[Move], undo: usize, out: &Path) -> Result<()> {
    let (parsed, mut puzzle) = load(def)?;
    for (k, mv) in moves.iter().enumerate() {
        puzzle
            .apply_cut(mv.cutter, mv.symmetry)
            .with_context(|| format!("move {k} ({mv})"))?;
    }
    for _ in 0..undo {
        if puzzle.undo().is_none() {
            break;
        }
    }
    tracing::info!(
        moves = moves.len(),
        undo,
        shapes = puzzle.shapes().len(),
        solved = puzzle.is_solved(),
        "play"
    );
    write_state(out, &StateDoc::capture(&parsed.name, &puzzle, None))
}

fn scramble(def: &Path, moves: usize, seed: u64, out: &Path) -> Result<()> {
    let (parsed, mut puzzle) = load(def)?;
    puzzle
        .scramble(moves, &mut RandIndices::seeded(seed))
        .context("scramble")?;
    tracing::info!(moves, seed, shapes = puzzle.shapes().len(), "scramble");
    write_state(out, &StateDoc::capture(&parsed.name, &puzzle, Some(seed)))
}

fn report(path: &Path) -> Result<()> {
    let doc = read_state(path)?;
    let eps = GeomCfg::default().eps_transform;
    let summary = serde_json::json!({
        "name": doc.name,
        "code_rev": doc.code_rev,
        "seed": doc.seed,
        "moves": doc.moves.len(),
        "shapes": doc.shapes.len(),
        "displaced": doc.displaced(eps),
        "solved": doc.solved,
        "total_area": doc.total_area,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
