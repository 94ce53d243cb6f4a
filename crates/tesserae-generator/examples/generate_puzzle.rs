//! Example demonstrating piece set generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` from a difficulty profile
//! - Generate a random or seeded piece set
//! - Display the seed and every piece's home and starting cell
//! - Pick the most scrambled layout out of many samples
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Choose the difficulty and piece style:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --difficulty hard --style mosaic
//! ```
//!
//! Replay a seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Sample many seeds and keep the one with the fewest pieces starting on
//! their home cell:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --samples 10000
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use tesserae_core::{Difficulty, DifficultyProfile, PieceShape, PieceStyle};
use tesserae_generator::{GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Difficulty level (easy, normal, hard, or expert).
    #[arg(short, long, value_name = "LEVEL", default_value = "normal")]
    difficulty: Difficulty,

    /// Piece style (classic or mosaic).
    #[arg(short, long, value_name = "STYLE", default_value = "classic")]
    style: PieceStyle,

    /// Seed to replay, as 64 hex digits.
    #[arg(long, value_name = "SEED", conflicts_with = "samples")]
    seed: Option<PuzzleSeed>,

    /// Number of random seeds to sample.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,
}

fn main() {
    let args = Args::parse();
    let profile = DifficultyProfile::canonical(args.difficulty);
    let generator = match PuzzleGenerator::from_profile(&profile, args.style) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if let Some(seed) = args.seed {
        print_puzzle(&generator.generate_with_seed(seed), None);
        return;
    }

    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }

    let best = (0..args.samples)
        .into_par_iter()
        .map(|_| {
            let puzzle = generator.generate();
            let home = pieces_at_home(&puzzle);
            (puzzle, home)
        })
        .min_by_key(|(_, home)| *home);

    if let Some((puzzle, home)) = best {
        let selection = (args.samples > 1).then_some((args.samples, home));
        print_puzzle(&puzzle, selection);
    }
}

fn pieces_at_home(puzzle: &GeneratedPuzzle) -> usize {
    puzzle
        .pieces
        .iter()
        .filter(|piece| piece.current.approx_eq(piece.correct, 1e-9))
        .count()
}

fn print_puzzle(puzzle: &GeneratedPuzzle, selection: Option<(usize, usize)>) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    println!("Grid:");
    println!(
        "  {}x{} {} pieces, rotation {}",
        puzzle.grid.cols(),
        puzzle.grid.rows(),
        puzzle.style,
        if puzzle.rotation_enabled { "on" } else { "off" },
    );
    println!();

    if let Some((samples, home)) = selection {
        println!("Selection:");
        println!("  Samples: {samples}");
        println!("  Pieces at home: {home}");
        println!();
    }

    println!("Pieces (stacking order):");
    for piece in &puzzle.pieces {
        let home = piece.home_cell(puzzle.grid);
        let start = piece
            .current_cell(puzzle.grid, 1e-9)
            .map_or_else(|| "?".to_owned(), |cell| cell.to_string());
        println!(
            "  #{:<4} home {home:<9} start {start:<9} {}",
            piece.id, piece.rotation
        );
    }

    if let Some(piece) = puzzle.pieces.iter().min_by_key(|piece| piece.id)
        && let PieceShape::Mosaic { path, view_box } = &piece.shape
    {
        println!();
        println!("Outline of piece #{}:", piece.id);
        println!("  viewBox {}", view_box.view_box());
        println!("  {path}");
    }
}
