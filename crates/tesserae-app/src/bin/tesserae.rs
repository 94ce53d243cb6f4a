//! Tesserae command-line shell.
//!
//! Keeps one session in a JSON save file and applies one command to it per
//! invocation. Commands that need a session resume the save file, or start a
//! fresh puzzle when there is none or it is rejected.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use tesserae_app::{AppError, bot, render, store};
use tesserae_core::{Difficulty, DifficultyTable, PieceId, PieceStyle, Point};
use tesserae_game::{
    BoardSize, Release, Session,
    game_factory::{self, NewGame},
};
use tesserae_generator::PuzzleSeed;

#[derive(Debug, Parser)]
#[command(name = "tesserae", version, about = "Headless jigsaw puzzle shell")]
struct Cli {
    /// Save file holding the session.
    #[arg(long, global = true, value_name = "FILE", default_value = "tesserae-save.json")]
    save: PathBuf,

    /// TOML file overriding difficulty profiles.
    #[arg(long, global = true, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Board width in pixels, used to interpret pointer travel.
    #[arg(long, global = true, default_value_t = 800.0)]
    width: f64,

    /// Board height in pixels.
    #[arg(long, global = true, default_value_t = 800.0)]
    height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GameArgs {
    /// Difficulty level (easy, normal, hard, or expert).
    #[arg(short, long, value_name = "LEVEL", default_value = "normal")]
    difficulty: Difficulty,

    /// Piece style (classic or mosaic).
    #[arg(short, long, value_name = "STYLE", default_value = "classic")]
    style: PieceStyle,

    /// Image reference; also seeds generation unless `--seed` is given.
    #[arg(short, long, value_name = "IMAGE")]
    image: Option<String>,

    /// Generation seed as 64 hex digits.
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,
}

impl GameArgs {
    fn new_game(&self) -> NewGame {
        let seed = self.seed.unwrap_or_else(|| {
            self.image
                .as_deref()
                .map_or_else(PuzzleSeed::random, PuzzleSeed::from_label)
        });
        NewGame {
            difficulty: self.difficulty,
            style: self.style,
            seed,
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a new puzzle, replacing the save file.
    New {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Print the session status.
    Status {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Drag a piece's group by a pixel offset.
    Drag {
        #[command(flatten)]
        game: GameArgs,
        /// Piece to pick up.
        #[arg(long)]
        piece: u32,
        /// Horizontal pointer travel in pixels.
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,
        /// Vertical pointer travel in pixels.
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
    },
    /// Tap a piece, rotating its group when rotation is enabled.
    Tap {
        #[command(flatten)]
        game: GameArgs,
        /// Piece to tap.
        #[arg(long)]
        piece: u32,
    },
    /// Rotate a piece's group a quarter turn.
    Rotate {
        #[command(flatten)]
        game: GameArgs,
        /// Piece to rotate.
        #[arg(long)]
        piece: u32,
    },
    /// Place one group on its home cells.
    Hint {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Let the bot finish the puzzle.
    Solve {
        #[command(flatten)]
        game: GameArgs,
        /// Give up after this many drags.
        #[arg(long, default_value_t = 10_000)]
        max_moves: usize,
    },
    /// Write the board as SVG.
    Render {
        #[command(flatten)]
        game: GameArgs,
        /// Output file.
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
        /// Skip piece outlines.
        #[arg(long)]
        no_outlines: bool,
    },
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let table = match &cli.profiles {
        Some(path) => store::load_profiles(path)?,
        None => DifficultyTable::default(),
    };
    let board = BoardSize::new(cli.width, cli.height);
    let open = |game: &GameArgs| -> Result<Session, AppError> {
        let snapshot = store::load_snapshot(&cli.save)?;
        let mut session = game_factory::resume_or_generate(snapshot, &table, &game.new_game())?;
        session.set_board_size(board);
        Ok(session)
    };

    match cli.command {
        Command::New { game } => {
            let mut session = game_factory::generate_session(&game.new_game(), &table)?;
            session.set_board_size(board);
            finish(&cli.save, &session)?;
        }
        Command::Status { game } => {
            let session = open(&game)?;
            print_status(&session);
        }
        Command::Drag {
            game,
            piece,
            dx,
            dy,
        } => {
            let mut session = open(&game)?;
            let id = PieceId(piece);
            let start = pointer_on(&session, id);
            session.pointer_down(id, start, Duration::ZERO)?;
            let end = start + Point::new(dx, dy);
            session.pointer_move(end)?;
            let release = session.pointer_up(end, Duration::from_secs(1))?;
            report(&release);
            finish(&cli.save, &session)?;
        }
        Command::Tap { game, piece } => {
            let mut session = open(&game)?;
            let id = PieceId(piece);
            let point = pointer_on(&session, id);
            session.pointer_down(id, point, Duration::ZERO)?;
            let release = session.pointer_up(point, Duration::from_millis(50))?;
            report(&release);
            finish(&cli.save, &session)?;
        }
        Command::Rotate { game, piece } => {
            let mut session = open(&game)?;
            let rotated = session.rotate(PieceId(piece))?;
            println!("{}", if rotated { "rotated" } else { "rotation disabled" });
            finish(&cli.save, &session)?;
        }
        Command::Hint { game } => {
            let mut session = open(&game)?;
            let id = session.hint()?;
            println!("placed the group of piece {id}");
            finish(&cli.save, &session)?;
        }
        Command::Solve { game, max_moves } => {
            let mut session = open(&game)?;
            let result = bot::autoplay(&mut session, max_moves)?;
            println!(
                "{} moves, {} reverted, {} taps, {} hints",
                result.moves, result.reverted, result.taps, result.hints
            );
            finish(&cli.save, &session)?;
        }
        Command::Render {
            game,
            out,
            no_outlines,
        } => {
            let session = open(&game)?;
            let options = render::RenderOptions {
                outlines: !no_outlines,
                ..render::RenderOptions::default()
            };
            fs::write(&out, render::render_svg(&session, options))?;
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}

/// Pixel center of the cell a piece rests on, or the board origin for an
/// unknown piece so the engine reports the error.
fn pointer_on(session: &Session, id: PieceId) -> Point {
    let grid = session.grid();
    let board = session.board_size();
    session.slot(id).map_or(Point::ZERO, |cell| {
        Point::new(
            (f64::from(cell.col) + 0.5) * board.width / f64::from(grid.cols()),
            (f64::from(cell.row) + 0.5) * board.height / f64::from(grid.rows()),
        )
    })
}

fn report(release: &Release) {
    println!("{:?}", release.gesture);
    if release.solved {
        println!("solved!");
    }
}

fn finish(save: &Path, session: &Session) -> Result<(), AppError> {
    store::save_snapshot(save, &session.snapshot())?;
    print_status(session);
    Ok(())
}

fn print_status(session: &Session) {
    let grid = session.grid();
    println!(
        "{} {} {}x{}: {}/{} locked, {} groups, {} hints left, {:.0}s",
        session.difficulty(),
        session.style(),
        grid.cols(),
        grid.rows(),
        session.locked_count(),
        session.pieces().len(),
        session.group_count(),
        session.hints_remaining(),
        session.elapsed().as_secs_f64()
    );
    for row in 0..i32::from(grid.rows()) {
        let line: Vec<_> = (0..i32::from(grid.cols()))
            .map(|col| {
                let cell = tesserae_core::Cell::new(col, row);
                match session.occupant(cell).and_then(|id| session.piece(id)) {
                    Some(piece) if piece.locked => format!("{:>4}", "."),
                    Some(piece) => format!("{:>3}{}", piece.id, rotation_mark(piece.rotation.degrees())),
                    None => format!("{:>4}", "?"),
                }
            })
            .collect();
        println!("{}", line.concat());
    }
}

fn rotation_mark(degrees: u16) -> char {
    match degrees {
        90 => '>',
        180 => 'v',
        270 => '<',
        _ => ' ',
    }
}
