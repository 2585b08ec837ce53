//! Sliding-block puzzle CLI (default binary).
//!
//! - `generate`: print a seeded playable board
//! - `solve`: solve a board read from a text or JSON file
//! - `serve`: run the JSON-lines TCP service

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slide_puzzle::adapter::{run_server, BoardWire, ServerConfig};
use slide_puzzle::core::{
    is_trivially_solvable, Board, Generator, GeneratorConfig, SearchLimits, SolveOutcome, Solver,
};
use slide_puzzle::types::{ExitSide, DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Debug, Parser)]
#[command(name = "slide-puzzle", version, about = "Sliding-block puzzle generator and solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a playable board from a seed
    Generate {
        #[arg(long, default_value_t = DEFAULT_ROWS as usize)]
        rows: usize,
        #[arg(long, default_value_t = DEFAULT_COLS as usize)]
        cols: usize,
        #[arg(long, default_value = "right", value_parser = parse_exit)]
        exit: ExitSide,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Difficulty level (1-based)
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Print the board as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Cap each candidate check at this many expanded states
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Solve a board file (text grid, or JSON when the file starts with '{')
    Solve {
        file: PathBuf,
        /// Exit side for text boards
        #[arg(long, default_value = "right", value_parser = parse_exit)]
        exit: ExitSide,
        /// Stop after expanding this many states
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Run the TCP service
    Serve {
        /// Overrides SLIDE_PUZZLE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SLIDE_PUZZLE_PORT
        #[arg(long)]
        port: Option<u16>,
        /// Overrides SLIDE_PUZZLE_MAX_EXPANSIONS
        #[arg(long)]
        max_expansions: Option<usize>,
    },
}

fn parse_exit(s: &str) -> Result<ExitSide, String> {
    ExitSide::from_str(s).ok_or_else(|| format!("unknown exit side '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            rows,
            cols,
            exit,
            seed,
            level,
            json,
            max_expansions,
        } => {
            let limits = SearchLimits { max_expansions };
            generate(rows, cols, exit, seed, level, limits, json)
        }
        Command::Solve {
            file,
            exit,
            max_expansions,
        } => solve(&file, exit, max_expansions),
        Command::Serve {
            host,
            port,
            max_expansions,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if max_expansions.is_some() {
                config.max_expansions = max_expansions;
            }
            run_server(config, None).await
        }
    }
}

fn generate(
    rows: usize,
    cols: usize,
    exit: ExitSide,
    seed: u64,
    level: u32,
    limits: SearchLimits,
    json: bool,
) -> Result<()> {
    use rand::SeedableRng;

    let config = GeneratorConfig {
        limits,
        ..GeneratorConfig::for_level(level.max(1))
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let generation = Generator::new(config).generate(rows, cols, exit, &mut rng)?;
    info!(
        attempts = generation.attempts,
        verified = generation.verified,
        "board generated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&BoardWire::from_board(&generation.board))?);
    } else {
        print!("{}", generation.board);
        match generation.obstacle_moves {
            Some(moves) => println!("exit: {}  obstacle moves: {}", exit.as_str(), moves),
            None => println!("exit: {}  unchecked fallback board", exit.as_str()),
        }
    }
    Ok(())
}

fn load_board(path: &Path, exit: ExitSide) -> Result<Board> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    if text.trim_start().starts_with('{') {
        let wire: BoardWire = serde_json::from_str(&text).context("parsing JSON board")?;
        Ok(wire.to_board()?)
    } else {
        Ok(Board::parse(exit, &text)?)
    }
}

fn solve(path: &Path, exit: ExitSide, max_expansions: Option<usize>) -> Result<()> {
    let board = load_board(path, exit)?;
    print!("{}", board);
    if is_trivially_solvable(&board) {
        println!("lane is already clear");
    }

    let (outcome, stats) = Solver::new(SearchLimits { max_expansions }).solve_with_stats(&board);
    info!(expanded = stats.expanded, generated = stats.generated, "search finished");

    match outcome {
        SolveOutcome::Solved(solution) => {
            println!("obstacle moves: {}", solution.obstacle_moves);
            let mut replay = board.clone();
            for (step, slide) in solution.slides.iter().enumerate() {
                replay.slide(slide.index, slide.delta);
                println!("{:>3}. vehicle {} by {:+}", step + 1, slide.index, slide.delta);
            }
            print!("{}", replay);
            Ok(())
        }
        SolveOutcome::Unsolvable => Err(anyhow!("board has no solution")),
        SolveOutcome::LimitReached { expanded } => {
            Err(anyhow!("search stopped after {} expansions", expanded))
        }
    }
}
