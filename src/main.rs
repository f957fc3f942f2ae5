//! Duke-MCTS: a Duke-style tile game with a Monte Carlo Tree Search opponent.
//!
//! ## Usage
//!
//! - `duke-mcts` - Show a demo
//! - `duke-mcts play` - Start the text protocol on stdin/stdout
//! - `duke-mcts selfplay` - Let the engine play both sides
//! - `duke-mcts demo` - Run the MCTS demo

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use duke_mcts::config::{Difficulty, SearchConfig};
use duke_mcts::engine::Engine;
use duke_mcts::logging::setup_logging;
use duke_mcts::mcts::SearchTree;
use duke_mcts::rules::{legal_placements, result};
use duke_mcts::state::opening;

/// Duke-MCTS: a tile game engine driven by Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "duke-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Strength of the engine (sets the iteration budget)
    #[arg(long, value_enum, default_value_t = Difficulty::Medium, global = true)]
    difficulty: Difficulty,

    /// Iterations per move; overrides --difficulty
    #[arg(long, global = true)]
    iterations: Option<usize>,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine through the text protocol
    Play,
    /// Let the engine play against itself
    Selfplay {
        /// Stop after this many plies if nobody has won
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;

    let mut config = match cli.iterations {
        Some(n) => SearchConfig::with_iterations(n),
        None => SearchConfig::for_difficulty(cli.difficulty),
    };
    config.seed = cli.seed;

    match cli.command {
        Some(Commands::Play) => Engine::new(config).run(),
        Some(Commands::Selfplay { max_plies }) => run_selfplay(config, max_plies),
        Some(Commands::Demo) | None => run_demo(config),
    }
}

fn run_selfplay(config: SearchConfig, max_plies: usize) -> Result<()> {
    let mut rng = config.rng();
    let mut state =
        opening(rng.usize(..6), rng.usize(..6), &mut rng).context("opening setup failed")?;
    println!("{state}");

    for ply in 1..=max_plies {
        let mut tree = SearchTree::new(state, config.clone().seeded(rng.u64(..)));
        state = tree.search().with_context(|| format!("search failed at ply {ply}"))?;
        println!("ply {ply}\n{state}");

        let outcome = result(&state);
        if outcome.is_terminal() {
            info!("game over after {ply} plies: {outcome:?}");
            println!("{outcome:?}");
            return Ok(());
        }
    }
    println!("no result after {max_plies} plies");
    Ok(())
}

fn run_demo(config: SearchConfig) -> Result<()> {
    println!("Duke-MCTS: Monte Carlo Tree Search for a Duke-style tile game\n");

    let mut rng = config.rng();
    let state = opening(2, 3, &mut rng)?;
    println!("=== Opening ===");
    println!("{state}");
    println!("White may place reinforcements on {:?}\n", legal_placements(&state));

    println!("=== MCTS Demo ===");
    println!("Running {} iterations...", config.iterations);
    let mut tree = SearchTree::new(state, config);
    let next = tree.search()?;
    println!("Chosen position:\n{next}");
    println!("Tree size: {} nodes", tree.len());
    Ok(())
}
