//! Oxo-Rust: noughts-and-crosses decision engines.
//!
//! ## Usage
//!
//! - `oxo-rust` - Show a demo game (exact engine vs evolutionary engine)
//! - `oxo-rust serve` - Start the text protocol on stdin/stdout
//! - `oxo-rust selfplay --x exact --o evolve` - Play one game between two engines
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use oxo_rust::board::{Board, Mark, Outcome};
use oxo_rust::engine::{Engine, EngineKind};
use oxo_rust::evolve::EvolutionConfig;
use oxo_rust::game::play_game;
use oxo_rust::protocol::{ProtocolEngine, str_cell};

/// Oxo-Rust: noughts-and-crosses decision engines
#[derive(Parser)]
#[command(name = "oxo-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the engines' random source (entropy-seeded if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(flatten)]
    evolution: EvolutionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides for the evolutionary engine.
#[derive(Args)]
struct EvolutionArgs {
    /// Chromosomes per generation
    #[arg(long, global = true)]
    population: Option<usize>,
    /// Generations evolved per move
    #[arg(long, global = true)]
    generations: Option<usize>,
    /// Playouts per chromosome
    #[arg(long, global = true)]
    playouts: Option<usize>,
    /// Probability of mutating an offspring
    #[arg(long, global = true)]
    mutation_rate: Option<f64>,
}

impl EvolutionArgs {
    fn config(&self) -> EvolutionConfig {
        let defaults = EvolutionConfig::default();
        EvolutionConfig {
            population_size: self.population.unwrap_or(defaults.population_size),
            generations: self.generations.unwrap_or(defaults.generations),
            playouts: self.playouts.unwrap_or(defaults.playouts),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server for use with external front-ends
    Serve {
        /// Engine used by `genmove`
        #[arg(long, value_enum, default_value_t = EngineKind::Exact)]
        engine: EngineKind,
    },
    /// Play one game between two engines
    Selfplay {
        /// Engine playing X (moves first)
        #[arg(long, value_enum, default_value_t = EngineKind::Exact)]
        x: EngineKind,
        /// Engine playing O
        #[arg(long, value_enum, default_value_t = EngineKind::Evolutionary)]
        o: EngineKind,
    },
    /// Run a demo game: exact engine (X) vs evolutionary engine (O)
    Demo,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.evolution.config();
    config.validate().context("invalid evolutionary parameters")?;

    match cli.command {
        Some(Commands::Serve { engine }) => {
            let mut session = ProtocolEngine::with_engine(engine, config, cli.seed)?;
            session.run()
        }
        Some(Commands::Selfplay { x, o }) => run_game(x, o, config, cli.seed),
        Some(Commands::Demo) | None => {
            println!("Oxo-Rust: Noughts-and-Crosses Engines\n");
            run_game(EngineKind::Exact, EngineKind::Evolutionary, config, cli.seed)
        }
    }
}

fn run_game(x: EngineKind, o: EngineKind, config: EvolutionConfig, seed: Option<u64>) -> Result<()> {
    // Distinct streams so the two engines do not mirror each other.
    let mut x_engine = Engine::new(x, config, seed)?;
    let mut o_engine = Engine::new(o, config, seed.map(|s| s.wrapping_add(1)))?;
    info!("starting game: X = {x}, O = {o}");

    println!("X: {x} engine, O: {o} engine\n");
    println!("{}", Board::new());

    let record = play_game(
        Board::new(),
        Mark::X,
        &mut x_engine,
        &mut o_engine,
        |mark, cell, board| {
            println!("{mark} plays {}", str_cell(cell));
            println!("{board}");
        },
    )
    .context("an engine failed to produce a legal move")?;

    match record.outcome {
        Outcome::Win(mark, line) => {
            let cells: Vec<String> = line.iter().map(|&c| str_cell(c)).collect();
            println!("{mark} wins on {}", cells.join("-"));
        }
        Outcome::Draw => println!("Draw"),
    }
    Ok(())
}
