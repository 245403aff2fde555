//! Line-oriented text protocol for driving the engines.
//!
//! Modelled on GTP: each request is a command with optional numeric id, each
//! response is `=<id> <message>` on success or `?<id> <message>` on failure,
//! followed by a blank line. Cells are numbered 1-9 on the wire.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Reset the board
//! - `showboard` - Render the board
//! - `engine <exact|evolve>` - Switch the engine used by `genmove`
//! - `play <x|o> <1-9>` - Place a mark
//! - `genmove <x|o>` - Choose and play a move, reply with its cell or `none`
//! - `result` - `X wins`, `O wins`, `draw` or `ongoing`
//!
//! ## Example
//!
//! ```ignore
//! use oxo_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::{debug, warn};

use crate::board::{Board, Mark, Outcome};
use crate::constants::CELLS;
use crate::engine::{Engine, EngineKind, MoveSelector};
use crate::evolve::EvolutionConfig;
use crate::minimax::ExactSearch;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "engine",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "result",
    "showboard",
    "version",
];

/// Parse a 1-based wire cell ("1".."9") into a board index.
pub fn parse_cell(s: &str) -> Result<usize> {
    let n: usize = s.parse().with_context(|| format!("invalid cell '{s}'"))?;
    if !(1..=CELLS).contains(&n) {
        bail!("cell {n} out of range (1-{CELLS})");
    }
    Ok(n - 1)
}

/// Format a board index as a 1-based wire cell.
pub fn str_cell(cell: usize) -> String {
    (cell + 1).to_string()
}

/// Protocol session state.
pub struct ProtocolEngine {
    board: Board,
    engine: Engine,
    config: EvolutionConfig,
    seed: Option<u64>,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create a session using the exact engine and default parameters.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            engine: Engine::Exact(ExactSearch::new()),
            config: EvolutionConfig::default(),
            seed: None,
        }
    }

    /// Create a session with a chosen engine, evolutionary parameters and seed.
    pub fn with_engine(kind: EngineKind, config: EvolutionConfig, seed: Option<u64>) -> Result<Self> {
        let engine = Engine::new(kind, config, seed)?;
        Ok(Self {
            board: Board::new(),
            engine,
            config,
            seed,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (prefix, message) = match self.execute(&command, args) {
                Ok(message) => ('=', message),
                Err(err) => {
                    warn!("command '{command_line}' failed: {err:#}");
                    ('?', format!("{err:#}"))
                }
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_mark(args: &[&str]) -> Result<Mark> {
        let Some(arg) = args.first() else {
            bail!("missing argument");
        };
        Ok(arg.parse::<Mark>()?)
    }

    /// Execute one command and return the response message.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    bail!("missing argument");
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(if known { "true" } else { "false" }.to_string())
            }

            "quit" => Ok(String::new()),

            "clear_board" => {
                self.board = Board::new();
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.board)),

            "engine" => {
                let Some(name) = args.first() else {
                    bail!("missing argument");
                };
                let kind: EngineKind = name.parse()?;
                self.engine = Engine::new(kind, self.config, self.seed)?;
                debug!("switched to {kind} engine");
                Ok(String::new())
            }

            "play" => {
                if args.len() < 2 {
                    bail!("missing arguments");
                }
                let mark = Self::parse_mark(args)?;
                let cell = parse_cell(args[1])?;
                if self.board.is_terminal() {
                    bail!("game is over");
                }
                self.board.play(cell, mark)?;
                Ok(String::new())
            }

            "genmove" => {
                let mark = Self::parse_mark(args)?;
                if self.board.is_full() {
                    return Ok("none".to_string());
                }
                if self.board.is_terminal() {
                    bail!("game is over");
                }
                match self.engine.select_move(&self.board, mark) {
                    Some(cell) => {
                        self.board
                            .play(cell, mark)
                            .with_context(|| format!("{} engine chose an illegal cell", self.engine.kind()))?;
                        Ok(str_cell(cell))
                    }
                    None => Ok("none".to_string()),
                }
            }

            "result" => Ok(match self.board.outcome() {
                Some(Outcome::Win(mark, _)) => format!("{mark} wins"),
                Some(Outcome::Draw) => "draw".to_string(),
                None => "ongoing".to_string(),
            }),

            _ => bail!("unknown command: {command}"),
        }
    }
}
