//! Move selection facade.
//!
//! Callers pick an engine once and then ask it for moves through
//! [`MoveSelector`]. Dispatch goes to exactly one engine and its answer is
//! returned unmodified.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, Mark};
use crate::evolve::{ConfigError, EvolutionConfig, EvolutionarySearch};
use crate::minimax::ExactSearch;

/// Anything that can pick a move for the side to play.
pub trait MoveSelector {
    /// A legal cell for `mover`, or `None` if the board has no empty cell.
    fn select_move(&mut self, board: &Board, mover: Mark) -> Option<usize>;
}

impl MoveSelector for ExactSearch {
    fn select_move(&mut self, board: &Board, mover: Mark) -> Option<usize> {
        self.best_move(board, mover, mover.opponent())
    }
}

impl MoveSelector for EvolutionarySearch {
    fn select_move(&mut self, board: &Board, mover: Mark) -> Option<usize> {
        self.choose_move(board, mover)
    }
}

/// Which engine to use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineKind {
    #[default]
    Exact,
    #[value(name = "evolve")]
    Evolutionary,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Exact => write!(f, "exact"),
            EngineKind::Evolutionary => write!(f, "evolve"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine '{0}' (expected exact or evolve)")]
pub struct ParseEngineError(pub String);

impl FromStr for EngineKind {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "minimax" => Ok(EngineKind::Exact),
            "evolve" | "evolutionary" | "genetic" => Ok(EngineKind::Evolutionary),
            _ => Err(ParseEngineError(s.to_string())),
        }
    }
}

/// One concrete engine behind the facade.
pub enum Engine {
    Exact(ExactSearch),
    Evolutionary(EvolutionarySearch),
}

impl Engine {
    /// Build an engine of the given kind. `seed` fixes the random source.
    pub fn new(kind: EngineKind, config: EvolutionConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Ok(match kind {
            EngineKind::Exact => Engine::Exact(ExactSearch::with_rng(rng)),
            EngineKind::Evolutionary => {
                Engine::Evolutionary(EvolutionarySearch::with_config(config, rng)?)
            }
        })
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Engine::Exact(_) => EngineKind::Exact,
            Engine::Evolutionary(_) => EngineKind::Evolutionary,
        }
    }
}

impl MoveSelector for Engine {
    fn select_move(&mut self, board: &Board, mover: Mark) -> Option<usize> {
        match self {
            Engine::Exact(engine) => engine.select_move(board, mover),
            Engine::Evolutionary(engine) => engine.select_move(board, mover),
        }
    }
}
