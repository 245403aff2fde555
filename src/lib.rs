//! Oxo-Rust: noughts-and-crosses decision engines.
//!
//! Two interchangeable move selectors for the 3x3 game:
//! an exact minimax search that always plays optimally, and an evolutionary
//! search that evolves random game plans before settling on a one-ply
//! win/block heuristic.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scores and evolutionary parameters
//! - [`board`] - Board model, win/draw detection, legal moves
//! - [`minimax`] - Exact game-tree search
//! - [`playout`] - Chromosome playouts used for fitness
//! - [`evolve`] - Evolutionary search
//! - [`engine`] - Move selection facade
//! - [`game`] - Self-play between two selectors
//! - [`protocol`] - Text protocol for external front-ends
//!
//! ## Example
//!
//! ```
//! use oxo_rust::board::{Board, Mark};
//! use oxo_rust::minimax::ExactSearch;
//!
//! let board: Board = "XX..O....".parse().unwrap();
//! let mut engine = ExactSearch::with_seed(1);
//! assert_eq!(engine.best_move(&board, Mark::X, Mark::O), Some(2));
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod evolve;
pub mod game;
pub mod minimax;
pub mod playout;
pub mod protocol;
