//! Constants for board geometry, search scoring, and evolutionary parameters.
//!
//! The board is a flat array of 9 cells in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length.
pub const N: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// A winning arrangement of three cells.
pub type WinLine = [usize; 3];

/// All winning lines. Order: rows, columns, main diagonal, anti-diagonal.
///
/// The order is observable: `winner` reports the first completed line.
pub const WIN_LINES: [WinLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Exact Search Scoring
// =============================================================================

/// Static score of a won terminal position (negated for a loss).
pub const WIN_SCORE: i32 = 10;

/// Draw score.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Evolutionary Search Parameters
// =============================================================================

/// Chromosomes per generation.
pub const POPULATION_SIZE: usize = 50;

/// Generations evolved per decision.
pub const GENERATIONS: usize = 50;

/// Simulated playouts per chromosome during fitness evaluation.
pub const PLAYOUTS_PER_CHROMOSOME: usize = 10;

/// Chromosomes carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 1;

/// Probability that an offspring receives one mutated gene.
pub const MUTATION_RATE: f64 = 0.1;

/// Smallest crossover cut position (inclusive).
pub const CROSSOVER_MIN: usize = 1;

/// Largest crossover cut position (inclusive).
pub const CROSSOVER_MAX: usize = CELLS - 1;

// =============================================================================
// Move Heuristic Scores
// =============================================================================

/// Heuristic score of a move that wins on the spot.
pub const HEURISTIC_WIN: u8 = 2;

/// Heuristic score of a move that blocks an immediate opponent win.
pub const HEURISTIC_BLOCK: u8 = 1;
