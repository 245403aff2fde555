//! Exact game-tree search (minimax with alpha-beta pruning).
//!
//! The whole tree is searched to the end of the game; a 3x3 board never needs
//! more than 9 plies. Terminal positions score `+WIN_SCORE` when the engine's
//! mark has won and `-WIN_SCORE` when the opponent has, adjusted by the depth
//! at which the result was reached. The engine therefore prefers the fastest
//! forced win and the slowest forced loss.
//!
//! Pruning only cuts branches that cannot beat the best score already found,
//! so the chosen move is identical to a plain full-width minimax.

use log::debug;

use crate::board::{Board, Mark};
use crate::constants::{DRAW_SCORE, WIN_SCORE};

/// Static evaluation from `me`'s point of view: `+WIN_SCORE`, `-WIN_SCORE` or 0.
pub fn evaluate(board: &Board, me: Mark, opponent: Mark) -> i32 {
    if board.winner(me).is_some() {
        WIN_SCORE
    } else if board.winner(opponent).is_some() {
        -WIN_SCORE
    } else {
        DRAW_SCORE
    }
}

/// Depth-adjusted minimax value of `board`.
///
/// `maximizing` is true when it is `me` to move. `alpha`/`beta` bound the
/// window of scores still of interest; pass `i32::MIN`/`i32::MAX` for the
/// exact value.
pub fn minimax(
    board: &Board,
    depth: i32,
    maximizing: bool,
    me: Mark,
    opponent: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let score = evaluate(board, me, opponent);
    if score == WIN_SCORE {
        return score - depth;
    }
    if score == -WIN_SCORE {
        return score + depth;
    }
    if board.is_full() {
        return DRAW_SCORE;
    }

    if maximizing {
        let mut best = i32::MIN;
        for cell in board.legal_moves() {
            let child = board.with_move(cell, me);
            let value = minimax(&child, depth + 1, false, me, opponent, alpha, beta);
            best = best.max(value);
            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for cell in board.legal_moves() {
            let child = board.with_move(cell, opponent);
            let value = minimax(&child, depth + 1, true, me, opponent, alpha, beta);
            best = best.min(value);
            beta = beta.min(value);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Exact search engine.
///
/// Holds only the random source used by the fallback branch of
/// [`ExactSearch::best_move`]; no search state survives a call.
pub struct ExactSearch {
    rng: fastrand::Rng,
}

impl Default for ExactSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ExactSearch {
    /// Create an engine with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self { rng }
    }

    /// Score every legal move for `mover`, in ascending cell order.
    pub fn score_moves(&self, board: &Board, mover: Mark, opponent: Mark) -> Vec<(usize, i32)> {
        board
            .legal_moves()
            .into_iter()
            .map(|cell| {
                let child = board.with_move(cell, mover);
                let score = minimax(&child, 0, false, mover, opponent, i32::MIN, i32::MAX);
                (cell, score)
            })
            .collect()
    }

    /// Find the minimax-optimal move for `mover`.
    ///
    /// Ties go to the lowest cell index. Returns `None` if the board has no
    /// empty cell.
    pub fn best_move(&mut self, board: &Board, mover: Mark, opponent: Mark) -> Option<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }

        let mut best_score = i32::MIN;
        let mut best_move = None;
        for &cell in &moves {
            let child = board.with_move(cell, mover);
            // Scores that cannot beat the current best only need to be bounded.
            let score = minimax(&child, 0, false, mover, opponent, best_score, i32::MAX);
            if score > best_score {
                best_score = score;
                best_move = Some(cell);
            }
        }

        match best_move {
            Some(cell) => {
                debug!("exact search: {mover} plays {cell} (score {best_score})");
                Some(cell)
            }
            None => {
                // Unreachable with legal moves, since every score beats i32::MIN.
                let cell = moves[self.rng.usize(..moves.len())];
                debug!("exact search: no move improved on the sentinel, {mover} plays random {cell}");
                Some(cell)
            }
        }
    }
}
