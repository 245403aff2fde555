//! Property-based tests for both engines.
//!
//! Boards are generated by random alternating play from the empty board, so
//! every generated position is reachable.

use oxo_rust::board::{Board, Mark};
use oxo_rust::evolve::{EvolutionConfig, EvolutionarySearch};
use oxo_rust::minimax::ExactSearch;
use oxo_rust::playout::playout;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A reachable, unfinished position and the side to move.
fn arb_open_position() -> impl Strategy<Value = (Board, Mark)> {
    proptest::collection::vec(0usize..9, 0..8).prop_map(|picks| {
        let mut board = Board::new();
        let mut to_move = Mark::X;
        for pick in picks {
            let moves = board.legal_moves();
            let next = board.with_move(moves[pick % moves.len()], to_move);
            if next.is_terminal() {
                break;
            }
            board = next;
            to_move = to_move.opponent();
        }
        (board, to_move)
    })
}

fn arb_chromosome() -> impl Strategy<Value = [usize; 9]> {
    proptest::array::uniform9(0usize..9)
}

fn winning_cells(board: &Board, mark: Mark) -> Vec<usize> {
    board
        .legal_moves()
        .into_iter()
        .filter(|&c| board.with_move(c, mark).winner(mark).is_some())
        .collect()
}

fn evolver(seed: u64) -> EvolutionarySearch {
    let config = EvolutionConfig {
        population_size: 10,
        generations: 3,
        playouts: 2,
        mutation_rate: 0.5,
    };
    EvolutionarySearch::with_config(config, fastrand::Rng::with_seed(seed)).unwrap()
}

// =============================================================================
// Exact engine
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_exact_move_is_legal((board, mover) in arb_open_position()) {
        let mut engine = ExactSearch::with_seed(0);
        let cell = engine.best_move(&board, mover, mover.opponent()).unwrap();
        prop_assert!(board.is_empty_cell(cell));
    }

    #[test]
    fn prop_exact_leaves_board_unchanged((board, mover) in arb_open_position()) {
        let before = board;
        let _ = ExactSearch::with_seed(0).best_move(&board, mover, mover.opponent());
        prop_assert_eq!(board, before);
    }

    #[test]
    fn prop_exact_is_deterministic((board, mover) in arb_open_position(), seed in any::<u64>()) {
        let a = ExactSearch::with_seed(seed).best_move(&board, mover, mover.opponent());
        let b = ExactSearch::with_seed(seed.wrapping_add(1)).best_move(&board, mover, mover.opponent());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_exact_takes_immediate_win((board, mover) in arb_open_position()) {
        let wins = winning_cells(&board, mover);
        prop_assume!(!wins.is_empty());
        let cell = ExactSearch::with_seed(0).best_move(&board, mover, mover.opponent()).unwrap();
        prop_assert!(wins.contains(&cell));
        // Lowest winning cell, since every immediate win scores the same.
        prop_assert_eq!(cell, wins[0]);
    }
}

// =============================================================================
// Evolutionary engine
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_evolutionary_move_is_legal((board, mover) in arb_open_position(), seed in any::<u64>()) {
        let cell = evolver(seed).choose_move(&board, mover).unwrap();
        prop_assert!(board.is_empty_cell(cell));
    }

    #[test]
    fn prop_evolutionary_leaves_board_unchanged((board, mover) in arb_open_position(), seed in any::<u64>()) {
        let before = board;
        let _ = evolver(seed).choose_move(&board, mover);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn prop_evolutionary_wins_then_blocks((board, mover) in arb_open_position(), seed in any::<u64>()) {
        let wins = winning_cells(&board, mover);
        let threats = winning_cells(&board, mover.opponent());
        let cell = evolver(seed).choose_move(&board, mover).unwrap();
        if !wins.is_empty() {
            prop_assert_eq!(cell, wins[0]);
        } else if !threats.is_empty() {
            prop_assert_eq!(cell, threats[0]);
        }
    }

    #[test]
    fn prop_playout_never_mutates(
        (board, _mover) in arb_open_position(),
        plan in arb_chromosome(),
    ) {
        let before = board;
        let first = playout(&board, &plan, Mark::X);
        let second = playout(&board, &plan, Mark::X);
        prop_assert_eq!(board, before);
        prop_assert_eq!(first, second);
    }
}
