//! Chromosome playouts (simulated games used for fitness evaluation).
//!
//! A playout replays a chromosome's cell sequence on a private copy of the
//! board. Actors alternate starting with the first actor; an entry naming an
//! occupied cell is skipped and that actor's turn is forfeited. The playout
//! stops as soon as the acting mark completes a line.

use crate::board::{Board, Mark};
use crate::constants::CELLS;

/// An ordered plan of 9 candidate cells. Genes may repeat or point at
/// occupied cells.
pub type Chromosome = [usize; CELLS];

/// Replay `chromosome` against a copy of `board`.
///
/// `first` acts on the first gene, its opponent on the second, and so on.
/// Returns the mark that completed a line, if any.
pub fn playout(board: &Board, chromosome: &Chromosome, first: Mark) -> Option<Mark> {
    let mut sim = *board;
    let mut actor = first;
    for &cell in chromosome {
        if sim.play(cell, actor).is_ok() && sim.winner(actor).is_some() {
            return Some(actor);
        }
        actor = actor.opponent();
    }
    None
}

/// 1 if `reference` wins the playout, else 0.
pub fn playout_score(board: &Board, chromosome: &Chromosome, first: Mark, reference: Mark) -> u32 {
    u32::from(playout(board, chromosome, first) == Some(reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_stops_at_first_win() {
        // O at 0,1 and X at 3,4: X plays 5 and wins before O's 2 is reached.
        let board: Board = "OO.XX....".parse().unwrap();
        let plan = [5, 2, 6, 7, 8, 0, 1, 3, 4];
        assert_eq!(playout(&board, &plan, Mark::X), Some(Mark::X));
        assert_eq!(playout_score(&board, &plan, Mark::X, Mark::O), 0);
        assert_eq!(playout_score(&board, &plan, Mark::X, Mark::X), 1);
    }

    #[test]
    fn test_occupied_genes_forfeit_the_turn() {
        // X's genes all hit occupied cells, so O gets to complete the top row.
        let board: Board = "OO.XX....".parse().unwrap();
        let plan = [0, 2, 1, 6, 3, 7, 4, 8, 0];
        assert_eq!(playout(&board, &plan, Mark::X), Some(Mark::O));
    }

    #[test]
    fn test_playout_leaves_board_untouched() {
        let board: Board = "X...O....".parse().unwrap();
        let before = board;
        let plan = [1, 2, 3, 5, 6, 7, 8, 0, 4];
        let _ = playout(&board, &plan, Mark::X);
        assert_eq!(board, before);
    }
}
