//! Complete games between two move selectors.

use log::debug;

use crate::board::{Board, Mark, Outcome};
use crate::engine::MoveSelector;

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Cells in the order they were played, starting with the side that moved first.
    pub moves: Vec<usize>,
    pub board: Board,
    pub outcome: Outcome,
}

/// Play one game from `board` with `to_move` moving first, until it ends.
///
/// `x` moves for X and `o` for O. `on_move` sees the board after every move.
/// Returns `None` if a selector fails to produce a legal cell.
pub fn play_game(
    mut board: Board,
    mut to_move: Mark,
    x: &mut dyn MoveSelector,
    o: &mut dyn MoveSelector,
    mut on_move: impl FnMut(Mark, usize, &Board),
) -> Option<GameRecord> {
    let mut moves = Vec::new();
    loop {
        if let Some(outcome) = board.outcome() {
            debug!("game over after {} moves: {outcome:?}", moves.len());
            return Some(GameRecord {
                moves,
                board,
                outcome,
            });
        }
        let cell = match to_move {
            Mark::X => x.select_move(&board, to_move),
            Mark::O => o.select_move(&board, to_move),
        }?;
        board.play(cell, to_move).ok()?;
        moves.push(cell);
        on_move(to_move, cell, &board);
        to_move = to_move.opponent();
    }
}
