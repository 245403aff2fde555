//! Board model: cell array, win/draw detection and legal-move enumeration.
//!
//! A [`Board`] is a plain `Copy` value. Search engines take `&Board` and
//! simulate on their own copies, so a caller's board is never touched.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{CELLS, N, WIN_LINES, WinLine};

/// A player's mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mark '{0}' (expected X or O)")]
pub struct ParseMarkError(pub String);

impl FromStr for Mark {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(ParseMarkError(s.to_string())),
        }
    }
}

/// Reasons a move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {0} is out of range (must be 0-8)")]
    OutOfRange(usize),
    #[error("cell {0} is already occupied")]
    Occupied(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 9 cells, got {0}")]
    Length(usize),
    #[error("invalid character '{character}' at cell {cell}")]
    Character { character: char, cell: usize },
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark, WinLine),
    Draw,
}

/// A 3x3 board, cells in row-major order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.cells
    }

    /// The mark at `cell`, or `None` if it is empty or out of range.
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < CELLS && self.cells[cell].is_none()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// Place `mark` on `cell`.
    pub fn play(&mut self, cell: usize, mark: Mark) -> Result<(), BoardError> {
        if cell >= CELLS {
            return Err(BoardError::OutOfRange(cell));
        }
        if self.cells[cell].is_some() {
            return Err(BoardError::Occupied(cell));
        }
        self.cells[cell] = Some(mark);
        Ok(())
    }

    /// A copy of this board with `mark` written on `cell`.
    ///
    /// `cell` must be empty; callers pass cells from [`Board::legal_moves`].
    pub fn with_move(&self, cell: usize, mark: Mark) -> Self {
        debug_assert!(self.is_empty_cell(cell), "with_move on non-empty cell {cell}");
        let mut next = *self;
        next.cells[cell] = Some(mark);
        next
    }

    /// Empty cells in ascending index order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The first line in [`WIN_LINES`] completed by `mark`.
    pub fn winner(&self, mark: Mark) -> Option<WinLine> {
        WIN_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner(Mark::X).is_some() || self.winner(Mark::O).is_some() || self.is_full()
    }

    /// The result of the game, if it is over. X is checked before O.
    pub fn outcome(&self) -> Option<Outcome> {
        for mark in [Mark::X, Mark::O] {
            if let Some(line) = self.winner(mark) {
                return Some(Outcome::Win(mark, line));
            }
        }
        self.is_full().then_some(Outcome::Draw)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse nine cells, e.g. `"XX..O...."`. Whitespace and `|` are ignored;
    /// `.`, `-`, `_` and digits denote empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if chars.len() != CELLS {
            return Err(ParseBoardError::Length(chars.len()));
        }
        let mut cells = [None; CELLS];
        for (cell, &character) in chars.iter().enumerate() {
            cells[cell] = match character {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '-' | '_' => None,
                c if c.is_ascii_digit() => None,
                _ => return Err(ParseBoardError::Character { character, cell }),
            };
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..N {
                let cell = row * N + col;
                let ch = match self.cells[cell] {
                    Some(mark) => mark.as_char(),
                    None => char::from(b'1' + cell as u8),
                };
                if col > 0 {
                    write!(f, "|")?;
                }
                write!(f, " {ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
