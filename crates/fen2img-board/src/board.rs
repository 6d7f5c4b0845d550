//! The parsed 8x8 piece placement.

use std::fmt;
use std::ops::Index;

/// An 8x8 grid of piece symbols.
///
/// Row 0 holds rank 8 and row 7 holds rank 1; column 0 holds file a and
/// column 7 holds file h. `Some(c)` is a piece symbol (uppercase for white,
/// lowercase for black), `None` an empty square.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BoardMatrix {
    cells: [[Option<char>; 8]; 8],
}

impl BoardMatrix {
    /// A board with no pieces.
    pub const EMPTY: BoardMatrix = BoardMatrix {
        cells: [[None; 8]; 8],
    };

    pub(crate) const fn from_cells(cells: [[Option<char>; 8]; 8]) -> Self {
        BoardMatrix { cells }
    }

    /// Returns the symbol at matrix coordinates, or `None` if empty or out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Iterates over the occupied cells as `(row, col, symbol)`, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|symbol| (row, col, symbol)))
        })
    }

    /// Returns true if no square is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }

    /// Serializes the board back into a FEN piece-placement field.
    #[must_use]
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(71);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for cell in cells {
                match cell {
                    Some(symbol) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(*symbol);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
        }
        out
    }
}

impl Default for BoardMatrix {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Index<usize> for BoardMatrix {
    type Output = [Option<char>; 8];

    fn index(&self, row: usize) -> &Self::Output {
        &self.cells[row]
    }
}

impl fmt::Debug for BoardMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardMatrix({})", self.to_placement())
    }
}

impl fmt::Display for BoardMatrix {
    /// Prints the board as eight lines of symbols, `-` marking empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.cells {
            for cell in cells {
                write!(f, "{}", cell.unwrap_or('-'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
