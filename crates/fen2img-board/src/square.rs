//! Board coordinates.
//!
//! A [`BoardMatrix`](crate::BoardMatrix) is addressed by `(row, col)` with
//! row 0 holding rank 8 and column 0 holding file a. [`File`] and [`Rank`]
//! name those rows and columns the way board labels print them.

use std::fmt;

/// A board column, file a (matrix column 0) to file h (column 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct File(u8);

impl File {
    /// The file drawn in matrix column `col`.
    #[inline]
    pub const fn from_col(col: usize) -> Option<Self> {
        if col < 8 {
            Some(File(col as u8))
        } else {
            None
        }
    }

    /// The label character, `'a'` to `'h'`.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }
}

/// A board row, rank 1 (matrix row 7) to rank 8 (row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rank(u8);

impl Rank {
    /// The rank held by matrix row `row`.
    #[inline]
    pub const fn from_row(row: usize) -> Option<Self> {
        if row < 8 {
            Some(Rank(7 - row as u8))
        } else {
            None
        }
    }

    /// The label character, `'1'` to `'8'`.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self.0) as char
    }
}

/// A square on the board, named by file and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// The square at matrix coordinates, or `None` outside the board.
    pub const fn from_row_col(row: usize, col: usize) -> Option<Self> {
        match (File::from_col(col), Rank::from_row(row)) {
            (Some(file), Some(rank)) => Some(Square { file, rank }),
            _ => None,
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_char())
    }
}
