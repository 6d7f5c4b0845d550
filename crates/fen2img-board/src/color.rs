//! Piece sides.

/// The side a piece belongs to, read from the case of its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the color of a FEN piece symbol from its letter case.
    ///
    /// Uppercase letters are white, everything else is black.
    #[inline]
    pub const fn of_symbol(symbol: char) -> Self {
        if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Lowercase name used in asset keys ("white" or "black").
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}
