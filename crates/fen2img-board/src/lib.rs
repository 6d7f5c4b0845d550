//! Board vocabulary for fen2img.
//!
//! This crate provides the types the renderer works with before any
//! drawing happens:
//! - [`Piece`] and [`Color`] for piece symbols
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`BoardMatrix`] and [`parse_placement`] for the FEN piece-placement field

mod board;
mod color;
mod fen;
mod piece;
mod square;

pub use board::BoardMatrix;
pub use color::Color;
pub use fen::{parse_placement, FenError, STARTPOS};
pub use piece::Piece;
pub use square::{File, Rank, Square};
