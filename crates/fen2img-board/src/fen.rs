//! FEN piece-placement parsing.
//!
//! Only the first whitespace-separated field of a FEN record is read. The
//! remaining fields (side to move, castling, ...) are ignored, so both full
//! six-field records and bare placement fields are accepted.

use thiserror::Error;

use crate::BoardMatrix;

/// The standard starting position FEN.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors that can occur when parsing a placement field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("malformed FEN: {0}")]
    MalformedFen(String),
}

/// Parses the piece-placement field of a FEN string into a [`BoardMatrix`].
///
/// Descriptors are read rank 8 first, so the descriptor at position `r`
/// fills matrix row `r`. Every descriptor must cover exactly eight squares.
/// Piece letters are not checked against the standard set here.
///
/// # Errors
///
/// Returns [`FenError::MalformedFen`] when the field is missing, does not
/// have exactly eight ranks, contains the digits `0` or `9`, or describes a
/// rank with more or fewer than eight squares.
///
/// # Examples
///
/// ```
/// use fen2img_board::{parse_placement, STARTPOS};
///
/// let board = parse_placement(STARTPOS).unwrap();
/// assert_eq!(board[0][0], Some('r'));
/// assert_eq!(board[7][7], Some('R'));
/// ```
pub fn parse_placement(fen: &str) -> Result<BoardMatrix, FenError> {
    let placement = fen
        .split_whitespace()
        .next()
        .ok_or_else(|| FenError::MalformedFen("empty input".to_string()))?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::MalformedFen(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut cells = [[None; 8]; 8];
    for (row, rank) in ranks.iter().enumerate() {
        let rank_number = 8 - row;
        let mut col = 0usize;
        for c in rank.chars() {
            let width = match c {
                '1'..='8' => c as usize - '0' as usize,
                '0' | '9' => {
                    return Err(FenError::MalformedFen(format!(
                        "invalid empty-square count '{}' in rank {}",
                        c, rank_number
                    )));
                }
                _ => 1,
            };
            if col + width > 8 {
                return Err(FenError::MalformedFen(format!(
                    "rank {} describes more than 8 squares",
                    rank_number
                )));
            }
            if width == 1 && !c.is_ascii_digit() {
                cells[row][col] = Some(c);
            }
            col += width;
        }
        if col != 8 {
            return Err(FenError::MalformedFen(format!(
                "rank {} has {} squares, expected 8",
                rank_number, col
            )));
        }
    }

    Ok(BoardMatrix::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let board = parse_placement(STARTPOS).unwrap();
        assert_eq!(board[0][0], Some('r'));
        assert_eq!(board[0][4], Some('k'));
        assert_eq!(board[7][4], Some('K'));
        assert_eq!(board[7][7], Some('R'));
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn parse_empty_board() {
        let board = parse_placement("8/8/8/8/8/8/8/8").unwrap();
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(board[row][col], None);
            }
        }
    }

    #[test]
    fn placement_only_and_surrounding_whitespace() {
        let full = parse_placement("rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2 \n")
            .unwrap();
        let bare = parse_placement("  rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R").unwrap();
        assert_eq!(full, bare);
        assert_eq!(full[3][2], Some('p'));
        assert_eq!(full[5][5], Some('N'));
        assert_eq!(full[7][6], None);
    }

    #[test]
    fn seven_ranks_is_malformed() {
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
    }

    #[test]
    fn nine_ranks_is_malformed() {
        assert!(matches!(
            parse_placement("8/8/8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(parse_placement(""), Err(FenError::MalformedFen(_))));
        assert!(matches!(parse_placement("   "), Err(FenError::MalformedFen(_))));
    }

    #[test]
    fn overflowing_rank_is_malformed() {
        assert!(matches!(
            parse_placement("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenError::MalformedFen(_))
        ));
        assert!(matches!(
            parse_placement("7pp/8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
    }

    #[test]
    fn short_rank_is_malformed() {
        assert!(matches!(
            parse_placement("7/8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
        assert!(matches!(
            parse_placement("8/8/8//8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
    }

    #[test]
    fn zero_and_nine_are_malformed() {
        assert!(matches!(
            parse_placement("08/8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
        assert!(matches!(
            parse_placement("9/8/8/8/8/8/8/8"),
            Err(FenError::MalformedFen(_))
        ));
    }

    #[test]
    fn unknown_letters_are_kept() {
        let board = parse_placement("x7/8/8/8/8/8/8/8").unwrap();
        assert_eq!(board[0][0], Some('x'));
    }

    #[test]
    fn placement_roundtrip() {
        let placement = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R";
        assert_eq!(parse_placement(placement).unwrap().to_placement(), placement);
    }

    #[test]
    fn error_display() {
        let err = parse_placement("8/8/8/8/8/8/8").unwrap_err();
        assert!(err.to_string().contains("expected 8 ranks, got 7"));
    }
}
