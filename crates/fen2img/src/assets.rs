//! Bundled default piece artwork.

use fen2img_board::Piece;

/// Default artwork keyed by `<piece>-<color>.svg`.
const BUNDLED: [(&str, &str); 12] = [
    ("bishop-black.svg", include_str!("../assets/bishop-black.svg")),
    ("bishop-white.svg", include_str!("../assets/bishop-white.svg")),
    ("king-black.svg", include_str!("../assets/king-black.svg")),
    ("king-white.svg", include_str!("../assets/king-white.svg")),
    ("knight-black.svg", include_str!("../assets/knight-black.svg")),
    ("knight-white.svg", include_str!("../assets/knight-white.svg")),
    ("pawn-black.svg", include_str!("../assets/pawn-black.svg")),
    ("pawn-white.svg", include_str!("../assets/pawn-white.svg")),
    ("queen-black.svg", include_str!("../assets/queen-black.svg")),
    ("queen-white.svg", include_str!("../assets/queen-white.svg")),
    ("rook-black.svg", include_str!("../assets/rook-black.svg")),
    ("rook-white.svg", include_str!("../assets/rook-white.svg")),
];

/// Resource key for one of the twelve standard symbols, e.g. `K` -> `king-white.svg`.
pub(crate) fn asset_key(symbol: char) -> Option<String> {
    let (piece, color) = Piece::from_fen_char(symbol)?;
    Some(format!("{}-{}.svg", piece.name(), color.name()))
}

/// Looks up a bundled artwork by resource key.
pub(crate) fn asset(key: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, svg)| *svg)
}
