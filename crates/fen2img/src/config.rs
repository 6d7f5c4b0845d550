//! Render configuration.
//!
//! A [`RenderConfig`] is built once per render session through
//! [`RenderConfig::builder`] and is read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default light square color.
pub const DEFAULT_LIGHT_SQUARE: &str = "#f0d9b5";
/// Default dark square color.
pub const DEFAULT_DARK_SQUARE: &str = "#b58863";
/// Default canvas size in pixels.
pub const DEFAULT_BOARD_SIZE: u32 = 400;

/// Errors raised while building a [`RenderConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A square color is not a hex color or a color name.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    /// An artwork override is keyed by a character that cannot appear as a piece.
    #[error("unknown piece symbol {0:?}")]
    UnknownPieceSymbol(char),
    /// The board size is zero.
    #[error("invalid board size: {0}")]
    InvalidSize(u32),
}

/// Which side of the board is drawn at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Orientation {
    /// White at the bottom: rank 8 on top, file a on the left.
    #[default]
    #[serde(rename = "white")]
    FromWhite,
    /// Black at the bottom: rank 1 on top, file h on the left.
    #[serde(rename = "black")]
    FromBlack,
}

impl Orientation {
    /// Maps a visual cell (row from the top, column from the left) to the
    /// matrix cell shown there.
    #[inline]
    pub const fn to_matrix(self, row: usize, col: usize) -> (usize, usize) {
        match self {
            Orientation::FromWhite => (row, col),
            Orientation::FromBlack => (7 - row, 7 - col),
        }
    }
}

/// Immutable settings shared by every component of one render session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    orientation: Orientation,
    labels: bool,
    light_square: String,
    dark_square: String,
    size: u32,
    pieces: BTreeMap<char, String>,
}

impl RenderConfig {
    /// Starts a builder holding the default settings.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether rank and file labels are drawn.
    pub fn labels(&self) -> bool {
        self.labels
    }

    pub fn light_square(&self) -> &str {
        &self.light_square
    }

    pub fn dark_square(&self) -> &str {
        &self.dark_square
    }

    /// Side length of the SVG canvas in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Artwork overrides keyed by piece symbol.
    pub fn pieces(&self) -> &BTreeMap<char, String> {
        &self.pieces
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            orientation: Orientation::default(),
            labels: true,
            light_square: DEFAULT_LIGHT_SQUARE.to_string(),
            dark_square: DEFAULT_DARK_SQUARE.to_string(),
            size: DEFAULT_BOARD_SIZE,
            pieces: BTreeMap::new(),
        }
    }
}

/// Builder for [`RenderConfig`]. Validation happens in [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use fen2img::{Orientation, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .orientation(Orientation::FromBlack)
///     .labels(false)
///     .light_square("#eeeed2")
///     .dark_square("#769656")
///     .build()
///     .unwrap();
/// assert_eq!(config.orientation(), Orientation::FromBlack);
/// assert!(!config.labels());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn labels(mut self, labels: bool) -> Self {
        self.config.labels = labels;
        self
    }

    pub fn light_square(mut self, color: impl Into<String>) -> Self {
        self.config.light_square = color.into();
        self
    }

    pub fn dark_square(mut self, color: impl Into<String>) -> Self {
        self.config.dark_square = color.into();
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.config.size = size;
        self
    }

    /// Replaces the artwork for `symbol` with the given SVG document text.
    pub fn piece(mut self, symbol: char, svg: impl Into<String>) -> Self {
        self.config.pieces.insert(symbol, svg.into());
        self
    }

    /// Validates the settings and returns the finished configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] for a malformed square color,
    /// [`ConfigError::UnknownPieceSymbol`] for an override keyed by a digit,
    /// `/`, whitespace or a control character, and
    /// [`ConfigError::InvalidSize`] for a zero board size.
    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let config = self.config;
        for color in [&config.light_square, &config.dark_square] {
            if !is_valid_color(color) {
                return Err(ConfigError::InvalidColor(color.clone()));
            }
        }
        if let Some(&symbol) = config.pieces.keys().find(|&&c| !is_piece_symbol(c)) {
            return Err(ConfigError::UnknownPieceSymbol(symbol));
        }
        if config.size == 0 {
            return Err(ConfigError::InvalidSize(config.size));
        }
        Ok(config)
    }
}

/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and alphabetic color names.
fn is_valid_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

/// Characters a placement field could hand to the glyph provider.
fn is_piece_symbol(c: char) -> bool {
    !(c.is_ascii_digit() || c == '/' || c.is_whitespace() || c.is_control())
}
