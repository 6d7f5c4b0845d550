//! The FEN-to-image pipeline.

use fen2img_board::{parse_placement, FenError, Square};
use thiserror::Error;
use tracing::{debug, trace};

use crate::composer::{empty_board, place_glyph};
use crate::config::RenderConfig;
use crate::glyph::{GlyphError, GlyphProvider};
use crate::raster::{RasterError, Rasterizer, ResvgRasterizer};

/// Margin kept around each glyph, as a fraction of the square size.
pub const PADDING_FRACTION: f64 = 0.15;

/// Errors that abort a render. No partial output is produced.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Glyph(#[from] GlyphError),
    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterError),
    #[error("failed to serialize board: {0}")]
    Template(#[from] askama::Error),
}

/// Renders FEN positions for one session.
///
/// A session owns its configuration, glyph cache and rasterizer, and
/// shares nothing with other sessions.
///
/// # Examples
///
/// ```no_run
/// use fen2img::{Fen2Img, RenderConfig};
///
/// let mut renderer = Fen2Img::new(RenderConfig::default());
/// let svg = renderer.to_svg("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")?;
/// assert!(svg.starts_with("<svg"));
/// # Ok::<(), fen2img::RenderError>(())
/// ```
pub struct Fen2Img<R = ResvgRasterizer> {
    config: RenderConfig,
    glyphs: GlyphProvider,
    rasterizer: R,
}

impl Fen2Img<ResvgRasterizer> {
    /// Creates a renderer that rasterizes with [`ResvgRasterizer`].
    pub fn new(config: RenderConfig) -> Self {
        Self::with_rasterizer(config, ResvgRasterizer::new())
    }
}

impl<R: Rasterizer> Fen2Img<R> {
    /// Creates a renderer with a custom rasterizer.
    pub fn with_rasterizer(config: RenderConfig, rasterizer: R) -> Self {
        let glyphs = GlyphProvider::new(config.pieces().clone());
        Fen2Img {
            config,
            glyphs,
            rasterizer,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the position as an SVG document.
    ///
    /// Visual cell `(i, j)` shows the matrix cell picked by the configured
    /// orientation, and each piece is inset by [`PADDING_FRACTION`] of a
    /// square on every side.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Fen`] for a malformed placement field and
    /// [`RenderError::Glyph`] when a piece has no usable artwork.
    pub fn to_svg(&mut self, fen: &str) -> Result<String, RenderError> {
        let size = self.config.size();
        let square = f64::from(size) / 8.0;
        let padding = square * PADDING_FRACTION;
        let fill = 1.0 - 2.0 * PADDING_FRACTION;
        let orientation = self.config.orientation();

        let board = parse_placement(fen)?;
        let mut canvas = empty_board(&self.config, size);

        for i in 0..8 {
            for j in 0..8 {
                let (row, col) = orientation.to_matrix(i, j);
                let Some(symbol) = board.get(row, col) else {
                    continue;
                };
                let glyph = self.glyphs.glyph(symbol)?;
                if let Some(sq) = Square::from_row_col(row, col) {
                    trace!(%symbol, square = %sq, "placing piece");
                }
                place_glyph(
                    &mut canvas,
                    glyph,
                    square * j as f64 + padding,
                    square * i as f64 + padding,
                    square,
                    fill,
                );
            }
        }

        debug!(
            placement = %board.to_placement(),
            pieces = canvas.pieces.len(),
            "rendered board"
        );
        Ok(canvas.to_svg()?)
    }

    /// Renders the position and rasterizes it to a `size_px` square image.
    ///
    /// # Errors
    ///
    /// Everything [`to_svg`](Self::to_svg) returns, plus
    /// [`RenderError::Rasterization`] when the rasterizer fails.
    pub fn to_png(&mut self, fen: &str, size_px: u32) -> Result<Vec<u8>, RenderError> {
        let svg = self.to_svg(fen)?;
        Ok(self.rasterizer.rasterize(&svg, size_px, size_px)?)
    }
}
