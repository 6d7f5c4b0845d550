//! SVG rasterization.
//!
//! The engine only needs `rasterize(svg, width, height) -> bytes`; the
//! [`Rasterizer`] trait is that seam. [`ResvgRasterizer`] is the default
//! implementation and produces PNG.

use std::sync::Arc;

use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::debug;

/// Errors raised by a rasterizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// The SVG input could not be parsed.
    #[error("invalid SVG input: {0}")]
    InvalidSvg(String),
    /// The requested output size cannot be allocated.
    #[error("invalid output size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    /// Encoding the pixels failed.
    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Turns SVG text into encoded image bytes.
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterError>;
}

/// PNG rasterizer backed by `resvg`.
///
/// The font database is loaded once per rasterizer and reused for every call.
#[derive(Clone)]
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    /// Creates a rasterizer using the system fonts for label text.
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(faces = fontdb.len(), "loaded system fonts");
        Self::with_fonts(fontdb)
    }

    /// Creates a rasterizer with a caller-supplied font database.
    pub fn with_fonts(fontdb: usvg::fontdb::Database) -> Self {
        ResvgRasterizer {
            fontdb: Arc::new(fontdb),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        let tree =
            usvg::Tree::from_str(svg, &options).map_err(|e| RasterError::InvalidSvg(e.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RasterError::InvalidSize { width, height })?;

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }
}
