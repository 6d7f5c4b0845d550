//! Render FEN chess positions as SVG and PNG images.
//!
//! The pipeline has two stages: the placement field is parsed into a
//! [`BoardMatrix`](fen2img_board::BoardMatrix), then a board is composed in
//! SVG from the square colors, the orientation and one glyph per piece.
//! The SVG can then be rasterized to PNG.
//!
//! - [`config`] - [`RenderConfig`] and [`Orientation`]
//! - [`glyph`] - piece artwork loading and per-session caching
//! - [`composer`] - board backdrop, labels and glyph placement
//! - [`raster`] - the [`Rasterizer`] seam and its `resvg` implementation
//! - [`engine`] - [`Fen2Img`], which ties the stages together
//!
//! ```no_run
//! use fen2img::{Fen2Img, Orientation, RenderConfig};
//!
//! let config = RenderConfig::builder()
//!     .orientation(Orientation::FromBlack)
//!     .build()?;
//! let mut renderer = Fen2Img::new(config);
//! let png = renderer.to_png("8/8/8/4k3/8/8/8/4K3 w - - 0 1", 256)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assets;
pub mod composer;
pub mod config;
pub mod engine;
pub mod glyph;
pub mod raster;

pub use config::{ConfigError, Orientation, RenderConfig, RenderConfigBuilder};
pub use engine::{Fen2Img, RenderError, PADDING_FRACTION};
pub use fen2img_board::{parse_placement, BoardMatrix, FenError};
pub use glyph::{GlyphError, GlyphProvider, PieceGlyph};
pub use raster::{RasterError, Rasterizer, ResvgRasterizer};
