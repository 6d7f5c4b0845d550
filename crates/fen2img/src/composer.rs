//! Board geometry and SVG composition.
//!
//! The composer only knows about squares, labels and glyph placement; it
//! never sees FEN. [`empty_board`] lays out the backdrop and
//! [`place_glyph`] drops scaled artwork onto it.

use askama::Template;
use fen2img_board::Square;

use crate::config::RenderConfig;
use crate::glyph::PieceGlyph;

/// Label inset from the square edge, as a fraction of the square size.
const LABEL_INSET: f64 = 0.05;
/// Label font size, as a fraction of the square size.
const LABEL_FONT: f64 = 0.22;

/// A filled board square.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareView {
    pub x: String,
    pub y: String,
    pub size: String,
    pub fill: String,
}

/// A rank or file label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub x: String,
    pub y: String,
    pub fill: String,
    pub text: char,
}

/// A glyph copied onto the canvas with its placement transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub x: String,
    pub y: String,
    pub scale: String,
    pub markup: String,
}

/// The SVG document being assembled for one render.
///
/// Elements are kept in insertion order, so serializing the same sequence
/// of operations always produces the same bytes.
#[derive(Debug, Clone, Template)]
#[template(path = "board.svg")]
pub struct BoardCanvas {
    /// Canvas side length in pixels.
    pub size: u32,
    /// Label font size in pixels.
    pub font_size: String,
    pub squares: Vec<SquareView>,
    pub labels: Vec<LabelView>,
    pub pieces: Vec<PlacedGlyph>,
}

impl BoardCanvas {
    /// Serializes the canvas to SVG text.
    pub fn to_svg(&self) -> Result<String, askama::Error> {
        self.render()
    }
}

/// Builds the board backdrop: 64 squares plus, if enabled, rank labels
/// down the left edge and file labels along the bottom edge.
///
/// Square `(row, col)` is light when `row + col` is even. Each label takes
/// the color of the opposite square shade so it stays legible, and names
/// the square actually shown under it for the configured orientation.
#[must_use]
pub fn empty_board(config: &RenderConfig, size_px: u32) -> BoardCanvas {
    let square = f64::from(size_px) / 8.0;
    let shade = |row: usize, col: usize, inverted: bool| {
        let light = (row + col) % 2 == 0;
        if light != inverted {
            config.light_square().to_string()
        } else {
            config.dark_square().to_string()
        }
    };

    let mut squares = Vec::with_capacity(64);
    for row in 0..8 {
        for col in 0..8 {
            squares.push(SquareView {
                x: fmt_num(square * col as f64),
                y: fmt_num(square * row as f64),
                size: fmt_num(square),
                fill: shade(row, col, false),
            });
        }
    }

    let mut labels = Vec::new();
    if config.labels() {
        let orientation = config.orientation();
        let inset = square * LABEL_INSET;
        for row in 0..8 {
            let (r, c) = orientation.to_matrix(row, 0);
            if let Some(shown) = Square::from_row_col(r, c) {
                labels.push(LabelView {
                    x: fmt_num(inset),
                    y: fmt_num(square * (row as f64 + 0.25)),
                    fill: shade(row, 0, true),
                    text: shown.rank().to_char(),
                });
            }
        }
        for col in 0..8 {
            let (r, c) = orientation.to_matrix(7, col);
            if let Some(shown) = Square::from_row_col(r, c) {
                labels.push(LabelView {
                    x: fmt_num(square * (col as f64 + 0.85)),
                    y: fmt_num(f64::from(size_px) - inset),
                    fill: shade(7, col, true),
                    text: shown.file().to_char(),
                });
            }
        }
    }

    BoardCanvas {
        size: size_px,
        font_size: fmt_num(square * LABEL_FONT),
        squares,
        labels,
        pieces: Vec::new(),
    }
}

/// Places a glyph with its top-left corner at `(x, y)`, scaled so its
/// height fills `fill_fraction` of a square of `square_px` pixels.
///
/// The canvas keeps its own copy of the glyph markup.
pub fn place_glyph(
    canvas: &mut BoardCanvas,
    glyph: &PieceGlyph,
    x: f64,
    y: f64,
    square_px: f64,
    fill_fraction: f64,
) {
    let scale = square_px * fill_fraction / glyph.height();
    canvas.pieces.push(PlacedGlyph {
        x: fmt_num(x),
        y: fmt_num(y),
        scale: fmt_num(scale),
        markup: glyph.markup().to_string(),
    });
}

/// Formats a coordinate with at most four decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Orientation;

    fn labels(canvas: &BoardCanvas) -> String {
        canvas.labels.iter().map(|l| l.text).collect()
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(50.0), "50");
        assert_eq!(fmt_num(7.5), "7.5");
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(35.0 / 45.0), "0.7778");
        assert_eq!(fmt_num(-0.00001), "0");
    }

    #[test]
    fn squares_alternate() {
        let config = RenderConfig::default();
        let canvas = empty_board(&config, 400);
        assert_eq!(canvas.squares.len(), 64);
        assert_eq!(canvas.squares[0].fill, "#f0d9b5");
        assert_eq!(canvas.squares[1].fill, "#b58863");
        assert_eq!(canvas.squares[8].fill, "#b58863");
        assert_eq!(canvas.squares[63].fill, "#f0d9b5");
        assert_eq!(canvas.squares[9].x, "50");
        assert_eq!(canvas.squares[9].y, "50");
        assert_eq!(canvas.squares[9].size, "50");
    }

    #[test]
    fn labels_from_white() {
        let canvas = empty_board(&RenderConfig::default(), 400);
        assert_eq!(labels(&canvas), "87654321abcdefgh");
    }

    #[test]
    fn labels_from_black() {
        let config = RenderConfig::builder()
            .orientation(Orientation::FromBlack)
            .build()
            .unwrap();
        let canvas = empty_board(&config, 400);
        assert_eq!(labels(&canvas), "12345678hgfedcba");
    }

    #[test]
    fn labels_contrast_with_their_square() {
        let config = RenderConfig::default();
        let canvas = empty_board(&config, 400);
        // rank label on a8 (light) is dark, on a7 (dark) is light
        assert_eq!(canvas.labels[0].fill, "#b58863");
        assert_eq!(canvas.labels[1].fill, "#f0d9b5");
        // file label on a1 (dark) is light, on b1 (light) is dark
        assert_eq!(canvas.labels[8].fill, "#f0d9b5");
        assert_eq!(canvas.labels[9].fill, "#b58863");
    }

    #[test]
    fn label_positions() {
        let canvas = empty_board(&RenderConfig::default(), 400);
        assert_eq!(canvas.labels[0].x, "2.5");
        assert_eq!(canvas.labels[0].y, "12.5");
        assert_eq!(canvas.labels[8].x, "42.5");
        assert_eq!(canvas.labels[8].y, "397.5");
    }

    #[test]
    fn labels_can_be_hidden() {
        let config = RenderConfig::builder().labels(false).build().unwrap();
        let canvas = empty_board(&config, 400);
        assert!(canvas.labels.is_empty());
        assert!(!canvas.to_svg().unwrap().contains("<text"));
    }

    #[test]
    fn place_glyph_scales_to_square() {
        let mut canvas = empty_board(&RenderConfig::default(), 400);
        let glyph = PieceGlyph::parse('K', r#"<svg height="45px"><rect/></svg>"#).unwrap();
        place_glyph(&mut canvas, &glyph, 7.5, 357.5, 50.0, 0.7);
        place_glyph(&mut canvas, &glyph, 57.5, 357.5, 50.0, 0.7);

        assert_eq!(canvas.pieces.len(), 2);
        assert_eq!(canvas.pieces[0].scale, "0.7778");
        assert_eq!(canvas.pieces[1].x, "57.5");
        assert_eq!(canvas.pieces[0].markup, glyph.markup());
        assert_eq!(glyph.height(), 45.0);
    }

    #[test]
    fn serializes_well_formed_svg() {
        let mut canvas = empty_board(&RenderConfig::default(), 400);
        let glyph = PieceGlyph::parse('K', r#"<svg height="45"><rect id="k"/></svg>"#).unwrap();
        place_glyph(&mut canvas, &glyph, 7.5, 7.5, 50.0, 0.7);
        let svg = canvas.to_svg().unwrap();

        let doc = roxmltree::Document::parse(&svg).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.attribute("width"), Some("400"));
        assert_eq!(root.attribute("height"), Some("400"));
        assert_eq!(root.children().filter(|n| n.has_tag_name("rect")).count(), 64);
        assert_eq!(root.children().filter(|n| n.has_tag_name("text")).count(), 16);
        let group = root.children().find(|n| n.has_tag_name("g")).unwrap();
        assert_eq!(
            group.attribute("transform"),
            Some("translate(7.5, 7.5) scale(0.7778)")
        );
        assert!(svg.contains(r#"<rect id="k"/>"#));
    }
}
