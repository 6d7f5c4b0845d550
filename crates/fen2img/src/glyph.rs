//! Piece artwork loading and caching.

use std::collections::{BTreeMap, HashMap};

use roxmltree::{Document, Node, ParsingOptions};
use thiserror::Error;
use tracing::debug;

use crate::assets;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Errors that can occur while resolving a piece glyph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    /// The symbol is not a standard piece and has no override.
    #[error("unknown piece symbol {0:?}")]
    UnknownPieceSymbol(char),
    /// A standard piece has no bundled artwork.
    #[error("missing bundled asset {0}")]
    MissingAsset(String),
    /// Artwork text could not be used as a piece glyph.
    #[error("invalid artwork for {symbol:?}: {reason}")]
    InvalidArtwork { symbol: char, reason: String },
}

/// Parsed artwork for one piece symbol.
///
/// Holds the markup of the root `<svg>` element and the intrinsic size
/// used to scale it onto a square. The markup is written back from the
/// parsed tree: the prolog, doctype and comments are dropped, entity
/// references are expanded, and the root always carries explicit `width`
/// and `height` so it never stretches to the enclosing viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceGlyph {
    markup: String,
    width: f64,
    height: f64,
}

impl PieceGlyph {
    /// Parses an SVG document into a glyph.
    ///
    /// The height comes from the root `height` attribute with every
    /// character other than digits and `.` stripped, so `45px` reads as 45.
    /// Without a `height`, the height of the `viewBox` is used. A missing
    /// `width` follows the `viewBox` aspect ratio, or equals the height when
    /// there is no `viewBox` either.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphError::InvalidArtwork`] if the text is not well-formed
    /// XML, the root element is not `<svg>`, or no positive height is found.
    pub fn parse(symbol: char, svg: &str) -> Result<Self, GlyphError> {
        let invalid = |reason: String| GlyphError::InvalidArtwork { symbol, reason };

        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(svg, options).map_err(|e| invalid(e.to_string()))?;
        let root = doc.root_element();

        let tag = root.tag_name();
        if tag.name() != "svg" || tag.namespace().is_some_and(|ns| ns != SVG_NAMESPACE) {
            return Err(invalid(format!("root element is <{}>, expected <svg>", tag.name())));
        }

        let viewbox = root.attribute("viewBox").and_then(viewbox_size);
        let height = root
            .attribute("height")
            .and_then(parse_length)
            .or(viewbox.map(|(_, h)| h))
            .ok_or_else(|| invalid("no usable height or viewBox".to_string()))?;
        let width = root
            .attribute("width")
            .and_then(parse_length)
            .or(viewbox.map(|(w, h)| w * height / h))
            .unwrap_or(height);

        let mut markup = String::with_capacity(svg.len());
        let size = [("width", width.to_string()), ("height", height.to_string())];
        write_element(root, &size, &mut markup);

        Ok(PieceGlyph {
            markup,
            width,
            height,
        })
    }

    /// The `<svg>` element markup, ready to be nested in another document.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Intrinsic width in user units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Intrinsic height in user units.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Reads a length such as `45`, `45px` or `45.5pt`, ignoring the units.
fn parse_length(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().filter(|h| h.is_finite() && *h > 0.0)
}

/// Reads the width and height of a `viewBox`; both must be positive.
fn viewbox_size(value: &str) -> Option<(f64, f64)> {
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect::<Option<Vec<f64>>>()?;
    match numbers[..] {
        [_, _, w, h] if w > 0.0 && h > 0.0 => Some((w, h)),
        _ => None,
    }
}

/// Writes an element and its subtree as XML.
///
/// Attributes named in `replace` are written first with the given values,
/// and the element's own unprefixed attributes of the same names are
/// skipped. Namespace declarations are repeated only where they differ
/// from the parent element's scope.
fn write_element(node: Node<'_, '_>, replace: &[(&str, String)], out: &mut String) {
    let tag = node.tag_name();
    let name = qualified(node, tag.namespace(), tag.name());
    out.push('<');
    out.push_str(&name);

    let inherited = node
        .parent_element()
        .map(|p| p.namespaces().collect::<Vec<_>>())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&ns) {
            continue;
        }
        match ns.name() {
            Some(prefix) => out.push_str(&format!(" xmlns:{prefix}=\"")),
            None => out.push_str(" xmlns=\""),
        }
        escape_attribute(ns.uri(), out);
        out.push('"');
    }
    if tag.namespace().is_none() && inherited.iter().any(|ns| ns.name().is_none()) {
        out.push_str(" xmlns=\"\"");
    }

    for (attr, value) in replace {
        out.push_str(&format!(" {attr}=\""));
        escape_attribute(value, out);
        out.push('"');
    }
    for attr in node.attributes() {
        if attr.namespace().is_none() && replace.iter().any(|(n, _)| *n == attr.name()) {
            continue;
        }
        out.push(' ');
        out.push_str(&qualified(node, attr.namespace(), attr.name()));
        out.push_str("=\"");
        escape_attribute(attr.value(), out);
        out.push('"');
    }

    if !node.children().any(|c| c.is_element() || c.is_text()) {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in node.children() {
        if child.is_element() {
            write_element(child, &[], out);
        } else if let Some(text) = child.text().filter(|_| child.is_text()) {
            escape_text(text, out);
        }
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn qualified(node: Node<'_, '_>, namespace: Option<&str>, name: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{name}"),
        _ => name.to_string(),
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Supplies glyphs for piece symbols, preferring caller overrides over the
/// bundled artwork.
///
/// Each provider owns its cache; nothing is shared between providers, so
/// overrides given to one render session never leak into another.
#[derive(Debug, Default)]
pub struct GlyphProvider {
    overrides: BTreeMap<char, String>,
    cache: HashMap<char, PieceGlyph>,
}

impl GlyphProvider {
    /// Creates a provider with the given artwork overrides.
    pub fn new(overrides: BTreeMap<char, String>) -> Self {
        GlyphProvider {
            overrides,
            cache: HashMap::new(),
        }
    }

    /// Returns the glyph for `symbol`, loading and caching it on first use.
    ///
    /// # Errors
    ///
    /// - [`GlyphError::UnknownPieceSymbol`] if `symbol` has no override and is
    ///   not one of `KQRBNPkqrbnp`
    /// - [`GlyphError::MissingAsset`] if the bundled artwork is absent
    /// - [`GlyphError::InvalidArtwork`] if the artwork cannot be parsed
    pub fn glyph(&mut self, symbol: char) -> Result<&PieceGlyph, GlyphError> {
        if !self.cache.contains_key(&symbol) {
            let glyph = self.load(symbol)?;
            self.cache.insert(symbol, glyph);
        }
        Ok(&self.cache[&symbol])
    }

    /// Number of glyphs loaded so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, symbol: char) -> Result<PieceGlyph, GlyphError> {
        if let Some(svg) = self.overrides.get(&symbol) {
            debug!(%symbol, "loading override artwork");
            return PieceGlyph::parse(symbol, svg);
        }

        let key = assets::asset_key(symbol).ok_or(GlyphError::UnknownPieceSymbol(symbol))?;
        let svg = assets::asset(&key).ok_or_else(|| GlyphError::MissingAsset(key.clone()))?;
        debug!(%symbol, asset = %key, "loading bundled artwork");
        PieceGlyph::parse(symbol, svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM_KING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle id="custom-king" cx="50" cy="50" r="40"/></svg>"#;

    #[test]
    fn parse_strips_units_from_height() {
        let glyph = PieceGlyph::parse('K', r#"<svg width="45px" height="45px"/>"#).unwrap();
        assert_eq!(glyph.height(), 45.0);

        let glyph = PieceGlyph::parse('K', r#"<svg height="22.5pt"/>"#).unwrap();
        assert_eq!(glyph.height(), 22.5);
    }

    #[test]
    fn parse_falls_back_to_viewbox() {
        let glyph = PieceGlyph::parse('K', r#"<svg viewBox="0 0 64 80"/>"#).unwrap();
        assert_eq!(glyph.height(), 80.0);
        assert_eq!(glyph.width(), 64.0);

        let glyph = PieceGlyph::parse('K', r#"<svg height="auto" viewBox="0,0,64,32"/>"#).unwrap();
        assert_eq!(glyph.height(), 32.0);
    }

    #[test]
    fn viewbox_only_artwork_gets_explicit_size() {
        let glyph = PieceGlyph::parse('K', r#"<svg viewBox="0 0 10 20"><rect/></svg>"#).unwrap();
        assert_eq!(
            glyph.markup(),
            r#"<svg width="10" height="20" viewBox="0 0 10 20"><rect/></svg>"#
        );
    }

    #[test]
    fn missing_width_follows_viewbox_ratio() {
        let glyph = PieceGlyph::parse('K', r#"<svg height="40px" viewBox="0 0 10 20"/>"#).unwrap();
        assert_eq!((glyph.width(), glyph.height()), (20.0, 40.0));
        assert_eq!(
            glyph.markup(),
            r#"<svg width="20" height="40" viewBox="0 0 10 20"/>"#
        );

        let glyph = PieceGlyph::parse('K', r#"<svg height="30"/>"#).unwrap();
        assert_eq!((glyph.width(), glyph.height()), (30.0, 30.0));
    }

    #[test]
    fn parse_drops_prolog() {
        let svg = "<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<!-- drawn by hand -->\n<svg height=\"10\"><rect/></svg>\n";
        let glyph = PieceGlyph::parse('K', svg).unwrap();
        assert_eq!(glyph.markup(), "<svg width=\"10\" height=\"10\"><rect/></svg>");
    }

    #[test]
    fn parse_expands_dtd_entities() {
        let svg = r##"<?xml version="1.0"?>
<!DOCTYPE svg [
  <!ENTITY ns_svg "http://www.w3.org/2000/svg">
  <!ENTITY red "#ff0000">
]>
<svg xmlns="&ns_svg;" width="10" height="10"><rect fill="&red;"/><text>a &amp; b</text></svg>"##;
        let glyph = PieceGlyph::parse('K', svg).unwrap();
        assert!(!glyph.markup().contains("&ns_svg;"));
        assert!(!glyph.markup().contains("&red;"));
        assert!(glyph.markup().contains(r##"<rect fill="#ff0000"/>"##));
        assert!(glyph.markup().contains("<text>a &amp; b</text>"));

        let doc = Document::parse(glyph.markup()).unwrap();
        assert_eq!(doc.root_element().tag_name().namespace(), Some(SVG_NAMESPACE));
    }

    #[test]
    fn parse_keeps_prefixed_namespaces() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" height="10"><defs><path id="p" d="M0 0"/></defs><use xlink:href="#p"/></svg>"##;
        let glyph = PieceGlyph::parse('K', svg).unwrap();
        let doc = Document::parse(glyph.markup()).unwrap();
        let used = doc.descendants().find(|n| n.has_tag_name("use")).unwrap();
        assert_eq!(
            used.attribute(("http://www.w3.org/1999/xlink", "href")),
            Some("#p")
        );
        assert_eq!(glyph.markup().matches("xmlns:xlink").count(), 1);
    }

    #[test]
    fn parse_rejects_bad_artwork() {
        for bad in ["not xml", "<svg height=\"10\">", "<div height=\"10\"/>", "<svg/>", "<svg height=\"0\"/>"] {
            assert!(
                matches!(
                    PieceGlyph::parse('K', bad),
                    Err(GlyphError::InvalidArtwork { symbol: 'K', .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn bundled_glyphs_load() {
        let mut provider = GlyphProvider::default();
        for symbol in "KQRBNPkqrbnp".chars() {
            let glyph = provider.glyph(symbol).unwrap();
            assert_eq!(glyph.height(), 45.0);
            assert!(glyph.markup().starts_with("<svg"));
        }
        assert_eq!(provider.cached(), 12);
    }

    #[test]
    fn unknown_symbol() {
        let mut provider = GlyphProvider::default();
        assert_eq!(provider.glyph('x'), Err(GlyphError::UnknownPieceSymbol('x')));
        assert_eq!(provider.cached(), 0);
    }

    #[test]
    fn override_wins_over_bundled() {
        let mut provider = GlyphProvider::new(BTreeMap::from([('K', CUSTOM_KING.to_string())]));
        let king = provider.glyph('K').unwrap();
        assert_eq!(king.height(), 100.0);
        assert!(king.markup().contains("custom-king"));

        let queen = provider.glyph('Q').unwrap();
        assert!(!queen.markup().contains("custom-king"));
    }

    #[test]
    fn override_may_add_a_symbol() {
        let mut provider = GlyphProvider::new(BTreeMap::from([('x', CUSTOM_KING.to_string())]));
        assert!(provider.glyph('x').is_ok());
    }

    #[test]
    fn glyphs_are_cached() {
        let mut provider = GlyphProvider::default();
        let first = provider.glyph('p').unwrap().clone();
        let second = provider.glyph('p').unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(provider.cached(), 1);
    }

    #[test]
    fn providers_do_not_share_overrides() {
        let mut custom = GlyphProvider::new(BTreeMap::from([('K', CUSTOM_KING.to_string())]));
        let mut plain = GlyphProvider::default();
        assert!(custom.glyph('K').unwrap().markup().contains("custom-king"));
        assert!(!plain.glyph('K').unwrap().markup().contains("custom-king"));
    }
}
