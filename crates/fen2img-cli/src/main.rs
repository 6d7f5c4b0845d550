mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use config::FileConfig;
use fen2img::{Fen2Img, Orientation, RenderConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// PNG size used when neither the command line nor the config file sets one.
const DEFAULT_PNG_SIZE: u32 = 400;

#[derive(Parser, Debug)]
#[command(name = "fen2img")]
#[command(about = "Render a FEN chess position as an SVG or PNG image")]
struct Cli {
    /// FEN string (only the piece placement field is used)
    fen: String,
    /// Output file ending in .svg or .png. Prints SVG to stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// PNG width and height in pixels
    #[arg(short, long)]
    size: Option<u32>,
    /// Configuration file (defaults to ./fen2img.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Draw the board from black's side
    #[arg(long, overrides_with = "white")]
    black: bool,
    /// Draw the board from white's side, even if the config file says black
    #[arg(long, overrides_with = "black")]
    white: bool,
    /// Hide rank and file labels
    #[arg(long, overrides_with = "labels")]
    no_labels: bool,
    /// Show rank and file labels, even if the config file hides them
    #[arg(long, overrides_with = "no_labels")]
    labels: bool,
    /// Light square color
    #[arg(long)]
    light: Option<String>,
    /// Dark square color
    #[arg(long)]
    dark: Option<String>,
    /// Custom artwork for a piece, as SYMBOL=PATH (repeatable)
    #[arg(long = "piece", value_parser = parse_piece_arg)]
    pieces: Vec<(char, PathBuf)>,
}

/// Output format chosen from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Svg,
    Png,
}

impl Format {
    /// Picks the format from the output file extension; stdout gets SVG.
    fn from_path(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Format::Svg);
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(Format::Svg),
            Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(Format::Png),
            _ => bail!(
                "cannot tell the image format of {}; use a .svg or .png file name",
                path.display()
            ),
        }
    }
}

/// Resolves a pair of opposing switches: `Some(true)` for `on`,
/// `Some(false)` for `off`, `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn parse_piece_arg(arg: &str) -> Result<(char, PathBuf), String> {
    let (symbol, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=PATH, got {arg:?}"))?;
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !path.is_empty() => Ok((c, PathBuf::from(path))),
        _ => Err(format!("expected SYMBOL=PATH, got {arg:?}")),
    }
}

/// Merges the config file with command-line flags (flags win) and reads
/// the artwork files.
fn build_config(cli: &Cli, file: &FileConfig) -> Result<RenderConfig> {
    let mut builder = RenderConfig::builder();

    let orientation = match switch(cli.black, cli.white) {
        Some(true) => Orientation::FromBlack,
        Some(false) => Orientation::FromWhite,
        None => file.orientation.unwrap_or_default(),
    };
    let labels = switch(cli.labels, cli.no_labels)
        .or(file.labels)
        .unwrap_or(true);
    builder = builder.orientation(orientation).labels(labels);

    if let Some(color) = cli.light.as_ref().or(file.light_square.as_ref()) {
        builder = builder.light_square(color.as_str());
    }
    if let Some(color) = cli.dark.as_ref().or(file.dark_square.as_ref()) {
        builder = builder.dark_square(color.as_str());
    }
    if let Some(size) = file.size {
        builder = builder.size(size);
    }

    let mut pieces = file.piece_paths()?;
    pieces.extend(cli.pieces.iter().cloned());
    for (symbol, path) in pieces {
        let svg = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read artwork for {symbol:?} from {}", path.display()))?;
        builder = builder.piece(symbol, svg);
    }

    Ok(builder.build()?)
}

fn run(cli: Cli) -> Result<()> {
    let format = Format::from_path(cli.output.as_deref())?;
    let file = FileConfig::load(cli.config.as_deref())?;
    let config = build_config(&cli, &file)?;
    let mut renderer = Fen2Img::new(config);

    let bytes = match format {
        Format::Svg => renderer.to_svg(&cli.fen)?.into_bytes(),
        Format::Png => {
            let size = cli.size.or(file.png_size).unwrap_or(DEFAULT_PNG_SIZE);
            if size == 0 {
                bail!("PNG size must be positive");
            }
            renderer.to_png(&cli.fen, size)?
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), ?format, "wrote image");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
