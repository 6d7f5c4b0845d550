//! Configuration file loading.
//!
//! Settings can be kept in a TOML file (`fen2img.toml` in the current
//! directory by default) so repeated renders share one theme.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fen2img::Orientation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A `[pieces]` key is not a single character.
    #[error("piece key must be a single character, got {0:?}")]
    PieceKey(String),
}

/// Settings read from the configuration file. Every field is optional;
/// anything left out falls back to the renderer defaults.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub orientation: Option<Orientation>,
    pub labels: Option<bool>,
    pub light_square: Option<String>,
    pub dark_square: Option<String>,
    /// SVG canvas size in pixels.
    pub size: Option<u32>,
    /// PNG output size in pixels.
    pub png_size: Option<u32>,
    /// Artwork files keyed by piece symbol, relative to the config file.
    #[serde(default)]
    pub pieces: BTreeMap<String, PathBuf>,
}

impl FileConfig {
    /// Default configuration file name, looked up in the working directory.
    pub const DEFAULT_PATH: &'static str = "fen2img.toml";

    /// Loads the configuration.
    ///
    /// With an explicit path the file must exist. Without one,
    /// [`Self::DEFAULT_PATH`] is read if present and defaults are used
    /// otherwise. Relative artwork paths are resolved against the
    /// directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(Self::DEFAULT_PATH);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let mut config: FileConfig = toml::from_str(&content)?;

        if let Some(dir) = path.parent() {
            for artwork in config.pieces.values_mut() {
                if artwork.is_relative() {
                    *artwork = dir.join(&*artwork);
                }
            }
        }
        Ok(config)
    }

    /// Returns the artwork paths keyed by symbol character.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PieceKey`] if a key is not exactly one character.
    pub fn piece_paths(&self) -> Result<Vec<(char, PathBuf)>, ConfigError> {
        self.pieces
            .iter()
            .map(|(key, path)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok((symbol, path.clone())),
                    _ => Err(ConfigError::PieceKey(key.clone())),
                }
            })
            .collect()
    }
}
