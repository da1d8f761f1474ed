use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tilemap operations
#[derive(Error, Diagnostic, Debug)]
pub enum TilemapError {
    #[error("Invalid image {path}: {message}")]
    #[diagnostic(code(tilemap::decode))]
    InvalidImage { path: PathBuf, message: String },

    #[error(
        "Empty grid: a {image_width}x{image_height} image holds no whole {cell_size}x{cell_size} cell"
    )]
    #[diagnostic(
        code(tilemap::grid),
        help("Use a cell size no larger than the smaller image dimension")
    )]
    EmptyGrid {
        image_width: u32,
        image_height: u32,
        cell_size: u32,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilemap::write))]
    Io { path: PathBuf, message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(tilemap::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Serialize error: {message}")]
    #[diagnostic(code(tilemap::serialize))]
    Serialize { message: String },
}

pub type Result<T> = std::result::Result<T, TilemapError>;
