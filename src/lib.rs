//! tilemap - Composite image to tilemap converter
//!
//! Cuts one large level image into square cells, marks the cells that match
//! the top-left background cell, and produces a row-major index grid plus
//! grid metadata as a JSON map document.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod map;
pub mod output;
pub mod pipeline;
pub mod pixels;
pub mod slicer;

pub use classifier::{classify, classify_parallel, tiles_equal, Classification};
pub use config::{Config, DEFAULT_CELL_SIZE};
pub use error::{Result, TilemapError};
pub use map::{assemble, write_map_json, MapData, TilesetInformation};
pub use pipeline::{convert, convert_file, load_image};
pub use pixels::{PixelBuffer, PixelSource};
pub use slicer::{slice, Cell, CellRect, Cells, Grid};
