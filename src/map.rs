//! Map assembler and JSON export.
//!
//! Folds per-cell verdicts into the map document. Empty cells become index
//! `0`; every other cell keeps its own scan identifier, so two identical
//! non-empty cells still get two different indices.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::error::{Result, TilemapError};
use crate::slicer::Grid;

/// Grid shape the image was cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetInformation {
    #[serde(rename = "column")]
    pub columns: u32,
    #[serde(rename = "row")]
    pub rows: u32,
}

/// The map document.
///
/// Field names on the wire are lower-case (`tilewidth`, `tileset.column`)
/// and must stay that way for existing consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    /// Grid columns.
    pub width: u32,
    /// Grid rows.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    /// Row-major tile indices, `width * height` long.
    pub data: Vec<usize>,
    pub tileset: TilesetInformation,
}

/// Build the map document from a grid and its verdicts in scan order.
pub fn assemble(grid: &Grid, verdicts: &[Classification]) -> MapData {
    let data = verdicts
        .iter()
        .map(|v| if v.is_empty { 0 } else { v.id })
        .collect();

    MapData {
        width: grid.columns(),
        height: grid.rows(),
        tile_width: grid.cell_size(),
        tile_height: grid.cell_size(),
        data,
        tileset: TilesetInformation {
            columns: grid.columns(),
            rows: grid.rows(),
        },
    }
}

impl MapData {
    /// Number of cells that matched the background tile.
    pub fn empty_count(&self) -> usize {
        self.data.iter().filter(|&&index| index == 0).count()
    }

    /// Number of cells with their own tile index.
    pub fn unique_count(&self) -> usize {
        self.data.len() - self.empty_count()
    }

    /// Serialize to JSON, on one line unless `pretty`.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| TilemapError::Serialize {
            message: format!("Failed to serialize map: {}", e),
        })
    }
}

/// Write the map document to `path`, creating its directory if needed.
pub fn write_map_json(map: &MapData, path: &Path, pretty: bool) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| TilemapError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let json = map.to_json(pretty)?;
    fs::write(path, json).map_err(|e| TilemapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write map: {}", e),
    })?;
    Ok(())
}
