//! Conversion pipeline: decode, slice, classify, assemble.

use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::classifier::{classify, classify_parallel, Classification};
use crate::config::Config;
use crate::error::{Result, TilemapError};
use crate::map::{assemble, MapData};
use crate::output::{display_path, plural, Printer, Verbosity};
use crate::pixels::PixelSource;
use crate::slicer::{slice, Cell};

/// Decode an image file, keeping its native channel layout and sample depth.
///
/// The format is detected from the file contents, so the extension does not
/// have to match (or exist).
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(TilemapError::InvalidImage {
            path: path.to_path_buf(),
            message: "File not found".to_string(),
        });
    }

    let invalid = |message: String| TilemapError::InvalidImage {
        path: path.to_path_buf(),
        message,
    };

    ImageReader::open(path)
        .map_err(|e| invalid(format!("Failed to read image: {}", e)))?
        .with_guessed_format()
        .map_err(|e| invalid(format!("Failed to read image: {}", e)))?
        .decode()
        .map_err(|e| invalid(format!("Failed to decode image: {}", e)))
}

/// Convert an already decoded source into a map document.
pub fn convert<S: PixelSource + ?Sized>(
    source: &S,
    config: &Config,
    printer: &Printer,
) -> Result<MapData> {
    config.validate()?;

    let cells = slice(source, config.cell_size)?;
    let grid = cells.grid();

    printer.status(
        "Slicing",
        &format!(
            "{}x{} grid ({}x{} cells)",
            grid.columns(),
            grid.rows(),
            grid.cell_size(),
            grid.cell_size()
        ),
    );

    let (dropped_x, dropped_y) = grid.remainder();
    if dropped_x > 0 || dropped_y > 0 {
        printer.warning(
            "Warning",
            &format!(
                "{}x{} image is not a multiple of {}; dropping {}px right and {}px bottom",
                source.width(),
                source.height(),
                grid.cell_size(),
                dropped_x,
                dropped_y
            ),
        );
    }

    let log_cell = |cell: &Cell| {
        printer.verbose("Sliced", &format!("tile[{}][{}]", cell.column, cell.row));
    };
    let detailed = printer.verbosity() == Verbosity::Verbose;

    let verdicts: Vec<Classification> = if config.parallel {
        let cells: Vec<Cell> = cells.inspect(|c| if detailed { log_cell(c) }).collect();
        classify_parallel(&cells)
    } else {
        classify(cells.inspect(|c| if detailed { log_cell(c) }))
    };

    let map = assemble(&grid, &verdicts);

    printer.info(
        "Classified",
        &format!(
            "{} ({} empty, {} unique)",
            plural(map.data.len(), "cell", "cells"),
            map.empty_count(),
            map.unique_count()
        ),
    );

    Ok(map)
}

/// Load `path` and convert it.
pub fn convert_file(path: &Path, config: &Config, printer: &Printer) -> Result<MapData> {
    printer.status("Loading", &display_path(path));

    let img = load_image(path)?;
    printer.info(
        "Analyzed",
        &format!(
            "{}x{} image ({:?})",
            PixelSource::width(&img),
            PixelSource::height(&img),
            img.color()
        ),
    );

    convert(&img, config, printer)
}
