//! Grid slicer.
//!
//! Partitions a source image into square cells in row-major scan order.
//! Cell `(column, row)` gets the scan identifier `row * columns + column`,
//! and pixels past the last whole row or column are dropped.

use std::iter::FusedIterator;

use crate::error::{Result, TilemapError};
use crate::pixels::{PixelBuffer, PixelSource};

/// Shape of the cell grid laid over an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cell_size: u32,
    image_width: u32,
    image_height: u32,
}

/// Pixel rectangle covered by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Grid {
    /// Lay a grid of `cell_size` squares over a `width` x `height` image.
    ///
    /// Fails with `EmptyGrid` when not even one whole cell fits.
    pub fn new(image_width: u32, image_height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(TilemapError::Config {
                message: "Cell size must be non-zero".to_string(),
                help: None,
            });
        }

        let columns = image_width / cell_size;
        let rows = image_height / cell_size;
        if columns == 0 || rows == 0 {
            return Err(TilemapError::EmptyGrid {
                image_width,
                image_height,
                cell_size,
            });
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
            image_width,
            image_height,
        })
    }

    /// Grid over the full extent of `source`.
    pub fn for_source<S: PixelSource + ?Sized>(source: &S, cell_size: u32) -> Result<Self> {
        Self::new(source.width(), source.height(), cell_size)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Scan identifier of the cell at (column, row).
    pub fn id(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }

    /// (column, row) of the cell with scan identifier `id`.
    pub fn position(&self, id: usize) -> Option<(u32, u32)> {
        if id >= self.cell_count() {
            return None;
        }
        let columns = self.columns as usize;
        Some(((id % columns) as u32, (id / columns) as u32))
    }

    /// Pixel rectangle of the cell with scan identifier `id`.
    pub fn cell_rect(&self, id: usize) -> Option<CellRect> {
        let (column, row) = self.position(id)?;
        Some(CellRect {
            x: column * self.cell_size,
            y: row * self.cell_size,
            size: self.cell_size,
        })
    }

    /// Pixels dropped past the last whole column and row, as (x, y).
    pub fn remainder(&self) -> (u32, u32) {
        (
            self.image_width % self.cell_size,
            self.image_height % self.cell_size,
        )
    }
}

/// One cell cut out of the source, owning a copy of its pixels.
#[derive(Debug, Clone)]
pub struct Cell {
    pub id: usize,
    pub column: u32,
    pub row: u32,
    pub pixels: PixelBuffer,
}

/// Lazy row-major sequence of cells. Each cell's pixels are copied on demand.
pub struct Cells<'a, S: ?Sized> {
    source: &'a S,
    grid: Grid,
    column: u32,
    row: u32,
}

impl<S: PixelSource + ?Sized> Cells<'_, S> {
    pub fn grid(&self) -> Grid {
        self.grid
    }
}

impl<S: PixelSource + ?Sized> Iterator for Cells<'_, S> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.row >= self.grid.rows {
            return None;
        }

        let (column, row) = (self.column, self.row);
        let id = self.grid.id(column, row);
        let rect = self.grid.cell_rect(id)?;

        // Columns left to right, then the next row down
        self.column += 1;
        if self.column == self.grid.columns {
            self.column = 0;
            self.row += 1;
        }

        Some(Cell {
            id,
            column,
            row,
            pixels: self.source.region(rect.x, rect.y, rect.size, rect.size),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.grid.id(self.column, self.row);
        let left = self.grid.cell_count().saturating_sub(done);
        (left, Some(left))
    }
}

impl<S: PixelSource + ?Sized> ExactSizeIterator for Cells<'_, S> {}

impl<S: PixelSource + ?Sized> FusedIterator for Cells<'_, S> {}

/// Slice `source` into `cell_size` squares in scan order.
pub fn slice<S: PixelSource + ?Sized>(source: &S, cell_size: u32) -> Result<Cells<'_, S>> {
    let grid = Grid::for_source(source, cell_size)?;
    Ok(Cells {
        source,
        grid,
        column: 0,
        row: 0,
    })
}
