//! Tile classifier.
//!
//! Marks each sliced cell as empty or not by exact byte comparison against
//! the first cell in scan order, which stands in for the background tile.

use rayon::prelude::*;

use crate::pixels::PixelBuffer;
use crate::slicer::Cell;

/// Verdict for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Scan identifier of the classified cell.
    pub id: usize,
    /// True if the cell is pixel-identical to the reference cell.
    pub is_empty: bool,
}

/// Exact pixel equality of two buffers.
///
/// Buffers of different width, height or channel layout are never equal.
/// Rows are compared as whole byte slices; row padding is ignored.
pub fn tiles_equal(a: &PixelBuffer, b: &PixelBuffer) -> bool {
    if !a.same_shape(b) {
        return false;
    }
    a.rows().zip(b.rows()).all(|(row_a, row_b)| row_a == row_b)
}

/// Classify cells in scan order against the first one.
///
/// Cells are consumed one at a time and dropped once their verdict is
/// recorded, so only the reference buffer outlives its own comparison.
pub fn classify<I>(cells: I) -> Vec<Classification>
where
    I: IntoIterator<Item = Cell>,
{
    let mut cells = cells.into_iter();
    let Some(reference) = cells.next() else {
        return Vec::new();
    };

    let mut verdicts = Vec::with_capacity(cells.size_hint().0 + 1);
    verdicts.push(Classification {
        id: reference.id,
        is_empty: tiles_equal(&reference.pixels, &reference.pixels),
    });

    for cell in cells {
        verdicts.push(Classification {
            id: cell.id,
            is_empty: tiles_equal(&cell.pixels, &reference.pixels),
        });
    }

    verdicts
}

/// Classify cells on the rayon thread pool.
///
/// Results come back in the order of `cells`, independent of which
/// comparison finishes first.
pub fn classify_parallel(cells: &[Cell]) -> Vec<Classification> {
    let Some(reference) = cells.first() else {
        return Vec::new();
    };

    cells
        .par_iter()
        .map(|cell| Classification {
            id: cell.id,
            is_empty: tiles_equal(&cell.pixels, &reference.pixels),
        })
        .collect()
}
