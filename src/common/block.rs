//! Decomposition of a channel plane into fixed-size training blocks.
//!
//! Blocks are the flattened row-major contents of non-overlapping
//! `block_size x block_size` patches. When a dimension is not divisible by the
//! block size, the trailing rows/columns are excluded: they are never trained
//! on and never quantized. Reassembly of the covered region lives in the
//! decoder; pixels outside it are zero-filled there by documented policy.

use crate::common::plane::Plane;

/// A flattened `block_size * block_size` patch of a plane.
pub type Block = Vec<f64>;

/// Lazy, restartable iterator over the blocks of a plane.
///
/// Yields blocks row-major, top-to-bottom then left-to-right — the same order
/// the quantizer walks when filling an index grid, so positions are
/// reproducible.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    plane: &'a Plane,
    block_size: usize,
    /// Largest multiples of `block_size` not exceeding the plane dimensions.
    covered_height: usize,
    covered_width: usize,
    row: usize,
    col: usize,
}

impl<'a> Blocks<'a> {
    pub(crate) fn new(plane: &'a Plane, block_size: usize) -> Self {
        debug_assert!(block_size > 0);
        Self {
            plane,
            block_size,
            covered_height: plane.height() - plane.height() % block_size,
            covered_width: plane.width() - plane.width() % block_size,
            row: 0,
            col: 0,
        }
    }

    /// Number of blocks the iterator will yield in total.
    #[must_use]
    pub fn grid_len(&self) -> usize {
        (self.covered_height / self.block_size) * (self.covered_width / self.block_size)
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.row >= self.covered_height || self.covered_width == 0 {
            return None;
        }
        let mut block = Vec::with_capacity(self.block_size * self.block_size);
        for bi in 0..self.block_size {
            let row = self.plane.row(self.row + bi);
            block.extend_from_slice(&row[self.col..self.col + self.block_size]);
        }
        self.col += self.block_size;
        if self.col >= self.covered_width {
            self.col = 0;
            self.row += self.block_size;
        }
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.row >= self.covered_height {
            0
        } else {
            let cols = self.covered_width / self.block_size;
            let rows_left = (self.covered_height - self.row) / self.block_size;
            rows_left * cols - self.col / self.block_size
        };
        (remaining, Some(remaining))
    }
}

/// Iterate over the block-aligned patches of `plane`.
///
/// An empty plane (or one smaller than the block size in either dimension)
/// yields no blocks.
///
/// # Panics
///
/// Panics if `block_size` is zero; callers validate the configuration before
/// extraction.
#[must_use]
pub fn blocks(plane: &Plane, block_size: usize) -> Blocks<'_> {
    Blocks::new(plane, block_size)
}
