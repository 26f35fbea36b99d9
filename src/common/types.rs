//! Shared codec types: index grids and per-plane compression results.

use crate::error::VqError;

/// A 2-D grid of codebook indices, one per block position.
///
/// Dimensions are `⌊height/block_size⌋ x ⌊width/block_size⌋` of the plane the
/// grid was produced from. Indices are stored as `u16` so codebooks larger
/// than 256 entries remain representable; the compression-ratio cost model
/// still charges one byte per index (see [`crate::metrics`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    rows: usize,
    cols: usize,
    indices: Vec<u16>,
}

impl IndexGrid {
    /// Create a grid from a row-major index buffer.
    ///
    /// Fails if `indices.len() != rows * cols`.
    pub fn from_raw(rows: usize, cols: usize, indices: Vec<u16>) -> Result<Self, VqError> {
        if indices.len() != rows * cols {
            return Err(VqError::InvalidBufferSize {
                expected: rows * cols,
                actual: indices.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            indices,
        })
    }

    /// Number of block rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of block columns.
    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the grid covers no blocks at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index at block position `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        debug_assert!(col < self.cols);
        self.indices[row * self.cols + col]
    }

    /// The raw row-major index buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.indices
    }
}

/// The compressed form of a single channel plane.
///
/// Carries the original (pre-truncation) plane dimensions: they size the
/// reconstruction buffer and determine which pixels fall outside the covered
/// block grid (those reconstruct to the documented default of 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPlane {
    /// Codebook index per block position.
    pub grid: IndexGrid,
    /// Width of the plane before truncation to the block grid.
    pub original_width: usize,
    /// Height of the plane before truncation to the block grid.
    pub original_height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_length() {
        assert!(IndexGrid::from_raw(2, 2, vec![0; 3]).is_err());
        let grid = IndexGrid::from_raw(2, 3, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(grid.get(1, 2), 5);
        assert_eq!(grid.len(), 6);
    }
}
