//! Decoding side of the codec: expanding index grids back into planes.

use crate::common::codebook::Codebook;
use crate::common::plane::Plane;
use crate::common::types::{CompressedPlane, IndexGrid};
use crate::error::VqError;

/// Expand a compressed plane back into samples.
///
/// The output plane has the original (pre-truncation) dimensions. Pixels in
/// the block-covered region are copied from the referenced codebook entries;
/// pixels outside it — the remainder dropped during extraction — are left at
/// the documented default of 0. That asymmetry (input truncates, output
/// zero-fills) is deliberate policy, not an omission: callers must not assume
/// remainder content is meaningful.
///
/// Fails fast if an index references an entry beyond the codebook, or the
/// codebook's vector dimension does not match `block_size * block_size`.
pub fn decompress_plane(
    compressed: &CompressedPlane,
    codebook: &Codebook,
    block_size: usize,
) -> Result<Plane, VqError> {
    if block_size == 0 {
        return Err(VqError::InvalidBlockSize);
    }
    reassemble(
        &compressed.grid,
        codebook,
        compressed.original_height,
        compressed.original_width,
        block_size,
    )
}

/// Rebuild a plane of `original_height x original_width` from an index grid.
pub fn reassemble(
    grid: &IndexGrid,
    codebook: &Codebook,
    original_height: usize,
    original_width: usize,
    block_size: usize,
) -> Result<Plane, VqError> {
    if block_size == 0 {
        return Err(VqError::InvalidBlockSize);
    }
    let dim = block_size * block_size;
    if codebook.dim() != dim {
        return Err(VqError::CodebookDimensionMismatch {
            dim: codebook.dim(),
            expected: dim,
        });
    }

    // Covered region: the largest block-aligned sub-rectangle.
    let covered_height = original_height - original_height % block_size;
    let covered_width = original_width - original_width % block_size;

    let mut plane = Plane::new(original_width, original_height);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let index = grid.get(row, col) as usize;
            if index >= codebook.len() {
                return Err(VqError::IndexOutOfRange {
                    index,
                    len: codebook.len(),
                });
            }
            let entry = codebook.entry(index);
            let mut idx = 0;
            for bi in 0..block_size {
                for bj in 0..block_size {
                    let y = row * block_size + bi;
                    let x = col * block_size + bj;
                    if y < covered_height && x < covered_width {
                        plane.set(y, x, entry[idx]);
                    }
                    idx += 1;
                }
            }
        }
    }
    Ok(plane)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_pixels_default_to_zero() {
        let codebook = Codebook::from_entries(vec![vec![7.0; 4]], 4).unwrap();
        let grid = IndexGrid::from_raw(1, 1, vec![0]).unwrap();
        let plane = reassemble(&grid, &codebook, 3, 3, 2).unwrap();
        assert_eq!(plane.get(0, 0), 7.0);
        assert_eq!(plane.get(1, 1), 7.0);
        // Row 2 and column 2 fall outside the covered region.
        assert_eq!(plane.get(2, 0), 0.0);
        assert_eq!(plane.get(0, 2), 0.0);
        assert_eq!(plane.get(2, 2), 0.0);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let codebook = Codebook::from_entries(vec![vec![7.0; 4]], 4).unwrap();
        let grid = IndexGrid::from_raw(1, 1, vec![3]).unwrap();
        assert!(matches!(
            reassemble(&grid, &codebook, 2, 2, 2),
            Err(VqError::IndexOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn places_blocks_row_major() {
        let codebook =
            Codebook::from_entries(vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]], 4)
                .unwrap();
        let grid = IndexGrid::from_raw(1, 2, vec![0, 1]).unwrap();
        let plane = reassemble(&grid, &codebook, 2, 4, 2).unwrap();
        assert_eq!(plane.row(0), &[1.0, 2.0, 5.0, 6.0]);
        assert_eq!(plane.row(1), &[3.0, 4.0, 7.0, 8.0]);
    }
}
