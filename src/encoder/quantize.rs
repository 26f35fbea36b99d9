//! Forward quantization: mapping plane blocks to codebook indices.

use crate::common::codebook::Codebook;
use crate::common::plane::Plane;
use crate::common::types::{CompressedPlane, IndexGrid};
use crate::error::VqError;

/// Quantize a plane against a trained codebook.
///
/// Walks block-aligned positions within the truncated region row-major and
/// records the nearest codebook index for each. Any block coordinate that
/// falls outside the plane's bounds contributes a zero sample instead of
/// skipping the block; this matters for chroma planes whose subsampled
/// dimensions may be odd.
///
/// Fails fast on a zero-dimension plane, a zero block size, or a codebook
/// whose vector dimension does not match `block_size * block_size`.
pub fn compress_plane(
    plane: &Plane,
    codebook: &Codebook,
    block_size: usize,
) -> Result<CompressedPlane, VqError> {
    if block_size == 0 {
        return Err(VqError::InvalidBlockSize);
    }
    if plane.is_empty() {
        return Err(VqError::EmptyPlane {
            width: plane.width(),
            height: plane.height(),
        });
    }
    let dim = block_size * block_size;
    if codebook.dim() != dim {
        return Err(VqError::CodebookDimensionMismatch {
            dim: codebook.dim(),
            expected: dim,
        });
    }

    let height = plane.height();
    let width = plane.width();
    let rows = height / block_size;
    let cols = width / block_size;

    let mut indices = Vec::with_capacity(rows * cols);
    let mut block = vec![0.0f64; dim];
    for row in 0..rows {
        for col in 0..cols {
            gather_block(plane, row * block_size, col * block_size, block_size, &mut block);
            indices.push(codebook.nearest(&block) as u16);
        }
    }

    Ok(CompressedPlane {
        grid: IndexGrid::from_raw(rows, cols, indices)?,
        original_width: width,
        original_height: height,
    })
}

/// Copy one `block_size x block_size` patch into `out`, zero-padding samples
/// whose coordinates fall outside the plane.
fn gather_block(plane: &Plane, top: usize, left: usize, block_size: usize, out: &mut [f64]) {
    let mut idx = 0;
    for bi in 0..block_size {
        for bj in 0..block_size {
            out[idx] = if top + bi < plane.height() && left + bj < plane.width() {
                plane.get(top + bi, left + bj)
            } else {
                0.0
            };
            idx += 1;
        }
    }
}
