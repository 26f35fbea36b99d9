//! Error types for training, quantization and metric computation.

use thiserror::Error;

/// Errors that can occur while training codebooks or running the codec.
///
/// All of these indicate a caller-side configuration or input problem; the
/// codec itself has no recoverable failure modes and never retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqError {
    /// An image or plane with zero width or height was supplied.
    #[error("Empty plane: {width}x{height}")]
    EmptyPlane {
        /// Width of the offending plane.
        width: usize,
        /// Height of the offending plane.
        height: usize,
    },

    /// The training set contained no blocks after truncation to the block grid.
    #[error("Training set is empty after block truncation")]
    EmptyTrainingSet,

    /// A block size of zero was configured.
    #[error("Block size must be at least 1")]
    InvalidBlockSize,

    /// A codebook size of zero was configured.
    #[error("Codebook size must be at least 1")]
    InvalidCodebookSize,

    /// A raw buffer did not match the dimensions it was declared with.
    #[error("Invalid buffer size: expected {expected}, got {actual}")]
    InvalidBufferSize {
        /// Length implied by the declared dimensions.
        expected: usize,
        /// Length of the buffer actually provided.
        actual: usize,
    },

    /// A training block's length did not match the configured vector dimension.
    #[error("Block length mismatch: expected {expected}, got {actual}")]
    BlockLengthMismatch {
        /// Expected vector dimension (`block_size * block_size`).
        expected: usize,
        /// Length of the offending block.
        actual: usize,
    },

    /// A codebook's vector dimension did not match the block size in use.
    #[error("Codebook dimension mismatch: codebook has {dim}, expected {expected}")]
    CodebookDimensionMismatch {
        /// Vector dimension of the codebook.
        dim: usize,
        /// Dimension implied by the block size.
        expected: usize,
    },

    /// An index grid referenced an entry beyond the end of the codebook.
    #[error("Codebook index {index} out of range (codebook has {len} entries)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of entries in the codebook.
        len: usize,
    },

    /// Two images or planes that must share dimensions did not.
    #[error("Dimension mismatch: {expected_width}x{expected_height} vs {actual_width}x{actual_height}")]
    DimensionMismatch {
        /// Width of the reference image.
        expected_width: usize,
        /// Height of the reference image.
        expected_height: usize,
        /// Width of the other image.
        actual_width: usize,
        /// Height of the other image.
        actual_height: usize,
    },

    /// A serialized codebook could not be parsed.
    #[error("Corrupt codebook data: {0}")]
    CorruptCodebook(&'static str),
}
