//! Vector-quantization image compression.
//!
//! This crate compresses still images by replacing fixed-size pixel blocks
//! with indices into a learned codebook, trained per color channel with
//! Lloyd's algorithm (K-means). It provides:
//!
//! - block decomposition of channel planes ([`common::block`]),
//! - deterministic, seeded codebook training ([`CodebookTrainer`]),
//! - quantization to index grids and reconstruction from them,
//! - a BT.601-style YUV transform with 4:2:0 chroma subsampling ([`yuv`]),
//! - objective quality scoring ([`metrics`]): PSNR, a simplified global SSIM,
//!   and a fixed 8-bit-per-index compression-ratio model,
//! - a two-flavor orchestration pipeline ([`PipelineConfig`] /
//!   [`VqCodec`]): direct RGB, or YUV with chroma subsampling.
//!
//! # Example
//!
//! Train on a set of images, then compress, decompress and score a test
//! image:
//!
//! ```
//! use zenvq::{ColorMode, Image, PipelineConfig};
//!
//! // 4x4 solid gray.
//! let gray = vec![128u8; 4 * 4 * 3];
//! let image = Image::from_rgb8(&gray, 4, 4)?;
//!
//! let codec = PipelineConfig::new()
//!     .with_mode(ColorMode::Rgb)
//!     .with_codebook_size(1)
//!     .train(std::slice::from_ref(&image))?;
//!
//! let result = codec.evaluate(&image)?;
//! assert_eq!(result.psnr, 100.0); // sentinel: exact reconstruction
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Determinism
//!
//! Training is reproducible: the clustering RNG is an explicit seeded
//! generator created per training call, so the same training set and seed
//! always produce bit-identical codebooks.
//!
//! # Edge-pixel policy
//!
//! Rows and columns that do not fill a whole block are dropped on the way in
//! (never trained on, never quantized) and zero-filled on the way out. This
//! asymmetry is documented, deliberate behavior; see
//! [`decoder::decompress_plane`].
//!
//! # Scope
//!
//! Image file I/O, report generation and dataset partitioning are external
//! collaborators: the codec consumes in-memory planes and produces
//! reconstructed planes plus scalar metrics. There is no entropy coding of
//! indices and no windowed SSIM.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod common;
pub mod decoder;
pub mod encoder;
mod error;
pub mod metrics;
pub mod pipeline;
pub mod yuv;

/// Type-safe pixel interop with the `rgb` crate.
#[cfg(feature = "pixel-types")]
pub mod pixel;

pub use common::{blocks, Block, Blocks, Codebook, CompressedPlane, Image, IndexGrid, Plane};
pub use decoder::{decompress_plane, reassemble};
pub use encoder::{compress_plane, CodebookTrainer, TrainStats};
pub use error::VqError;
pub use metrics::{compression_ratio, psnr, ssim, PSNR_IDENTICAL};
pub use pipeline::{
    BatchSummary, ColorMode, CompressedImage, Evaluation, PipelineConfig, VqCodec,
};
pub use yuv::{rgb_to_yuv, subsample_chroma, upsample_chroma, yuv_to_rgb, YuvPlanes};
