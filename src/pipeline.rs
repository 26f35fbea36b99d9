//! End-to-end compression pipeline: train per-channel codebooks over a
//! training set, then compress, decompress and score test images.
//!
//! Two flavors share every stage. `Rgb` quantizes the R/G/B planes directly;
//! `Yuv420` converts to luma/chroma first, trains and quantizes on subsampled
//! chroma, and inverts the transform after decompression. Each run is fully
//! sequential: all training blocks are extracted before clustering begins,
//! clustering finishes before any test image is compressed, and a failure at
//! any stage aborts the run.

use crate::common::block::blocks;
use crate::common::codebook::Codebook;
use crate::common::plane::{Image, Plane};
use crate::common::types::CompressedPlane;
use crate::common::Block;
use crate::decoder::decompress_plane;
use crate::encoder::quantize::compress_plane;
use crate::encoder::trainer::{CodebookTrainer, TrainStats};
use crate::error::VqError;
use crate::metrics;
use crate::yuv;

/// Which color representation a pipeline trains and quantizes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Vector-quantize the R, G and B planes directly.
    #[default]
    Rgb,
    /// Convert to YUV, subsample chroma 2x in both dimensions (4:2:0), and
    /// vector-quantize the Y, U and V planes.
    Yuv420,
}

/// Pipeline configuration.
///
/// All fields are public for direct construction and inspection; builder
/// methods are provided for chained construction.
///
/// ```
/// use zenvq::{ColorMode, PipelineConfig};
///
/// let config = PipelineConfig::new()
///     .with_mode(ColorMode::Yuv420)
///     .with_codebook_size(64)
///     .with_seed(7);
/// assert_eq!(config.block_size, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Edge length of the square quantization blocks. Default: 2.
    pub block_size: usize,
    /// Entries per channel codebook. Default: 256.
    pub codebook_size: usize,
    /// Cap on K-means iterations per channel. Default: 100.
    pub max_iterations: u32,
    /// RNG seed; every channel trains from a fresh generator with this seed,
    /// keeping runs reproducible. Default: 0.
    pub seed: u64,
    /// Color representation to quantize in. Default: [`ColorMode::Rgb`].
    pub mode: ColorMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineConfig {
    /// Create a configuration with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            block_size: 2,
            codebook_size: 256,
            max_iterations: 100,
            seed: 0,
            mode: ColorMode::Rgb,
        }
    }

    /// Set the block size.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the per-channel codebook size.
    #[must_use]
    pub fn with_codebook_size(mut self, codebook_size: usize) -> Self {
        self.codebook_size = codebook_size;
        self
    }

    /// Set the K-means iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the color mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Train three per-channel codebooks over `training` images.
    ///
    /// Fails on an empty training set, zero-sized configuration parameters,
    /// or when truncation to the block grid leaves any channel without
    /// training blocks.
    pub fn train(&self, training: &[Image]) -> Result<VqCodec, VqError> {
        if self.block_size == 0 {
            return Err(VqError::InvalidBlockSize);
        }
        if self.codebook_size == 0 {
            return Err(VqError::InvalidCodebookSize);
        }
        if training.is_empty() {
            return Err(VqError::EmptyTrainingSet);
        }

        let mut channel_blocks: [Vec<Block>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for image in training {
            match self.mode {
                ColorMode::Rgb => {
                    for (channel, out) in channel_blocks.iter_mut().enumerate() {
                        out.extend(blocks(image.plane(channel), self.block_size));
                    }
                }
                ColorMode::Yuv420 => {
                    let planes = yuv::rgb_to_yuv(image);
                    let u = yuv::subsample_chroma(&planes.u);
                    let v = yuv::subsample_chroma(&planes.v);
                    channel_blocks[0].extend(blocks(&planes.y, self.block_size));
                    channel_blocks[1].extend(blocks(&u, self.block_size));
                    channel_blocks[2].extend(blocks(&v, self.block_size));
                }
            }
        }

        let trainer = CodebookTrainer::new()
            .with_codebook_size(self.codebook_size)
            .with_max_iterations(self.max_iterations)
            .with_seed(self.seed);

        let [blocks_0, blocks_1, blocks_2] = channel_blocks;
        let (codebook_0, stats_0) = trainer.train(&blocks_0)?;
        let (codebook_1, stats_1) = trainer.train(&blocks_1)?;
        let (codebook_2, stats_2) = trainer.train(&blocks_2)?;

        Ok(VqCodec {
            config: *self,
            codebooks: [codebook_0, codebook_1, codebook_2],
            stats: [stats_0, stats_1, stats_2],
        })
    }
}

/// A trained codec: three per-channel codebooks plus the configuration that
/// produced them. Reused read-only across every image in a run.
#[derive(Debug, Clone)]
pub struct VqCodec {
    config: PipelineConfig,
    codebooks: [Codebook; 3],
    stats: [TrainStats; 3],
}

/// The compressed form of one image: three per-channel index grids plus the
/// information needed to reconstruct without a side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    /// Per-channel compression results, in channel order (R/G/B or Y/U/V).
    pub channels: [CompressedPlane; 3],
    /// Width of the source image.
    pub width: usize,
    /// Height of the source image.
    pub height: usize,
    /// The color mode this image was compressed in.
    pub mode: ColorMode,
}

impl CompressedImage {
    /// Compression ratio against the fixed 8-bits-per-index cost model.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        let cells: Vec<usize> = self.channels.iter().map(|c| c.grid.len()).collect();
        metrics::compression_ratio(self.width, self.height, &cells)
    }
}

/// Per-image evaluation output: the reconstruction plus the scalar scores
/// reported to external collaborators.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The decompressed image, in RGB.
    pub reconstructed: Image,
    /// Peak signal-to-noise ratio in dB (100.0 sentinel for exact match).
    pub psnr: f64,
    /// Simplified global SSIM.
    pub ssim: f64,
    /// Compression ratio as a dimensionless multiple.
    pub compression_ratio: f64,
}

/// Arithmetic means over a batch of evaluations.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    /// Mean PSNR in dB.
    pub mean_psnr: f64,
    /// Mean SSIM.
    pub mean_ssim: f64,
    /// Mean compression ratio.
    pub mean_compression_ratio: f64,
}

impl BatchSummary {
    /// Summarize a batch. An empty batch yields all-zero means.
    #[must_use]
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        if evaluations.is_empty() {
            return Self::default();
        }
        let count = evaluations.len() as f64;
        Self {
            mean_psnr: evaluations.iter().map(|e| e.psnr).sum::<f64>() / count,
            mean_ssim: evaluations.iter().map(|e| e.ssim).sum::<f64>() / count,
            mean_compression_ratio: evaluations.iter().map(|e| e.compression_ratio).sum::<f64>()
                / count,
        }
    }
}

impl VqCodec {
    /// The configuration this codec was trained with.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The three trained channel codebooks, in channel order.
    #[must_use]
    pub fn codebooks(&self) -> &[Codebook; 3] {
        &self.codebooks
    }

    /// Training diagnostics per channel.
    #[must_use]
    pub fn train_stats(&self) -> &[TrainStats; 3] {
        &self.stats
    }

    /// Compress one image into per-channel index grids.
    pub fn compress(&self, image: &Image) -> Result<CompressedImage, VqError> {
        let channels = match self.config.mode {
            ColorMode::Rgb => [
                compress_plane(image.plane(0), &self.codebooks[0], self.config.block_size)?,
                compress_plane(image.plane(1), &self.codebooks[1], self.config.block_size)?,
                compress_plane(image.plane(2), &self.codebooks[2], self.config.block_size)?,
            ],
            ColorMode::Yuv420 => {
                let planes = yuv::rgb_to_yuv(image);
                let u = yuv::subsample_chroma(&planes.u);
                let v = yuv::subsample_chroma(&planes.v);
                [
                    compress_plane(&planes.y, &self.codebooks[0], self.config.block_size)?,
                    compress_plane(&u, &self.codebooks[1], self.config.block_size)?,
                    compress_plane(&v, &self.codebooks[2], self.config.block_size)?,
                ]
            }
        };
        Ok(CompressedImage {
            channels,
            width: image.width(),
            height: image.height(),
            mode: self.config.mode,
        })
    }

    /// Decompress back into an RGB image.
    ///
    /// For the RGB flavor, each channel is rounded to the nearest integer and
    /// clamped to `[0, 255]`. For the YUV flavor, chroma planes are upsampled
    /// back to luma resolution before the inverse color transform (which does
    /// its own rounding and clamping).
    pub fn decompress(&self, compressed: &CompressedImage) -> Result<Image, VqError> {
        let block_size = self.config.block_size;
        match compressed.mode {
            ColorMode::Rgb => {
                let r = decompress_plane(&compressed.channels[0], &self.codebooks[0], block_size)?;
                let g = decompress_plane(&compressed.channels[1], &self.codebooks[1], block_size)?;
                let b = decompress_plane(&compressed.channels[2], &self.codebooks[2], block_size)?;
                Image::new([
                    round_clamp_plane(&r),
                    round_clamp_plane(&g),
                    round_clamp_plane(&b),
                ])
            }
            ColorMode::Yuv420 => {
                let y = decompress_plane(&compressed.channels[0], &self.codebooks[0], block_size)?;
                let u = decompress_plane(&compressed.channels[1], &self.codebooks[1], block_size)?;
                let v = decompress_plane(&compressed.channels[2], &self.codebooks[2], block_size)?;
                let u = yuv::upsample_chroma(&u, compressed.height, compressed.width);
                let v = yuv::upsample_chroma(&v, compressed.height, compressed.width);
                yuv::yuv_to_rgb(&y, &u, &v)
            }
        }
    }

    /// Compress, decompress and score one test image.
    pub fn evaluate(&self, image: &Image) -> Result<Evaluation, VqError> {
        let compressed = self.compress(image)?;
        let reconstructed = self.decompress(&compressed)?;
        let psnr = metrics::psnr(image, &reconstructed)?;
        let ssim = metrics::ssim(image, &reconstructed)?;
        let compression_ratio = compressed.compression_ratio();
        Ok(Evaluation {
            reconstructed,
            psnr,
            ssim,
            compression_ratio,
        })
    }

    /// Evaluate a whole test set in order.
    ///
    /// The first failing image aborts the batch; skipping unreadable images
    /// is the job of the I/O layer feeding this function.
    pub fn evaluate_all(&self, images: &[Image]) -> Result<Vec<Evaluation>, VqError> {
        images.iter().map(|image| self.evaluate(image)).collect()
    }
}

/// Round every sample to the nearest integer and clamp to `[0, 255]`.
fn round_clamp_plane(plane: &Plane) -> Plane {
    let data = plane
        .as_slice()
        .iter()
        .map(|v| v.round().clamp(0.0, 255.0))
        .collect();
    Plane::from_raw_unchecked(plane.width(), plane.height(), data)
}
