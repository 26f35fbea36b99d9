//! Objective quality metrics: PSNR, a simplified global SSIM, and the
//! compression-ratio cost model.

use crate::common::plane::Image;
use crate::error::VqError;

/// Sentinel PSNR returned for a zero mean squared error, instead of an
/// infinite value.
pub const PSNR_IDENTICAL: f64 = 100.0;

/// SSIM stabilizing constant `C1 = (0.01 * 255)^2`.
const SSIM_C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
/// SSIM stabilizing constant `C2 = (0.03 * 255)^2`.
const SSIM_C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

/// Peak signal-to-noise ratio between two images, in dB.
///
/// Squared error is averaged over all three channels per pixel (each channel
/// weighted equally) before spatial averaging. A mean squared error of
/// exactly zero returns the sentinel [`PSNR_IDENTICAL`] rather than infinity.
///
/// Fails if the images do not share dimensions.
pub fn psnr(original: &Image, reconstructed: &Image) -> Result<f64, VqError> {
    check_same_dims(original, reconstructed)?;

    let pixels = (original.width() * original.height()) as f64;
    let mut mse = 0.0;
    for channel in 0..3 {
        let a = original.plane(channel).as_slice();
        let b = reconstructed.plane(channel).as_slice();
        for (&x, &y) in a.iter().zip(b) {
            let diff = x - y;
            mse += diff * diff / 3.0;
        }
    }
    mse /= pixels;

    if mse == 0.0 {
        return Ok(PSNR_IDENTICAL);
    }
    Ok(10.0 * (255.0 * 255.0 / mse).log10())
}

/// Simplified global SSIM between two images.
///
/// Computes the mean, variance and covariance of per-pixel grayscale
/// intensity (the plain average of the three channels) over the whole image
/// as single scalars and applies the standard SSIM formula with constants
/// `C1 = (0.01*255)^2`, `C2 = (0.03*255)^2`. Variances and covariance use the
/// sample (N-1) divisor.
///
/// This is *not* windowed SSIM: it captures global luminance/contrast
/// similarity only, not local structure, and the denominator is not guarded
/// against degenerate near-zero statistics (a one-pixel image produces NaN).
///
/// Fails if the images do not share dimensions.
pub fn ssim(original: &Image, reconstructed: &Image) -> Result<f64, VqError> {
    check_same_dims(original, reconstructed)?;

    let count = original.width() * original.height();
    let gray = |image: &Image, i: usize| {
        (image.plane(0).as_slice()[i] + image.plane(1).as_slice()[i] + image.plane(2).as_slice()[i])
            / 3.0
    };

    let mut mean_orig = 0.0;
    let mut mean_recon = 0.0;
    for i in 0..count {
        mean_orig += gray(original, i);
        mean_recon += gray(reconstructed, i);
    }
    mean_orig /= count as f64;
    mean_recon /= count as f64;

    let mut var_orig = 0.0;
    let mut var_recon = 0.0;
    let mut covar = 0.0;
    for i in 0..count {
        let diff_orig = gray(original, i) - mean_orig;
        let diff_recon = gray(reconstructed, i) - mean_recon;
        var_orig += diff_orig * diff_orig;
        var_recon += diff_recon * diff_recon;
        covar += diff_orig * diff_recon;
    }
    let sample_count = (count - 1) as f64;
    var_orig /= sample_count;
    var_recon /= sample_count;
    covar /= sample_count;

    let numerator = (2.0 * mean_orig * mean_recon + SSIM_C1) * (2.0 * covar + SSIM_C2);
    let denominator =
        (mean_orig * mean_orig + mean_recon * mean_recon + SSIM_C1) * (var_orig + var_recon + SSIM_C2);
    Ok(numerator / denominator)
}

/// Compression ratio for an image of `width x height` RGB pixels compressed
/// into the given per-channel index-grid cell counts.
///
/// The cost model is fixed at 8 bits per pixel channel on the input side and
/// 8 bits per index on the output side; codebook storage is excluded from the
/// ratio by design.
#[must_use]
pub fn compression_ratio(width: usize, height: usize, cells_per_channel: &[usize]) -> f64 {
    let original_bits = (width * height * 3 * 8) as f64;
    let compressed_bits = (cells_per_channel.iter().sum::<usize>() * 8) as f64;
    original_bits / compressed_bits
}

fn check_same_dims(a: &Image, b: &Image) -> Result<(), VqError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(VqError::DimensionMismatch {
            expected_width: a.width(),
            expected_height: a.height(),
            actual_width: b.width(),
            actual_height: b.height(),
        });
    }
    Ok(())
}
