//! Typed-pixel interop via the [`rgb`] crate.
//!
//! With the `pixel-types` feature enabled, images can be built from and
//! flattened back into `Rgb<u8>` pixel slices instead of raw interleaved
//! byte buffers:
//!
//! ```
//! use rgb::Rgb;
//! use zenvq::pixel;
//!
//! let pixels = vec![Rgb::new(200u8, 30, 90); 4 * 4];
//! let image = pixel::image_from_pixels(&pixels, 4, 4)?;
//! assert_eq!(pixel::image_to_pixels(&image), pixels);
//! # Ok::<(), zenvq::VqError>(())
//! ```

use rgb::{ComponentBytes, Rgb};

use crate::common::plane::{clamp_u8, Image};
use crate::error::VqError;

/// Build an [`Image`] from a slice of typed RGB pixels in row-major order.
///
/// Fails if `pixels.len() != width * height` or a dimension is zero.
pub fn image_from_pixels(pixels: &[Rgb<u8>], width: usize, height: usize) -> Result<Image, VqError> {
    if pixels.len() != width * height {
        return Err(VqError::InvalidBufferSize {
            expected: width * height,
            actual: pixels.len(),
        });
    }
    Image::from_rgb8(pixels.as_bytes(), width, height)
}

/// Flatten an [`Image`] into typed RGB pixels, rounding to nearest and
/// clamping each sample to `[0, 255]`.
#[must_use]
pub fn image_to_pixels(image: &Image) -> Vec<Rgb<u8>> {
    let (r, g, b) = (
        image.plane(0).as_slice(),
        image.plane(1).as_slice(),
        image.plane(2).as_slice(),
    );
    (0..image.width() * image.height())
        .map(|i| Rgb::new(clamp_u8(r[i]), clamp_u8(g[i]), clamp_u8(b[i])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_pixel_count() {
        let pixels = vec![Rgb::new(0u8, 0, 0); 3];
        assert!(matches!(
            image_from_pixels(&pixels, 2, 2),
            Err(VqError::InvalidBufferSize { .. })
        ));
    }

    #[test]
    fn pixels_round_trip() {
        let pixels: Vec<Rgb<u8>> = (0..6).map(|i| Rgb::new(i, i * 2, i * 3)).collect();
        let image = image_from_pixels(&pixels, 3, 2).unwrap();
        assert_eq!(image_to_pixels(&image), pixels);
    }
}
