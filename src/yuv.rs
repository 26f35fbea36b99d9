//! RGB <-> YUV conversion with 4:2:0 chroma resampling.
//!
//! Uses fixed BT.601-style coefficients over full-range samples, with the
//! chroma channels biased by +128 so they stay representable in the same
//! nominal 0..255 range as luma. Planes carry `f64` between stages; rounding
//! and clamping to 8-bit integers happen only in [`yuv_to_rgb`].

use crate::common::plane::{Image, Plane};
use crate::error::VqError;

/// Chroma bias keeping U/V centered at 128.
const CHROMA_BIAS: f64 = 128.0;

/// The three planes of a YUV image: full-resolution luma, full- or
/// half-resolution chroma depending on the pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct YuvPlanes {
    /// Luma.
    pub y: Plane,
    /// Blue-difference chroma.
    pub u: Plane,
    /// Red-difference chroma.
    pub v: Plane,
}

/// Convert an RGB image to YUV planes at full resolution.
///
/// `Y = 0.299R + 0.587G + 0.114B`, with U and V the standard BT.601-style
/// difference channels plus the 128 bias.
#[must_use]
pub fn rgb_to_yuv(image: &Image) -> YuvPlanes {
    let width = image.width();
    let height = image.height();
    let (r, g, b) = (
        image.plane(0).as_slice(),
        image.plane(1).as_slice(),
        image.plane(2).as_slice(),
    );

    let mut y = Vec::with_capacity(width * height);
    let mut u = Vec::with_capacity(width * height);
    let mut v = Vec::with_capacity(width * height);
    for i in 0..width * height {
        y.push(0.299 * r[i] + 0.587 * g[i] + 0.114 * b[i]);
        u.push(-0.14713 * r[i] - 0.28886 * g[i] + 0.436 * b[i] + CHROMA_BIAS);
        v.push(0.615 * r[i] - 0.51499 * g[i] - 0.10001 * b[i] + CHROMA_BIAS);
    }

    YuvPlanes {
        y: Plane::from_raw_unchecked(width, height, y),
        u: Plane::from_raw_unchecked(width, height, u),
        v: Plane::from_raw_unchecked(width, height, v),
    }
}

/// Convert YUV planes back to an RGB image.
///
/// Each channel is rounded to the nearest integer and clamped to `[0, 255]`.
/// All three planes must share the same dimensions (chroma must already be
/// upsampled back to luma resolution).
pub fn yuv_to_rgb(y: &Plane, u: &Plane, v: &Plane) -> Result<Image, VqError> {
    for chroma in [u, v] {
        if chroma.width() != y.width() || chroma.height() != y.height() {
            return Err(VqError::DimensionMismatch {
                expected_width: y.width(),
                expected_height: y.height(),
                actual_width: chroma.width(),
                actual_height: chroma.height(),
            });
        }
    }

    let width = y.width();
    let height = y.height();
    let mut r = Vec::with_capacity(width * height);
    let mut g = Vec::with_capacity(width * height);
    let mut b = Vec::with_capacity(width * height);
    for i in 0..width * height {
        let luma = y.as_slice()[i];
        let cu = u.as_slice()[i] - CHROMA_BIAS;
        let cv = v.as_slice()[i] - CHROMA_BIAS;
        r.push(round_clamp(luma + 1.13983 * cv));
        g.push(round_clamp(luma - 0.39465 * cu - 0.58060 * cv));
        b.push(round_clamp(luma + 2.03211 * cu));
    }

    Image::new([
        Plane::from_raw(width, height, r)?,
        Plane::from_raw(width, height, g)?,
        Plane::from_raw(width, height, b)?,
    ])
}

#[inline]
fn round_clamp(value: f64) -> f64 {
    value.round().clamp(0.0, 255.0)
}

/// Box-filter a chroma plane down to half resolution in both dimensions
/// (floor division).
///
/// Each output sample is the mean of a 2x2 neighborhood. At the bottom/right
/// border, a neighbor whose index would fall outside the plane is replaced by
/// the in-bounds top-left pixel of the same group (edge replication); the
/// divisor stays 4 regardless.
#[must_use]
pub fn subsample_chroma(plane: &Plane) -> Plane {
    let src_height = plane.height();
    let src_width = plane.width();
    let height = src_height / 2;
    let width = src_width / 2;

    let mut out = Plane::new(width, height);
    for i in 0..height {
        for j in 0..width {
            let top_left = plane.get(i * 2, j * 2);
            let bottom_left = if i * 2 + 1 < src_height {
                plane.get(i * 2 + 1, j * 2)
            } else {
                top_left
            };
            let top_right = if j * 2 + 1 < src_width {
                plane.get(i * 2, j * 2 + 1)
            } else {
                top_left
            };
            let bottom_right = if i * 2 + 1 < src_height && j * 2 + 1 < src_width {
                plane.get(i * 2 + 1, j * 2 + 1)
            } else {
                top_left
            };
            out.set(i, j, (top_left + bottom_left + top_right + bottom_right) / 4.0);
        }
    }
    out
}

/// Expand a chroma plane to the target resolution by nearest-neighbor
/// sampling: output `(i, j)` reads input `(min(i/2, h-1), min(j/2, w-1))`.
#[must_use]
pub fn upsample_chroma(plane: &Plane, target_height: usize, target_width: usize) -> Plane {
    let src_height = plane.height();
    let src_width = plane.width();
    let mut out = Plane::new(target_width, target_height);
    if src_height == 0 || src_width == 0 {
        return out;
    }
    for i in 0..target_height {
        let src_row = (i / 2).min(src_height - 1);
        for j in 0..target_width {
            let src_col = (j / 2).min(src_width - 1);
            out.set(i, j, plane.get(src_row, src_col));
        }
    }
    out
}
