//! Flat, row-major channel planes and planar images.
//!
//! Planes hold `f64` samples so that the continuous range produced by the
//! luma/chroma transform survives intermediate stages unclamped; conversion
//! back to 8-bit integers happens only at reconstruction time.

use crate::error::VqError;

/// A rectangular grid of samples for a single channel.
///
/// Storage is a single flat buffer in row-major order; `(row, col)` maps to
/// `row * width + col`. Accessors are bounds-checked through the underlying
/// slice indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Create a zero-filled plane of the given dimensions.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Create a plane from an existing row-major buffer.
    ///
    /// Fails if `data.len() != width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<f64>) -> Result<Self, VqError> {
        if data.len() != width * height {
            return Err(VqError::InvalidBufferSize {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Internal constructor for buffers whose length is correct by
    /// construction.
    #[inline]
    pub(crate) fn from_raw_unchecked(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in samples.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the plane has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(col < self.width);
        self.data[row * self.width + col]
    }

    /// Set the sample at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(col < self.width);
        self.data[row * self.width + col] = value;
    }

    /// One full row of samples.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// The whole buffer, row-major.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// A planar image: three channel planes of identical dimensions.
///
/// The type does not encode a color space; whether the planes mean R/G/B or
/// Y/U/V is determined by the pipeline flavor that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    planes: [Plane; 3],
}

impl Image {
    /// Build an image from three planes.
    ///
    /// All planes must share the same non-zero dimensions.
    pub fn new(planes: [Plane; 3]) -> Result<Self, VqError> {
        let width = planes[0].width();
        let height = planes[0].height();
        if width == 0 || height == 0 {
            return Err(VqError::EmptyPlane { width, height });
        }
        for plane in &planes[1..] {
            if plane.width() != width || plane.height() != height {
                return Err(VqError::DimensionMismatch {
                    expected_width: width,
                    expected_height: height,
                    actual_width: plane.width(),
                    actual_height: plane.height(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            planes,
        })
    }

    /// Build an image from an interleaved 8-bit RGB buffer (3 bytes per pixel).
    pub fn from_rgb8(data: &[u8], width: usize, height: usize) -> Result<Self, VqError> {
        if width == 0 || height == 0 {
            return Err(VqError::EmptyPlane { width, height });
        }
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(VqError::InvalidBufferSize {
                expected,
                actual: data.len(),
            });
        }
        let mut channels = [
            Vec::with_capacity(width * height),
            Vec::with_capacity(width * height),
            Vec::with_capacity(width * height),
        ];
        for px in data.chunks_exact(3) {
            channels[0].push(f64::from(px[0]));
            channels[1].push(f64::from(px[1]));
            channels[2].push(f64::from(px[2]));
        }
        let [r, g, b] = channels;
        Ok(Self {
            width,
            height,
            planes: [
                Plane::from_raw(width, height, r)?,
                Plane::from_raw(width, height, g)?,
                Plane::from_raw(width, height, b)?,
            ],
        })
    }

    /// Serialize to an interleaved 8-bit RGB buffer, rounding to nearest and
    /// clamping each sample to `[0, 255]`.
    #[must_use]
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * 3);
        for i in 0..self.width * self.height {
            for plane in &self.planes {
                out.push(clamp_u8(plane.as_slice()[i]));
            }
        }
        out
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// One channel plane (0, 1 or 2).
    #[inline]
    #[must_use]
    pub fn plane(&self, channel: usize) -> &Plane {
        &self.planes[channel]
    }

    /// All three channel planes.
    #[inline]
    #[must_use]
    pub fn planes(&self) -> &[Plane; 3] {
        &self.planes
    }
}

/// Round to nearest and clamp to the 8-bit range.
#[inline]
#[must_use]
pub fn clamp_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
