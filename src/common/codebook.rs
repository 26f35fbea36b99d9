//! Trained codebooks and nearest-entry search.

use std::io::Read;

use byteorder_lite::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::VqError;

/// Serialized codebook magic: "ZVQC".
const CODEBOOK_MAGIC: [u8; 4] = *b"ZVQC";

/// An ordered set of representative block vectors, indexed from 0.
///
/// Produced once per training run and reused read-only for every image
/// compressed in that run. Entries are not guaranteed distinct after training
/// (degenerate clusters are patched by reseeding), but initialization attempts
/// distinct seeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Codebook {
    dim: usize,
    entries: Vec<Vec<f64>>,
}

impl Codebook {
    /// Build a codebook from pre-computed entries, all of length `dim`.
    pub fn from_entries(entries: Vec<Vec<f64>>, dim: usize) -> Result<Self, VqError> {
        if entries.is_empty() {
            return Err(VqError::InvalidCodebookSize);
        }
        for entry in &entries {
            if entry.len() != dim {
                return Err(VqError::BlockLengthMismatch {
                    expected: dim,
                    actual: entry.len(),
                });
            }
        }
        Ok(Self { dim, entries })
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A codebook is never empty; this exists for clippy's benefit.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimension of every entry (`block_size * block_size`).
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The entry at `index`.
    #[inline]
    #[must_use]
    pub fn entry(&self, index: usize) -> &[f64] {
        &self.entries[index]
    }

    /// Iterate over all entries in index order.
    pub fn entries(&self) -> impl Iterator<Item = &[f64]> {
        self.entries.iter().map(Vec::as_slice)
    }

    /// Index of the entry nearest to `block` in Euclidean distance.
    ///
    /// Ties break toward the lower index: the scan uses strict `<`, so the
    /// first entry at the minimal distance wins. The same rule is used during
    /// training assignment, keeping compression consistent with the clusters
    /// the codebook was trained on.
    #[must_use]
    pub fn nearest(&self, block: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, entry) in self.entries.iter().enumerate() {
            let d = distance_sq(block, entry);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Serialize as a flat little-endian stream.
    ///
    /// Layout: `"ZVQC"` magic, `u32` entry count, `u32` vector dimension, then
    /// `count * dim` `f64` values in codebook-index order. This is the full
    /// persisted state of a training run.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; 12 + self.entries.len() * self.dim * 8];
        out[..4].copy_from_slice(&CODEBOOK_MAGIC);
        LittleEndian::write_u32(&mut out[4..8], self.entries.len() as u32);
        LittleEndian::write_u32(&mut out[8..12], self.dim as u32);
        let mut offset = 12;
        for entry in &self.entries {
            for &value in entry {
                LittleEndian::write_f64(&mut out[offset..offset + 8], value);
                offset += 8;
            }
        }
        out
    }

    /// Parse a codebook serialized by [`Codebook::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VqError> {
        let mut reader = bytes;
        let mut magic = [0u8; 4];
        if reader.read_exact(&mut magic).is_err() || magic != CODEBOOK_MAGIC {
            return Err(VqError::CorruptCodebook("bad magic"));
        }
        let count = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| VqError::CorruptCodebook("truncated header"))? as usize;
        let dim = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| VqError::CorruptCodebook("truncated header"))? as usize;
        if count == 0 || dim == 0 {
            return Err(VqError::CorruptCodebook("zero-sized codebook"));
        }
        if reader.len() != count * dim * 8 {
            return Err(VqError::CorruptCodebook("payload length mismatch"));
        }
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut entry = Vec::with_capacity(dim);
            for _ in 0..dim {
                let value = reader
                    .read_f64::<LittleEndian>()
                    .map_err(|_| VqError::CorruptCodebook("truncated payload"))?;
                entry.push(value);
            }
            entries.push(entry);
        }
        Ok(Self { dim, entries })
    }
}

/// Squared Euclidean distance between two vectors of equal length.
///
/// Squared rather than rooted: the square root is monotonic, so nearest-entry
/// argmins and their tie-breaks are unchanged.
#[inline]
#[must_use]
pub(crate) fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
