//! Codebook training via Lloyd's algorithm (K-means).
//!
//! Training is deterministic: the random generator is an explicit seeded
//! `StdRng` owned by the call, and the same stream serves both seed selection
//! and empty-cluster reseeding. Two runs over the same training set with the
//! same seed produce bit-identical codebooks.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::codebook::{distance_sq, Codebook};
use crate::common::Block;
use crate::error::VqError;

/// Diagnostics from a training run.
///
/// Observable for reporting, but not part of the training contract: the
/// iteration count may legally hit the cap without the codebook being a
/// fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainStats {
    /// Number of Lloyd iterations executed.
    pub iterations: u32,
    /// Whether a full pass completed with no change before the cap.
    pub converged: bool,
    /// Number of training blocks clustered.
    pub training_blocks: usize,
}

/// K-means codebook trainer.
///
/// ```
/// use zenvq::CodebookTrainer;
///
/// let blocks = vec![vec![0.0; 4]; 32];
/// let trainer = CodebookTrainer::new().with_codebook_size(8).with_seed(0);
/// let (codebook, stats) = trainer.train(&blocks)?;
/// assert_eq!(codebook.len(), 8);
/// assert!(stats.iterations <= 100);
/// # Ok::<(), zenvq::VqError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CodebookTrainer {
    /// Number of codebook entries to produce. Default: 256.
    pub codebook_size: usize,
    /// Cap on Lloyd iterations. Default: 100.
    pub max_iterations: u32,
    /// Seed for the per-call random generator. Default: 0.
    pub seed: u64,
}

impl Default for CodebookTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodebookTrainer {
    /// Create a trainer with the default parameters (256 entries, 100
    /// iterations, seed 0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            codebook_size: 256,
            max_iterations: 100,
            seed: 0,
        }
    }

    /// Set the number of codebook entries.
    #[must_use]
    pub fn with_codebook_size(mut self, codebook_size: usize) -> Self {
        self.codebook_size = codebook_size;
        self
    }

    /// Set the iteration cap.
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

    /// Cluster `blocks` into a codebook.
    ///
    /// Runs Lloyd's algorithm up to the iteration cap, stopping early once a
    /// full pass produces no change. Hitting the cap is not a failure: the
    /// codebook at that point is an accepted approximation.
    ///
    /// Errors on an empty training set, a zero codebook size, or blocks of
    /// inconsistent length.
    pub fn train(&self, blocks: &[Block]) -> Result<(Codebook, TrainStats), VqError> {
        if self.codebook_size == 0 {
            return Err(VqError::InvalidCodebookSize);
        }
        if blocks.is_empty() {
            return Err(VqError::EmptyTrainingSet);
        }
        let dim = blocks[0].len();
        if dim == 0 {
            return Err(VqError::InvalidBlockSize);
        }
        for block in blocks {
            if block.len() != dim {
                return Err(VqError::BlockLengthMismatch {
                    expected: dim,
                    actual: block.len(),
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut entries = self.initial_entries(blocks, &mut rng);

        let mut changed = true;
        let mut iteration = 0u32;

        while changed && iteration < self.max_iterations {
            changed = false;
            iteration += 1;

            // Assignment: nearest entry per block, strict `<` so ties go to
            // the lower index.
            let mut assignments = vec![0usize; blocks.len()];
            for (slot, block) in assignments.iter_mut().zip(blocks) {
                let mut best = 0;
                let mut best_dist = f64::INFINITY;
                for (j, entry) in entries.iter().enumerate() {
                    let d = distance_sq(block, entry);
                    if d < best_dist {
                        best_dist = d;
                        best = j;
                    }
                }
                *slot = best;
            }

            // Update: coordinate-wise mean of each cluster.
            let mut sums = vec![vec![0.0f64; dim]; self.codebook_size];
            let mut counts = vec![0usize; self.codebook_size];
            for (&assignment, block) in assignments.iter().zip(blocks) {
                counts[assignment] += 1;
                for (acc, &value) in sums[assignment].iter_mut().zip(block) {
                    *acc += value;
                }
            }

            let mut new_entries = Vec::with_capacity(self.codebook_size);
            for (sum, &count) in sums.into_iter().zip(&counts) {
                if count > 0 {
                    new_entries.push(sum.into_iter().map(|v| v / count as f64).collect());
                } else {
                    // Empty cluster: reseed from the shared RNG stream and
                    // force another pass so a degenerate entry never survives
                    // a "converged" report.
                    let idx = rng.gen_range(0..blocks.len());
                    new_entries.push(blocks[idx].clone());
                    changed = true;
                }
            }

            // Convergence is exact entry-by-entry equality.
            #[allow(clippy::float_cmp)]
            let moved = entries != new_entries;
            if moved {
                changed = true;
            }
            entries = new_entries;
        }

        let stats = TrainStats {
            iterations: iteration,
            converged: !changed,
            training_blocks: blocks.len(),
        };
        let codebook = Codebook::from_entries(entries, dim)?;
        Ok((codebook, stats))
    }

    /// Draw the initial entries from the training set.
    ///
    /// Seed indices are rejection-sampled to be distinct until every training
    /// block has been chosen once; after that, sampling is unrestricted and
    /// duplicates are allowed. The fallback only triggers when the training
    /// set is smaller than the codebook.
    fn initial_entries(&self, blocks: &[Block], rng: &mut StdRng) -> Vec<Vec<f64>> {
        let mut selected = HashSet::new();
        let mut entries = Vec::with_capacity(self.codebook_size);
        for _ in 0..self.codebook_size {
            let idx = if selected.len() >= blocks.len() {
                rng.gen_range(0..blocks.len())
            } else {
                loop {
                    let candidate = rng.gen_range(0..blocks.len());
                    if selected.insert(candidate) {
                        break candidate;
                    }
                }
            };
            entries.push(blocks[idx].clone());
        }
        entries
    }
}
