//! Mini-batch sampling of observation rows.

use rand::prelude::*;

use crate::error::{BregmanError, Result};

/// Draws a fresh random mini-batch of observation indices each iteration.
///
/// Each draw shuffles a permutation of `0..n` and truncates it to
/// `num_samp` entries; draws carry no memory of prior draws. The same draw
/// is shared by all three variants within an iteration so their
/// trajectories stay comparable.
#[derive(Debug, Clone)]
pub struct Sampler {
    indices: Vec<usize>,
    num_samp: usize,
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler over `n` indices with batch size `num_samp`.
    pub fn new(n: usize, num_samp: usize, seed: u64) -> Result<Self> {
        if num_samp == 0 || num_samp > n {
            return Err(BregmanError::InvalidConfig(format!(
                "batch size {} must be in 1..={}",
                num_samp, n
            )));
        }
        Ok(Sampler {
            indices: (0..n).collect(),
            num_samp,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Draw the next mini-batch.
    pub fn draw(&mut self) -> &[usize] {
        self.indices.shuffle(&mut self.rng);
        &self.indices[..self.num_samp]
    }

    /// Batch size of every draw.
    pub fn batch_size(&self) -> usize {
        self.num_samp
    }
}
