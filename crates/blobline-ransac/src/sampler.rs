//! Index sampling for the RANSAC loop.
//!
//! The fitter draws every index through [`IndexSampler`], held for the whole
//! call. Any `rand::Rng` is a sampler; [`ScriptedSampler`] replays a fixed
//! index sequence so a fit can be reproduced exactly.

use rand::Rng;

/// Source of uniformly distributed indices.
pub trait IndexSampler {
    /// Draw an index in `0..len`. `len` is never zero.
    fn sample_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> IndexSampler for R {
    #[inline]
    fn sample_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Draw two distinct indices in `0..len` (`len >= 2`).
///
/// On collision the second index is advanced by one, wrapping at `len`, so a
/// draw never loops.
pub fn sample_pair<S: IndexSampler + ?Sized>(sampler: &mut S, len: usize) -> (usize, usize) {
    debug_assert!(len >= 2, "need at least two blobs to sample a pair");
    let i = sampler.sample_index(len) % len;
    let mut j = sampler.sample_index(len) % len;
    if i == j {
        j = (j + 1) % len;
    }
    (i, j)
}

/// Replays a fixed index sequence, cycling when it runs out.
///
/// Indices larger than the requested range are reduced modulo `len`.
#[derive(Clone, Debug)]
pub struct ScriptedSampler {
    indices: Vec<usize>,
    cursor: usize,
}

impl ScriptedSampler {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }

    /// Script that yields the given pairs in order.
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        Self::new(pairs.iter().flat_map(|&(i, j)| [i, j]).collect())
    }
}

impl IndexSampler for ScriptedSampler {
    fn sample_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let idx = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        idx % len
    }
}
