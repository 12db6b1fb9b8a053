//! Random sampling seam.
//!
//! Every random draw the engine makes goes through a [`Sampler`], so callers
//! can swap the process-wide thread RNG for a seeded or scripted source.

use crate::{Error, Result};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Draws `amount` distinct indices out of `0..population`, without replacement.
pub trait Sampler: Send + Sync {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize>;
}

/// Uses the thread-local RNG; no reproducibility
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(population);
        rand::seq::index::sample(&mut rand::rng(), population, amount).into_vec()
    }
}

/// Reproducible sampler for test runs and demos
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(population);
        let mut rng = self.rng.lock();
        rand::seq::index::sample(&mut *rng, population, amount).into_vec()
    }
}

/// Pick `min(amount, pool.len())` items from `pool` through `sampler`,
/// rejecting short, out-of-range or repeated draws.
pub(crate) fn draw<'a, T>(sampler: &dyn Sampler, pool: &[&'a T], amount: usize) -> Result<Vec<&'a T>> {
    let amount = amount.min(pool.len());
    if amount == 0 {
        return Ok(Vec::new());
    }

    let indices = sampler.sample(pool.len(), amount);
    if indices.len() < amount {
        return Err(Error::ShortSample {
            returned: indices.len(),
            requested: amount,
        });
    }

    let mut seen = vec![false; pool.len()];
    let mut picked = Vec::with_capacity(amount);

    for index in indices.into_iter().take(amount) {
        if index >= pool.len() || seen[index] {
            return Err(Error::InvalidSample {
                index,
                population: pool.len(),
            });
        }
        seen[index] = true;
        picked.push(pool[index]);
    }

    Ok(picked)
}
