//! Uniform priority generator.

use std::ops::Range;

use log::debug;
use rand::prelude::*;
use thiserror::Error;

use crate::priority_generator::PriorityGenerator;

/// The range from which priorities are drawn by default.
pub const DEFAULT_PRIORITY_RANGE: Range<u32> = 0..1_000_000;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Uniform`] priority generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum UniformError {
    /// The range must contain at least one value.
    #[error("range must be non-empty.")]
    EmptyRange,
}

/// A priority generator drawing uniformly from a fixed range.
///
/// Collisions between priorities are harmless: equal priorities satisfy the
/// heap order either way round. They do however make the shape slightly less
/// random, so the range should be much larger than the expected number of
/// keys.
#[derive(Debug)]
pub struct Uniform {
    /// Inclusive lower bound.
    start: u32,
    /// Exclusive upper bound.
    end: u32,
    /// The random number generator.
    rng: SmallRng,
}

impl Uniform {
    /// Create a new uniform priority generator drawing from `range`, seeded
    /// from the thread-local generator.
    ///
    /// # Errors
    ///
    /// Returns [`UniformError::EmptyRange`] if `range` is empty.
    #[inline]
    pub fn new(range: Range<u32>) -> Result<Self, UniformError> {
        Self::with_rng(range, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new uniform priority generator drawing from `range`, with a
    /// fixed seed.
    ///
    /// Two treaps built with the same seed and fed the same sequence of
    /// operations have identical shapes.
    ///
    /// # Errors
    ///
    /// Returns [`UniformError::EmptyRange`] if `range` is empty.
    #[inline]
    pub fn with_seed(range: Range<u32>, seed: u64) -> Result<Self, UniformError> {
        Self::with_rng(range, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(range: Range<u32>, rng: SmallRng) -> Result<Self, UniformError> {
        if range.is_empty() {
            return Err(UniformError::EmptyRange);
        }
        debug!("Uniform priority generator over [{}, {})", range.start, range.end);
        Ok(Uniform {
            start: range.start,
            end: range.end,
            rng,
        })
    }
}

impl Default for Uniform {
    #[inline]
    fn default() -> Self {
        Uniform {
            start: DEFAULT_PRIORITY_RANGE.start,
            end: DEFAULT_PRIORITY_RANGE.end,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl PriorityGenerator for Uniform {
    #[inline]
    fn range(&self) -> Range<u32> {
        self.start..self.end
    }

    #[inline]
    fn priority(&mut self) -> u32 {
        self.rng.random_range(self.start..self.end)
    }
}
