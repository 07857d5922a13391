//! The shuffled sequence the player has to reproduce.
//!
//! A [`SequencePool`] holds every id in `[0, N)` exactly once. Each level
//! exposes a longer prefix of the same pool, so the sequence shown at level
//! `n + 1` always starts with the sequence shown at level `n`.

use crate::types::{ButtonId, PoolError};
use rand::Rng;

/// Shuffles `items` in place with the Fisher-Yates algorithm.
///
/// Walks from the last index down to 1, swapping each element with a uniformly
/// chosen element at or below it. Every permutation is equally likely given a
/// uniform `rng`.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A permutation of the ids `[0, N)`.
///
/// `N` must not exceed 256 since ids are stored as `u8`. Larger pools fail
/// to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePool<const N: usize> {
    ids: [ButtonId; N],
}

impl<const N: usize> SequencePool<N> {
    /// Creates the identity pool `0, 1, .., N - 1`.
    pub fn new() -> Self {
        const { assert!(N <= 256, "SequencePool holds at most 256 ids") };
        Self {
            ids: core::array::from_fn(|i| ButtonId(i as u8)),
        }
    }

    /// Creates a freshly shuffled pool.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut pool = Self::new();
        pool.shuffle(rng);
        pool
    }

    /// Loads an explicit ordering.
    ///
    /// # Errors
    /// * `WrongLength` - `ids` does not hold exactly `N` entries
    /// * `OutOfRange` - an id is `N` or larger
    /// * `Duplicate` - an id appears twice
    pub fn from_ids(ids: &[ButtonId]) -> Result<Self, PoolError> {
        if ids.len() != N {
            return Err(PoolError::WrongLength {
                expected: N,
                actual: ids.len(),
            });
        }

        let mut seen = [false; N];
        for &id in ids {
            let idx = id.index();
            if idx >= N {
                return Err(PoolError::OutOfRange(id));
            }
            if seen[idx] {
                return Err(PoolError::Duplicate(id));
            }
            seen[idx] = true;
        }

        let mut pool = Self::new();
        pool.ids.copy_from_slice(ids);
        Ok(pool)
    }

    /// Reorders the pool in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.ids, rng);
    }

    /// Returns the first `level` ids, clamped to the pool size.
    pub fn prefix(&self, level: usize) -> &[ButtonId] {
        &self.ids[..level.min(N)]
    }

    /// Returns the id at `position`, if any.
    #[inline]
    pub fn get(&self, position: usize) -> Option<ButtonId> {
        self.ids.get(position).copied()
    }

    /// Returns true if `input` equals the pool prefix of the same length.
    pub fn matches_prefix(&self, input: &[ButtonId]) -> bool {
        input.len() <= N && self.ids[..input.len()] == *input
    }

    /// Returns the whole ordering.
    pub fn as_slice(&self) -> &[ButtonId] {
        &self.ids
    }

    /// Number of ids in the pool.
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true for a zero-sized pool.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> Default for SequencePool<N> {
    fn default() -> Self {
        Self::new()
    }
}
