//! Bucket selection: map a string key onto `[0, capacity)`.

use core::hash::BuildHasher;
use core::num::NonZeroUsize;
use std::collections::hash_map::RandomState;

/// Maps a key to a bucket index.
///
/// Implementations must return a value in `[0, capacity)` and must be
/// deterministic: the same key and capacity always select the same bucket
/// for the lifetime of the hasher. The table never rehashes, so a hasher
/// that changes its answer would strand entries in the wrong chain.
/// An out-of-range answer is reduced modulo `capacity` by the table.
pub trait BucketHasher {
    fn bucket(&self, key: &str, capacity: NonZeroUsize) -> usize;
}

/// Sum of the key's bytes (terminator included) modulo the capacity.
///
/// Cheap and stable, but anagrams and byte permutations always collide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ByteSum;

impl BucketHasher for ByteSum {
    #[inline]
    fn bucket(&self, key: &str, capacity: NonZeroUsize) -> usize {
        byte_sum(key, capacity)
    }
}

/// The `ByteSum` algorithm as a free function.
#[inline]
pub fn byte_sum(key: &str, capacity: NonZeroUsize) -> usize {
    // The trailing NUL contributes zero; only the key bytes matter.
    let sum = key
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_add(u64::from(b)));
    (sum % capacity.get() as u64) as usize
}

/// Adapts any `BuildHasher` into a bucket selector for better spread.
///
/// Determinism holds per instance: two `Seeded<RandomState>` built
/// separately will generally disagree, so clone the hasher rather than
/// constructing a fresh one when two tables must agree.
#[derive(Clone, Debug, Default)]
pub struct Seeded<S = RandomState> {
    build: S,
}

impl Seeded<RandomState> {
    /// Seeded from a fresh `RandomState`.
    pub fn random() -> Self {
        Self::new(RandomState::new())
    }
}

impl<S: BuildHasher> Seeded<S> {
    pub fn new(build: S) -> Self {
        Self { build }
    }

    pub fn inner(&self) -> &S {
        &self.build
    }
}

impl<S: BuildHasher> BucketHasher for Seeded<S> {
    #[inline]
    fn bucket(&self, key: &str, capacity: NonZeroUsize) -> usize {
        (self.build.hash_one(key) % capacity.get() as u64) as usize
    }
}
