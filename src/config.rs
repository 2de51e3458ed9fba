//! Builder for `ChainedTable`.

use crate::error::CapacityError;
use crate::hashing::{BucketHasher, ByteSum};
use crate::table::ChainedTable;

/// Bucket count used when the builder is not given one.
pub const DEFAULT_CAPACITY: usize = 16;

/// Collects the bucket capacity and hasher, then builds a table.
///
/// ```
/// use chain_table::{Seeded, TableBuilder};
///
/// let mut t = TableBuilder::new()
///     .capacity(64)
///     .hasher(Seeded::random())
///     .build()
///     .unwrap();
/// t.insert("k", 1).unwrap();
/// assert_eq!(t.get("k"), Some(&1));
/// assert_eq!(t.capacity(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct TableBuilder<H = ByteSum> {
    capacity: usize,
    hasher: H,
}

impl Default for TableBuilder<ByteSum> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hasher: ByteSum,
        }
    }
}

impl TableBuilder<ByteSum> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: BucketHasher> TableBuilder<H> {
    /// Number of buckets. Zero is rejected at `build`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn hasher<T: BucketHasher>(self, hasher: T) -> TableBuilder<T> {
        TableBuilder {
            capacity: self.capacity,
            hasher,
        }
    }

    pub fn build<V>(self) -> Result<ChainedTable<V, H>, CapacityError> {
        ChainedTable::with_hasher(self.capacity, self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::Seeded;

    #[test]
    fn defaults() {
        let t: ChainedTable<u8> = TableBuilder::new().build().unwrap();
        assert_eq!(t.capacity(), DEFAULT_CAPACITY);
        assert_eq!(*t.hasher(), ByteSum);
    }

    #[test]
    fn zero_capacity_fails_at_build() {
        let r = TableBuilder::new().capacity(0).build::<u8>();
        assert_eq!(r.err(), Some(CapacityError::Zero));
    }

    #[test]
    fn hasher_swap_keeps_capacity() {
        let t = TableBuilder::new()
            .capacity(3)
            .hasher(Seeded::random())
            .build::<&str>()
            .unwrap();
        assert_eq!(t.capacity(), 3);
        assert!(t.bucket_of("anything") < 3);
    }
}
