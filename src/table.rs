//! ChainedTable: public API composing bucket selection and chains.

use crate::chain::{Chains, Handle, Iter};
use crate::error::{CapacityError, InsertError};
use crate::hashing::{BucketHasher, ByteSum};
use core::fmt;
use core::num::NonZeroUsize;
use log::{debug, trace};

/// Fixed-capacity hash table from string keys to values of type `V`.
///
/// Collisions are resolved by separate chaining. The number of buckets is
/// chosen at construction and never changes; there is no rehashing. Keys
/// are copied into the table; values are moved in and handed back out on
/// overwrite, removal or teardown.
pub struct ChainedTable<V, H = ByteSum> {
    hasher: H,
    capacity: NonZeroUsize,
    chains: Chains<V>,
}

impl<V> ChainedTable<V> {
    /// Create a table with `capacity` buckets and the `ByteSum` hasher.
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_hasher(capacity, ByteSum)
    }
}

impl<V, H> ChainedTable<V, H>
where
    H: BucketHasher,
{
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, CapacityError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CapacityError::Zero)?;
        let chains = Chains::with_buckets(capacity)?;
        debug_assert_eq!(chains.buckets(), capacity.get());
        debug!("created chained table with {} buckets", capacity);
        Ok(Self {
            hasher,
            capacity,
            chains,
        })
    }

    // Reduced again: a custom hasher may answer outside `[0, capacity)`.
    #[inline]
    fn bucket(&self, key: &str) -> usize {
        self.hasher.bucket(key, self.capacity) % self.capacity
    }

    /// Number of buckets; fixed for the table's lifetime.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.len() == 0
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Bucket index `key` maps to.
    pub fn bucket_of(&self, key: &str) -> usize {
        self.bucket(key)
    }

    /// Number of entries chained in `bucket` (0 when out of range).
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.chains.chain_len(bucket)
    }

    /// Insert `value` under `key`; last write wins.
    ///
    /// Returns the value previously stored under `key`, if any. The table
    /// never drops a displaced value itself; the caller decides.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, InsertError<V>> {
        if key.is_empty() {
            return Err(InsertError::EmptyKey(value));
        }
        let b = self.bucket(key);
        if let Some(slot) = self.chains.get_mut(b, key) {
            trace!("overwrite {:?} in bucket {}", key, b);
            return Ok(Some(core::mem::replace(slot, value)));
        }
        trace!("prepend {:?} to bucket {}", key, b);
        self.chains.push_front(b, key, value);
        Ok(None)
    }

    /// Insert `value` under `key`, combining with an existing value via
    /// `resolve(existing, incoming)`.
    ///
    /// `resolve` only runs when `key` is already present; it alone decides
    /// how the two values combine. A new key is inserted as with `insert`.
    /// If `resolve` panics, the entry for `key` is removed.
    pub fn insert_merge<F>(&mut self, key: &str, value: V, resolve: F) -> Result<(), InsertError<V>>
    where
        F: FnOnce(V, V) -> V,
    {
        if key.is_empty() {
            return Err(InsertError::EmptyKey(value));
        }
        let b = self.bucket(key);
        match self.chains.merge(b, key, value, resolve) {
            Ok(()) => trace!("merge {:?} in bucket {}", key, b),
            Err(value) => {
                trace!("prepend {:?} to bucket {}", key, b);
                self.chains.push_front(b, key, value);
            }
        }
        Ok(())
    }

    /// Value stored under `key`. Empty keys never match.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        if key.is_empty() {
            return None;
        }
        self.chains.get(self.bucket(key), key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if key.is_empty() {
            return None;
        }
        let b = self.bucket(key);
        self.chains.get_mut(b, key)
    }

    /// Handle to the entry stored under `key`; see `Handle` for resolution.
    pub fn find(&self, key: &str) -> Option<Handle> {
        if key.is_empty() {
            return None;
        }
        self.chains.find(self.bucket(key), key)
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<&str> {
        self.chains.handle_key(h)
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.chains.handle_value(h)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.chains.handle_value_mut(h)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        let b = self.bucket(key);
        let (_key, value) = self.chains.unlink(b, key)?;
        trace!("removed {:?} from bucket {}", key, b);
        Some(value)
    }

    /// Remove `key` and pass its value to `destroy`. Returns whether an
    /// entry was removed; `destroy` is not called otherwise.
    pub fn remove_with<F>(&mut self, key: &str, destroy: F) -> bool
    where
        F: FnOnce(V),
    {
        match self.remove(key) {
            Some(v) => {
                destroy(v);
                true
            }
            None => false,
        }
    }

    /// Entries in bucket order, each chain head to tail.
    ///
    /// The iterator borrows the table, so it cannot be mutated mid-walk.
    pub fn iter(&self) -> Iter<'_, V> {
        self.chains.iter()
    }

    /// Call `visitor` once per entry, in `iter` order.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.chains.iter() {
            visitor(k, v);
        }
    }

    /// Like `for_each`, with mutable access to each value.
    pub fn for_each_mut<F>(&mut self, visitor: F)
    where
        F: FnMut(&str, &mut V),
    {
        self.chains.for_each_mut(visitor);
    }

    /// Remove every entry, handing each value to `destroy` in `iter`
    /// order. The table keeps its capacity and stays usable.
    pub fn clear_with<F>(&mut self, destroy: F)
    where
        F: FnMut(V),
    {
        let n = self.chains.len();
        self.chains.drain_ordered(destroy);
        debug!("cleared chained table: released {} entries", n);
    }

    /// Tear the table down, handing each value to `destroy` exactly once in
    /// `iter` order. Keys and the bucket array are released afterwards.
    pub fn destroy<F>(mut self, destroy: F)
    where
        F: FnMut(V),
    {
        let n = self.chains.len();
        self.chains.drain_ordered(destroy);
        debug!(
            "destroyed chained table with {} buckets: released {} entries",
            self.capacity, n
        );
    }
}

impl<'a, V, H> IntoIterator for &'a ChainedTable<V, H>
where
    H: BucketHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, H: BucketHasher> fmt::Debug for ChainedTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
