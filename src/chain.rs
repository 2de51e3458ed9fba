//! Chains: structural layer holding bucket heads over an entry arena.
//!
//! Entries live in a `SlotMap`; each bucket slot holds the arena key of
//! its chain head and each entry links to the next one in its chain. This
//! layer knows nothing about hashing: callers pass the bucket index.

use crate::error::CapacityError;
use crate::hashing::BucketHasher;
use crate::table::ChainedTable;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one entry, resolved against the table it came from.
///
/// Handles are generational: once the entry is removed, merged or cleared,
/// the handle resolves to `None` even if its arena slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }

    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }

    pub fn key<'a, V, H>(&self, table: &'a ChainedTable<V, H>) -> Option<&'a str>
    where
        H: BucketHasher,
    {
        table.handle_key(*self)
    }

    pub fn value<'a, V, H>(&self, table: &'a ChainedTable<V, H>) -> Option<&'a V>
    where
        H: BucketHasher,
    {
        table.handle_value(*self)
    }

    pub fn value_mut<'a, V, H>(&self, table: &'a mut ChainedTable<V, H>) -> Option<&'a mut V>
    where
        H: BucketHasher,
    {
        table.handle_value_mut(*self)
    }
}

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub(crate) struct Chains<V> {
    heads: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<V>>, // entry storage; links are arena keys
}

impl<V> Chains<V> {
    pub(crate) fn with_buckets(buckets: NonZeroUsize) -> Result<Self, CapacityError> {
        let n = buckets.get();
        let mut heads = Vec::new();
        heads
            .try_reserve_exact(n)
            .map_err(|_| CapacityError::Alloc { capacity: n })?;
        heads.resize(n, None);
        Ok(Self {
            heads,
            slots: SlotMap::with_key(),
        })
    }

    pub(crate) fn buckets(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Find `key` in `bucket`, returning its predecessor (if any) and itself.
    fn locate(&self, bucket: usize, key: &str) -> Option<(Option<DefaultKey>, DefaultKey)> {
        let mut prev = None;
        let mut cur = *self.heads.get(bucket)?;
        while let Some(k) = cur {
            let e = self.slots.get(k)?;
            if &*e.key == key {
                return Some((prev, k));
            }
            prev = cur;
            cur = e.next;
        }
        None
    }

    /// Point whatever precedes an entry (previous link or bucket head) at `to`.
    fn relink(&mut self, bucket: usize, prev: Option<DefaultKey>, to: Option<DefaultKey>) {
        match prev {
            Some(p) => {
                if let Some(pe) = self.slots.get_mut(p) {
                    pe.next = to;
                }
            }
            None => self.heads[bucket] = to,
        }
    }

    pub(crate) fn get(&self, bucket: usize, key: &str) -> Option<(&str, &V)> {
        let (_, k) = self.locate(bucket, key)?;
        self.slots.get(k).map(|e| (&*e.key, &e.value))
    }

    pub(crate) fn find(&self, bucket: usize, key: &str) -> Option<Handle> {
        self.locate(bucket, key).map(|(_, k)| Handle::new(k))
    }

    pub(crate) fn handle_key(&self, h: Handle) -> Option<&str> {
        self.slots.get(h.raw_handle()).map(|e| &*e.key)
    }

    pub(crate) fn handle_value(&self, h: Handle) -> Option<&V> {
        self.slots.get(h.raw_handle()).map(|e| &e.value)
    }

    pub(crate) fn handle_value_mut(&mut self, h: Handle) -> Option<&mut V> {
        self.slots.get_mut(h.raw_handle()).map(|e| &mut e.value)
    }

    pub(crate) fn get_mut(&mut self, bucket: usize, key: &str) -> Option<&mut V> {
        let (_, k) = self.locate(bucket, key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    /// Prepend a new entry. The caller guarantees `key` is not yet present.
    pub(crate) fn push_front(&mut self, bucket: usize, key: &str, value: V) {
        let next = self.heads[bucket];
        let k = self.slots.insert(Entry {
            key: key.into(),
            value,
            next,
        });
        self.heads[bucket] = Some(k);
    }

    /// Replace the value stored under `key` with `f(existing, incoming)`,
    /// keeping the entry's position in its chain. When `key` is absent,
    /// `incoming` is handed back untouched and `f` does not run.
    ///
    /// The entry is unlinked before `f` runs, so if `f` panics the chain
    /// is still consistent and the entry is simply gone. The merged value
    /// lands in a fresh arena slot, so earlier handles to it go stale.
    pub(crate) fn merge<F>(&mut self, bucket: usize, key: &str, incoming: V, f: F) -> Result<(), V>
    where
        F: FnOnce(V, V) -> V,
    {
        let Some((prev, k)) = self.locate(bucket, key) else {
            return Err(incoming);
        };
        let Some(old) = self.slots.remove(k) else {
            return Err(incoming);
        };
        self.relink(bucket, prev, old.next);

        let merged = f(old.value, incoming);
        let k = self.slots.insert(Entry {
            key: old.key,
            value: merged,
            next: old.next,
        });
        self.relink(bucket, prev, Some(k));
        Ok(())
    }

    pub(crate) fn unlink(&mut self, bucket: usize, key: &str) -> Option<(Box<str>, V)> {
        let (prev, k) = self.locate(bucket, key)?;
        let e = self.slots.remove(k)?;
        self.relink(bucket, prev, e.next);
        Some((e.key, e.value))
    }

    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        let mut n = 0;
        let mut cur = self.heads.get(bucket).copied().flatten();
        while let Some(k) = cur {
            n += 1;
            cur = self.slots.get(k).and_then(|e| e.next);
        }
        n
    }

    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            chains: self,
            bucket: 0,
            cursor: None,
            remaining: self.slots.len(),
        }
    }

    pub(crate) fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        for b in 0..self.heads.len() {
            let mut cur = self.heads[b];
            while let Some(k) = cur {
                let Some(e) = self.slots.get_mut(k) else {
                    break;
                };
                f(&*e.key, &mut e.value);
                cur = e.next;
            }
        }
    }

    /// Release every entry in iteration order, handing each value to `f`.
    /// Buckets are emptied as they are walked; the slot array is kept.
    pub(crate) fn drain_ordered<F>(&mut self, mut f: F)
    where
        F: FnMut(V),
    {
        for b in 0..self.heads.len() {
            let mut cur = self.heads[b].take();
            while let Some(k) = cur {
                let Some(e) = self.slots.remove(k) else {
                    break;
                };
                cur = e.next;
                f(e.value);
            }
        }
        debug_assert!(self.slots.is_empty());
    }
}

/// Iterator over `(key, value)` pairs: buckets ascending, chains head to tail.
pub struct Iter<'a, V> {
    chains: &'a Chains<V>,
    bucket: usize,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let chains = self.chains;
            if let Some(k) = self.cursor {
                let e = chains.slots.get(k)?;
                self.cursor = e.next;
                self.remaining -= 1;
                return Some((&*e.key, &e.value));
            }
            let head = *chains.heads.get(self.bucket)?;
            self.bucket += 1;
            self.cursor = head;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}
