//! chain-table: a fixed-capacity hash table with string keys, separate
//! chaining and caller-controlled value ownership.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small embeddable key-value container whose bucket layout is
//!   fixed at construction and whose behaviour on collisions, removal and
//!   teardown is decided by the caller.
//! - Layers:
//!   - `BucketHasher`: maps a key to a bucket in `[0, capacity)`. The
//!     default `ByteSum` sums the key bytes; `Seeded` wraps any
//!     `BuildHasher` for better spread.
//!   - `Chains<V>`: structural layer. Bucket heads over a `SlotMap` entry
//!     arena; each entry links to the next one in its chain by arena key.
//!   - `ChainedTable<V, H>`: public API. Validates keys, selects buckets,
//!     runs resolve/destroy/visitor callbacks, logs.
//!
//! Constraints
//! - Single-threaded; no interior mutability, no atomics. Exclusive access
//!   is `&mut self`.
//! - Capacity is fixed. No resizing, rehashing or load-factor tracking.
//! - Global key uniqueness: a key can only live in the chain its bucket
//!   selects, and that chain is scanned before anything is inserted.
//! - Chains are head-first: the most recently inserted distinct key of a
//!   bucket is its head.
//!
//! Ownership
//! - Keys are copied in (`Box<str>`) and owned by the table.
//! - Values are moved in and moved back out: `insert` returns a displaced
//!   value, `remove` returns the removed one, `remove_with`, `clear_with`
//!   and `destroy` hand values to a caller-supplied function. The table
//!   never drops a value on its own except when it is itself dropped.
//!
//! Iteration order
//! - Bucket index ascending, then head to tail within each chain. The
//!   iterator borrows the table, so mutation during a walk does not compile.
//!
//! Failure
//! - Zero capacity and slot-array allocation failure are `CapacityError`s.
//! - Empty keys are rejected by insert (`InsertError::EmptyKey`, value
//!   handed back) and never match on lookup or removal.
//! - Missing keys are `None`, never an error.

mod chain;
mod chain_proptest;
pub mod config;
pub mod error;
pub mod hashing;
mod table;

// Public surface
pub use chain::{Handle, Iter};
pub use config::{TableBuilder, DEFAULT_CAPACITY};
pub use error::{CapacityError, InsertError};
pub use hashing::{byte_sum, BucketHasher, ByteSum, Seeded};
pub use table::ChainedTable;
