//! chain-table: a single-threaded, fixed-capacity hash table mapping
//! string keys to values, with separate chaining and a caller-supplied
//! hash function.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a faithful, safe rendition of the classic fixed-bucket chained
//!   table (no rehashing, no load-factor tracking, deterministic slot
//!   placement) where the caller controls hashing and value teardown.
//! - Layout:
//!   - `slots`: a `Vec` of chain heads, length fixed at construction.
//!   - `entries`: a `slotmap::SlotMap` arena holding every live entry;
//!     chain `next` links are generational arena keys, so the intrusive
//!     singly-linked chains need no raw pointers and no unsafe.
//!   - Per entry: an owned copy of the key (`Box<str>`), the value, and
//!     the next link.
//!
//! Constraints
//! - Single-threaded: no internal locking; callers needing concurrent
//!   access serialize externally or shard across tables.
//! - Capacity is strictly positive and immutable; a key's slot is
//!   `hash(key bytes) % capacity`, always. Chain length, and therefore
//!   per-operation cost, is bounded only by the hash function's quality
//!   and the capacity chosen; the table never self-corrects.
//! - Unique keys: insert rejects duplicates rather than overwriting.
//! - Coarse failure reporting, kept deliberately: insert answers plain
//!   `false` for both an empty (invalid) key and a duplicate; lookup and
//!   delete answer `None` for both an empty key and a genuinely absent
//!   one. Callers cannot tell these apart through the return value.
//!
//! Ownership
//! - The table owns key storage: keys are duplicated on insert and
//!   released on removal or drop.
//! - Values move into the table on insert. `delete` moves the value back
//!   out without running any hook. Dropping the table runs the optional
//!   cleanup hook exactly once per surviving value, or simply drops each
//!   value when no hook was supplied.
//!
//! Notes and non-goals
//! - No resizing or rehashing; the fixed slot array is the contract.
//! - No iteration-order guarantee; `iter` walks the arena.
//! - Not `Send`/`Sync` aware; no serialization.
//! - The `dump` output (and `Debug`, which delegates to it) is diagnostic
//!   only and not a stable format.
//! - `hashers` provides `fnv1a` (general purpose) and `byte_sum`
//!   (deliberately weak, for collision testing); any deterministic
//!   `Fn(&[u8]) -> u64` is accepted.

mod chain_table;
mod chain_table_proptest;
mod dump;
pub mod hashers;

// Public surface
pub use chain_table::{ChainTable, Iter};
