//! ChainTable: fixed-capacity separate-chaining table over a slotmap arena.

use slotmap::{DefaultKey, SlotMap};

/// One stored association: an owned copy of the caller's key, the value,
/// and the arena key of the next entry in the same chain.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
    pub(crate) next: Option<DefaultKey>,
}

/// A fixed-capacity hash table mapping string keys to values of type `V`,
/// resolving collisions by separate chaining.
///
/// The slot count is set once at construction and never changes: there is
/// no rehashing and no load-factor tracking. A key's slot is
/// `hash(key bytes) % capacity`, so the quality of the caller-supplied
/// hash function directly bounds chain length and therefore lookup cost.
/// With many entries and a small or poorly hashed table, operations
/// degrade to a linear chain walk; the table never self-corrects.
///
/// Keys are duplicated into table-owned storage on insert and released on
/// removal. Values are moved in on insert; `delete` moves the value back
/// out, and dropping the table either runs the optional cleanup hook once
/// per surviving value or simply drops each value.
///
/// Failure reporting is deliberately coarse: `insert` answers `false` for
/// both an empty key and a duplicate key, and `lookup`/`delete` answer
/// `None` for both an empty key and a genuinely absent one. Callers who
/// need to tell these apart must check separately.
///
/// Single-threaded by design; wrap the whole table in an external lock if
/// concurrent access is required.
pub struct ChainTable<V, H = fn(&[u8]) -> u64> {
    slots: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<V>>,
    hash: H,
    cleanup: Option<Box<dyn FnMut(V)>>,
    len: usize,
}

impl<V, H> ChainTable<V, H>
where
    H: Fn(&[u8]) -> u64,
{
    /// Creates a table with `capacity` empty slots and no cleanup hook.
    /// Dropped values are released by their own `Drop` impl.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; the slot count must be strictly
    /// positive for the modulo reduction to be defined.
    pub fn new(capacity: usize, hash: H) -> Self {
        assert!(capacity > 0, "ChainTable capacity must be non-zero");
        Self {
            slots: vec![None; capacity],
            entries: SlotMap::with_key(),
            hash,
            cleanup: None,
            len: 0,
        }
    }

    /// Creates a table whose drop invokes `cleanup` exactly once on each
    /// value still stored at that point. Values removed earlier via
    /// [`delete`](Self::delete) are returned to the caller and never see
    /// the hook.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_cleanup<C>(capacity: usize, hash: H, cleanup: C) -> Self
    where
        C: FnMut(V) + 'static,
    {
        let mut table = Self::new(capacity, hash);
        table.cleanup = Some(Box::new(cleanup));
        table
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot count fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The single slot consulted for all operations on `key`.
    fn slot_index(&self, key: &str) -> usize {
        ((self.hash)(key.as_bytes()) % self.slots.len() as u64) as usize
    }

    /// Walks the chain at `slot` for an exact key match (full-length,
    /// byte-for-byte; prefixes do not match).
    fn find_in_chain(&self, slot: usize, key: &str) -> Option<DefaultKey> {
        let mut cur = self.slots[slot];
        while let Some(k) = cur {
            let entry = self.entries.get(k)?;
            if &*entry.key == key {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    /// Inserts `key` → `value`, answering whether the entry was stored.
    ///
    /// Returns `false` without touching the table when `key` is empty or
    /// already present; this table never overwrites. On success the key is
    /// duplicated into table-owned storage and the new entry is linked at
    /// the head of its slot's chain, so within a chain the most recently
    /// inserted entry is encountered first.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        if key.is_empty() {
            return false;
        }
        let slot = self.slot_index(key);
        if self.find_in_chain(slot, key).is_some() {
            return false;
        }
        let head = self.slots[slot];
        let k = self.entries.insert(Entry {
            key: key.into(),
            value,
            next: head,
        });
        self.slots[slot] = Some(k);
        self.len += 1;
        true
    }

    /// Borrows the value stored under `key`, or `None` when the key is
    /// absent or empty (the two cases are indistinguishable by contract).
    pub fn lookup(&self, key: &str) -> Option<&V> {
        if key.is_empty() {
            return None;
        }
        let slot = self.slot_index(key);
        let k = self.find_in_chain(slot, key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    /// Mutable counterpart of [`lookup`](Self::lookup).
    pub fn lookup_mut(&mut self, key: &str) -> Option<&mut V> {
        if key.is_empty() {
            return None;
        }
        let slot = self.slot_index(key);
        let k = self.find_in_chain(slot, key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Removes `key`'s entry, returning its value, or `None` when the key
    /// is absent or empty. The returned value does NOT pass through the
    /// cleanup hook; removal hands ownership back to the caller. The
    /// entry's owned key storage is released here.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        let slot = self.slot_index(key);

        // Walk the chain tracking the predecessor so the match can be
        // unlinked whether it is the head or an interior node.
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.slots[slot];
        while let Some(k) = cur {
            let entry = self.entries.get(k)?;
            if &*entry.key == key {
                break;
            }
            prev = Some(k);
            cur = entry.next;
        }
        let k = cur?;

        let entry = self.entries.remove(k)?;
        match prev {
            None => self.slots[slot] = entry.next,
            Some(p) => {
                if let Some(prev_entry) = self.entries.get_mut(p) {
                    prev_entry.next = entry.next;
                }
            }
        }
        self.len -= 1;
        Some(entry.value)
    }

    /// Iterates over live entries in unspecified (arena) order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.entries.iter(),
        }
    }

    /// Head-to-tail walk of one slot's chain, for the diagnostic dump.
    pub(crate) fn chain(&self, slot: usize) -> ChainIter<'_, V> {
        ChainIter {
            entries: &self.entries,
            cur: self.slots.get(slot).copied().flatten(),
        }
    }
}

impl<V, H> Drop for ChainTable<V, H> {
    fn drop(&mut self) {
        // Without a hook the arena releases entries and their values
        // drop normally; with one, drain every chain and hand each
        // surviving value to the hook exactly once.
        if let Some(mut cleanup) = self.cleanup.take() {
            for slot in self.slots.iter_mut() {
                let mut cur = slot.take();
                while let Some(k) = cur {
                    match self.entries.remove(k) {
                        Some(entry) => {
                            cur = entry.next;
                            cleanup(entry.value);
                        }
                        None => break,
                    }
                }
            }
        }
    }
}

/// Iterator over `(key, value)` pairs in unspecified order.
pub struct Iter<'a, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&*e.key, &e.value))
    }
}

/// Iterator over a single chain, head (most recently inserted) first.
pub(crate) struct ChainIter<'a, V> {
    entries: &'a SlotMap<DefaultKey, Entry<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (&'a str, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.entries.get(k)?;
        self.cur = e.next;
        Some((&*e.key, &e.value))
    }
}
