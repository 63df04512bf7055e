//! Hash containers used across the crate, backed by *hashbrown* and *foldhash*.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::FixedState;

/// A fixed hash seed, lookups never depend on process state.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = foldhash::fast::FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// TypeIdMap

/// `TypeId` is already a hash, pass it through.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

#[derive(Default)]
pub(crate) struct NoOpHasher(u64);

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        // `TypeId` normally goes through `write_u64`.
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher(0)
    }
}

pub(crate) type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, NoOpHashState>;

#[inline]
pub(crate) const fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedHashState)
}

#[inline]
pub(crate) const fn new_set<T>() -> HashSet<T> {
    hashbrown::HashSet::with_hasher(FixedHashState)
}

#[inline]
pub(crate) const fn new_type_id_map<V>() -> TypeIdMap<V> {
    hashbrown::HashMap::with_hasher(NoOpHashState)
}
