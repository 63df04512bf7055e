use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::hash::{HashMap, new_map};

use super::{Content, ContentRef, MapContent};

// -----------------------------------------------------------------------------
// LinkedMap

/// A string-keyed map that iterates in insertion order.
///
/// Re-inserting an existing key replaces the value in place and keeps the
/// original position.
///
/// # Examples
///
/// ```
/// use vc_filter::LinkedMap;
///
/// let mut map = LinkedMap::new();
/// map.insert("c", 9);
/// map.insert("a", 1);
/// map.insert("c", 10);
///
/// let keys: Vec<_> = map.keys().collect();
/// assert_eq!(keys, ["c", "a"]);
/// assert_eq!(map.get("c"), Some(&10));
/// ```
#[derive(Clone)]
pub struct LinkedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for LinkedMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LinkedMap<V> {
    /// Creates an empty `LinkedMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: new_map(),
        }
    }

    /// Creates an empty `LinkedMap` with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = new_map();
        index.reserve(capacity);
        Self {
            entries: Vec::with_capacity(capacity),
            index,
        }
    }

    /// Inserts a key/value pair, returning the previous value of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&at) => Some(core::mem::replace(&mut self.entries[at].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[inline]
    pub fn with(mut self, key: impl Into<String>, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes `key`, shifting later entries to keep the order.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let at = self.index.remove(key)?;
        let (_, value) = self.entries.remove(at);
        for (_, position) in self.index.iter_mut() {
            if *position > at {
                *position -= 1;
            }
        }
        Some(value)
    }

    /// Returns the value of `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&at| &self.entries[at].1)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for LinkedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for LinkedMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for LinkedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Content + 'static> Content for LinkedMap<V> {
    #[inline]
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

impl<V: Content + 'static> MapContent for LinkedMap<V> {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (Cow::Borrowed(key.as_str()), value as &dyn Content)),
        )
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::LinkedMap;

    #[test]
    fn remove_keeps_order() {
        let mut map: LinkedMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(map.get("c"), Some(&3));

        map.insert("a", 4);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "c", "a"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut map = LinkedMap::new().with("x", 1).with("y", 2);
        assert_eq!(map.insert("x", 7), Some(1));
        assert_eq!(map.iter().collect::<Vec<_>>(), [("x", &7), ("y", &2)]);
    }
}
