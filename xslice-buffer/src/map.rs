use fnv::FnvHashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// KeyMap maps unique keys to values, without defined iteration order.
///
/// Lookup of an absent key is not an error: [`KeyMap::find`] returns the
/// default value together with a presence flag, so a stored default
/// value and a missing key stay distinguishable.
#[derive(Debug, Clone)]
pub struct KeyMap<K, V> {
    inner: FnvHashMap<K, V>,
}

impl<K, V> Default for KeyMap<K, V> {
    #[inline]
    fn default() -> Self {
        KeyMap {
            inner: FnvHashMap::default(),
        }
    }
}

impl<K: Hash + Eq, V> KeyMap<K, V> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        KeyMap {
            inner: FnvHashMap::with_capacity_and_hasher(cap, Default::default()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert or replace value of the key, returns the replaced one.
    #[inline]
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        self.inner.insert(key, val)
    }

    /// Returns `(value, true)` if the key exists, `(V::default(), false)`
    /// otherwise.
    #[inline]
    pub fn find<Q>(&self, key: &Q) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Default + Clone,
    {
        match self.inner.get(key) {
            Some(v) => (v.clone(), true),
            None => (V::default(), false),
        }
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    /// Remove the key. No-op if absent.
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key);
    }

    /// Iterate entries in unspecified order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_map_find() {
        let mut m = KeyMap::new();
        assert!(m.is_empty());
        m.insert("a".to_string(), 0i32);
        m.insert("b".to_string(), 2);
        assert_eq!((0, true), m.find("a"));
        assert_eq!((2, true), m.find("b"));
        assert_eq!((0, false), m.find("c"));
        assert_eq!(Some(2), m.insert("b".to_string(), 3));
        assert_eq!(2, m.len());
    }

    #[test]
    fn test_key_map_delete() {
        let mut m = KeyMap::with_capacity(4);
        m.insert(1u64, "x".to_string());
        m.delete(&2);
        assert_eq!(1, m.len());
        m.delete(&1);
        assert!(!m.contains(&1));
        assert_eq!((String::new(), false), m.find(&1));
        m.delete(&1);
        assert!(m.is_empty());
    }

    #[test]
    fn test_key_map_iter() {
        let mut m = KeyMap::new();
        for i in 0..10u32 {
            m.insert(i, i * 10);
        }
        let mut entries: Vec<(u32, u32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable();
        assert_eq!((0..10).map(|i| (i, i * 10)).collect::<Vec<_>>(), entries);
    }
}
