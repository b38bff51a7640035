//! ListMap: key -> growable list of values, in first-insertion key order.

use crate::ordered_map::{self, OrderedHandleMap};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

#[derive(Clone)]
pub struct ListMap<K, V, S = RandomState> {
    inner: OrderedHandleMap<K, Vec<V>, S>,
}

impl<K, V> ListMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            inner: OrderedHandleMap::new(),
        }
    }
}

impl<K, V, S> Default for ListMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self {
            inner: OrderedHandleMap::default(),
        }
    }
}

impl<K, V, S> ListMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            inner: OrderedHandleMap::with_hasher(hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.contains_key(q)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner
            .find(key)
            .and_then(|h| h.value(&self.inner))
            .map(Vec::as_slice)
    }

    /// Append `value` to the list for `key`, starting a new list if needed.
    pub fn add(&mut self, key: K, value: V) -> &mut Self {
        let (h, created) = self.inner.find_or_insert_with(key, Vec::new);
        if created {
            log::trace!("list created ({} keys)", self.inner.len());
        }
        if let Some(list) = h.value_mut(&mut self.inner) {
            list.push(value);
        }
        self
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.inner.iter().map(|(_h, k, _l)| k)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.inner.iter(),
        }
    }
}

/// Entries `(&K, &[V])` in first-insertion order.
pub struct Iter<'a, K, V> {
    it: ordered_map::Iter<'a, K, Vec<V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a [V]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_h, k, l)| (k, l.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a ListMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a [V]);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A repeated key replaces the list loaded for it earlier.
impl<K, V, S> FromIterator<(K, Vec<V>)> for ListMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(pairs: I) -> Self {
        let mut map = Self::default();
        for (key, list) in pairs {
            let (h, _created) = map.inner.find_or_insert_with(key, Vec::new);
            if let Some(slot) = h.value_mut(&mut map.inner) {
                *slot = list;
            }
        }
        map
    }
}

impl<K, V, S> fmt::Debug for ListMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
