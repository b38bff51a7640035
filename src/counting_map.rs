//! CountingMap: per-key positive counters atop OrderedHandleMap.
//!
//! Counters are stored as `NonZeroUsize`; a decrement that reaches zero
//! removes the entry inside the same `&mut self` call, so no reader can ever
//! observe a zero-valued entry. `get` on an absent key reports 0.

use crate::error::{CollectionError, Result};
use crate::ordered_map::{self, OrderedHandleMap};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::collections::hash_map::RandomState;

#[derive(Clone)]
pub struct CountingMap<K, S = RandomState> {
    inner: OrderedHandleMap<K, NonZeroUsize, S>,
}

impl<K> CountingMap<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            inner: OrderedHandleMap::new(),
        }
    }

    /// Bulk-load `(key, count)` pairs. Pairs with a zero count are skipped;
    /// a repeated key takes the count of its last occurrence.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, usize)>,
    {
        pairs.into_iter().collect()
    }
}

impl<K, S> Default for CountingMap<K, S>
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

impl<K, S> CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            inner: OrderedHandleMap::with_hasher(hasher),
        }
    }

    /// Number of distinct keys (not the sum of the counters).
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

    /// Counter for `key`, or 0 when the key is absent.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner
            .find(key)
            .and_then(|h| h.value(&self.inner))
            .map_or(0, |c| c.get())
    }

    pub fn increment(&mut self, key: K) -> Result<&mut Self> {
        self.increment_by(key, 1)
    }

    /// Add `steps` to the counter for `key`, creating it when absent.
    pub fn increment_by(&mut self, key: K, steps: usize) -> Result<&mut Self> {
        let steps = NonZeroUsize::new(steps).ok_or_else(|| {
            log::debug!("rejected increment: zero steps");
            CollectionError::invalid("steps", "must be a positive number")
        })?;

        let (h, created) = self.inner.find_or_insert_with(key, || steps);
        if created {
            log::trace!("counter created ({} keys)", self.inner.len());
        } else {
            let count = h
                .value_mut(&mut self.inner)
                .ok_or(CollectionError::NotFound)?;
            *count = count.checked_add(steps.get()).ok_or_else(|| {
                log::debug!("rejected increment: counter overflow");
                CollectionError::Overflow
            })?;
        }
        Ok(self)
    }

    /// Increment once per item, left to right. Stops at the first failure;
    /// items before it stay applied.
    pub fn increment_from_iter<I>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = K>,
    {
        for item in items {
            self.increment(item)?;
        }
        Ok(self)
    }

    pub fn decrement<Q>(&mut self, key: &Q) -> Result<&mut Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.decrement_by(key, 1)
    }

    /// Subtract `steps` from the counter for `key`; removes the key when the
    /// counter reaches exactly zero. Fails without mutating on a zero step,
    /// an absent key, or a step larger than the counter.
    pub fn decrement_by<Q>(&mut self, key: &Q, steps: usize) -> Result<&mut Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if steps == 0 {
            log::debug!("rejected decrement: zero steps");
            return Err(CollectionError::invalid("steps", "must be a positive number"));
        }
        let h = self.inner.find(key).ok_or_else(|| {
            log::debug!("rejected decrement: key not found");
            CollectionError::NotFound
        })?;
        let count = h
            .value_mut(&mut self.inner)
            .ok_or(CollectionError::NotFound)?;

        match count.get().checked_sub(steps) {
            None => {
                log::debug!("rejected decrement: {} exceeds {}", steps, count);
                Err(CollectionError::Underflow {
                    requested: steps,
                    available: count.get(),
                })
            }
            Some(rest) => {
                match NonZeroUsize::new(rest) {
                    Some(rest) => *count = rest,
                    None => {
                        self.inner.remove(h);
                        log::trace!("counter reached zero ({} keys)", self.inner.len());
                    }
                }
                Ok(self)
            }
        }
    }

    /// Total of all counters; 0 for an empty map. Widened to `u128` so that
    /// counters which each fit in `usize` can never overflow the total.
    pub fn sum(&self) -> u128 {
        self.values().map(|c| c as u128).sum()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.inner.iter().map(|(_h, k, _c)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.inner.iter().map(|(_h, _k, c)| c.get())
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            it: self.inner.iter(),
        }
    }
}

impl<K, S> CountingMap<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// New map holding this map's counters plus `other`'s, key by key.
    /// Neither input changes.
    pub fn merge<S2>(&self, other: &CountingMap<K, S2>) -> Result<Self>
    where
        S2: BuildHasher,
    {
        let mut merged = self.clone();
        for (key, count) in other {
            merged.increment_by(key.clone(), count)?;
        }
        Ok(merged)
    }
}

/// Entries `(&K, count)` in first-insertion order.
pub struct Iter<'a, K> {
    it: ordered_map::Iter<'a, K, NonZeroUsize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_h, k, c)| (k, c.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> core::iter::FusedIterator for Iter<'_, K> {}

impl<'a, K, S> IntoIterator for &'a CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, usize);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S> FromIterator<(K, usize)> for CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(pairs: I) -> Self {
        let mut map = Self::default();
        for (key, count) in pairs {
            let Some(count) = NonZeroUsize::new(count) else {
                continue;
            };
            let (h, created) = map.inner.find_or_insert_with(key, || count);
            if !created {
                if let Some(slot) = h.value_mut(&mut map.inner) {
                    *slot = count;
                }
            }
        }
        map
    }
}

/// Counts one occurrence per item. Counters saturate at `usize::MAX`, since
/// `Extend` cannot report failure; use `increment_from_iter` to observe it.
impl<K, S> Extend<K> for CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, items: I) {
        for item in items {
            if let Err(CollectionError::Overflow) = self.increment(item) {
                log::debug!("counter saturated at usize::MAX");
            }
        }
    }
}

impl<K, S> PartialEq for CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, c)| other.get(k) == c)
    }
}

impl<K, S> Eq for CountingMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K, S> fmt::Debug for CountingMap<K, S>
where
    K: Eq + Hash + fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
