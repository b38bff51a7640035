//! Slice algebra as an extension trait.
//!
//! `first`/`last` are not repeated here; the inherent slice methods already
//! return `Option<&T>`.

use crate::error::{CollectionError, Result};
use core::hash::Hash;
use core::iter::Sum;
use core::slice::Chunks;
use hashbrown::HashSet;

pub trait SliceExt<T> {
    /// Number of elements satisfying `pred`.
    fn count_where(&self, pred: impl FnMut(&T) -> bool) -> usize;

    /// Elements with duplicates dropped, in order of first occurrence.
    fn distinct(&self) -> Vec<T>
    where
        T: Eq + Hash + Clone;

    /// Consecutive runs of `size` elements; the last run may be shorter.
    fn divide(&self, size: usize) -> Result<Chunks<'_, T>>;

    /// Elements not equal to any element of `excluded`.
    fn except(&self, excluded: &[T]) -> Vec<T>
    where
        T: PartialEq + Clone;

    /// Largest `selector` result; the earliest wins a tie.
    fn max_of<N: PartialOrd>(&self, selector: impl FnMut(&T) -> N) -> Result<N>;

    /// Smallest `selector` result; the earliest wins a tie.
    fn min_of<N: PartialOrd>(&self, selector: impl FnMut(&T) -> N) -> Result<N>;

    fn sum_of<N: Sum>(&self, selector: impl FnMut(&T) -> N) -> N;

    /// Pairwise `selector` over both slices, truncated to the shorter one.
    fn zip_with<U, V>(&self, other: &[U], selector: impl FnMut(&T, &U) -> V) -> Vec<V>;
}

impl<T> SliceExt<T> for [T] {
    fn count_where(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.iter().filter(|item| pred(*item)).count()
    }

    fn distinct(&self) -> Vec<T>
    where
        T: Eq + Hash + Clone,
    {
        let mut seen: HashSet<&T> = HashSet::with_capacity(self.len());
        self.iter()
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect()
    }

    fn divide(&self, size: usize) -> Result<Chunks<'_, T>> {
        if size == 0 {
            return Err(CollectionError::invalid("size", "must be a positive number"));
        }
        Ok(self.chunks(size))
    }

    fn except(&self, excluded: &[T]) -> Vec<T>
    where
        T: PartialEq + Clone,
    {
        self.iter()
            .filter(|item| !excluded.contains(*item))
            .cloned()
            .collect()
    }

    fn max_of<N: PartialOrd>(&self, selector: impl FnMut(&T) -> N) -> Result<N> {
        reduce_by(self, selector, |candidate, best| candidate > best)
            .ok_or(CollectionError::Empty { operation: "max_of" })
    }

    fn min_of<N: PartialOrd>(&self, selector: impl FnMut(&T) -> N) -> Result<N> {
        reduce_by(self, selector, |candidate, best| candidate < best)
            .ok_or(CollectionError::Empty { operation: "min_of" })
    }

    fn sum_of<N: Sum>(&self, selector: impl FnMut(&T) -> N) -> N {
        self.iter().map(selector).sum()
    }

    fn zip_with<U, V>(&self, other: &[U], mut selector: impl FnMut(&T, &U) -> V) -> Vec<V> {
        self.iter().zip(other).map(|(a, b)| selector(a, b)).collect()
    }
}

fn reduce_by<T, N>(
    items: &[T],
    selector: impl FnMut(&T) -> N,
    mut better: impl FnMut(&N, &N) -> bool,
) -> Option<N> {
    items.iter().map(selector).reduce(|best, candidate| {
        if better(&candidate, &best) {
            candidate
        } else {
            best
        }
    })
}
