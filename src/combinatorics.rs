//! Lazy combinatorial enumeration over borrowed slices.
//!
//! Both iterators keep an index vector ("odometer") instead of recursing:
//! one `usize` per tuple position, advanced in place on every `next()`.
//! Tuples are emitted as `Vec<&T>` views into the caller's data; the
//! iterator keeps nothing it has already emitted.
//!
//! Calling the constructor again yields a fresh, identical sequence.

use crate::error::{CollectionError, Result};
use core::iter::FusedIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Iterator over the `count`-combinations of a slice, in ascending index
/// order. Built by [`combinations`].
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    with_repetition: bool,
    state: State,
    /// Tuples still to come; `None` when the total does not fit a `usize`.
    remaining: Option<usize>,
}

/// Enumerate every selection of `count` elements from `items` whose source
/// indices are strictly increasing, or non-decreasing when
/// `with_repetition` is set. Selections come out in lexicographic order of
/// their indices, so duplicate values in `items` still give one tuple per
/// index selection.
///
/// Fails before producing anything when `count > items.len()`.
pub fn combinations<T>(
    items: &[T],
    count: usize,
    with_repetition: bool,
) -> Result<Combinations<'_, T>> {
    if count > items.len() {
        log::debug!(
            "rejected combinations: count {} exceeds {} items",
            count,
            items.len()
        );
        return Err(CollectionError::invalid(
            "count",
            "must not exceed the number of items",
        ));
    }
    let indices = if with_repetition {
        vec![0; count]
    } else {
        (0..count).collect()
    };
    let remaining = combination_count(items.len(), count, with_repetition)
        .and_then(|total| usize::try_from(total).ok());
    Ok(Combinations {
        items,
        indices,
        with_repetition,
        state: State::Fresh,
        remaining,
    })
}

impl<'a, T> Combinations<'a, T> {
    /// Move to the next canonical index vector; false once exhausted.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();
        let ceiling = |i: usize| {
            if self.with_repetition {
                n - 1
            } else {
                n - k + i
            }
        };

        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] < ceiling(i)) else {
            return false;
        };
        self.indices[pos] += 1;
        for j in pos + 1..k {
            self.indices[j] = if self.with_repetition {
                self.indices[pos]
            } else {
                self.indices[j - 1] + 1
            };
        }
        true
    }

    fn emit(&mut self) -> Vec<&'a T> {
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        let items = self.items;
        self.indices.iter().map(|&i| &items[i]).collect()
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                self.state = State::Running;
                Some(self.emit())
            }
            State::Running => {
                if self.advance() {
                    Some(self.emit())
                } else {
                    self.state = State::Done;
                    None
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.state, self.remaining)
    }
}

impl<T> FusedIterator for Combinations<'_, T> {}

/// Iterator over the Cartesian product of several slices, last slice
/// varying fastest. Built by [`cartesian_product`].
#[derive(Clone, Debug)]
pub struct CartesianProduct<'a, T> {
    sequences: Vec<&'a [T]>,
    indices: Vec<usize>,
    state: State,
    remaining: Option<usize>,
}

/// Every tuple taking one element from each input slice, in nested-loop
/// order. No slices gives exactly one empty tuple; any empty slice gives
/// none.
pub fn cartesian_product<'a, T, I>(sequences: I) -> CartesianProduct<'a, T>
where
    I: IntoIterator<Item = &'a [T]>,
{
    let sequences: Vec<&'a [T]> = sequences.into_iter().collect();
    let state = if sequences.iter().any(|s| s.is_empty()) {
        State::Done
    } else {
        State::Fresh
    };
    let remaining = sequences
        .iter()
        .try_fold(1usize, |acc, s| acc.checked_mul(s.len()));
    CartesianProduct {
        indices: vec![0; sequences.len()],
        sequences,
        state,
        remaining,
    }
}

impl<'a, T> CartesianProduct<'a, T> {
    fn advance(&mut self) -> bool {
        for (i, seq) in self.sequences.iter().enumerate().rev() {
            self.indices[i] += 1;
            if self.indices[i] < seq.len() {
                return true;
            }
            self.indices[i] = 0;
        }
        false
    }

    fn emit(&mut self) -> Vec<&'a T> {
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        self.sequences
            .iter()
            .zip(&self.indices)
            .map(|(&seq, &i)| &seq[i])
            .collect()
    }
}

impl<'a, T> Iterator for CartesianProduct<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                self.state = State::Running;
                Some(self.emit())
            }
            State::Running => {
                if self.advance() {
                    Some(self.emit())
                } else {
                    self.state = State::Done;
                    None
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.state, self.remaining)
    }
}

impl<T> FusedIterator for CartesianProduct<'_, T> {}

/// Exact while the remaining total fits a `usize`, unbounded otherwise.
fn remaining_hint(state: State, remaining: Option<usize>) -> (usize, Option<usize>) {
    match (state, remaining) {
        (State::Done, _) => (0, Some(0)),
        (_, Some(r)) => (r, Some(r)),
        (_, None) => (0, None),
    }
}

/// Number of tuples [`combinations`] yields for `n` items: C(n, count)
/// without repetition, C(n + count - 1, count) with. `None` on overflow.
pub fn combination_count(n: usize, count: usize, with_repetition: bool) -> Option<u128> {
    if with_repetition {
        if count == 0 {
            return Some(1);
        }
        if n == 0 {
            return Some(0);
        }
        binomial(n as u128 + count as u128 - 1, count as u128)
    } else {
        binomial(n as u128, count as u128)
    }
}

fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by i + 1; cancel the common factor
        // first so the product only overflows when the result would.
        let d = i + 1;
        let g = gcd(acc, d);
        acc = (acc / g).checked_mul((n - i) / (d / g))?;
    }
    Some(acc)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned<'a, T: Clone + 'a>(it: impl Iterator<Item = Vec<&'a T>>) -> Vec<Vec<T>> {
        it.map(|t| t.into_iter().cloned().collect()).collect()
    }

    #[test]
    fn choose_two_of_three() {
        let got = owned(combinations(&[1, 2, 3], 2, false).unwrap());
        assert_eq!(got, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn choose_two_of_two_with_repetition() {
        let got = owned(combinations(&[1, 2], 2, true).unwrap());
        assert_eq!(got, vec![vec![1, 1], vec![1, 2], vec![2, 2]]);
    }

    #[test]
    fn zero_count_yields_one_empty_tuple() {
        for rep in [false, true] {
            let got = owned(combinations(&["a", "b"], 0, rep).unwrap());
            assert_eq!(got, vec![Vec::<&str>::new()]);
        }
        let empty: [u8; 0] = [];
        assert_eq!(combinations(&empty, 0, false).unwrap().count(), 1);
    }

    #[test]
    fn full_count_yields_input_once() {
        let got = owned(combinations(&[3, 1, 2], 3, false).unwrap());
        assert_eq!(got, vec![vec![3, 1, 2]]);
    }

    #[test]
    fn count_above_len_is_rejected_up_front() {
        assert_eq!(
            combinations(&[1, 2, 3], 4, false).err(),
            Some(CollectionError::invalid(
                "count",
                "must not exceed the number of items"
            ))
        );
        assert!(combinations(&[1, 2, 3], 4, true).is_err());
    }

    #[test]
    fn duplicate_values_are_distinct_positions() {
        let got = owned(combinations(&['x', 'x', 'y'], 2, false).unwrap());
        assert_eq!(got, vec![vec!['x', 'x'], vec!['x', 'y'], vec!['x', 'y']]);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut it = combinations(&[1], 1, false).unwrap();
        assert_eq!(it.next(), Some(vec![&1]));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
    }

    #[test]
    fn product_last_sequence_varies_fastest() {
        let nums = ["1", "2"];
        let letters = ["a", "b"];
        let got = owned(cartesian_product([&nums[..], &letters[..]]));
        assert_eq!(
            got,
            vec![
                vec!["1", "a"],
                vec!["1", "b"],
                vec!["2", "a"],
                vec!["2", "b"]
            ]
        );
    }

    #[test]
    fn product_of_nothing_is_one_empty_tuple() {
        let none: [&[i32]; 0] = [];
        let got = owned(cartesian_product(none));
        assert_eq!(got, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn product_with_empty_sequence_is_empty() {
        let got = owned(cartesian_product([&[1, 2][..], &[][..]]));
        assert!(got.is_empty());
        let got = owned(cartesian_product([&[][..], &[1, 2][..]]));
        assert!(got.is_empty());
    }

    #[test]
    fn counts_match_known_values() {
        assert_eq!(combination_count(3, 2, false), Some(3));
        assert_eq!(combination_count(2, 2, true), Some(3));
        assert_eq!(combination_count(5, 0, false), Some(1));
        assert_eq!(combination_count(0, 0, true), Some(1));
        assert_eq!(combination_count(0, 1, true), Some(0));
        assert_eq!(combination_count(3, 4, false), Some(0));
        assert_eq!(combination_count(52, 5, false), Some(2_598_960));
        assert_eq!(combination_count(10, 3, true), Some(220));
    }

    #[test]
    fn counts_near_u128_limit_do_not_overflow_early() {
        // C(130, 65) is about 9.5e37, below u128::MAX.
        let mid = combination_count(130, 65, false).unwrap();
        let pascal = combination_count(129, 64, false).unwrap()
            + combination_count(129, 65, false).unwrap();
        assert_eq!(mid, pascal);
        assert_eq!(combination_count(66, 33, false), Some(7_219_428_434_016_265_740));
        // C(200, 100) is about 9.1e58 and genuinely does not fit.
        assert_eq!(combination_count(200, 100, false), None);
    }

    #[test]
    fn size_hint_tracks_remaining_tuples() {
        let items = [1, 2, 3, 4, 5];
        let mut it = combinations(&items, 2, false).unwrap();
        assert_eq!(it.size_hint(), (10, Some(10)));
        it.next();
        it.next();
        assert_eq!(it.size_hint(), (8, Some(8)));
        assert_eq!(it.by_ref().count(), 8);
        assert_eq!(it.size_hint(), (0, Some(0)));

        let rep = combinations(&items, 3, true).unwrap();
        assert_eq!(rep.size_hint(), (35, Some(35)));
    }

    #[test]
    fn product_size_hint_is_length_product() {
        let (a, b, c) = ([1, 2], [3, 4, 5], [6]);
        let mut it = cartesian_product([&a[..], &b[..], &c[..]]);
        assert_eq!(it.size_hint(), (6, Some(6)));
        it.next();
        assert_eq!(it.size_hint(), (5, Some(5)));
        assert_eq!(it.collect::<Vec<_>>().len(), 5);

        let none: [&[i32]; 0] = [];
        assert_eq!(cartesian_product(none).size_hint(), (1, Some(1)));
        assert_eq!(
            cartesian_product([&a[..], &[][..]]).size_hint(),
            (0, Some(0))
        );
    }
}
