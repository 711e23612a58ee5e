// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lazy k-subsets enumeration.
use std::ops::Deref;

/// The largest subset size supported by [Combinations].
pub const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u64; MAX_K + 1]; 53] {
    let mut t = [[0u64; MAX_K + 1]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; MAX_K + 1]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> u64 {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");
    NCKS[n][k]
}

/// A k-subset yielded by [Combinations].
#[derive(Debug, Clone, Copy)]
pub struct Subset<T> {
    items: [T; MAX_K],
    len: usize,
}

impl<T> Deref for Subset<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items[..self.len]
    }
}

/// Iterator over all the k-subsets of a slice.
///
/// Subsets are generated in colexicographic order of their positions using
/// Algorithm L from TAOCP 4a, without allocating. The iterator is `Clone` so
/// it can be restarted from any point.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    k: usize,
    c: [usize; MAX_K + 3],
    done: bool,
}

/// Returns an iterator over all k-subsets of `items`.
///
/// Yields a single empty subset for k = 0 and nothing when k > items.len().
///
/// Panics if k > 7.
pub fn combinations<T: Copy + Default>(items: &[T], k: usize) -> Combinations<'_, T> {
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

    let mut c = [0usize; MAX_K + 3];
    for (j, pos) in c.iter_mut().enumerate().skip(1).take(k) {
        *pos = j - 1;
    }

    // Sentinels.
    c[k + 1] = items.len();
    c[k + 2] = 0;

    Combinations {
        items,
        k,
        c,
        done: k > items.len(),
    }
}

impl<T: Copy + Default> Iterator for Combinations<'_, T> {
    type Item = Subset<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut subset = Subset {
            items: [T::default(); MAX_K],
            len: self.k,
        };

        for (dst, &pos) in subset.items.iter_mut().zip(&self.c[1..=self.k]) {
            *dst = self.items[pos];
        }

        let c = &mut self.c;
        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > self.k {
            self.done = true;
        } else {
            c[j] += 1;
        }

        Some(subset)
    }
}
