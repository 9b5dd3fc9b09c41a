// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Combination counting and enumeration.
//!
//! The equity calculator and the lookup table builder both walk combination
//! sequences, boards out of a deck for the former and rank bit patterns for
//! the latter. This module keeps the shared machinery: binomial coefficients,
//! a lazy lexicographic combinations iterator, and the same number of bits
//! successor used to enumerate flush patterns.

/// Returns the binomial coefficient n choose k.
///
/// Returns 0 when `k > n`. Uses the multiplicative formula with the
/// symmetric smaller k so intermediates stay exact in 64 bits for all deck
/// sized inputs.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    if k == 0 || k == n {
        return 1;
    }

    let k = k.min(n - k);
    let mut count = 1u64;
    for i in 0..k {
        count = count * (n - i) / (i + 1);
    }

    count
}

/// Returns an iterator over all k cards combinations of `items` in
/// lexicographic index order.
pub fn combinations<T: Copy>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        indices: (0..k).collect(),
        started: false,
        done: k > items.len(),
    }
}

/// Lazy iterator over the k elements combinations of a slice.
///
/// Yields combinations in lexicographic index order, the first one is the
/// first k items and the last one the last k items. Choosing zero elements
/// yields a single empty combination.
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.started && !next_index_combination(self.items.len(), &mut self.indices) {
            self.done = true;
            return None;
        }

        self.started = true;
        Some(self.indices.iter().map(|&i| self.items[i]).collect())
    }
}

/// Advances `indices` to the next combination of `0..n` in lexicographic
/// order, returns false after the last combination.
pub(crate) fn next_index_combination(n: usize, indices: &mut [usize]) -> bool {
    let k = indices.len();

    // Rightmost index below its final value, none when the combination is
    // the last one.
    let Some(pos) = (0..k).rev().find(|&i| indices[i] != n - k + i) else {
        return false;
    };

    indices[pos] += 1;
    for i in (pos + 1)..k {
        indices[i] = indices[i - 1] + 1;
    }

    true
}

/// Returns the `index`-th combination of `0..n` taken k at a time in
/// lexicographic order.
///
/// Lets a parallel worker start a combination walk mid sequence without
/// stepping through the combinations before its window.
pub(crate) fn nth_combination(n: usize, k: usize, mut index: u64) -> [usize; 7] {
    debug_assert!(k <= 7);
    debug_assert!(index < binomial(n as u64, k as u64));

    let mut indices = [0; 7];
    let mut value = 0;
    for slot in 0..k {
        // Count the combinations that keep this slot at the candidate value,
        // the slot settles once the index falls inside them.
        loop {
            let with_value = binomial((n - 1 - value) as u64, (k - 1 - slot) as u64);
            if index < with_value {
                break;
            }
            index -= with_value;
            value += 1;
        }

        indices[slot] = value;
        value += 1;
    }

    indices
}

/// Returns the next integer with the same number of set bits.
///
/// Given 0b0011 returns 0b0101, then 0b0110 and so on in increasing numeric
/// order. The argument must not be zero.
pub fn next_bit_pattern(bits: u32) -> u32 {
    debug_assert!(bits != 0);

    let t = (bits | (bits - 1)) + 1;
    t | ((((t & t.wrapping_neg()) / (bits & bits.wrapping_neg())) >> 1) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn test_binomial() {
        let cases = [
            (52, 2, 1326),
            (52, 5, 2598960),
            (52, 7, 133784560),
            (51, 2, 1275),
            (50, 5, 2118760),
            (47, 5, 1533939),
            (23, 5, 33649),
            (13, 5, 1287),
            (5, 5, 1),
            (5, 0, 1),
            (0, 0, 1),
            (1, 2, 0),
            (4, 7, 0),
        ];

        for (n, k, count) in cases {
            assert_eq!(binomial(n, k), count, "binomial({n}, {k})");
        }
    }

    #[test]
    fn test_combinations_order() {
        let items = [10, 20, 30, 40, 50];
        let combos = combinations(&items, 3).collect::<Vec<_>>();

        assert_eq!(combos.len(), 10);
        assert_eq!(combos[0], vec![10, 20, 30]);
        assert_eq!(combos[1], vec![10, 20, 40]);
        assert_eq!(combos[2], vec![10, 20, 50]);
        assert_eq!(combos[3], vec![10, 30, 40]);
        assert_eq!(combos[9], vec![30, 40, 50]);

        // Each combination keeps the slice order of its items.
        for combo in &combos {
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_combinations_edges() {
        let items = [1, 2, 3];

        let empty = combinations(&items, 0).collect::<Vec<_>>();
        assert_eq!(empty, vec![Vec::<i32>::new()]);

        let all = combinations(&items, 3).collect::<Vec<_>>();
        assert_eq!(all, vec![vec![1, 2, 3]]);

        assert_eq!(combinations(&items, 4).count(), 0);
    }

    #[test]
    fn test_combinations_count_and_uniqueness() {
        let items = (0u8..13).collect::<Vec<_>>();
        let combos = combinations(&items, 5).collect::<HashSet<_>>();
        assert_eq!(combos.len(), 1287);
    }

    #[test]
    fn test_nth_combination() {
        let items = (0usize..10).collect::<Vec<_>>();
        for (index, combo) in combinations(&items, 3).enumerate() {
            let indices = nth_combination(10, 3, index as u64);
            assert_eq!(&indices[..3], combo.as_slice(), "index {index}");
        }
    }

    #[test]
    fn test_next_index_combination() {
        let mut indices = [0, 1, 2];
        let mut count = 1;
        while next_index_combination(6, &mut indices) {
            count += 1;
        }

        assert_eq!(count, binomial(6, 3));
        assert_eq!(indices, [3, 4, 5]);
        assert!(!next_index_combination(6, &mut indices));
    }

    #[test]
    fn test_next_bit_pattern() {
        assert_eq!(next_bit_pattern(0b011), 0b101);
        assert_eq!(next_bit_pattern(0b101), 0b110);
        assert_eq!(next_bit_pattern(0b110), 0b1001);
        assert_eq!(next_bit_pattern(0b1100), 0b10001);

        // All 13 bits patterns with 5 set bits from the lowest to the
        // highest, the sequence the flush table builder walks.
        let mut bits = 0b11111u32;
        let mut seen = vec![bits];
        for _ in 0..1286 {
            bits = next_bit_pattern(bits);
            seen.push(bits);
        }

        assert_eq!(seen.len(), 1287);
        assert_eq!(bits, 0b1111100000000);
        assert!(seen.iter().all(|b| b.count_ones() == 5));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }
}
