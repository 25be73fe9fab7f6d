// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Ordering of destinations inside a bucket tree.
//!
//! Destinations are very often inserted in increasing order. Comparing them
//! by value would turn every tree into a list, so trees are ordered by the
//! destination multiplied by a large odd constant instead. Multiplication by
//! an odd number is a bijection on `u64`, so distinct destinations never
//! collide.

use std::cmp::Ordering;

const REORDERING_CONSTANT: u64 = 0x9E37_79B9_7F4A_7C15;

/// The scrambled sort key of destination `v`.
#[inline]
pub(crate) const fn scramble(v: usize) -> u64 {
    (v as u64).wrapping_mul(REORDERING_CONSTANT)
}

/// Compare two destinations in tree order.
#[inline]
pub(crate) fn compare(a: usize, b: usize) -> Ordering {
    scramble(a).cmp(&scramble(b))
}

/// Number of buckets per vertex: the smallest power of two not below the
/// expected degree, or `None` if that power doesn't fit in `usize`.
pub(crate) const fn hash_length(expected_degree: usize) -> Option<usize> {
    if expected_degree <= 1 {
        Some(1)
    } else {
        expected_degree.checked_next_power_of_two()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(16, 16)]
    #[case(17, 32)]
    fn rounds_expected_degree_up(#[case] degree: usize, #[case] length: usize) {
        assert_eq!(Some(length), hash_length(degree));
    }

    #[test]
    fn refuses_unrepresentable_lengths() {
        assert_eq!(None, hash_length(usize::MAX));
        assert_eq!(None, hash_length(usize::MAX / 2 + 2));
    }

    #[test]
    fn keeps_distinct_keys_distinct() {
        let mut keys: Vec<u64> = (0..10_000).map(scramble).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(10_000, keys.len());
    }

    #[test]
    fn breaks_sorted_runs() {
        let ascending = (0..64_usize)
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|pair| compare(pair[0], pair[1]) == Ordering::Less)
            .count();
        assert!(ascending < 63);
        assert_eq!(Ordering::Equal, compare(42, 42));
    }
}
