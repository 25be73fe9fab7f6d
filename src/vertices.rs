// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use crate::GraphError;

const WORD: usize = u64::BITS as usize;

/// Bitset of active vertex ids in `0..capacity()`.
///
/// # Invariants
///
/// * Bits at or above `capacity` are always clear.
/// * `active_count()` equals the number of set bits.
///
/// # Examples
///
/// ```
/// use sparsegraph::VertexSet;
///
/// let mut set = VertexSet::with_capacity(10).unwrap();
/// assert!(set.activate(3));
/// assert!(!set.activate(3));
/// assert!(set.is_active(3));
/// assert_eq!(Some(0), set.first_inactive());
/// assert_eq!(vec![3], set.iter().collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexSet {
    words: Vec<u64>,
    capacity: usize,
    active: usize,
}

impl VertexSet {
    /// Make an empty set able to hold ids below `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfMemory`] if the bits can't be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, GraphError> {
        let mut set = Self::default();
        set.resize(capacity)?;
        Ok(set)
    }

    /// Largest id plus one this set can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many ids are active.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active
    }

    /// Is `v` below capacity and active?
    #[must_use]
    pub fn is_active(&self, v: usize) -> bool {
        v < self.capacity && self.words[v / WORD] & (1_u64 << (v % WORD)) != 0
    }

    /// Mark `v` active, returning `true` if it was inactive.
    ///
    /// # Panics
    ///
    /// If `v` is not below capacity.
    pub fn activate(&mut self, v: usize) -> bool {
        assert!(v < self.capacity, "ν{v} is beyond capacity {}", self.capacity);
        let mask = 1_u64 << (v % WORD);
        let word = &mut self.words[v / WORD];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.active += 1;
        true
    }

    /// Mark `v` inactive, returning `true` if it was active.
    pub fn deactivate(&mut self, v: usize) -> bool {
        if !self.is_active(v) {
            return false;
        }
        self.words[v / WORD] &= !(1_u64 << (v % WORD));
        self.active -= 1;
        true
    }

    /// The smallest inactive id, if any is left below capacity.
    #[must_use]
    pub fn first_inactive(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, word)| **word != u64::MAX)
            .map(|(pos, word)| pos * WORD + word.trailing_ones() as usize)
            .filter(|v| *v < self.capacity)
    }

    /// The smallest active id at or above `start`.
    #[must_use]
    pub fn first_active_from(&self, start: usize) -> Option<usize> {
        if start >= self.capacity {
            return None;
        }
        let mut pos = start / WORD;
        let mut word = self.words[pos] & (u64::MAX << (start % WORD));
        loop {
            if word != 0 {
                return Some(pos * WORD + word.trailing_zeros() as usize);
            }
            pos += 1;
            word = *self.words.get(pos)?;
        }
    }

    /// Active ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut next = self.first_active_from(0);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.first_active_from(current + 1);
            Some(current)
        })
    }

    /// Change capacity to `capacity`, clearing every bit at or above it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfMemory`] if growing fails; the set is not
    /// changed then.
    pub fn resize(&mut self, capacity: usize) -> Result<(), GraphError> {
        let words = capacity.div_ceil(WORD);
        if words > self.words.len() {
            self.words
                .try_reserve_exact(words - self.words.len())
                .map_err(|_| GraphError::OutOfMemory("vertex bitset"))?;
        }
        if capacity < self.capacity {
            let dropped: usize = (capacity..self.capacity)
                .filter(|v| self.is_active(*v))
                .count();
            self.active -= dropped;
        }
        self.words.resize(words, 0);
        if capacity % WORD != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1_u64 << (capacity % WORD)) - 1;
        }
        self.capacity = capacity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn activates_and_deactivates() {
        let mut set = VertexSet::with_capacity(100).unwrap();
        assert!(set.activate(70));
        assert!(set.is_active(70));
        assert_eq!(1, set.active_count());
        assert!(set.deactivate(70));
        assert!(!set.deactivate(70));
        assert!(!set.is_active(70));
        assert_eq!(0, set.active_count());
    }

    #[test]
    fn ignores_ids_beyond_capacity() {
        let set = VertexSet::with_capacity(3).unwrap();
        assert!(!set.is_active(3));
        assert!(!set.is_active(1_000));
    }

    #[test]
    #[should_panic(expected = "beyond capacity")]
    fn refuses_to_activate_beyond_capacity() {
        let mut set = VertexSet::with_capacity(3).unwrap();
        set.activate(3);
    }

    #[rstest]
    #[case(1)]
    #[case(63)]
    #[case(64)]
    #[case(65)]
    #[case(200)]
    fn finds_first_inactive_when_almost_full(#[case] capacity: usize) {
        let mut set = VertexSet::with_capacity(capacity).unwrap();
        for v in 0..capacity - 1 {
            set.activate(v);
        }
        assert_eq!(Some(capacity - 1), set.first_inactive());
        set.activate(capacity - 1);
        assert_eq!(None, set.first_inactive());
    }

    #[test]
    fn iterates_in_order() {
        let mut set = VertexSet::with_capacity(300).unwrap();
        for v in [299, 5, 64, 0, 128] {
            set.activate(v);
        }
        assert_eq!(vec![0, 5, 64, 128, 299], set.iter().collect::<Vec<_>>());
        assert_eq!(Some(64), set.first_active_from(6));
        assert_eq!(None, set.first_active_from(300));
    }

    #[test]
    fn shrinking_drops_bits() {
        let mut set = VertexSet::with_capacity(130).unwrap();
        set.activate(2);
        set.activate(100);
        set.activate(129);
        set.resize(70).unwrap();
        assert_eq!(1, set.active_count());
        set.resize(130).unwrap();
        assert!(!set.is_active(100));
        assert!(!set.is_active(129));
        assert!(set.is_active(2));
    }
}
