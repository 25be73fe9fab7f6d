// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Mapping of external edge labels to engine labels.
//!
//! External labels only need equality, not hashing or ordering, so lookups
//! scan the known labels linearly: `O(distinct labels)` per lookup. Graphs
//! usually carry only a handful of distinct labels.

use crate::{ArcLabel, GraphError};

/// Maps external edge labels of type `L` to positive [`ArcLabel`]s.
///
/// `0` is never handed out: it stands for "no label" in the engine.
///
/// # Invariants
///
/// * Codes are positive and strictly increasing along `entries`.
/// * No two entries hold equal labels.
///
/// # Examples
///
/// ```
/// use sparsegraph::EdgeLabels;
///
/// let mut labels = EdgeLabels::default();
/// let red = labels.intern("red").unwrap();
/// let blue = labels.intern("blue").unwrap();
/// assert_eq!((1, 2), (red, blue));
/// assert_eq!(Some(red), labels.find(&"red"));
/// assert_eq!(Some(&"blue"), labels.resolve(blue));
/// assert_eq!(None, labels.resolve(0));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeLabels<L> {
    entries: Vec<(ArcLabel, L)>,
}

impl<L> Default for EdgeLabels<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: PartialEq> EdgeLabels<L> {
    /// The code of `label`, if it has one.
    #[must_use]
    pub fn find(&self, label: &L) -> Option<ArcLabel> {
        self.entries
            .iter()
            .find(|(_, known)| known == label)
            .map(|(code, _)| *code)
    }

    /// The code of `label`, giving it `max(known) + 1` if it has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::LabelsExhausted`] if the largest code is
    /// already [`ArcLabel::MAX`].
    pub fn intern(&mut self, label: L) -> Result<ArcLabel, GraphError> {
        if let Some(code) = self.find(&label) {
            return Ok(code);
        }
        let code = self
            .entries
            .last()
            .map_or(Some(1), |(max, _)| max.checked_add(1))
            .ok_or(GraphError::LabelsExhausted)?;
        self.entries.push((code, label));
        Ok(code)
    }

    /// The label behind `code`.
    #[must_use]
    pub fn resolve(&self, code: ArcLabel) -> Option<&L> {
        self.entries
            .binary_search_by_key(&code, |(known, _)| *known)
            .ok()
            .map(|pos| &self.entries[pos].1)
    }

    /// Forget every label interned after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// A map whose only label already has the largest code.
    #[cfg(test)]
    pub(crate) fn exhausted(label: L) -> Self {
        Self {
            entries: vec![(ArcLabel::MAX, label)],
        }
    }

    /// Number of distinct labels seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Were no labels seen yet?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
