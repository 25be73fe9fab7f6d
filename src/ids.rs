// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::hash::Hash;

/// Bijection between external vertex values and dense engine ids.
///
/// # Invariants
///
/// * `ids[v] == id` exactly when `names[id] == Some(v)`.
///
/// # Examples
///
/// ```
/// use sparsegraph::VertexIds;
///
/// let mut ids = VertexIds::default();
/// ids.insert("a", 3);
/// assert_eq!(Some(3), ids.get(&"a"));
/// assert_eq!(Some(&"a"), ids.name(3));
/// assert_eq!(Some(3), ids.remove(&"a"));
/// assert!(ids.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct VertexIds<V> {
    ids: HashMap<V, usize>,
    names: Vec<Option<V>>,
}

impl<V> Default for VertexIds<V> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> VertexIds<V> {
    /// The id of `v`, if it has one.
    #[must_use]
    pub fn get(&self, v: &V) -> Option<usize> {
        self.ids.get(v).copied()
    }

    /// The vertex with id `id`, if there is one.
    #[must_use]
    pub fn name(&self, id: usize) -> Option<&V> {
        self.names.get(id).and_then(Option::as_ref)
    }

    /// Bind `v` to `id`.
    ///
    /// # Panics
    ///
    /// If either `v` or `id` is already bound.
    pub fn insert(&mut self, v: V, id: usize) {
        if self.names.len() <= id {
            self.names.resize(id + 1, None);
        }
        assert!(self.names[id].is_none(), "id {id} is already taken");
        let previous = self.ids.insert(v.clone(), id);
        assert!(previous.is_none(), "vertex already has id {previous:?}");
        self.names[id] = Some(v);
    }

    /// Unbind `v`, returning its id.
    pub fn remove(&mut self, v: &V) -> Option<usize> {
        let id = self.ids.remove(v)?;
        self.names[id] = None;
        Some(id)
    }

    /// Unbind the vertex with id `id`, returning it.
    pub fn remove_id(&mut self, id: usize) -> Option<V> {
        let v = self.names.get_mut(id)?.take()?;
        self.ids.remove(&v);
        Some(v)
    }

    /// Number of bound vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Are there no bound vertices?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bound vertices with their ids, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(id, name)| name.as_ref().map(|v| (id, v)))
    }
}
