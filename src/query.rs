// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use crate::{ArcLabel, GraphError, NO_LABEL, SparseGraph};

impl SparseGraph {
    /// Largest vertex id plus one that fits without a realloc.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Number of active vertices.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.vertices.active_count()
    }

    /// Number of buckets per vertex.
    #[must_use]
    pub const fn hash_length(&self) -> usize {
        self.hash_length
    }

    /// Total number of arcs, counted with multiplicity.
    #[must_use]
    pub const fn num_arcs(&self) -> usize {
        self.arcs
    }

    /// Is `v` an active vertex?
    #[must_use]
    pub fn has_vertex(&self, v: usize) -> bool {
        self.vertices.is_active(v)
    }

    /// Active vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter()
    }

    /// Number of arcs leaving `u`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active.
    pub fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.check_vertex(u)?;
        Ok(self.out_degrees[u])
    }

    /// Number of arcs entering `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `v` is not active.
    pub fn in_degree(&self, v: usize) -> Result<usize, GraphError> {
        self.check_vertex(v)?;
        Ok(self.in_degrees[v])
    }

    /// Is there at least one arc from `u` to `v`, with any label?
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active.
    pub fn has_arc(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.has_arc_unchecked(u, v))
    }

    pub(crate) fn has_arc_unchecked(&self, u: usize, v: usize) -> bool {
        self.find_node(u, v).is_some()
    }

    /// Is there an arc from `u` to `v` labeled `label`? With `0` this asks
    /// about unlabeled arcs only.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active.
    pub fn has_arc_label(&self, u: usize, v: usize, label: ArcLabel) -> Result<bool, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.has_arc_label_unchecked(u, v, label))
    }

    pub(crate) fn has_arc_label_unchecked(&self, u: usize, v: usize, label: ArcLabel) -> bool {
        self.arc_label_count_unchecked(u, v, label) > 0
    }

    pub(crate) fn arc_label_count_unchecked(&self, u: usize, v: usize, label: ArcLabel) -> usize {
        self.find_node(u, v)
            .map_or(0, |id| self.label_count(&self.nodes[id], label))
    }

    /// One of the labels on arcs from `u` to `v`, or `0` if all of them are
    /// unlabeled or there are none.
    ///
    /// Which label is returned when there are several is not specified and
    /// may change as arcs come and go; use [`SparseGraph::all_arcs`] to get
    /// all of them.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active.
    pub fn arc_label(&self, u: usize, v: usize) -> Result<ArcLabel, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.arc_label_unchecked(u, v))
    }

    pub(crate) fn arc_label_unchecked(&self, u: usize, v: usize) -> ArcLabel {
        self.find_node(u, v)
            .and_then(|id| self.cells_of(&self.nodes[id]).next())
            .map_or(NO_LABEL, |(label, _)| label)
    }

    /// How many arcs go from `u` to `v`, whatever their labels.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active.
    pub fn arc_multiplicity(&self, u: usize, v: usize) -> Result<usize, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.arc_multiplicity_unchecked(u, v))
    }

    pub(crate) fn arc_multiplicity_unchecked(&self, u: usize, v: usize) -> usize {
        self.find_node(u, v)
            .map_or(0, |id| self.weight(&self.nodes[id]))
    }

    /// Labels of all arcs from `u` to `v`, one entry per arc: first a `0`
    /// for every unlabeled arc, then each label repeated by its count.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active.
    pub fn all_arcs(&self, u: usize, v: usize) -> Result<Vec<ArcLabel>, GraphError> {
        self.check_pair(u, v)?;
        Ok(self.all_arcs_unchecked(u, v))
    }

    pub(crate) fn all_arcs_unchecked(&self, u: usize, v: usize) -> Vec<ArcLabel> {
        let mut labels = Vec::with_capacity(self.arc_multiplicity_unchecked(u, v));
        if let Some(id) = self.find_node(u, v) {
            let node = &self.nodes[id];
            labels.resize(node.unlabeled, NO_LABEL);
            for (label, count) in self.cells_of(node) {
                labels.extend(std::iter::repeat_n(label, count));
            }
        }
        labels
    }

    /// Write the labels [`SparseGraph::all_arcs`] would return into `buf`
    /// and return how many were written.
    ///
    /// `min(out_degree(u), in_degree(v))` entries are always enough.
    ///
    /// ```
    /// use sparsegraph::{GraphError, SparseGraph};
    ///
    /// let mut g = SparseGraph::new(2, 16, 0).unwrap();
    /// g.add_arc_label(0, 1, 8).unwrap();
    /// g.add_arc_label(0, 1, 8).unwrap();
    /// let mut buf = [0; 2];
    /// assert_eq!(Ok(2), g.all_arcs_into(0, 1, &mut buf));
    /// assert_eq!([8, 8], buf);
    /// assert_eq!(
    ///     Err(GraphError::BufferTooSmall { capacity: 1, required: 2 }),
    ///     g.all_arcs_into(0, 1, &mut buf[..1])
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active and
    /// [`GraphError::BufferTooSmall`] if `buf` is too short; nothing is
    /// written then.
    pub fn all_arcs_into(
        &self,
        u: usize,
        v: usize,
        buf: &mut [ArcLabel],
    ) -> Result<usize, GraphError> {
        self.check_pair(u, v)?;
        let required = self.arc_multiplicity_unchecked(u, v);
        if required > buf.len() {
            return Err(GraphError::BufferTooSmall {
                capacity: buf.len(),
                required,
            });
        }
        for (slot, label) in buf.iter_mut().zip(self.all_arcs_unchecked(u, v)) {
            *slot = label;
        }
        Ok(required)
    }
}
