// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

#[cfg(debug_assertions)]
use log::trace;

use crate::{ArcLabel, GraphError, NO_LABEL, SparseGraph};

impl SparseGraph {
    /// Fail with [`GraphError::InvalidVertex`] unless `v` is active.
    pub(crate) fn check_vertex(&self, v: usize) -> Result<(), GraphError> {
        if self.vertices.is_active(v) {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex(v))
        }
    }

    pub(crate) fn check_pair(&self, u: usize, v: usize) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)
    }

    /// Make sure the next `count` arc insertions won't need to allocate.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfMemory`] if the room can't be made.
    pub fn reserve_arcs(&mut self, count: usize) -> Result<(), GraphError> {
        self.nodes.reserve(count)?;
        self.cells.reserve(count)
    }

    /// Add one unlabeled arc from `u` to `v`.
    ///
    /// ```
    /// use sparsegraph::SparseGraph;
    ///
    /// let mut g = SparseGraph::new(2, 16, 0).unwrap();
    /// g.add_arc(0, 1).unwrap();
    /// g.add_arc(0, 1).unwrap();
    /// assert_eq!(2, g.arc_multiplicity(0, 1).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active and
    /// [`GraphError::OutOfMemory`] if a tree node can't be allocated.
    pub fn add_arc(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_arc_label(u, v, NO_LABEL)
    }

    /// Add one arc from `u` to `v` labeled `label`; `0` adds an unlabeled arc.
    ///
    /// Degrees and the arc count grow by one whatever the label is.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if either end is not active and
    /// [`GraphError::OutOfMemory`] if memory runs out. Nothing changes then.
    pub fn add_arc_label(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<(), GraphError> {
        self.check_pair(u, v)?;
        self.add_arc_unchecked(u, v, label)
    }

    /// Same as [`SparseGraph::add_arc_label`], trusting that both ends are
    /// active.
    pub(crate) fn add_arc_unchecked(
        &mut self,
        u: usize,
        v: usize,
        label: ArcLabel,
    ) -> Result<(), GraphError> {
        debug_assert!(self.vertices.is_active(u) && self.vertices.is_active(v));
        self.reserve_arcs(1)?;
        let id = self.find_or_attach(u, v)?;
        self.push_label(id, label)?;
        self.out_degrees[u] += 1;
        self.in_degrees[v] += 1;
        self.arcs += 1;
        #[cfg(debug_assertions)]
        trace!("#add_arc: ν{u} → ν{v} labeled {label}, {} arcs in total", self.arcs);
        Ok(())
    }

    /// Remove one arc from `u` to `v` labeled `label`; `0` removes an
    /// unlabeled one.
    ///
    /// ```
    /// use sparsegraph::{GraphError, SparseGraph};
    ///
    /// let mut g = SparseGraph::new(2, 16, 0).unwrap();
    /// g.add_arc_label(0, 1, 3).unwrap();
    /// g.del_arc_label(0, 1, 3).unwrap();
    /// assert!(!g.has_arc(0, 1).unwrap());
    /// assert_eq!(
    ///     Err(GraphError::NoSuchArc { from: 0, to: 1 }),
    ///     g.del_arc_label(0, 1, 3)
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends,
    /// [`GraphError::NoSuchArc`] if nothing joins `u` to `v` and
    /// [`GraphError::NoSuchLabel`] if arcs exist but none has `label`.
    pub fn del_arc_label(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<(), GraphError> {
        self.check_pair(u, v)?;
        self.del_arc_label_unchecked(u, v, label)
    }

    /// Same as [`SparseGraph::del_arc_label`], trusting that both ends are
    /// active.
    pub(crate) fn del_arc_label_unchecked(
        &mut self,
        u: usize,
        v: usize,
        label: ArcLabel,
    ) -> Result<(), GraphError> {
        debug_assert!(self.vertices.is_active(u) && self.vertices.is_active(v));
        let (link, found) = self.search(u, v);
        let id = found.ok_or(GraphError::NoSuchArc { from: u, to: v })?;
        if !self.pop_label(id, label) {
            return Err(GraphError::NoSuchLabel {
                from: u,
                to: v,
                label,
            });
        }
        self.out_degrees[u] -= 1;
        self.in_degrees[v] -= 1;
        self.arcs -= 1;
        let node = &self.nodes[id];
        if node.unlabeled == 0 && node.labels.is_none() {
            self.excise(link, id);
        }
        #[cfg(debug_assertions)]
        trace!("#del_arc: ν{u} → ν{v} labeled {label}, {} arcs left", self.arcs);
        Ok(())
    }

    /// Remove every arc from `u` to `v`, whatever its label, returning how
    /// many there were.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends and
    /// [`GraphError::NoSuchArc`] if there was nothing to remove; the graph
    /// is untouched then, so calling it twice is harmless.
    pub fn del_all_arcs(&mut self, u: usize, v: usize) -> Result<usize, GraphError> {
        self.check_pair(u, v)?;
        match self.del_all_arcs_unchecked(u, v) {
            0 => Err(GraphError::NoSuchArc { from: u, to: v }),
            removed => Ok(removed),
        }
    }

    /// Same as [`SparseGraph::del_all_arcs`], trusting that both ends are
    /// active. Returns zero if there were no arcs.
    pub(crate) fn del_all_arcs_unchecked(&mut self, u: usize, v: usize) -> usize {
        debug_assert!(self.vertices.is_active(u) && self.vertices.is_active(v));
        let (link, found) = self.search(u, v);
        let Some(id) = found else {
            return 0;
        };
        let removed = self.weight(&self.nodes[id]);
        self.out_degrees[u] -= removed;
        self.in_degrees[v] -= removed;
        self.arcs -= removed;
        self.excise(link, id);
        #[cfg(debug_assertions)]
        trace!("#del_all_arcs: {removed} arcs ν{u} → ν{v} removed");
        removed
    }
}
