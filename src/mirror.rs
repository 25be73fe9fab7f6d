// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! A forward graph paired with its reversed copy.
//!
//! [`SparseGraph`] only indexes arcs by their source, which makes
//! in-neighbor queries a scan over all vertices. [`MirroredGraph`] keeps a
//! second engine holding every arc with its ends swapped, so in-neighbors
//! of `v` are simply the out-neighbors of `v` in the reverse engine. All
//! mutations go through this type and touch both engines, or neither.

use log::debug;
#[cfg(debug_assertions)]
use log::trace;

use crate::{ArcLabel, GraphError, SparseGraph};

/// Two [`SparseGraph`]s kept in lock-step: `forward` holds every arc
/// `u → v`, `reverse` holds it as `v → u`.
///
/// # Invariants
///
/// * Both engines have the same capacity and the same active vertices.
/// * `forward` has `k` arcs `u → v` labeled `l` exactly when `reverse` has
///   `k` arcs `v → u` labeled `l`.
///
/// # Examples
///
/// ```
/// use sparsegraph::MirroredGraph;
///
/// let mut g = MirroredGraph::new(4, 16, 0).unwrap();
/// g.add_arc_label(0, 3, 2).unwrap();
/// g.add_arc(1, 3).unwrap();
/// let mut parents = g.in_neighbors(3).unwrap();
/// parents.sort_unstable();
/// assert_eq!(vec![0, 1], parents);
/// assert!(g.is_consistent());
/// ```
#[derive(Debug, Clone)]
pub struct MirroredGraph {
    forward: SparseGraph,
    reverse: SparseGraph,
}

impl MirroredGraph {
    /// Make a pair of empty engines, see [`SparseGraph::new`].
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::new`] does.
    pub fn new(vertices: usize, expected_degree: usize, extra: usize) -> Result<Self, GraphError> {
        Ok(Self {
            forward: SparseGraph::new(vertices, expected_degree, extra)?,
            reverse: SparseGraph::new(vertices, expected_degree, extra)?,
        })
    }

    /// The engine holding arcs as they were added.
    #[must_use]
    pub const fn forward(&self) -> &SparseGraph {
        &self.forward
    }

    /// The engine holding every arc reversed.
    #[must_use]
    pub const fn reverse(&self) -> &SparseGraph {
        &self.reverse
    }

    /// Vertex capacity, equal in both engines.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.forward.capacity()
    }

    /// Is `v` an active vertex?
    #[must_use]
    pub fn has_vertex(&self, v: usize) -> bool {
        self.forward.has_vertex(v)
    }

    /// Active vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.forward.vertices()
    }

    /// Total number of arcs.
    #[must_use]
    pub const fn num_arcs(&self) -> usize {
        self.forward.num_arcs()
    }

    /// Change the capacity of both engines, see [`SparseGraph::realloc`].
    ///
    /// If the reverse engine can't grow after the forward one did, the
    /// forward one is shrunk back before the error is returned.
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::realloc`] does.
    pub fn realloc(&mut self, total: usize) -> Result<(), GraphError> {
        let before = self.capacity();
        self.forward.realloc(total)?;
        if let Err(err) = self.reverse.realloc(total) {
            if total > before {
                debug!("Reverse engine failed to grow to {total}, shrinking forward to {before}");
                self.forward.realloc(before)?;
            }
            return Err(err);
        }
        Ok(())
    }

    /// Activate `v` in both engines, see [`SparseGraph::add_vertex`].
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::add_vertex`] does.
    pub fn add_vertex(&mut self, v: usize) -> Result<usize, GraphError> {
        let capacity = self.capacity();
        if v >= capacity {
            let doubled = capacity.saturating_mul(2);
            if v >= doubled {
                return Err(GraphError::BeyondCapacity {
                    vertex: v,
                    capacity,
                });
            }
            self.realloc(doubled)?;
        }
        self.forward.add_vertex(v)?;
        self.reverse.add_vertex(v)
    }

    /// The smallest inactive id, see [`SparseGraph::next_id`].
    #[must_use]
    pub fn next_id(&self) -> usize {
        self.forward.next_id()
    }

    /// Remove `v` with all its arcs from both engines.
    ///
    /// The reverse engine tells which vertices point at `v`, so no scan over
    /// all vertices is needed.
    pub fn del_vertex(&mut self, v: usize) -> bool {
        if !self.has_vertex(v) {
            return false;
        }
        for to in self.forward.out_neighbors_unchecked(v) {
            self.forward.del_all_arcs_unchecked(v, to);
            self.reverse.del_all_arcs_unchecked(to, v);
        }
        for from in self.reverse.out_neighbors_unchecked(v) {
            self.forward.del_all_arcs_unchecked(from, v);
            self.reverse.del_all_arcs_unchecked(v, from);
        }
        self.forward.deactivate_unchecked(v);
        self.reverse.deactivate_unchecked(v);
        true
    }

    /// Make sure the next `count` arc insertions need no allocation in
    /// either engine.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfMemory`] if the room can't be made.
    pub fn reserve_arcs(&mut self, count: usize) -> Result<(), GraphError> {
        self.forward.reserve_arcs(count)?;
        self.reverse.reserve_arcs(count)
    }

    /// Add an unlabeled arc `u → v`.
    ///
    /// # Errors
    ///
    /// Fails the way [`MirroredGraph::add_arc_label`] does.
    pub fn add_arc(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_arc_label(u, v, 0)
    }

    /// Add an arc `u → v` labeled `label` to both engines.
    ///
    /// Room for the arc is reserved in both engines before either is
    /// touched, so running out of memory leaves both unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends and
    /// [`GraphError::OutOfMemory`] if the room can't be reserved.
    pub fn add_arc_label(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<(), GraphError> {
        self.forward.check_pair(u, v)?;
        self.reserve_arcs(1)?;
        self.forward.add_arc_unchecked(u, v, label)?;
        if let Err(err) = self.reverse.add_arc_unchecked(v, u, label) {
            let undone = self.forward.del_arc_label_unchecked(u, v, label);
            debug_assert!(undone.is_ok());
            return Err(err);
        }
        #[cfg(debug_assertions)]
        trace!("#mirror: ν{u} ⇄ ν{v} labeled {label} added");
        Ok(())
    }

    /// Remove one arc `u → v` labeled `label` from both engines.
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::del_arc_label`] does; both engines stay
    /// unchanged then.
    pub fn del_arc_label(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<(), GraphError> {
        self.forward.check_pair(u, v)?;
        self.forward.del_arc_label_unchecked(u, v, label)?;
        let mirrored = self.reverse.del_arc_label_unchecked(v, u, label);
        debug_assert!(mirrored.is_ok(), "reverse engine lost ν{v} → ν{u} labeled {label}");
        Ok(())
    }

    /// Remove every arc `u → v` from both engines and return how many there
    /// were.
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::del_all_arcs`] does.
    pub fn del_all_arcs(&mut self, u: usize, v: usize) -> Result<usize, GraphError> {
        let removed = self.forward.del_all_arcs(u, v)?;
        let mirrored = self.reverse.del_all_arcs_unchecked(v, u);
        debug_assert_eq!(removed, mirrored);
        Ok(removed)
    }

    /// Is there an arc `u → v`?
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends.
    pub fn has_arc(&self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.forward.has_arc(u, v)
    }

    /// Is there an arc `u → v` labeled `label`?
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends.
    pub fn has_arc_label(&self, u: usize, v: usize, label: ArcLabel) -> Result<bool, GraphError> {
        self.forward.has_arc_label(u, v, label)
    }

    /// See [`SparseGraph::arc_label`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends.
    pub fn arc_label(&self, u: usize, v: usize) -> Result<ArcLabel, GraphError> {
        self.forward.arc_label(u, v)
    }

    /// See [`SparseGraph::all_arcs`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for inactive ends.
    pub fn all_arcs(&self, u: usize, v: usize) -> Result<Vec<ArcLabel>, GraphError> {
        self.forward.all_arcs(u, v)
    }

    /// Distinct destinations of arcs leaving `u`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active.
    pub fn out_neighbors(&self, u: usize) -> Result<Vec<usize>, GraphError> {
        self.forward.out_neighbors(u)
    }

    /// Distinct sources of arcs entering `v`, read from the reverse engine.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `v` is not active.
    pub fn in_neighbors(&self, v: usize) -> Result<Vec<usize>, GraphError> {
        self.reverse.out_neighbors(v)
    }

    /// Number of arcs leaving `u`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active.
    pub fn out_degree(&self, u: usize) -> Result<usize, GraphError> {
        self.forward.out_degree(u)
    }

    /// Number of arcs entering `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `v` is not active.
    pub fn in_degree(&self, v: usize) -> Result<usize, GraphError> {
        self.forward.in_degree(v)
    }

    /// Do both engines hold the same arcs, mirrored?
    ///
    /// This walks every arc twice; it is meant for tests and assertions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut ours = self.forward.arcs();
        let mut theirs: Vec<_> = self
            .reverse
            .arcs()
            .into_iter()
            .map(|(v, u, label)| (u, v, label))
            .collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
            && self.forward.capacity() == self.reverse.capacity()
            && self.forward.vertices().eq(self.reverse.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_every_mutation() {
        let mut g = MirroredGraph::new(5, 4, 0).unwrap();
        g.add_arc_label(0, 1, 3).unwrap();
        g.add_arc(0, 1).unwrap();
        g.add_arc(2, 1).unwrap();
        g.add_arc(4, 4).unwrap();
        assert!(g.is_consistent());
        g.del_arc_label(0, 1, 3).unwrap();
        assert!(g.is_consistent());
        assert_eq!(Ok(1), g.del_all_arcs(0, 1));
        assert!(g.is_consistent());
        assert_eq!(2, g.num_arcs());
        assert_eq!(2, g.reverse().num_arcs());
    }

    #[test]
    fn agrees_with_scanning() {
        let mut g = MirroredGraph::new(8, 2, 0).unwrap();
        for (u, v) in [(0, 5), (3, 5), (5, 5), (7, 5), (5, 1), (3, 1)] {
            g.add_arc(u, v).unwrap();
        }
        for v in 0..8 {
            let mut fast = g.in_neighbors(v).unwrap();
            fast.sort_unstable();
            assert_eq!(g.forward().in_neighbors(v).unwrap(), fast);
        }
    }

    #[test]
    fn failed_deletion_touches_nothing() {
        let mut g = MirroredGraph::new(3, 4, 0).unwrap();
        g.add_arc_label(0, 1, 2).unwrap();
        assert_eq!(
            Err(GraphError::NoSuchLabel {
                from: 0,
                to: 1,
                label: 5,
            }),
            g.del_arc_label(0, 1, 5)
        );
        assert_eq!(Err(GraphError::NoSuchArc { from: 1, to: 0 }), g.del_all_arcs(1, 0));
        assert_eq!(Err(GraphError::InvalidVertex(3)), g.add_arc(0, 3));
        assert!(g.is_consistent());
        assert_eq!(1, g.num_arcs());
    }

    #[test]
    fn deletes_vertices_on_both_sides() {
        let mut g = MirroredGraph::new(4, 2, 0).unwrap();
        for (u, v) in [(0, 1), (1, 2), (2, 1), (1, 1), (3, 0)] {
            g.add_arc(u, v).unwrap();
        }
        assert!(g.del_vertex(1));
        assert!(g.is_consistent());
        assert_eq!(1, g.num_arcs());
        assert!(!g.reverse().has_vertex(1));
    }

    #[test]
    fn grows_both_engines() {
        let mut g = MirroredGraph::new(0, 4, 4).unwrap();
        g.add_vertex(6).unwrap();
        assert_eq!(8, g.capacity());
        assert_eq!(8, g.reverse().capacity());
        assert_eq!(
            Err(GraphError::ShrinkActive {
                capacity: 4,
                vertex: 6,
            }),
            g.realloc(4)
        );
        assert_eq!(0, g.next_id());
        assert!(g.is_consistent());
    }
}
