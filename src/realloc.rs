// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use log::debug;
#[cfg(debug_assertions)]
use log::trace;

use crate::{GraphError, SparseGraph};

impl SparseGraph {
    /// Change the vertex capacity to `total`.
    ///
    /// Growing adds room for inactive vertices with no arcs. Shrinking is
    /// refused if any vertex at or above `total` is active; the graph stays
    /// exactly as it was then.
    ///
    /// ```
    /// use sparsegraph::{GraphError, SparseGraph};
    ///
    /// let mut g = SparseGraph::new(3, 16, 0).unwrap();
    /// g.realloc(10).unwrap();
    /// assert_eq!(10, g.capacity());
    /// assert_eq!(
    ///     Err(GraphError::ShrinkActive { capacity: 2, vertex: 2 }),
    ///     g.realloc(2)
    /// );
    /// g.realloc(3).unwrap();
    /// assert_eq!(3, g.capacity());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ZeroCapacity`] for `total == 0`,
    /// [`GraphError::ShrinkActive`] if an active vertex would be lost and
    /// [`GraphError::OutOfMemory`] if growing fails or the arrays for `total`
    /// vertices would not fit in the address space.
    pub fn realloc(&mut self, total: usize) -> Result<(), GraphError> {
        if total == 0 {
            return Err(GraphError::ZeroCapacity);
        }
        let current = self.capacity();
        if total < current
            && let Some(vertex) = self.vertices.first_active_from(total)
        {
            return Err(GraphError::ShrinkActive {
                capacity: total,
                vertex,
            });
        }
        let buckets = total
            .checked_mul(self.hash_length)
            .ok_or(GraphError::OutOfMemory("bucket array"))?;
        if total > current {
            let more = total - current;
            self.buckets
                .try_reserve_exact(buckets - self.buckets.len())
                .map_err(|_| GraphError::OutOfMemory("bucket array"))?;
            self.out_degrees
                .try_reserve_exact(more)
                .map_err(|_| GraphError::OutOfMemory("out-degree array"))?;
            self.in_degrees
                .try_reserve_exact(more)
                .map_err(|_| GraphError::OutOfMemory("in-degree array"))?;
        }
        self.vertices.resize(total)?;
        debug_assert!(
            self.buckets[total.min(current) * self.hash_length..]
                .iter()
                .all(Option::is_none)
        );
        self.buckets.resize(buckets, None);
        self.out_degrees.resize(total, 0);
        self.in_degrees.resize(total, 0);
        debug!("Vertex capacity changed from {current} to {total}");
        Ok(())
    }

    /// Make `v` an active vertex, doubling the capacity first if `v` is past
    /// the end but below twice the capacity. Returns `v`.
    ///
    /// ```
    /// use sparsegraph::{GraphError, SparseGraph};
    ///
    /// let mut g = SparseGraph::new(0, 16, 8).unwrap();
    /// g.add_vertex(10).unwrap();
    /// assert_eq!(16, g.capacity());
    /// assert_eq!(
    ///     Err(GraphError::BeyondCapacity { vertex: 40, capacity: 16 }),
    ///     g.add_vertex(40)
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::BeyondCapacity`] if `v` is at or past twice the
    /// capacity, and [`GraphError::OutOfMemory`] if doubling fails.
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
        self.vertices.activate(v);
        #[cfg(debug_assertions)]
        trace!("#add_vertex: ν{v} added");
        Ok(v)
    }

    /// The smallest id not taken by an active vertex; it equals
    /// `capacity()` when every id is taken.
    #[must_use]
    pub fn next_id(&self) -> usize {
        self.vertices.first_inactive().unwrap_or_else(|| self.capacity())
    }

    /// Activate the vertex [`SparseGraph::next_id`] names and return it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfMemory`] if the capacity has to double and
    /// can't.
    pub fn add_next_vertex(&mut self) -> Result<usize, GraphError> {
        self.add_vertex(self.next_id())
    }

    /// Remove every arc leaving or entering `v` and make it inactive.
    ///
    /// Returns `false`, changing nothing, if `v` was not active.
    pub fn del_vertex(&mut self, v: usize) -> bool {
        if !self.vertices.is_active(v) {
            return false;
        }
        for to in self.out_neighbors_unchecked(v) {
            self.del_all_arcs_unchecked(v, to);
        }
        for from in self.in_neighbors_unchecked(v) {
            self.del_all_arcs_unchecked(from, v);
        }
        self.deactivate_unchecked(v);
        true
    }

    /// Make `v` inactive, trusting that no arcs touch it anymore.
    pub(crate) fn deactivate_unchecked(&mut self, v: usize) {
        debug_assert_eq!(0, self.out_degrees[v]);
        debug_assert_eq!(0, self.in_degrees[v]);
        self.vertices.deactivate(v);
        #[cfg(debug_assertions)]
        trace!("#del_vertex: ν{v} removed");
    }
}
