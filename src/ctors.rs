// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use log::debug;

use crate::order::hash_length;
use crate::pool::Pool;
use crate::{ArcLabel, GraphError, SparseGraph, VertexSet};

impl SparseGraph {
    /// Make a graph with vertices `0..vertices` active and room for `extra`
    /// more, without arcs.
    ///
    /// `expected_degree` is a hint: every vertex gets the smallest power of
    /// two not below it as the number of buckets for its outgoing arcs.
    ///
    /// ```
    /// use sparsegraph::SparseGraph;
    ///
    /// let g = SparseGraph::new(5, 3, 10).unwrap();
    /// assert_eq!(15, g.capacity());
    /// assert_eq!(5, g.active_count());
    /// assert_eq!(4, g.hash_length());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ZeroCapacity`] if `vertices + extra` is zero and
    /// [`GraphError::OutOfMemory`] if the arrays can't be allocated or their
    /// sizes don't fit in `usize`.
    pub fn new(vertices: usize, expected_degree: usize, extra: usize) -> Result<Self, GraphError> {
        let capacity = vertices
            .checked_add(extra)
            .ok_or(GraphError::OutOfMemory("vertex bitset"))?;
        if capacity == 0 {
            return Err(GraphError::ZeroCapacity);
        }
        let length = hash_length(expected_degree)
            .ok_or(GraphError::OutOfMemory("bucket array"))?;
        let buckets = capacity
            .checked_mul(length)
            .ok_or(GraphError::OutOfMemory("bucket array"))?;
        let mut set = VertexSet::with_capacity(capacity)?;
        for v in 0..vertices {
            set.activate(v);
        }
        let g = Self {
            vertices: set,
            hash_length: length,
            hash_mask: length - 1,
            buckets: zeroed(buckets, "bucket array")?,
            nodes: Pool::new("tree nodes"),
            cells: Pool::new("label cells"),
            out_degrees: zeroed(capacity, "out-degree array")?,
            in_degrees: zeroed(capacity, "in-degree array")?,
            arcs: 0,
        };
        Ok(g)
    }

    /// Make a graph like [`SparseGraph::new`] does and put every
    /// `(from, to, label)` arc into it.
    ///
    /// ```
    /// use sparsegraph::SparseGraph;
    ///
    /// let g = SparseGraph::from_arcs(3, 16, 0, [(0, 1, 0), (1, 2, 4), (1, 2, 4)]).unwrap();
    /// assert_eq!(3, g.num_arcs());
    /// assert_eq!(vec![4, 4], g.all_arcs(1, 2).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails the way [`SparseGraph::new`] and [`SparseGraph::add_arc_label`]
    /// do, for instance when an arc mentions an inactive vertex.
    pub fn from_arcs<I>(
        vertices: usize,
        expected_degree: usize,
        extra: usize,
        arcs: I,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, ArcLabel)>,
    {
        let mut g = Self::new(vertices, expected_degree, extra)?;
        for (from, to, label) in arcs {
            g.add_arc_label(from, to, label)?;
        }
        debug!(
            "Built a graph of {} vertices and {} arcs",
            g.active_count(),
            g.num_arcs()
        );
        Ok(g)
    }
}

/// A vector of `len` default values, or an error naming `what` if memory
/// runs out.
pub(crate) fn zeroed<T: Clone + Default>(
    len: usize,
    what: &'static str,
) -> Result<Vec<T>, GraphError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(len)
        .map_err(|_| GraphError::OutOfMemory(what))?;
    items.resize(len, T::default());
    Ok(items)
}
