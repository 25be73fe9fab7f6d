// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ArcLabel, GraphError, SparseGraph};

/// Everything needed to rebuild a [`SparseGraph`]: its capacity, active
/// vertices and arcs.
///
/// The snapshot is plain data, so any `serde` format can carry it.
///
/// # Examples
///
/// ```
/// use sparsegraph::SparseGraph;
///
/// let mut g = SparseGraph::new(3, 16, 1).unwrap();
/// g.add_arc_label(0, 2, 5).unwrap();
/// let snapshot = g.snapshot();
/// assert_eq!(vec![0, 1, 2], snapshot.vertices);
/// assert_eq!(vec![(0, 2, 5)], snapshot.arcs);
/// let copy = SparseGraph::from_snapshot(&snapshot, 16).unwrap();
/// assert_eq!(vec![5], copy.all_arcs(0, 2).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Vertex capacity of the graph.
    pub capacity: usize,
    /// Active vertex ids in ascending order.
    pub vertices: Vec<usize>,
    /// Every arc as `(source, destination, label)`, one entry per arc.
    pub arcs: Vec<(usize, usize, ArcLabel)>,
}

impl SparseGraph {
    /// Take a [`Snapshot`] of the graph.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            capacity: self.capacity(),
            vertices: self.vertices().collect(),
            arcs: self.arcs(),
        }
    }

    /// Rebuild a graph from a [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ZeroCapacity`] for a zero capacity,
    /// [`GraphError::BeyondCapacity`] if a vertex doesn't fit and
    /// [`GraphError::InvalidVertex`] if an arc touches a vertex that is not
    /// listed.
    pub fn from_snapshot(snapshot: &Snapshot, expected_degree: usize) -> Result<Self, GraphError> {
        let mut g = Self::new(0, expected_degree, snapshot.capacity)?;
        for v in &snapshot.vertices {
            if *v >= snapshot.capacity {
                return Err(GraphError::BeyondCapacity {
                    vertex: *v,
                    capacity: snapshot.capacity,
                });
            }
            g.add_vertex(*v)?;
        }
        for (from, to, label) in &snapshot.arcs {
            g.add_arc_label(*from, *to, *label)?;
        }
        debug!(
            "Restored {} vertices and {} arcs from a snapshot",
            g.active_count(),
            g.num_arcs()
        );
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseGraph {
        let mut g = SparseGraph::new(5, 4, 3).unwrap();
        g.del_vertex(1);
        for (from, to, label) in [(0, 2, 0), (0, 2, 0), (2, 0, 7), (4, 4, 1), (3, 0, 2)] {
            g.add_arc_label(from, to, label).unwrap();
        }
        g
    }

    #[test]
    fn restores_the_same_graph() {
        let g = sample();
        let copy = SparseGraph::from_snapshot(&g.snapshot(), 4).unwrap();
        assert_eq!(g.snapshot(), copy.snapshot());
        assert_eq!(8, copy.capacity());
        assert!(!copy.has_vertex(1));
        assert_eq!(2, copy.arc_multiplicity(0, 2).unwrap());
    }

    #[test]
    fn survives_bincode() {
        let snapshot = sample().snapshot();
        let bytes = bincode::serde::encode_to_vec(&snapshot, bincode::config::legacy()).unwrap();
        let back: Snapshot = bincode::serde::decode_from_slice(&bytes, bincode::config::legacy())
            .unwrap()
            .0;
        assert_eq!(snapshot, back);
    }

    #[test]
    fn rejects_broken_snapshots() {
        let outside = Snapshot {
            capacity: 2,
            vertices: vec![0, 5],
            arcs: vec![],
        };
        assert_eq!(
            Some(GraphError::BeyondCapacity {
                vertex: 5,
                capacity: 2
            }),
            SparseGraph::from_snapshot(&outside, 1).err()
        );
        let dangling = Snapshot {
            capacity: 2,
            vertices: vec![0],
            arcs: vec![(0, 1, 0)],
        };
        assert_eq!(
            Some(GraphError::InvalidVertex(1)),
            SparseGraph::from_snapshot(&dangling, 1).err()
        );
    }
}
