// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use crate::{ArcLabel, GraphError, NO_LABEL, SparseGraph};

impl SparseGraph {
    /// Distinct destinations of arcs leaving `u`, each listed once no
    /// matter how many arcs lead there. The order is unspecified.
    ///
    /// ```
    /// use sparsegraph::SparseGraph;
    ///
    /// let mut g = SparseGraph::new(4, 16, 0).unwrap();
    /// g.add_arc(0, 3).unwrap();
    /// g.add_arc(0, 3).unwrap();
    /// g.add_arc(0, 1).unwrap();
    /// let mut kids = g.out_neighbors(0).unwrap();
    /// kids.sort_unstable();
    /// assert_eq!(vec![1, 3], kids);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active.
    pub fn out_neighbors(&self, u: usize) -> Result<Vec<usize>, GraphError> {
        self.check_vertex(u)?;
        Ok(self.out_neighbors_unchecked(u))
    }

    pub(crate) fn out_neighbors_unchecked(&self, u: usize) -> Vec<usize> {
        let mut found = Vec::new();
        self.walk_vertex(u, |node| found.push(node.destination));
        found
    }

    /// Write the out-neighbors of `u` into `buf` and return their number.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active and
    /// [`GraphError::BufferTooSmall`] with the exact number needed if `buf`
    /// is too short; `buf` is left untouched then.
    pub fn out_neighbors_into(&self, u: usize, buf: &mut [usize]) -> Result<usize, GraphError> {
        self.check_vertex(u)?;
        let mut required = 0;
        self.walk_vertex(u, |_| required += 1);
        if required > buf.len() {
            return Err(GraphError::BufferTooSmall {
                capacity: buf.len(),
                required,
            });
        }
        let mut pos = 0;
        self.walk_vertex(u, |node| {
            buf[pos] = node.destination;
            pos += 1;
        });
        Ok(required)
    }

    /// Distinct sources of arcs entering `v`, in ascending order.
    ///
    /// Arcs are indexed by their source only, so this scans every active
    /// vertex and costs `O(active vertices × tree depth)`. A
    /// [`MirroredGraph`](crate::MirroredGraph) answers the same question
    /// from its reversed copy instead.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `v` is not active.
    pub fn in_neighbors(&self, v: usize) -> Result<Vec<usize>, GraphError> {
        self.check_vertex(v)?;
        Ok(self.in_neighbors_unchecked(v))
    }

    pub(crate) fn in_neighbors_unchecked(&self, v: usize) -> Vec<usize> {
        if self.in_degrees[v] == 0 {
            return Vec::new();
        }
        self.vertices
            .iter()
            .filter(|u| self.has_arc_unchecked(*u, v))
            .collect()
    }

    /// Every arc leaving `u` as `(destination, label)`, one entry per arc.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `u` is not active.
    pub fn out_arcs(&self, u: usize) -> Result<Vec<(usize, ArcLabel)>, GraphError> {
        self.check_vertex(u)?;
        Ok(self.out_arcs_unchecked(u))
    }

    pub(crate) fn out_arcs_unchecked(&self, u: usize) -> Vec<(usize, ArcLabel)> {
        let mut arcs = Vec::with_capacity(self.out_degrees[u]);
        self.walk_vertex(u, |node| {
            let to = node.destination;
            arcs.extend(std::iter::repeat_n((to, NO_LABEL), node.unlabeled));
            for (label, count) in self.cells_of(node) {
                arcs.extend(std::iter::repeat_n((to, label), count));
            }
        });
        arcs
    }

    /// Every arc of the graph as `(source, destination, label)`, sources in
    /// ascending order, one entry per arc.
    #[must_use]
    pub fn arcs(&self) -> Vec<(usize, usize, ArcLabel)> {
        let mut all = Vec::with_capacity(self.arcs);
        for u in self.vertices.iter() {
            all.extend(
                self.out_arcs_unchecked(u)
                    .into_iter()
                    .map(|(v, label)| (u, v, label)),
            );
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_each_neighbor_once() {
        let mut g = SparseGraph::new(6, 2, 0).unwrap();
        for (v, label) in [(1, 0), (1, 3), (5, 0), (2, 2), (5, 5)] {
            g.add_arc_label(0, v, label).unwrap();
        }
        let mut kids = g.out_neighbors(0).unwrap();
        kids.sort_unstable();
        assert_eq!(vec![1, 2, 5], kids);
        assert!(g.out_neighbors(3).unwrap().is_empty());
    }

    #[test]
    fn finds_in_neighbors_by_scanning() {
        let mut g = SparseGraph::new(6, 2, 0).unwrap();
        g.add_arc(4, 2).unwrap();
        g.add_arc_label(0, 2, 7).unwrap();
        g.add_arc(2, 2).unwrap();
        g.add_arc(2, 3).unwrap();
        assert_eq!(vec![0, 2, 4], g.in_neighbors(2).unwrap());
        assert!(g.in_neighbors(5).unwrap().is_empty());
        for u in g.in_neighbors(2).unwrap() {
            assert!(g.out_neighbors(u).unwrap().contains(&2));
        }
    }

    #[test]
    fn reports_short_neighbor_buffers() {
        let mut g = SparseGraph::new(4, 2, 0).unwrap();
        g.add_arc(0, 1).unwrap();
        g.add_arc(0, 2).unwrap();
        g.add_arc(0, 2).unwrap();
        let mut buf = [0; 1];
        assert_eq!(
            Err(GraphError::BufferTooSmall {
                capacity: 1,
                required: 2,
            }),
            g.out_neighbors_into(0, &mut buf)
        );
        let mut buf = [0; 2];
        assert_eq!(Ok(2), g.out_neighbors_into(0, &mut buf));
        buf.sort_unstable();
        assert_eq!([1, 2], buf);
    }

    #[test]
    fn expands_arcs_by_multiplicity() {
        let mut g = SparseGraph::new(3, 2, 0).unwrap();
        g.add_arc(0, 1).unwrap();
        g.add_arc_label(0, 1, 4).unwrap();
        g.add_arc_label(0, 1, 4).unwrap();
        g.add_arc_label(2, 0, 1).unwrap();
        let mut out = g.out_arcs(0).unwrap();
        out.sort_unstable();
        assert_eq!(vec![(1, 0), (1, 4), (1, 4)], out);
        let mut all = g.arcs();
        all.sort_unstable();
        assert_eq!(vec![(0, 1, 0), (0, 1, 4), (0, 1, 4), (2, 0, 1)], all);
        assert_eq!(g.num_arcs(), all.len());
    }
}
