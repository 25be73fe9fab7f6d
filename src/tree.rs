// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Bucket trees: unbalanced binary search trees of [`TreeNode`]s ordered by
//! [`compare`](crate::order::compare).

use std::cmp::Ordering;

use crate::order::compare;
use crate::{GraphError, NodeId, SparseGraph, TreeNode};

/// The place a node hangs from: a bucket or a child pointer of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    Bucket(usize),
    Left(NodeId),
    Right(NodeId),
}

impl SparseGraph {
    /// The bucket holding arcs from `u` to `v`.
    #[inline]
    pub(crate) const fn bucket(&self, u: usize, v: usize) -> usize {
        u * self.hash_length + (v & self.hash_mask)
    }

    fn target(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Bucket(b) => self.buckets[b],
            Link::Left(parent) => self.nodes[parent].left,
            Link::Right(parent) => self.nodes[parent].right,
        }
    }

    fn set_target(&mut self, link: Link, node: Option<NodeId>) {
        match link {
            Link::Bucket(b) => self.buckets[b] = node,
            Link::Left(parent) => self.nodes[parent].left = node,
            Link::Right(parent) => self.nodes[parent].right = node,
        }
    }

    /// Walk the tree of `(u, v)` and return the link where `v` lives, or
    /// where it would be attached, together with its node if it exists.
    pub(crate) fn search(&self, u: usize, v: usize) -> (Link, Option<NodeId>) {
        let mut link = Link::Bucket(self.bucket(u, v));
        while let Some(id) = self.target(link) {
            link = match compare(v, self.nodes[id].destination) {
                Ordering::Less => Link::Left(id),
                Ordering::Greater => Link::Right(id),
                Ordering::Equal => return (link, Some(id)),
            };
        }
        (link, None)
    }

    /// The node holding arcs from `u` to `v`, if there are any.
    pub(crate) fn find_node(&self, u: usize, v: usize) -> Option<NodeId> {
        self.search(u, v).1
    }

    /// The node for `(u, v)`, attached as an empty leaf if missing.
    ///
    /// A freshly attached node has no arcs, so the caller must put at least
    /// one arc on it before returning.
    pub(crate) fn find_or_attach(&mut self, u: usize, v: usize) -> Result<NodeId, GraphError> {
        let (link, found) = self.search(u, v);
        if let Some(id) = found {
            return Ok(id);
        }
        let id = self.nodes.alloc(TreeNode {
            destination: v,
            unlabeled: 0,
            left: None,
            right: None,
            labels: None,
        })?;
        self.set_target(link, Some(id));
        Ok(id)
    }

    /// Unhook node `id`, hanging from `link`, and free it with its labels.
    ///
    /// With one child or none, the child takes the node's place. With two,
    /// the node is replaced by its in-order predecessor or successor,
    /// whichever sits deeper below it; ties go to the successor.
    pub(crate) fn excise(&mut self, link: Link, id: NodeId) {
        debug_assert_eq!(Some(id), self.target(link));
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        let replacement = match (left, right) {
            (None, child) | (child, None) => child,
            (Some(left), Some(right)) => Some(self.promote(left, right)),
        };
        self.set_target(link, replacement);
        self.release_labels(id);
        self.nodes.release(id);
    }

    /// Detach the replacement for a node with children `left` and `right`
    /// and give it those children.
    fn promote(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let mut pred = left;
        let mut pred_parent = None;
        let mut left_len = 0_usize;
        while let Some(next) = self.nodes[pred].right {
            pred_parent = Some(pred);
            pred = next;
            left_len += 1;
        }
        let mut succ = right;
        let mut succ_parent = None;
        let mut right_len = 0_usize;
        while let Some(next) = self.nodes[succ].left {
            succ_parent = Some(succ);
            succ = next;
            right_len += 1;
        }
        if left_len > right_len {
            if let Some(parent) = pred_parent {
                self.nodes[parent].right = self.nodes[pred].left;
                self.nodes[pred].left = Some(left);
            }
            self.nodes[pred].right = Some(right);
            pred
        } else {
            if let Some(parent) = succ_parent {
                self.nodes[parent].left = self.nodes[succ].right;
                self.nodes[succ].right = Some(right);
            }
            self.nodes[succ].left = Some(left);
            succ
        }
    }

    /// Visit every node of bucket `b` in tree order, without recursion.
    pub(crate) fn walk_bucket(&self, b: usize, mut visit: impl FnMut(&TreeNode)) {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = self.buckets[b];
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = &self.nodes[id];
            visit(node);
            current = node.right;
        }
    }

    /// Visit every node of every bucket of vertex `u`.
    pub(crate) fn walk_vertex(&self, u: usize, mut visit: impl FnMut(&TreeNode)) {
        let first = u * self.hash_length;
        for b in first..first + self.hash_length {
            self.walk_bucket(b, &mut visit);
        }
    }

    /// Height of the tree in bucket `b`; an empty bucket has height zero.
    #[cfg(test)]
    pub(crate) fn bucket_height(&self, b: usize) -> usize {
        let mut tallest = 0;
        let mut stack: Vec<(NodeId, usize)> =
            self.buckets[b].map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        tallest
    }

    /// Check the search-tree property of every bucket.
    #[cfg(test)]
    pub(crate) fn trees_are_ordered(&self) -> bool {
        (0..self.buckets.len()).all(|b| {
            let mut previous: Option<usize> = None;
            let mut ordered = true;
            self.walk_bucket(b, |node| {
                if let Some(before) = previous {
                    ordered &= compare(before, node.destination) == Ordering::Less;
                }
                previous = Some(node.destination);
            });
            ordered
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::SparseGraph;

    /// Destinations found left and right of `v` in the tree of bucket 0.
    fn children(g: &SparseGraph, v: usize) -> (Option<usize>, Option<usize>) {
        let mut found = None;
        g.walk_bucket(0, |node| {
            if node.destination == v {
                found = Some((node.left, node.right));
            }
        });
        let (left, right) = found.unwrap();
        let destination = |id: Option<usize>| id.map(|id| g.nodes[id].destination);
        (destination(left), destination(right))
    }

    // In scrambled order 10 < 2 < 7 < 4 < 9 < 1 < 14 < 3.
    #[rstest]
    #[case::predecessor_deeper(&[4, 10, 2, 7, 1], 7, (Some(10), Some(1)), 2, (None, None))]
    #[case::successor_deeper(&[4, 10, 3, 14, 9], 9, (Some(10), Some(3)), 14, (None, None))]
    #[case::tie_goes_to_successor(&[4, 10, 2, 3, 14], 14, (Some(10), Some(3)), 3, (None, None))]
    fn promotes_the_deeper_neighbor(
        #[case] inserted: &[usize],
        #[case] promoted: usize,
        #[case] below: (Option<usize>, Option<usize>),
        #[case] parent: usize,
        #[case] parent_below: (Option<usize>, Option<usize>),
    ) {
        let mut g = SparseGraph::new(16, 1, 0).unwrap();
        for v in inserted {
            g.add_arc(0, *v).unwrap();
        }
        assert_eq!(Some(inserted[0]), g.buckets[0].map(|id| g.nodes[id].destination));
        g.del_all_arcs(0, inserted[0]).unwrap();
        assert_eq!(Some(promoted), g.buckets[0].map(|id| g.nodes[id].destination));
        assert_eq!(below, children(&g, promoted));
        assert_eq!(parent_below, children(&g, parent));
        assert!(g.trees_are_ordered());
        assert_eq!(inserted.len() - 1, g.out_degree(0).unwrap());
    }

    #[test]
    fn sorted_inserts_stay_shallow() {
        let mut g = SparseGraph::new(1_000, 1, 0).unwrap();
        for v in 0..1_000 {
            g.add_arc(0, v).unwrap();
        }
        assert!(g.trees_are_ordered());
        assert!(g.bucket_height(0) < 100, "tree degenerated to a list");
    }

    #[test]
    fn removes_nodes_with_two_children() {
        let mut g = SparseGraph::new(64, 1, 0).unwrap();
        for v in 0..64 {
            g.add_arc(0, v).unwrap();
        }
        for v in (0..64).step_by(3) {
            g.del_all_arcs(0, v).unwrap();
            assert!(g.trees_are_ordered());
        }
        for v in 0..64 {
            assert_eq!(v % 3 != 0, g.has_arc(0, v).unwrap());
        }
        assert_eq!(64 - 22, g.nodes.len());
    }

    #[test]
    fn empties_a_bucket_completely() {
        let mut g = SparseGraph::new(32, 1, 0).unwrap();
        for v in 0..32 {
            g.add_arc(5, v).unwrap();
        }
        for v in (0..32).rev() {
            g.del_all_arcs(5, v).unwrap();
        }
        assert_eq!(0, g.bucket_height(5));
        assert_eq!(0, g.nodes.len());
    }

    #[test]
    fn walks_in_tree_order() {
        let mut g = SparseGraph::new(10, 1, 0).unwrap();
        for v in [4, 9, 1, 7, 3] {
            g.add_arc(2, v).unwrap();
        }
        let mut seen = vec![];
        g.walk_vertex(2, |node| seen.push(node.destination));
        let mut expected = vec![4, 9, 1, 7, 3];
        expected.sort_by(|a, b| crate::order::compare(*a, *b));
        assert_eq!(expected, seen);
    }
}
