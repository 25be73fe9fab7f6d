// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Sparse directed multigraph storage.
//!
//! [`SparseGraph`] keeps a fixed-capacity space of dense integer vertices
//! and an arbitrary multiset of labeled arcs between them. Outgoing arcs of
//! every vertex are partitioned into `hash_length` buckets; each bucket is an
//! unbalanced binary search tree keyed by destination, where every tree node
//! carries the number of unlabeled arcs and a small linked multiset of
//! positive labels. Degrees and the total arc count are tracked exactly.
//!
//! [`LabeledGraph`] sits on top of the engine and translates arbitrary
//! vertex and edge-label values into the dense ids and positive integer
//! labels the engine works with, applying directed/undirected, loop and
//! multi-edge policies. Directed graphs are backed by a [`MirroredGraph`],
//! which keeps a reversed copy of every arc so that in-neighbor queries are
//! as cheap as out-neighbor ones.
//!
//! ```
//! use sparsegraph::SparseGraph;
//!
//! let mut g = SparseGraph::new(5, 16, 0).unwrap();
//! g.add_arc_label(0, 1, 7).unwrap();
//! g.add_arc(0, 1).unwrap();
//! assert!(g.has_arc(0, 1).unwrap());
//! assert_eq!(2, g.out_degree(0).unwrap());
//! let mut labels = g.all_arcs(0, 1).unwrap();
//! labels.sort_unstable();
//! assert_eq!(vec![0, 7], labels);
//! ```

#![doc(html_root_url = "https://docs.rs/sparsegraph/0.0.0")]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod ctors;
mod dot;
mod edge_labels;
mod error;
mod ids;
mod labeled;
mod mirror;
mod multiset;
mod neighbors;
mod ops;
mod order;
mod pool;
mod query;
mod realloc;
mod snapshot;
mod tree;
mod vertices;

#[cfg(test)]
mod proptests;

pub use crate::edge_labels::EdgeLabels;
pub use crate::error::GraphError;
pub use crate::ids::VertexIds;
pub use crate::labeled::{GraphKind, LabeledGraph};
pub use crate::mirror::MirroredGraph;
pub use crate::snapshot::Snapshot;
pub use crate::vertices::VertexSet;

use crate::pool::Pool;

/// Opaque arc label. `0` means "no label".
pub type ArcLabel = u32;

/// The label carried by unlabeled arcs.
pub const NO_LABEL: ArcLabel = 0;

/// Expected out-degree assumed when nothing better is known.
pub const DEFAULT_EXPECTED_DEGREE: usize = 16;

/// Vertex room a [`LabeledGraph`] starts with when nothing better is known.
pub const DEFAULT_VERTICES: usize = 16;

/// Index of a [`TreeNode`] inside the node pool.
pub(crate) type NodeId = usize;

/// Index of a [`LabelCell`] inside the label pool.
pub(crate) type CellId = usize;

/// One node of a bucket tree: all arcs from the bucket's vertex to
/// `destination`.
///
/// # Invariants
///
/// * `unlabeled > 0` or `labels` is not empty; a node with no arcs left is
///   removed from its tree immediately.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    pub(crate) destination: usize,
    pub(crate) unlabeled: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) labels: Option<CellId>,
}

/// One entry of a node's label multiset.
#[derive(Debug, Clone)]
pub(crate) struct LabelCell {
    pub(crate) label: ArcLabel,
    pub(crate) count: usize,
    pub(crate) next: Option<CellId>,
}

/// A sparse directed multigraph over dense vertex ids.
///
/// Vertex ids live in `0..capacity()`; only active ones (see
/// [`SparseGraph::has_vertex`]) may carry arcs. Any number of arcs may join
/// the same ordered pair, each with its own label.
///
/// The structure is single-threaded: wrap it in a lock to share it.
///
/// # Invariants
///
/// * `buckets.len() == capacity * hash_length`.
/// * `sum(out_degrees) == sum(in_degrees) == arcs`.
/// * Every tree node reachable from a bucket has positive multiplicity.
#[derive(Debug, Clone)]
pub struct SparseGraph {
    vertices: VertexSet,
    hash_length: usize,
    hash_mask: usize,
    buckets: Vec<Option<NodeId>>,
    nodes: Pool<TreeNode>,
    cells: Pool<LabelCell>,
    out_degrees: Vec<usize>,
    in_degrees: Vec<usize>,
    arcs: usize,
}
