// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Graphs whose vertices and edge labels are arbitrary values.
//!
//! [`LabeledGraph`] maps vertices to dense engine ids through
//! [`VertexIds`] and edge labels to positive [`ArcLabel`]s through
//! [`EdgeLabels`]. Directed graphs are stored in a [`MirroredGraph`];
//! undirected ones in a single [`SparseGraph`], where a non-loop edge
//! `{u, v}` is the pair of arcs `u → v` and `v → u` and a loop is one arc.

use std::hash::Hash;

use anyhow::{Context as _, Result, bail};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    ArcLabel, DEFAULT_EXPECTED_DEGREE, DEFAULT_VERTICES, EdgeLabels, GraphError, MirroredGraph,
    NO_LABEL, SparseGraph, VertexIds,
};

/// Shape of a [`LabeledGraph`]: directed or not, and which edges it
/// accepts.
///
/// The default is a directed graph without loops and without multiple
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphKind {
    /// Do edges have a direction?
    pub directed: bool,
    /// May an edge join a vertex to itself?
    pub loops: bool,
    /// May more than one edge join the same pair?
    pub multiedges: bool,
}

impl Default for GraphKind {
    fn default() -> Self {
        Self::directed()
    }
}

impl GraphKind {
    /// A simple directed graph.
    #[must_use]
    pub const fn directed() -> Self {
        Self {
            directed: true,
            loops: false,
            multiedges: false,
        }
    }

    /// A simple undirected graph.
    #[must_use]
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            loops: false,
            multiedges: false,
        }
    }

    /// The same kind, with loops allowed or not.
    #[must_use]
    pub const fn with_loops(self, loops: bool) -> Self {
        Self { loops, ..self }
    }

    /// The same kind, with multiple edges allowed or not.
    #[must_use]
    pub const fn with_multiedges(self, multiedges: bool) -> Self {
        Self { multiedges, ..self }
    }
}

#[derive(Debug, Clone)]
enum Storage {
    Directed(MirroredGraph),
    Undirected(SparseGraph),
}

/// Engine "not found" results become `Ok(false)`.
fn found(outcome: Result<(), GraphError>) -> Result<bool, GraphError> {
    match outcome {
        Ok(()) => Ok(true),
        Err(GraphError::NoSuchArc { .. } | GraphError::NoSuchLabel { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

impl Storage {
    fn new(kind: GraphKind, vertices: usize, expected_degree: usize) -> Result<Self, GraphError> {
        let extra = vertices.max(1);
        Ok(if kind.directed {
            Self::Directed(MirroredGraph::new(0, expected_degree, extra)?)
        } else {
            Self::Undirected(SparseGraph::new(0, expected_degree, extra)?)
        })
    }

    /// The engine holding every edge in its stored direction.
    fn engine(&self) -> &SparseGraph {
        match self {
            Self::Directed(g) => g.forward(),
            Self::Undirected(g) => g,
        }
    }

    fn next_id(&self) -> usize {
        self.engine().next_id()
    }

    fn add_vertex(&mut self, v: usize) -> Result<usize, GraphError> {
        match self {
            Self::Directed(g) => g.add_vertex(v),
            Self::Undirected(g) => g.add_vertex(v),
        }
    }

    fn del_vertex(&mut self, v: usize) -> bool {
        match self {
            Self::Directed(g) => g.del_vertex(v),
            Self::Undirected(g) => {
                if !g.has_vertex(v) {
                    return false;
                }
                for w in g.out_neighbors_unchecked(v) {
                    g.del_all_arcs_unchecked(v, w);
                    if w != v {
                        g.del_all_arcs_unchecked(w, v);
                    }
                }
                g.deactivate_unchecked(v);
                true
            }
        }
    }

    /// Room for `count` more edges.
    fn reserve_edges(&mut self, count: usize) -> Result<(), GraphError> {
        match self {
            Self::Directed(g) => g.reserve_arcs(count),
            Self::Undirected(g) => g.reserve_arcs(2 * count),
        }
    }

    fn add_edge(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<(), GraphError> {
        match self {
            Self::Directed(g) => g.add_arc_label(u, v, label),
            Self::Undirected(g) => {
                g.reserve_arcs(2)?;
                g.add_arc_unchecked(u, v, label)?;
                if u != v
                    && let Err(err) = g.add_arc_unchecked(v, u, label)
                {
                    let undone = g.del_arc_label_unchecked(u, v, label);
                    debug_assert!(undone.is_ok());
                    return Err(err);
                }
                Ok(())
            }
        }
    }

    fn del_edge(&mut self, u: usize, v: usize, label: ArcLabel) -> Result<bool, GraphError> {
        let outcome = match self {
            Self::Directed(g) => g.del_arc_label(u, v, label),
            Self::Undirected(g) => {
                let outcome = g.del_arc_label_unchecked(u, v, label);
                if outcome.is_ok() && u != v {
                    let mirrored = g.del_arc_label_unchecked(v, u, label);
                    debug_assert!(mirrored.is_ok(), "ν{v} → ν{u} labeled {label} is missing");
                }
                outcome
            }
        };
        found(outcome)
    }

    /// Remove every edge joining `u` and `v`, returning how many there were.
    fn del_all(&mut self, u: usize, v: usize) -> Result<usize, GraphError> {
        match self {
            Self::Directed(g) => match g.del_all_arcs(u, v) {
                Err(GraphError::NoSuchArc { .. }) => Ok(0),
                other => other,
            },
            Self::Undirected(g) => {
                let removed = g.del_all_arcs_unchecked(u, v);
                if u != v {
                    let mirrored = g.del_all_arcs_unchecked(v, u);
                    debug_assert_eq!(removed, mirrored);
                }
                Ok(removed)
            }
        }
    }

    fn in_neighbors(&self, v: usize) -> Vec<usize> {
        match self {
            Self::Directed(g) => g.reverse().out_neighbors_unchecked(v),
            Self::Undirected(g) => g.out_neighbors_unchecked(v),
        }
    }
}

/// A graph over vertices of type `V` whose edges may carry labels of type
/// `L`.
///
/// Vertices need hashing; labels only need equality, and are looked up by
/// a linear scan over the distinct labels seen so far.
///
/// # Examples
///
/// ```
/// use sparsegraph::{GraphKind, LabeledGraph};
///
/// let mut g = LabeledGraph::new(GraphKind::default()).unwrap();
/// g.add_edge("alpha", "beta", Some(0.5)).unwrap();
/// g.add_edge("beta", "gamma", None).unwrap();
/// assert_eq!(vec![&"alpha"], g.in_neighbors(&"beta").unwrap());
/// assert_eq!(Some(Some(&0.5)), g.edge_label(&"alpha", &"beta"));
/// assert_eq!(2, g.edge_count());
/// ```
#[derive(Debug, Clone)]
pub struct LabeledGraph<V, L> {
    kind: GraphKind,
    storage: Storage,
    ids: VertexIds<V>,
    labels: EdgeLabels<L>,
    edges: usize,
}

impl<V: Eq + Hash + Clone, L: PartialEq + Clone> LabeledGraph<V, L> {
    /// Make an empty graph of the given kind, with room for
    /// [`DEFAULT_VERTICES`] vertices before it has to grow.
    ///
    /// # Errors
    ///
    /// If memory for the engine can't be allocated.
    pub fn new(kind: GraphKind) -> Result<Self> {
        Self::with_capacity(kind, DEFAULT_VERTICES, DEFAULT_EXPECTED_DEGREE)
    }

    /// Make an empty graph with room for `vertices` vertices, each with
    /// about `expected_degree` outgoing edges.
    ///
    /// # Errors
    ///
    /// If memory for the engine can't be allocated.
    pub fn with_capacity(kind: GraphKind, vertices: usize, expected_degree: usize) -> Result<Self> {
        let storage = Storage::new(kind, vertices, expected_degree)
            .with_context(|| format!("Can't make room for {vertices} vertices"))?;
        Ok(Self {
            kind,
            storage,
            ids: VertexIds::default(),
            labels: EdgeLabels::default(),
            edges: 0,
        })
    }

    /// Make a graph of the given kind holding `edges`.
    ///
    /// # Errors
    ///
    /// If an edge is rejected by [`LabeledGraph::add_edge`].
    pub fn from_edges<I>(kind: GraphKind, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, Option<L>)>,
    {
        let mut g = Self::new(kind)?;
        for (u, v, label) in edges {
            g.add_edge(u, v, label)?;
        }
        debug!(
            "Built a graph of {} vertices and {} edges",
            g.vertex_count(),
            g.edge_count()
        );
        Ok(g)
    }

    /// The kind of this graph.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    fn id(&self, v: &V) -> Result<usize> {
        self.ids.get(v).context("The vertex is not in the graph")
    }

    fn pair(&self, u: &V, v: &V) -> Option<(usize, usize)> {
        Some((self.ids.get(u)?, self.ids.get(v)?))
    }

    /// Engine label of `label`, if it was ever seen.
    fn code(&self, label: Option<&L>) -> Option<ArcLabel> {
        label.map_or(Some(NO_LABEL), |l| self.labels.find(l))
    }

    fn names(&self, ids: impl IntoIterator<Item = usize>) -> Vec<&V> {
        ids.into_iter().filter_map(|id| self.ids.name(id)).collect()
    }

    /// Add `v` unless it is already there, returning its engine id.
    ///
    /// A new vertex takes the smallest free id, so ids of deleted vertices
    /// are reused.
    ///
    /// # Errors
    ///
    /// If the engine has to grow and can't.
    pub fn add_vertex(&mut self, v: V) -> Result<usize> {
        if let Some(id) = self.ids.get(&v) {
            return Ok(id);
        }
        let id = self.storage.next_id();
        self.storage
            .add_vertex(id)
            .with_context(|| format!("Can't add vertex #{id}"))?;
        self.ids.insert(v, id);
        Ok(id)
    }

    /// Is `v` in the graph?
    #[must_use]
    pub fn has_vertex(&self, v: &V) -> bool {
        self.ids.get(v).is_some()
    }

    /// The engine id of `v`.
    #[must_use]
    pub fn id_of(&self, v: &V) -> Option<usize> {
        self.ids.get(v)
    }

    /// Remove `v` with every edge touching it.
    ///
    /// Returns `false` if there was no such vertex.
    pub fn del_vertex(&mut self, v: &V) -> bool {
        let Some(id) = self.ids.get(v) else {
            return false;
        };
        let engine = self.storage.engine();
        let incident = if self.kind.directed {
            engine.out_degrees[id] + engine.in_degrees[id]
                - engine.arc_multiplicity_unchecked(id, id)
        } else {
            engine.out_degrees[id]
        };
        self.storage.del_vertex(id);
        self.ids.remove(v);
        self.edges -= incident;
        debug!("Vertex #{id} removed with {incident} edges");
        true
    }

    /// Vertices in engine id order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.ids.iter().map(|(_, v)| v)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Add an edge from `u` to `v`, adding the vertices if they are new.
    ///
    /// If multiple edges are not allowed and `u` and `v` are already
    /// joined, an edge with the same label is kept and `Ok(false)` is
    /// returned, while an edge with another label is replaced.
    ///
    /// # Errors
    ///
    /// If `u == v` and loops are not allowed, if memory runs out or if no
    /// more labels can be told apart. Vertices and labels this call would
    /// have added are gone again then.
    pub fn add_edge(&mut self, u: V, v: V, label: Option<L>) -> Result<bool> {
        if !self.kind.loops && u == v {
            bail!("Loops are not allowed in this graph");
        }
        let fresh_from = !self.has_vertex(&u);
        let from = self.add_vertex(u)?;
        let fresh_to = !self.has_vertex(&v);
        let to = match self.add_vertex(v) {
            Ok(to) => to,
            Err(err) => {
                if fresh_from {
                    self.forget_vertex(from);
                }
                return Err(err);
            }
        };
        let known_labels = self.labels.len();
        let outcome = self.join(from, to, label);
        if outcome.is_err() {
            self.labels.truncate(known_labels);
            for (fresh, id) in [(fresh_from, from), (fresh_to, to)] {
                if fresh {
                    self.forget_vertex(id);
                }
            }
        }
        outcome
    }

    /// Put an edge between two present vertices, minding the multi-edge
    /// policy.
    fn join(&mut self, from: usize, to: usize, label: Option<L>) -> Result<bool> {
        let code = match label {
            None => NO_LABEL,
            Some(l) => self.labels.intern(l).context("Can't label the edge")?,
        };
        if !self.kind.multiedges && self.storage.engine().has_arc_unchecked(from, to) {
            if self.storage.engine().has_arc_label_unchecked(from, to, code) {
                return Ok(false);
            }
            self.storage.reserve_edges(1)?;
            let replaced = self.storage.del_all(from, to)?;
            self.edges -= replaced;
            debug!("The edge #{from} → #{to} is relabeled");
        }
        self.storage
            .add_edge(from, to, code)
            .with_context(|| format!("Can't add an edge #{from} → #{to}"))?;
        self.edges += 1;
        Ok(true)
    }

    /// Drop a vertex that has just been added and has no edges.
    fn forget_vertex(&mut self, id: usize) {
        debug_assert_eq!(0, self.storage.engine().out_degrees[id]);
        self.storage.del_vertex(id);
        self.ids.remove_id(id);
    }

    /// Remove one edge from `u` to `v` with the given label.
    ///
    /// Returns `Ok(false)` if there is no such edge.
    ///
    /// # Errors
    ///
    /// Only if the engine is broken.
    pub fn del_edge(&mut self, u: &V, v: &V, label: Option<&L>) -> Result<bool> {
        let (Some((from, to)), Some(code)) = (self.pair(u, v), self.code(label)) else {
            return Ok(false);
        };
        let removed = self.storage.del_edge(from, to, code)?;
        if removed {
            self.edges -= 1;
        }
        Ok(removed)
    }

    /// Remove every edge from `u` to `v`, returning how many there were.
    ///
    /// # Errors
    ///
    /// Only if the engine is broken.
    pub fn del_all_edges(&mut self, u: &V, v: &V) -> Result<usize> {
        let Some((from, to)) = self.pair(u, v) else {
            return Ok(0);
        };
        let removed = self.storage.del_all(from, to)?;
        self.edges -= removed;
        Ok(removed)
    }

    /// Is there an edge from `u` to `v`?
    #[must_use]
    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        self.pair(u, v)
            .is_some_and(|(from, to)| self.storage.engine().has_arc_unchecked(from, to))
    }

    /// Is there an edge from `u` to `v` with the given label?
    #[must_use]
    pub fn has_edge_labeled(&self, u: &V, v: &V, label: Option<&L>) -> bool {
        match (self.pair(u, v), self.code(label)) {
            (Some((from, to)), Some(code)) => {
                self.storage.engine().has_arc_label_unchecked(from, to, code)
            }
            _ => false,
        }
    }

    /// The label of some edge from `u` to `v`, or `None` if there is no
    /// edge.
    ///
    /// When several edges join the pair, which label comes back is not
    /// specified; use [`LabeledGraph::edge_labels`] to see them all.
    #[must_use]
    pub fn edge_label(&self, u: &V, v: &V) -> Option<Option<&L>> {
        let (from, to) = self.pair(u, v)?;
        let engine = self.storage.engine();
        if !engine.has_arc_unchecked(from, to) {
            return None;
        }
        Some(self.labels.resolve(engine.arc_label_unchecked(from, to)))
    }

    /// Labels of all edges from `u` to `v`, one per edge.
    #[must_use]
    pub fn edge_labels(&self, u: &V, v: &V) -> Vec<Option<&L>> {
        self.pair(u, v).map_or_else(Vec::new, |(from, to)| {
            self.storage
                .engine()
                .all_arcs_unchecked(from, to)
                .into_iter()
                .map(|code| self.labels.resolve(code))
                .collect()
        })
    }

    /// Vertices that edges from `v` lead to.
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn out_neighbors(&self, v: &V) -> Result<Vec<&V>> {
        let id = self.id(v)?;
        Ok(self.names(self.storage.engine().out_neighbors_unchecked(id)))
    }

    /// Vertices with edges leading to `v`; in an undirected graph, the
    /// same as [`LabeledGraph::out_neighbors`].
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn in_neighbors(&self, v: &V) -> Result<Vec<&V>> {
        let id = self.id(v)?;
        Ok(self.names(self.storage.in_neighbors(id)))
    }

    /// Vertices joined to `v` in either direction, each once.
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn neighbors(&self, v: &V) -> Result<Vec<&V>> {
        let id = self.id(v)?;
        let out = self.storage.engine().out_neighbors_unchecked(id);
        if !self.kind.directed {
            return Ok(self.names(out));
        }
        let all = out
            .into_iter()
            .chain(self.storage.in_neighbors(id))
            .sorted_unstable()
            .dedup();
        Ok(self.names(all))
    }

    /// Number of edges leaving `v`; in an undirected graph, the same as
    /// [`LabeledGraph::degree`].
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn out_degree(&self, v: &V) -> Result<usize> {
        if !self.kind.directed {
            return self.degree(v);
        }
        let id = self.id(v)?;
        Ok(self.storage.engine().out_degrees[id])
    }

    /// Number of edges entering `v`; in an undirected graph, the same as
    /// [`LabeledGraph::degree`].
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn in_degree(&self, v: &V) -> Result<usize> {
        if !self.kind.directed {
            return self.degree(v);
        }
        let id = self.id(v)?;
        Ok(self.storage.engine().in_degrees[id])
    }

    /// Number of edge ends at `v`: a loop counts twice.
    ///
    /// # Errors
    ///
    /// If `v` is not in the graph.
    pub fn degree(&self, v: &V) -> Result<usize> {
        let id = self.id(v)?;
        let engine = self.storage.engine();
        Ok(if self.kind.directed {
            engine.out_degrees[id] + engine.in_degrees[id]
        } else {
            engine.out_degrees[id] + engine.arc_multiplicity_unchecked(id, id)
        })
    }

    /// Every edge once, as `(from, to, label)`.
    ///
    /// Edges of an undirected graph come with the end of the smaller engine
    /// id first.
    #[must_use]
    pub fn edges(&self) -> Vec<(&V, &V, Option<&L>)> {
        let directed = self.kind.directed;
        self.storage
            .engine()
            .arcs()
            .into_iter()
            .filter(|(u, v, _)| directed || u <= v)
            .filter_map(|(u, v, code)| {
                Some((self.ids.name(u)?, self.ids.name(v)?, self.labels.resolve(code)))
            })
            .collect()
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges
    }

    /// Allow or forbid loops; forbidding them removes the existing ones.
    ///
    /// # Errors
    ///
    /// Only if the engine is broken.
    pub fn set_loops(&mut self, allowed: bool) -> Result<()> {
        if !allowed {
            let engine = self.storage.engine();
            let looped: Vec<usize> = self
                .ids
                .iter()
                .map(|(id, _)| id)
                .filter(|id| engine.has_arc_unchecked(*id, *id))
                .collect();
            for id in looped {
                self.edges -= self.storage.del_all(id, id)?;
            }
        }
        self.kind.loops = allowed;
        Ok(())
    }

    /// Allow or forbid multiple edges; forbidding them keeps one edge per
    /// joined pair.
    ///
    /// # Errors
    ///
    /// Only if the engine is broken.
    pub fn set_multiedges(&mut self, allowed: bool) -> Result<()> {
        if !allowed {
            let directed = self.kind.directed;
            let engine = self.storage.engine();
            let crowded: Vec<(usize, usize)> = engine
                .arcs()
                .into_iter()
                .filter(|(u, v, _)| directed || u <= v)
                .map(|(u, v, _)| (u, v))
                .unique()
                .filter(|(u, v)| engine.arc_multiplicity_unchecked(*u, *v) > 1)
                .collect();
            for (u, v) in crowded {
                let engine = self.storage.engine();
                let kept = engine.arc_label_unchecked(u, v);
                let mut extra = engine.all_arcs_unchecked(u, v);
                if let Some(pos) = extra.iter().position(|code| *code == kept) {
                    extra.swap_remove(pos);
                }
                for code in extra {
                    if self.storage.del_edge(u, v, code)? {
                        self.edges -= 1;
                    }
                }
            }
        }
        self.kind.multiedges = allowed;
        Ok(())
    }
}
