// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

const VERTICES: usize = 12;

#[derive(Clone, Debug)]
enum Op {
    Add(usize, usize, ArcLabel),
    Del(usize, usize, ArcLabel),
    DelAll(usize, usize),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let vertex = 0..VERTICES;
    let label = 0..4u32;
    let op = prop_oneof![
        6 => (vertex.clone(), vertex.clone(), label.clone()).prop_map(|(u, v, l)| Op::Add(u, v, l)),
        3 => (vertex.clone(), vertex.clone(), label).prop_map(|(u, v, l)| Op::Del(u, v, l)),
        1 => (vertex.clone(), vertex).prop_map(|(u, v)| Op::DelAll(u, v)),
    ];
    prop::collection::vec(op, 0..300)
}

/// Arcs between each pair, as a sorted list of labels.
type Model = BTreeMap<(usize, usize), Vec<ArcLabel>>;

fn replay(g: &mut SparseGraph, model: &mut Model, op: &Op) -> Result<(), TestCaseError> {
    match *op {
        Op::Add(u, v, l) => {
            g.add_arc_label(u, v, l).unwrap();
            let labels = model.entry((u, v)).or_default();
            labels.push(l);
            labels.sort_unstable();
        }
        Op::Del(u, v, l) => {
            let labels = model.entry((u, v)).or_default();
            let expected = match labels.iter().position(|x| *x == l) {
                Some(pos) => {
                    labels.remove(pos);
                    Ok(())
                }
                None if labels.is_empty() => Err(GraphError::NoSuchArc { from: u, to: v }),
                None => Err(GraphError::NoSuchLabel { from: u, to: v, label: l }),
            };
            prop_assert_eq!(expected, g.del_arc_label(u, v, l));
        }
        Op::DelAll(u, v) => {
            let removed = model.remove(&(u, v)).unwrap_or_default().len();
            let expected = if removed == 0 {
                Err(GraphError::NoSuchArc { from: u, to: v })
            } else {
                Ok(removed)
            };
            prop_assert_eq!(expected, g.del_all_arcs(u, v));
            prop_assert_eq!(Err(GraphError::NoSuchArc { from: u, to: v }), g.del_all_arcs(u, v));
        }
    }
    model.retain(|_, labels| !labels.is_empty());
    Ok(())
}

fn check_against(g: &SparseGraph, model: &Model) -> Result<(), TestCaseError> {
    let mut out = [0; VERTICES];
    let mut into = [0; VERTICES];
    for ((u, v), labels) in model {
        out[*u] += labels.len();
        into[*v] += labels.len();
    }
    for v in 0..VERTICES {
        prop_assert_eq!(out[v], g.out_degree(v).unwrap());
        prop_assert_eq!(into[v], g.in_degree(v).unwrap());
    }
    let total: usize = model.values().map(Vec::len).sum();
    prop_assert_eq!(total, g.num_arcs());
    for u in 0..VERTICES {
        let out_neighbors = g.out_neighbors(u).unwrap();
        for v in 0..VERTICES {
            let mut labels = g.all_arcs(u, v).unwrap();
            labels.sort_unstable();
            let expected = model.get(&(u, v)).cloned().unwrap_or_default();
            prop_assert_eq!(&expected, &labels);
            prop_assert_eq!(!labels.is_empty(), g.has_arc(u, v).unwrap());
            prop_assert_eq!(g.has_arc(u, v).unwrap(), out_neighbors.contains(&v));
            prop_assert_eq!(labels.len(), g.arc_multiplicity(u, v).unwrap());
            let first = g.arc_label(u, v).unwrap();
            prop_assert!((labels.is_empty() && first == NO_LABEL) || labels.contains(&first));
        }
    }
    prop_assert!(g.trees_are_ordered());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_engine_matches_model(ops in ops_strategy(), degree in 1..8usize) {
        let mut g = SparseGraph::new(VERTICES, degree, 0).unwrap();
        let mut model = Model::new();
        for op in &ops {
            replay(&mut g, &mut model, op)?;
        }
        check_against(&g, &model)?;
    }

    #[test]
    fn prop_mirror_agrees_with_scan(ops in ops_strategy()) {
        let mut g = MirroredGraph::new(VERTICES, 2, 0).unwrap();
        for op in ops {
            match op {
                Op::Add(u, v, l) => g.add_arc_label(u, v, l).unwrap(),
                Op::Del(u, v, l) => {
                    let _ = g.del_arc_label(u, v, l);
                }
                Op::DelAll(u, v) => {
                    let _ = g.del_all_arcs(u, v);
                }
            }
        }
        prop_assert!(g.is_consistent());
        for v in 0..VERTICES {
            let mut fast = g.in_neighbors(v).unwrap();
            fast.sort_unstable();
            let slow = g.forward().in_neighbors(v).unwrap();
            for u in 0..VERTICES {
                prop_assert_eq!(g.has_arc(u, v).unwrap(), slow.contains(&u));
            }
            prop_assert_eq!(slow, fast);
        }
    }

    #[test]
    fn prop_grow_then_shrink_changes_nothing(ops in ops_strategy(), extra in 1..40usize) {
        let mut g = SparseGraph::new(VERTICES, 4, 0).unwrap();
        let mut model = Model::new();
        for op in &ops {
            replay(&mut g, &mut model, op)?;
        }
        let before = g.snapshot();
        g.realloc(VERTICES + extra).unwrap();
        prop_assert_eq!(VERTICES + extra, g.capacity());
        g.realloc(VERTICES).unwrap();
        prop_assert_eq!(before, g.snapshot());
        check_against(&g, &model)?;
    }

    #[test]
    fn prop_labeled_graph_counts_edges(
        edges in prop::collection::vec((0..8u8, 0..8u8, prop::option::of(0..3u8)), 0..60),
        directed in any::<bool>(),
    ) {
        let kind = GraphKind { directed, loops: true, multiedges: true };
        let mut g = LabeledGraph::from_edges(kind, edges.clone()).unwrap();
        prop_assert_eq!(edges.len(), g.edge_count());
        prop_assert_eq!(edges.len(), g.edges().len());
        let ends: usize = g.vertices().map(|v| g.degree(v).unwrap()).sum();
        prop_assert_eq!(2 * edges.len(), ends);
        for (u, v, label) in &edges {
            prop_assert!(g.has_edge_labeled(u, v, label.as_ref()));
        }
        for (u, v, label) in &edges {
            prop_assert!(g.del_edge(u, v, label.as_ref()).unwrap());
        }
        prop_assert_eq!(0, g.edge_count());
        prop_assert!(g.edges().is_empty());
    }
}
