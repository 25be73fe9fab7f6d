// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use itertools::Itertools;

use crate::{NO_LABEL, SparseGraph};

impl SparseGraph {
    /// Print the graph in DOT format.
    ///
    /// For example, for this code:
    ///
    /// ```
    /// use sparsegraph::SparseGraph;
    /// let mut g = SparseGraph::new(2, 16, 0).unwrap();
    /// g.add_arc(0, 1).unwrap();
    /// g.add_arc_label(0, 1, 4).unwrap();
    /// let dot = g.to_dot();
    /// println!("{}", dot);
    /// ```
    ///
    /// The printout will look like this:
    ///
    /// ```text
    /// digraph {
    ///   v0[shape=circle,label="ν0"];
    ///   v0 -> v1;
    ///   v0 -> v1 [label="4"];
    ///   v1[shape=circle,label="ν1"];
    /// }
    /// ```
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut lines: Vec<String> = vec!["digraph {".to_string()];
        for v in self.vertices() {
            lines.push(format!("  v{v}[shape=circle,label=\"ν{v}\"];"));
            for (to, label) in self.out_arcs_unchecked(v).into_iter().sorted() {
                if label == NO_LABEL {
                    lines.push(format!("  v{v} -> v{to};"));
                } else {
                    lines.push(format!("  v{v} -> v{to} [label=\"{label}\"];"));
                }
            }
        }
        lines.push("}\n".to_string());
        lines.into_iter().join("\n")
    }
}

#[test]
fn simple_graph_to_dot() {
    let mut g = SparseGraph::new(3, 16, 0).unwrap();
    g.add_arc_label(2, 0, 7).unwrap();
    g.add_arc(0, 1).unwrap();
    let dot = g.to_dot();
    assert!(dot.contains("v0[shape=circle,label=\"ν0\"]"));
    assert!(dot.contains("v2 -> v0 [label=\"7\"];"));
    assert!(dot.contains("v0 -> v1;"));
    assert!(dot.find("v0 -> v1").unwrap() < dot.find("v2 -> v0").unwrap());
}
