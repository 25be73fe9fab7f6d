// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

//! Per-node label multisets.
//!
//! Every tree node keeps a singly linked list of `(label, count)` cells for
//! its positive labels; unlabeled arcs are only counted. The number of
//! distinct labels on one pair of vertices is expected to be tiny, so the
//! list is scanned linearly. New labels are pushed at the head.

use crate::pool::Pool;
use crate::{ArcLabel, CellId, GraphError, LabelCell, NO_LABEL, NodeId, SparseGraph, TreeNode};

/// Iterator over the `(label, count)` cells of one node.
pub(crate) struct Cells<'a> {
    cells: &'a Pool<LabelCell>,
    next: Option<CellId>,
}

impl Iterator for Cells<'_> {
    type Item = (ArcLabel, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = &self.cells[self.next?];
        self.next = cell.next;
        Some((cell.label, cell.count))
    }
}

impl SparseGraph {
    /// The labeled cells of `node`, head first.
    pub(crate) fn cells_of<'a>(&'a self, node: &TreeNode) -> Cells<'a> {
        Cells {
            cells: &self.cells,
            next: node.labels,
        }
    }

    /// Total number of arcs `node` stands for.
    pub(crate) fn weight(&self, node: &TreeNode) -> usize {
        node.unlabeled + self.cells_of(node).map(|(_, count)| count).sum::<usize>()
    }

    /// How many arcs of `node` carry `label`.
    pub(crate) fn label_count(&self, node: &TreeNode, label: ArcLabel) -> usize {
        if label == NO_LABEL {
            return node.unlabeled;
        }
        self.cells_of(node)
            .find(|(present, _)| *present == label)
            .map_or(0, |(_, count)| count)
    }

    /// Put one more arc labeled `label` on node `id`.
    pub(crate) fn push_label(&mut self, id: NodeId, label: ArcLabel) -> Result<(), GraphError> {
        if label == NO_LABEL {
            self.nodes[id].unlabeled += 1;
            return Ok(());
        }
        let mut cursor = self.nodes[id].labels;
        while let Some(cell) = cursor {
            if self.cells[cell].label == label {
                self.cells[cell].count += 1;
                return Ok(());
            }
            cursor = self.cells[cell].next;
        }
        let head = self.cells.alloc(LabelCell {
            label,
            count: 1,
            next: self.nodes[id].labels,
        })?;
        self.nodes[id].labels = Some(head);
        Ok(())
    }

    /// Take one arc labeled `label` off node `id`, freeing its cell when the
    /// count drops to zero. Returns `false` if there was no such arc.
    pub(crate) fn pop_label(&mut self, id: NodeId, label: ArcLabel) -> bool {
        if label == NO_LABEL {
            let node = &mut self.nodes[id];
            if node.unlabeled == 0 {
                return false;
            }
            node.unlabeled -= 1;
            return true;
        }
        let mut previous: Option<CellId> = None;
        let mut cursor = self.nodes[id].labels;
        while let Some(cell) = cursor {
            if self.cells[cell].label != label {
                previous = Some(cell);
                cursor = self.cells[cell].next;
                continue;
            }
            self.cells[cell].count -= 1;
            if self.cells[cell].count == 0 {
                let next = self.cells[cell].next;
                match previous {
                    Some(before) => self.cells[before].next = next,
                    None => self.nodes[id].labels = next,
                }
                self.cells.release(cell);
            }
            return true;
        }
        false
    }

    /// Free every label cell of node `id`.
    pub(crate) fn release_labels(&mut self, id: NodeId) {
        let mut cursor = self.nodes[id].labels.take();
        while let Some(cell) = cursor {
            cursor = self.cells.release(cell).next;
        }
    }
}
