// SPDX-FileCopyrightText: Copyright (c) 2022-2025 Objectionary.com
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::ArcLabel;

/// Failures reported by [`SparseGraph`](crate::SparseGraph) and its
/// collaborators.
///
/// Every failing operation leaves the graph exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex is outside `0..capacity` or not active.
    #[error("vertex ν{0} is not in the graph")]
    InvalidVertex(usize),
    /// The vertex is too far past the end to be reached by doubling.
    #[error("vertex ν{vertex} is past twice the allocated range of {capacity}, realloc first")]
    BeyondCapacity { vertex: usize, capacity: usize },
    /// Shrinking would drop an active vertex.
    #[error("can't shrink to {capacity} vertices, ν{vertex} is still active")]
    ShrinkActive { capacity: usize, vertex: usize },
    /// A graph must have room for at least one vertex.
    #[error("a graph must allocate space for at least one vertex")]
    ZeroCapacity,
    /// There is no arc between the two vertices.
    #[error("there is no arc ν{from} → ν{to}")]
    NoSuchArc { from: usize, to: usize },
    /// There are arcs between the two vertices, but none with this label.
    #[error("there is no arc ν{from} → ν{to} labeled {label}")]
    NoSuchLabel {
        from: usize,
        to: usize,
        label: ArcLabel,
    },
    /// A caller-supplied buffer can't hold the result.
    #[error("the buffer holds {capacity} entries, while {required} are needed")]
    BufferTooSmall { capacity: usize, required: usize },
    /// Memory for the named structure could not be allocated.
    #[error("out of memory while growing {0}")]
    OutOfMemory(&'static str),
    /// Every positive [`ArcLabel`] is already taken.
    #[error("edge label pool exhausted")]
    LabelsExhausted,
}
