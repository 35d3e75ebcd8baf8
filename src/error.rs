use thiserror::Error;

use crate::contig_node::VertexKey;
use crate::vertex::Direction;

/// Errors raised when the graph is found to be in an inconsistent state.
///
/// Every variant here is an invariant violation: the graph has already been
/// corrupted (or was mis-loaded) and no local recovery is defined. Callers
/// should treat these as non-continuable defects. Search-budget exhaustion is
/// deliberately *not* represented here: it is a normal outcome, reported
/// through [`SuperpathResult::complete`](crate::superpaths::SuperpathResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An identical (target, reverse) edge already exists in this direction.
    #[error("duplicate edge {key} -> {target} ({dir}, reverse={reverse})")]
    DuplicateEdge {
        key: VertexKey,
        target: VertexKey,
        dir: Direction,
        reverse: bool,
    },

    /// No matching (target, reverse) edge exists in this direction.
    #[error("no edge {key} -> {target} ({dir}, reverse={reverse})")]
    EdgeNotFound {
        key: VertexKey,
        target: VertexKey,
        dir: Direction,
        reverse: bool,
    },

    /// An edge has no correctly oriented edge back from its target.
    #[error("missing reciprocal edge {partner} -> {key} ({dir}, reverse={reverse})")]
    MissingReciprocal {
        key: VertexKey,
        partner: VertexKey,
        dir: Direction,
        reverse: bool,
    },

    /// Vertex key outside the table.
    #[error("vertex key {key} out of range (table size {size})")]
    KeyOutOfRange { key: VertexKey, size: usize },

    /// Vertex was merged away and its slot tombstoned.
    #[error("vertex {key} has been removed")]
    VertexRemoved { key: VertexKey },

    /// Vertex insertion must use the next free key in order.
    #[error("vertex key {key} is not the next free slot ({expected})")]
    NonDenseKey { key: VertexKey, expected: VertexKey },

    /// A vertex cannot be merged into itself.
    #[error("cannot merge vertex {key} with itself")]
    SelfMerge { key: VertexKey },

    /// The previous-vertex chain from the target never reached the source.
    #[error("no path from {start} to {target}")]
    Unreachable {
        start: VertexKey,
        target: VertexKey,
    },

    /// The external payload consistency predicate rejected an edge.
    #[error("payload check failed for edge {key} -> {partner} ({dir}, reverse={reverse})")]
    CheckFailed {
        key: VertexKey,
        partner: VertexKey,
        dir: Direction,
        reverse: bool,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
