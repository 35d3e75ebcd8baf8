//! Payload contracts supplied by the caller.
//!
//! The engine never looks inside a vertex payload; everything it needs is
//! expressed through these traits. The payload carries the contig sequence,
//! coverage and copy number in the full assembler; here only a length is
//! required, reached through [`DataCost`].

use crate::contig_node::VertexKey;
use crate::graph::ContigGraph;
use crate::vertex::Direction;

/// A vertex payload the engine can measure.
pub trait ContigData {
    /// Length of the underlying sequence in bases
    fn length(&self) -> usize;
}

/// Minimal payload: just a sequence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleContigData {
    pub length: usize,
}

impl ContigData for SimpleContigData {
    fn length(&self) -> usize {
        self.length
    }
}

/// Traversal weight of a vertex, used uniformly for budgets and path
/// lengths. A vertex weight, not a per-edge weight.
pub trait DataCost<D> {
    fn cost(&self, data: &D) -> usize;
}

/// The k-mer overlap cost: a contig of length L spans `L - (k - 1)` k-mers,
/// since adjacent contigs overlap by k - 1 bases.
#[derive(Debug, Clone, Copy)]
pub struct KmerCost {
    pub k: usize,
}

impl<D: ContigData> DataCost<D> for KmerCost {
    fn cost(&self, data: &D) -> usize {
        data.length().saturating_sub(self.k.saturating_sub(1))
    }
}

/// Combines a child payload into its parent during a merge. Runs before any
/// adjacency is rewritten, while the junction can still be described.
///
/// `usable_child` is forwarded untouched; its meaning is owned entirely by
/// the merger implementation.
#[allow(clippy::too_many_arguments)]
pub trait DataMerger<D> {
    fn merge(
        &mut self,
        parent_key: VertexKey,
        parent: &mut D,
        child_key: VertexKey,
        child: &D,
        dir: Direction,
        reverse: bool,
        remove_child: bool,
        usable_child: bool,
    );
}

/// Pure predicate over the payloads at the two ends of an edge, consulted by
/// [`ContigGraph::validate`](crate::graph::ContigGraph::validate).
pub trait DataChecker<D> {
    fn check(&self, data: &D, partner: &D, dir: Direction, reverse: bool) -> bool;
}

/// Paired-evidence resolver driven by
/// [`ContigGraph::reduce_paired`](crate::graph::ContigGraph::reduce_paired).
/// Expected to perform at most one merge per call and return false once the
/// vertex offers nothing more to resolve.
pub trait Resolver<D> {
    fn resolve(&mut self, graph: &mut ContigGraph<D>, key: VertexKey) -> bool;
}
