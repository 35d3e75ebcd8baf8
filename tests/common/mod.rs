#![allow(dead_code)]

use contigraph::{
    ContigGraph, ContigNode, DataChecker, DataMerger, Direction, SimpleContigData, VertexKey,
};

pub fn data(length: usize) -> SimpleContigData {
    SimpleContigData { length }
}

/// Insert both halves of one overlap. The reciprocal half lives on the
/// child in the twin direction with the same reverse flag.
pub fn link(
    g: &mut ContigGraph<SimpleContigData>,
    parent: VertexKey,
    dir: Direction,
    child: VertexKey,
    reverse: bool,
) {
    g.add_edge(parent, dir, ContigNode::new(child, reverse))
        .unwrap();
    g.add_edge(child, dir.twin(reverse), ContigNode::new(parent, reverse))
        .unwrap();
}

/// Build a forward line 0-1-..-n with the given contig lengths
pub fn line_graph(lengths: &[usize]) -> ContigGraph<SimpleContigData> {
    let mut g = ContigGraph::new();
    for (k, &length) in lengths.iter().enumerate() {
        g.add_vertex(k, data(length)).unwrap();
    }
    for k in 0..lengths.len().saturating_sub(1) {
        link(&mut g, k, Direction::Forward, k + 1, false);
    }
    g
}

/// Merger that concatenates lengths, like appending the child's sequence
pub struct ConcatMerger;

impl DataMerger<SimpleContigData> for ConcatMerger {
    #[allow(clippy::too_many_arguments)]
    fn merge(
        &mut self,
        _parent_key: VertexKey,
        parent: &mut SimpleContigData,
        _child_key: VertexKey,
        child: &SimpleContigData,
        _dir: Direction,
        _reverse: bool,
        _remove_child: bool,
        _usable_child: bool,
    ) {
        parent.length += child.length;
    }
}

/// Checker that accepts every junction
pub struct AcceptAll;

impl DataChecker<SimpleContigData> for AcceptAll {
    fn check(
        &self,
        _data: &SimpleContigData,
        _partner: &SimpleContigData,
        _dir: Direction,
        _reverse: bool,
    ) -> bool {
        true
    }
}
