//! Chain contraction. A vertex with exactly one edge in a direction, whose
//! partner's edge back is also unique, forms an unambiguous junction: the
//! partner can be appended into the vertex and retired. One sweep contracts
//! one link per (vertex, direction); the caller loops until a sweep merges
//! nothing to collapse longer chains.

use crate::contig_node::VertexKey;
use crate::data::{ContigData, DataMerger, Resolver};
use crate::error::{GraphError, Result};
use crate::graph::ContigGraph;
use crate::vertex::{Direction, DIRECTIONS};

impl<D> ContigGraph<D> {
    /// One contraction sweep over every live vertex and direction. Returns
    /// the number of merges performed; zero means the graph is fully
    /// simplified.
    pub fn remove_transitivity<M: DataMerger<D>>(
        &mut self,
        merger: &mut M,
        verbose: bool,
    ) -> Result<usize> {
        let mut num_merged = 0;

        for key in 0..self.len() {
            for dir in DIRECTIONS {
                if !self.contains(key) {
                    break;
                }
                let edges = self.vertex(key)?.edges(dir);
                if edges.len() != 1 {
                    continue;
                }
                // The single edge in this direction
                let edge = edges[0];
                let partner = edge.target;
                if partner == key {
                    continue;
                }

                // Where the partner's edge back to us must lie
                let child_dir = dir.twin(edge.reverse);

                // The partner is redundant after the append iff its edge
                // back is its only extension on that side
                let remove_child =
                    self.vertex(partner)?
                        .is_edge_unique(key, child_dir, edge.reverse)?;

                self.merge(key, partner, dir, edge.reverse, remove_child, true, merger)?;
                num_merged += 1;
            }
        }

        if verbose {
            eprintln!("[transitivity] merged {} vertex pairs this sweep", num_merged);
        }
        Ok(num_merged)
    }

    /// Append `child` into `parent` across the junction described by
    /// (`parent_dir`, `parent_reverse`) and rewrite all affected adjacency.
    ///
    /// The payload merger runs first, while both payloads and the junction
    /// description are still intact. The parent's consumed side is then
    /// detached entirely, the child's far side is absorbed into it (reverse
    /// flags compose by XOR across the junction), and the child is retired
    /// if `remove_child` is set. When it is not set, the child keeps its
    /// far-side edges and their partners keep theirs; only the
    /// parent-child link itself is dissolved.
    #[allow(clippy::too_many_arguments)]
    pub fn merge<M: DataMerger<D>>(
        &mut self,
        parent: VertexKey,
        child: VertexKey,
        parent_dir: Direction,
        parent_reverse: bool,
        remove_child: bool,
        usable_child: bool,
        merger: &mut M,
    ) -> Result<()> {
        // A same-strand child holds its half of the junction on the side
        // facing the parent; a flipped child holds it on the same side.
        let expected_child_dir = parent_dir.twin(parent_reverse);
        let expected_child_reverse = parent_reverse;

        // Reciprocity, checked eagerly: the child must hold the matching
        // half of the junction edge
        if self
            .vertex(child)?
            .find_edge(parent, expected_child_dir, expected_child_reverse)
            .is_none()
        {
            return Err(GraphError::MissingReciprocal {
                key: parent,
                partner: child,
                dir: parent_dir,
                reverse: parent_reverse,
            });
        }

        // Combine the payloads before any adjacency is rewritten
        {
            let (pv, cv) = self.pair_mut(parent, child)?;
            merger.merge(
                parent,
                pv.data_mut(),
                child,
                cv.data(),
                parent_dir,
                parent_reverse,
                remove_child,
                usable_child,
            );
        }

        // The junction is now resolved: detach the parent from this
        // direction entirely, clearing the reciprocal half on every
        // neighbour. Snapshot the collection before rewiring it.
        let parent_edges = self.vertex(parent)?.edges(parent_dir).to_vec();
        for e in &parent_edges {
            self.vertex_mut(e.target)?
                .remove_edge(parent, parent_dir.twin(e.reverse), e.reverse)?;
        }
        self.vertex_mut(parent)?.clear_edges(parent_dir);

        // Absorb the child's edges on its far side into the freed slot
        let child_update_dir = expected_child_dir.flip();
        let child_edges = self.vertex(child)?.edges(child_update_dir).to_vec();
        for ce in &child_edges {
            // Crossing the junction composes orientation by XOR
            let new_reverse = parent_reverse != ce.reverse;
            self.vertex_mut(parent)?
                .add_edge(ce.target, parent_dir, new_reverse)?;
            self.vertex_mut(ce.target)?
                .add_edge(parent, parent_dir.twin(new_reverse), new_reverse)?;
        }

        if remove_child {
            // All of the child's surviving edges are detached from their
            // partners before the slot is retired
            self.remove_vertex(child)?;
            self.tombstone(child);
        }
        Ok(())
    }

    /// Fixed-point paired-evidence sweep: for every sufficiently long
    /// contig, invoke the external resolver until it reports nothing more
    /// to do. The resolver owns the heuristics and performs at most one
    /// merge per call.
    pub fn reduce_paired<R: Resolver<D>>(
        &mut self,
        resolver: &mut R,
        min_length: usize,
        verbose: bool,
    ) -> Result<usize>
    where
        D: ContigData,
    {
        let mut num_resolved = 0;

        for key in 0..self.len() {
            if !self.contains(key) {
                continue;
            }
            if self.vertex(key)?.data().length() <= min_length {
                continue;
            }
            while resolver.resolve(self, key) {
                num_resolved += 1;
                if !self.contains(key) {
                    break;
                }
            }
        }

        if verbose {
            eprintln!("[reduce] resolved {} junctions", num_resolved);
        }
        Ok(num_resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig_node::ContigNode;
    use crate::data::{DataChecker, SimpleContigData};

    /// Concatenates lengths, the shape of a sequence-appending merger
    struct ConcatMerger;

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

    struct AcceptAll;
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

    fn data(length: usize) -> SimpleContigData {
        SimpleContigData { length }
    }

    fn link(
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

    #[test]
    fn test_merge_conservation() {
        // 0 --F--> 1 --F--> 2 and 1 --F--> 3: merging 0 and 1 must hand
        // 1's forward extensions to 0, with 1 fully detached
        let mut g = ContigGraph::new();
        for k in 0..4 {
            g.add_vertex(k, data(10)).unwrap();
        }
        link(&mut g, 0, Direction::Forward, 1, false);
        link(&mut g, 1, Direction::Forward, 2, false);
        link(&mut g, 1, Direction::Forward, 3, false);

        g.merge(0, 1, Direction::Forward, false, true, true, &mut ConcatMerger)
            .unwrap();

        let parent = g.vertex(0).unwrap();
        assert_eq!(parent.data().length, 20);
        assert_eq!(parent.num_edges(Direction::Forward), 2);
        assert!(parent.edge_exists(2, Direction::Forward, false));
        assert!(parent.edge_exists(3, Direction::Forward, false));

        // The child slot is retired and nothing references it
        assert!(!g.contains(1));
        for v in g.live_vertices() {
            for dir in DIRECTIONS {
                assert!(v.edges(dir).iter().all(|e| e.target != 1));
            }
        }
        g.validate(&AcceptAll).unwrap();
    }

    #[test]
    fn test_merge_composes_reverse_flags() {
        // 0 --F,r--> 1, and 1 extends to 2 with another flip: the two
        // flips cancel across the junction
        let mut g = ContigGraph::new();
        for k in 0..3 {
            g.add_vertex(k, data(10)).unwrap();
        }
        link(&mut g, 0, Direction::Forward, 1, true);
        // With edge 0->1 reversed, the child's consumed slot is Forward,
        // so its far side is Backward
        link(&mut g, 1, Direction::Backward, 2, true);

        g.merge(0, 1, Direction::Forward, true, true, true, &mut ConcatMerger)
            .unwrap();

        let parent = g.vertex(0).unwrap();
        assert_eq!(parent.num_edges(Direction::Forward), 1);
        // true XOR true == false
        assert!(parent.edge_exists(2, Direction::Forward, false));
        g.validate(&AcceptAll).unwrap();
    }

    #[test]
    fn test_merge_missing_reciprocal_is_fatal() {
        let mut g = ContigGraph::new();
        g.add_vertex(0, data(10)).unwrap();
        g.add_vertex(1, data(10)).unwrap();
        g.add_edge(0, Direction::Forward, ContigNode::forward(1))
            .unwrap();
        let err = g
            .merge(0, 1, Direction::Forward, false, false, true, &mut ConcatMerger)
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingReciprocal { .. }));
    }

    #[test]
    fn test_merge_keeping_child() {
        // A branching partner must not be retired: 0 --F--> 1, but 1 has
        // two backward extensions (0 and 2)
        let mut g = ContigGraph::new();
        for k in 0..4 {
            g.add_vertex(k, data(10)).unwrap();
        }
        link(&mut g, 0, Direction::Forward, 1, false);
        link(&mut g, 2, Direction::Forward, 1, false);
        link(&mut g, 1, Direction::Forward, 3, false);

        g.merge(0, 1, Direction::Forward, false, false, true, &mut ConcatMerger)
            .unwrap();

        // Parent took over the child's far-side extension
        assert!(g
            .vertex(0)
            .unwrap()
            .edge_exists(3, Direction::Forward, false));
        // Child stays live, still holding its far side and its other branch
        assert!(g.contains(1));
        assert!(g
            .vertex(1)
            .unwrap()
            .edge_exists(3, Direction::Forward, false));
        assert!(g
            .vertex(1)
            .unwrap()
            .edge_exists(2, Direction::Backward, false));
        // The consumed link itself is gone from both sides
        assert!(!g.vertex(0).unwrap().edge_exists(1, Direction::Forward, false));
        assert!(!g.vertex(1).unwrap().edge_exists(0, Direction::Backward, false));
        g.validate(&AcceptAll).unwrap();
    }

    #[test]
    fn test_transitivity_skips_ambiguous_junctions() {
        // 0 and 2 both extend forward into 1: neither side is unique seen
        // from 1, but 0's own forward slot is, so 0 absorbs 1 without
        // retiring it
        let mut g = ContigGraph::new();
        for k in 0..3 {
            g.add_vertex(k, data(10)).unwrap();
        }
        link(&mut g, 0, Direction::Forward, 1, false);
        link(&mut g, 2, Direction::Forward, 1, false);

        let merged = g.remove_transitivity(&mut ConcatMerger, false).unwrap();
        assert!(merged > 0);
        assert!(g.contains(1));
        g.validate(&AcceptAll).unwrap();
    }

    #[test]
    fn test_transitivity_skips_self_loops() {
        let mut g = ContigGraph::new();
        g.add_vertex(0, data(10)).unwrap();
        // A contig overlapping itself across a strand flip
        g.add_edge(0, Direction::Forward, ContigNode::reverse(0))
            .unwrap();
        let merged = g.remove_transitivity(&mut ConcatMerger, false).unwrap();
        assert_eq!(merged, 0);
    }

    #[test]
    fn test_reduce_paired_gates_on_length() {
        struct CountingResolver {
            calls: usize,
        }
        impl Resolver<SimpleContigData> for CountingResolver {
            fn resolve(
                &mut self,
                _graph: &mut ContigGraph<SimpleContigData>,
                _key: VertexKey,
            ) -> bool {
                self.calls += 1;
                false
            }
        }

        let mut g = ContigGraph::new();
        g.add_vertex(0, data(600)).unwrap();
        g.add_vertex(1, data(100)).unwrap();
        g.add_vertex(2, data(501)).unwrap();

        let mut resolver = CountingResolver { calls: 0 };
        let resolved = g.reduce_paired(&mut resolver, 500, false).unwrap();
        assert_eq!(resolved, 0);
        // Only the contigs above the length gate were offered
        assert_eq!(resolver.calls, 2);
    }
}
