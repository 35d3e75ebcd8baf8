//! Derived measurements over vertex sets and walks.

use std::collections::{BTreeSet, HashMap};

use crate::contig_node::{ContigNode, ContigPath, VertexKey};
use crate::data::DataCost;
use crate::error::Result;
use crate::graph::ContigGraph;

impl<D> ContigGraph<D> {
    /// The shortest walk that could contain every vertex in the set: each
    /// vertex contributes its full span except the longest, which only
    /// contributes up to the overlap boundary as the terminal.
    pub fn min_path_length<C: DataCost<D>>(
        &self,
        vertices: &BTreeSet<VertexKey>,
        cost: &C,
    ) -> Result<usize> {
        let mut total = 0;
        let mut max_cost = 0;
        for &key in vertices {
            let vertex_cost = cost.cost(self.vertex(key)?.data());
            total += vertex_cost;
            max_cost = max_cost.max(vertex_cost);
        }
        Ok(total - max_cost)
    }

    /// Traversed length of a walk: the sum of every element's cost except
    /// the last, whose trailing span is not walked through.
    pub fn path_length<C: DataCost<D>>(&self, path: &ContigPath, cost: &C) -> Result<usize> {
        let mut len = 0;
        for node in path.iter().rev().skip(1) {
            len += cost.cost(self.vertex(node.key())?.data());
        }
        Ok(len)
    }

    /// Map each walk element to its cumulative offset from the start.
    /// An element whose (key, sense) recurs is a repeat with no single
    /// position; repeats are left out of the map entirely.
    pub fn distance_map<C: DataCost<D>>(
        &self,
        path: &ContigPath,
        cost: &C,
    ) -> Result<HashMap<ContigNode, usize>> {
        let mut map = HashMap::new();
        let mut repeats = BTreeSet::new();
        let mut distance = 0;

        for &node in path {
            if map.insert(node, distance).is_some() {
                repeats.insert(node);
            }
            distance += cost.cost(self.vertex(node.key())?.data());
        }

        for node in repeats {
            map.remove(&node);
        }
        Ok(map)
    }
}
