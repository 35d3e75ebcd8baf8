//! Single-source shortest distance over the pooled edges of both
//! directions. Useful for scaffold distance estimates, where the strand a
//! contig is reached on does not matter; unsuitable when travel must stay
//! in one direction.

use bitvec::prelude::*;

use crate::contig_node::VertexKey;
use crate::data::DataCost;
use crate::error::{GraphError, Result};
use crate::graph::ContigGraph;
use crate::vertex::DIRECTIONS;

/// Sentinel distance of a vertex the search never reached.
pub const INFINITE_DISTANCE: usize = usize::MAX;

/// Distances and predecessor links from one source vertex, indexed by key.
/// Tombstoned slots keep the sentinel distance.
#[derive(Debug, Clone)]
pub struct ShortestPathData {
    pub distance: Vec<usize>,
    pub previous: Vec<Option<VertexKey>>,
}

impl<D> ContigGraph<D> {
    /// Dijkstra with the current vertex's own cost as the step increment
    /// added towards every neighbour, in either direction.
    ///
    /// The next vertex to finalize is found by a linear scan over the
    /// unfinalized vertices, not a priority queue: this is O(V^2) and
    /// assumes moderate vertex counts.
    pub fn dijkstra<C: DataCost<D>>(&self, source: VertexKey, cost: &C) -> Result<ShortestPathData> {
        let size = self.len();
        let mut data = ShortestPathData {
            distance: vec![INFINITE_DISTANCE; size],
            previous: vec![None; size],
        };
        let mut finalized: BitVec<u64, Lsb0> = BitVec::repeat(false, size);

        self.vertex(source)?;
        data.distance[source] = 0;
        let mut curr = source;

        loop {
            finalized.set(curr, true);

            if data.distance[curr] != INFINITE_DISTANCE {
                let vertex = self.vertex(curr)?;
                let step = cost.cost(vertex.data());
                let tentative = data.distance[curr] + step;
                for dir in DIRECTIONS {
                    for e in vertex.edges(dir) {
                        if tentative < data.distance[e.target] {
                            data.distance[e.target] = tentative;
                            data.previous[e.target] = Some(curr);
                        }
                    }
                }
            }

            // Select the nearest unfinalized vertex by linear scan
            let mut best = None;
            let mut best_dist = INFINITE_DISTANCE;
            for key in 0..size {
                if !finalized[key] && self.contains(key) && data.distance[key] <= best_dist {
                    best = Some(key);
                    best_dist = data.distance[key];
                }
            }
            match best {
                Some(key) => curr = key,
                None => break,
            }
        }
        Ok(data)
    }

    /// Reconstruct the path from `source` to `target` out of the
    /// predecessor links, source excluded, target included. Fatal if the
    /// chain never reaches the source.
    pub fn extract_shortest_path(
        &self,
        data: &ShortestPathData,
        source: VertexKey,
        target: VertexKey,
    ) -> Result<Vec<VertexKey>> {
        self.vertex(source)?;
        self.vertex(target)?;
        let mut path = Vec::new();
        let mut curr = target;
        while curr != source {
            path.push(curr);
            curr = data.previous[curr].ok_or(GraphError::Unreachable { start: source, target })?;
        }
        path.reverse();
        Ok(path)
    }
}
