//! Cost-bounded local reachability: the "ball" of vertices assembled around
//! a contig, up to a total length budget.

use std::collections::BTreeSet;

use crate::contig_node::VertexKey;
use crate::data::DataCost;
use crate::error::Result;
use crate::graph::ContigGraph;
use crate::vertex::Direction;

/// One lobe of the neighbourhood of a vertex, grown from a single
/// immediate neighbour.
#[derive(Debug, Clone)]
pub struct Component {
    pub seed: VertexKey,
    pub vertices: BTreeSet<VertexKey>,
}

impl<D> ContigGraph<D> {
    /// Explore from `key` in `dir`, accumulating every vertex reached while
    /// the running cost stays within `max_cost`. Crossing a reverse edge
    /// flips the exploration direction.
    ///
    /// There is no visited check: a cyclic region is re-entered until the
    /// budget runs out, and the set accumulator deduplicates. The recursion
    /// of the textbook rendering is a work stack here, so the budget, not
    /// the call depth, is the only limit.
    pub fn accumulate_vertices<C: DataCost<D>>(
        &self,
        key: VertexKey,
        dir: Direction,
        curr_cost: usize,
        max_cost: usize,
        accumulator: &mut BTreeSet<VertexKey>,
        cost: &C,
    ) -> Result<()> {
        let mut stack = vec![(key, dir, curr_cost)];

        while let Some((key, dir, mut curr)) = stack.pop() {
            let vertex = self.vertex(key)?;
            accumulator.insert(key);

            curr += cost.cost(vertex.data());
            if curr > max_cost {
                continue;
            }
            for e in vertex.edges(dir) {
                stack.push((e.target, dir.flip_if(e.reverse), curr));
            }
        }
        Ok(())
    }

    /// Build one component per immediate neighbour of `key` in `dir`, each
    /// seeded with that neighbour and grown by [`accumulate_vertices`].
    /// The lobes are explored independently and may overlap.
    ///
    /// [`accumulate_vertices`]: ContigGraph::accumulate_vertices
    pub fn generate_components<C: DataCost<D>>(
        &self,
        key: VertexKey,
        dir: Direction,
        max_cost: usize,
        cost: &C,
    ) -> Result<Vec<Component>> {
        let mut components = Vec::new();

        for e in self.vertex(key)?.edges(dir) {
            let mut component = Component {
                seed: e.target,
                vertices: BTreeSet::new(),
            };
            self.accumulate_vertices(
                e.target,
                dir.flip_if(e.reverse),
                0,
                max_cost,
                &mut component.vertices,
                cost,
            )?;
            components.push(component);
        }
        Ok(components)
    }
}
