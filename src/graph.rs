use crate::contig_node::{ContigNode, VertexKey};
use crate::data::DataChecker;
use crate::error::{GraphError, Result};
use crate::vertex::{Direction, Vertex, DIRECTIONS};

/// A dense, key-indexed table owning every vertex of the contig graph.
///
/// Keys are assigned in strictly increasing insertion order and double as
/// indices into the table, so lookup is O(1). A vertex merged away leaves a
/// tombstone in its slot; live entries are never relocated, which keeps
/// every other key stable.
pub struct ContigGraph<D> {
    vertices: Vec<Option<Vertex<D>>>,
}

impl<D> Default for ContigGraph<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> ContigGraph<D> {
    pub fn new() -> Self {
        ContigGraph {
            vertices: Vec::new(),
        }
    }

    /// Number of slots in the table, tombstones included.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex. The key must equal the current table size: keys are
    /// dense, monotonic and never reused.
    pub fn add_vertex(&mut self, key: VertexKey, data: D) -> Result<()> {
        if key != self.vertices.len() {
            return Err(GraphError::NonDenseKey {
                key,
                expected: self.vertices.len(),
            });
        }
        self.vertices.push(Some(Vertex::new(key, data)));
        Ok(())
    }

    /// O(1) lookup by key. Fatal if the key is out of range or the vertex
    /// was merged away.
    pub fn vertex(&self, key: VertexKey) -> Result<&Vertex<D>> {
        match self.vertices.get(key) {
            None => Err(GraphError::KeyOutOfRange {
                key,
                size: self.vertices.len(),
            }),
            Some(None) => Err(GraphError::VertexRemoved { key }),
            Some(Some(v)) => Ok(v),
        }
    }

    pub fn vertex_mut(&mut self, key: VertexKey) -> Result<&mut Vertex<D>> {
        let size = self.vertices.len();
        match self.vertices.get_mut(key) {
            None => Err(GraphError::KeyOutOfRange { key, size }),
            Some(None) => Err(GraphError::VertexRemoved { key }),
            Some(Some(v)) => Ok(v),
        }
    }

    /// True iff the key refers to a live vertex.
    pub fn contains(&self, key: VertexKey) -> bool {
        matches!(self.vertices.get(key), Some(Some(_)))
    }

    /// All live vertices in key order.
    pub fn live_vertices(&self) -> impl Iterator<Item = &Vertex<D>> {
        self.vertices.iter().filter_map(|slot| slot.as_ref())
    }

    /// Insert one half-edge from `parent` towards the contig `child`; the
    /// child's sense becomes the edge's reverse flag. The caller is expected
    /// to insert the matching half on the child as well; `validate` audits
    /// that both halves are present and consistently oriented.
    pub fn add_edge(&mut self, parent: VertexKey, dir: Direction, child: ContigNode) -> Result<()> {
        // Resolve the child first so a bad key fails before any mutation
        self.vertex(child.key())?;
        self.vertex_mut(parent)?
            .add_edge(child.key(), dir, child.sense())
    }

    /// Total half-edge count over every vertex and direction. Each
    /// reciprocal pair is counted twice, once per half.
    pub fn count_edges(&self) -> usize {
        self.live_vertices()
            .map(|v| v.num_edges(Direction::Forward) + v.num_edges(Direction::Backward))
            .sum()
    }

    pub fn degree(&self, key: VertexKey, dir: Direction) -> Result<usize> {
        Ok(self.vertex(key)?.num_edges(dir))
    }

    /// Detach a vertex from the graph: for every incident edge, remove the
    /// reciprocal half from the far vertex, then clear the vertex's own
    /// collections. The slot itself is not tombstoned here; only a merge
    /// with `remove_child` retires a slot.
    pub fn remove_vertex(&mut self, key: VertexKey) -> Result<()> {
        for dir in DIRECTIONS {
            // Snapshot: the far side of a self-loop mutates these same lists
            let edges = self.vertex(key)?.edges(dir).to_vec();
            for e in edges {
                self.vertex_mut(e.target)?
                    .remove_edge(key, dir.twin(e.reverse), e.reverse)?;
            }
        }
        for dir in DIRECTIONS {
            self.vertex_mut(key)?.clear_edges(dir);
        }
        Ok(())
    }

    /// Retire a slot after a merge has rerouted all of its edges.
    pub(crate) fn tombstone(&mut self, key: VertexKey) {
        if let Some(slot) = self.vertices.get_mut(key) {
            *slot = None;
        }
    }

    /// Mutable access to two distinct vertices at once.
    pub(crate) fn pair_mut(
        &mut self,
        a: VertexKey,
        b: VertexKey,
    ) -> Result<(&mut Vertex<D>, &mut Vertex<D>)> {
        let size = self.vertices.len();
        if a == b {
            return Err(GraphError::SelfMerge { key: a });
        }
        if a >= size {
            return Err(GraphError::KeyOutOfRange { key: a, size });
        }
        if b >= size {
            return Err(GraphError::KeyOutOfRange { key: b, size });
        }
        let (lo, hi) = self.vertices.split_at_mut(a.max(b));
        let (first, second) = (a.min(b), a.max(b));
        let vf = lo[first]
            .as_mut()
            .ok_or(GraphError::VertexRemoved { key: first })?;
        let vs = hi[0]
            .as_mut()
            .ok_or(GraphError::VertexRemoved { key: second })?;
        if a < b {
            Ok((vf, vs))
        } else {
            Ok((vs, vf))
        }
    }

    /// Offline integrity audit, not for the hot path: every half-edge must
    /// have its reciprocal half on the partner with the same reverse flag,
    /// and the payloads at the junction must satisfy the external checker.
    pub fn validate<K: DataChecker<D>>(&self, checker: &K) -> Result<()> {
        for v in self.live_vertices() {
            for dir in DIRECTIONS {
                for e in v.edges(dir) {
                    let partner = self.vertex(e.target)?;
                    if !partner.edge_exists(v.key(), dir.twin(e.reverse), e.reverse) {
                        return Err(GraphError::MissingReciprocal {
                            key: v.key(),
                            partner: e.target,
                            dir,
                            reverse: e.reverse,
                        });
                    }
                    if !checker.check(v.data(), partner.data(), dir, e.reverse) {
                        return Err(GraphError::CheckFailed {
                            key: v.key(),
                            partner: e.target,
                            dir,
                            reverse: e.reverse,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
