use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contig_node::VertexKey;
use crate::error::{GraphError, Result};

/// One of the two traversal senses of a contig.
/// Each vertex keeps a separate edge collection per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Both directions, in iteration order.
pub const DIRECTIONS: [Direction; 2] = [Direction::Forward, Direction::Backward];

impl Direction {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Flip only when `cond` holds. Used to compose a traversal direction
    /// with a strand flip: crossing a reverse edge flips the direction.
    pub fn flip_if(self, cond: bool) -> Self {
        if cond {
            self.flip()
        } else {
            self
        }
    }

    /// The direction a reciprocal edge must lie in on the partner vertex.
    /// Same-strand partners hold it in the opposite direction; a strand
    /// flip (reverse == true) keeps it in the same direction.
    pub fn twin(self, reverse: bool) -> Self {
        if reverse {
            self
        } else {
            self.flip()
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// A half-edge held inside a vertex's per-direction collection.
/// Identity is (target, reverse) within that collection; the matching half
/// lives on the target vertex in the twin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub target: VertexKey,
    /// True if traversing this edge flips the effective strand
    pub reverse: bool,
}

/// A contig vertex: a key, an opaque payload and two edge collections.
#[derive(Debug, Clone)]
pub struct Vertex<D> {
    key: VertexKey,
    data: D,
    edges: [Vec<Edge>; 2],
}

impl<D> Vertex<D> {
    pub fn new(key: VertexKey, data: D) -> Self {
        Vertex {
            key,
            data,
            edges: [Vec::new(), Vec::new()],
        }
    }

    pub fn key(&self) -> VertexKey {
        self.key
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// The edge collection for one direction. No ordering guarantee.
    pub fn edges(&self, dir: Direction) -> &[Edge] {
        &self.edges[dir.index()]
    }

    pub fn num_edges(&self, dir: Direction) -> usize {
        self.edges[dir.index()].len()
    }

    /// Insert an edge. An identical (target, reverse) edge already present
    /// in this direction is a modeling error, not a normal outcome.
    pub fn add_edge(&mut self, target: VertexKey, dir: Direction, reverse: bool) -> Result<()> {
        if self.find_edge(target, dir, reverse).is_some() {
            return Err(GraphError::DuplicateEdge {
                key: self.key,
                target,
                dir,
                reverse,
            });
        }
        self.edges[dir.index()].push(Edge { target, reverse });
        Ok(())
    }

    /// Remove the matching edge. Fatal if it does not exist.
    pub fn remove_edge(&mut self, target: VertexKey, dir: Direction, reverse: bool) -> Result<()> {
        match self.find_edge(target, dir, reverse) {
            Some(pos) => {
                // Order within a collection carries no meaning
                self.edges[dir.index()].swap_remove(pos);
                Ok(())
            }
            None => Err(GraphError::EdgeNotFound {
                key: self.key,
                target,
                dir,
                reverse,
            }),
        }
    }

    /// Linear search for (target, reverse) within the direction's collection.
    pub fn find_edge(&self, target: VertexKey, dir: Direction, reverse: bool) -> Option<usize> {
        self.edges[dir.index()]
            .iter()
            .position(|e| e.target == target && e.reverse == reverse)
    }

    /// True iff the described edge exists and is the only edge in the
    /// direction. Fatal if the edge is not in the collection at all.
    pub fn is_edge_unique(&self, target: VertexKey, dir: Direction, reverse: bool) -> Result<bool> {
        if self.find_edge(target, dir, reverse).is_none() {
            return Err(GraphError::EdgeNotFound {
                key: self.key,
                target,
                dir,
                reverse,
            });
        }
        Ok(self.num_edges(dir) == 1)
    }

    /// Existence check by vertex key rather than handle
    pub fn edge_exists(&self, target: VertexKey, dir: Direction, reverse: bool) -> bool {
        self.find_edge(target, dir, reverse).is_some()
    }

    /// True iff some target appears in both directions' collections,
    /// forming a two-vertex cycle through this vertex.
    pub fn detect_simple_cycle(&self) -> bool {
        self.edges(Direction::Forward).iter().any(|fwd| {
            self.edges(Direction::Backward)
                .iter()
                .any(|bwd| bwd.target == fwd.target)
        })
    }

    pub(crate) fn clear_edges(&mut self, dir: Direction) {
        self.edges[dir.index()].clear();
    }
}
