use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense integer identity of a vertex in the contig graph.
/// Keys are assigned in insertion order and double as table indices.
pub type VertexKey = usize;

/// An oriented reference to a contig in the graph.
/// The least significant bit (LSB) stores the sense:
/// - 0 = forward strand
/// - 1 = reverse strand
/// The remaining bits store the vertex key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ContigNode(u64);

impl ContigNode {
    /// Create a new node reference with the given key and sense
    pub fn new(key: VertexKey, sense: bool) -> Self {
        let mut value = (key as u64) << 1;
        if sense {
            value |= 1;
        }
        ContigNode(value)
    }

    /// Create a forward-sense reference to the given vertex
    pub fn forward(key: VertexKey) -> Self {
        Self::new(key, false)
    }

    /// Create a reverse-sense reference to the given vertex
    pub fn reverse(key: VertexKey) -> Self {
        Self::new(key, true)
    }

    /// Get the vertex key from this node
    pub fn key(&self) -> VertexKey {
        (self.0 >> 1) as VertexKey
    }

    /// Check if this node is visited in reverse sense
    pub fn sense(&self) -> bool {
        (self.0 & 1) == 1
    }

    /// Get the sense sign as a char ('+' or '-')
    pub fn sense_char(&self) -> char {
        if self.sense() {
            '-'
        } else {
            '+'
        }
    }

    /// Flip the sense of this node
    pub fn flip(&self) -> Self {
        ContigNode(self.0 ^ 1)
    }
}

impl fmt::Display for ContigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.sense_char())
    }
}

/// An ordered walk through the graph. Directionally meaningful: reading it
/// backwards requires flipping the sense of every node.
pub type ContigPath = Vec<ContigNode>;
