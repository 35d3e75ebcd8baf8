//! Constrained path enumeration: find walks from a source that visit every
//! node in a constraint set, each within its own distance allowance. Used
//! to reconcile paired-read evidence with the graph topology.

use std::collections::HashMap;

use crate::contig_node::{ContigNode, ContigPath, VertexKey};
use crate::data::DataCost;
use crate::error::Result;
use crate::graph::ContigGraph;
use crate::vertex::Direction;

/// Maximum path length at which each target node must have been reached.
pub type KeyConstraintMap = HashMap<ContigNode, usize>;

/// Cooperative work budgets for one search. Soft limits, not wall-clock:
/// the search checks them at every step and reports an incomplete result
/// once either is hit.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Abort once more than this many solutions have been recorded
    pub max_paths: usize,
    /// Total visit budget shared across the whole recursion tree
    pub max_cost: usize,
}

/// Outcome of a superpath search.
#[derive(Debug, Clone)]
pub struct SuperpathResult {
    pub paths: Vec<ContigPath>,
    /// Number of search steps spent
    pub visited: usize,
    /// False iff the visit budget was exhausted. An incomplete search may
    /// still carry solutions, but nothing can be concluded from it; retry
    /// with a larger budget or treat as no answer.
    pub complete: bool,
}

impl SuperpathResult {
    /// True iff the search ran to completion and found at least one path
    pub fn found(&self) -> bool {
        self.complete && !self.paths.is_empty()
    }
}

impl<D> ContigGraph<D> {
    /// Enumerate paths out of `source` that satisfy every constraint.
    /// An empty constraint set yields an empty (but complete) result.
    pub fn find_superpaths<C: DataCost<D>>(
        &self,
        source: VertexKey,
        dir: Direction,
        constraints: &KeyConstraintMap,
        limits: SearchLimits,
        cost: &C,
    ) -> Result<SuperpathResult> {
        let mut result = SuperpathResult {
            paths: Vec::new(),
            visited: 0,
            complete: true,
        };
        if constraints.is_empty() {
            return Ok(result);
        }
        let path = ContigPath::new();
        self.constrained_dfs(
            source,
            dir,
            false,
            constraints,
            &path,
            0,
            limits,
            &mut result.paths,
            &mut result.visited,
            cost,
        )?;
        result.complete = result.visited < limits.max_cost;
        Ok(result)
    }

    /// Depth-first walk carrying the still-unsatisfied constraints.
    ///
    /// Every call charges one unit against the shared visit budget, so the
    /// recursion depth is bounded by `limits.max_cost`. Returns false to
    /// propagate an abort (too many solutions or budget spent); true
    /// otherwise, including when nothing was found.
    #[allow(clippy::too_many_arguments)]
    fn constrained_dfs<C: DataCost<D>>(
        &self,
        key: VertexKey,
        dir: Direction,
        is_rc: bool,
        constraints: &KeyConstraintMap,
        path: &ContigPath,
        curr_len: usize,
        limits: SearchLimits,
        solutions: &mut Vec<ContigPath>,
        visited: &mut usize,
        cost: &C,
    ) -> Result<bool> {
        if solutions.len() > limits.max_paths {
            return Ok(false);
        }
        *visited += 1;
        if *visited >= limits.max_cost {
            return Ok(false);
        }

        let vertex = self.vertex(key)?;
        for e in vertex.edges(dir.flip_if(is_rc)) {
            let next_node = ContigNode::new(e.target, e.reverse ^ is_rc);
            let mut new_path = path.clone();
            new_path.push(next_node);

            // The node's distance is the length of the walk leading to it;
            // a constraint reached in time is discharged
            let mut new_constraints = constraints.clone();
            if let Some(&allowed) = new_constraints.get(&next_node) {
                if curr_len <= allowed {
                    new_constraints.remove(&next_node);
                }
            }

            if new_constraints.is_empty() {
                // Every constraint satisfied: record and try siblings, but
                // do not extend a path that is already a solution
                solutions.push(new_path);
                continue;
            }

            let new_len = curr_len + cost.cost(self.vertex(e.target)?.data());
            if new_constraints.values().any(|&allowed| new_len > allowed) {
                // Some remaining constraint can no longer be met
                continue;
            }

            if !self.constrained_dfs(
                e.target,
                dir,
                next_node.sense(),
                &new_constraints,
                &new_path,
                new_len,
                limits,
                solutions,
                visited,
                cost,
            )? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
