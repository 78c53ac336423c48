//! The directed (optionally undirected) weighted adjacency store shared by
//! every diffusion simulator and selector in this crate.
//!
//! Neighbour sets are stored as one [`HashSet`] per node, indexed directly by
//! node id in a `Vec` rather than hashed by id — giving O(1) indexing into the
//! per-node neighbourhood and O(1) amortised membership/insert/remove within
//! it. Edge weights live in a separate map keyed by `(u, v)`. Iteration order
//! over a neighbourhood is unspecified; callers (RIS, CELF, Greedy) must not
//! depend on it.

use std::collections::HashMap;
use std::collections::HashSet;

use tracing::instrument;

use crate::error::{ImError, Result};

/// A node identifier. Nodes are dense integers in `[0, n)`.
pub type NodeId = usize;

/// A directed or undirected weighted graph.
///
/// # Invariants
/// - Every key `(u, v)` in the weight table has `v` present in
///   `out_neighbors(u)`.
/// - For directed graphs, `u` is in `in_neighbors(v)` iff `v` is in
///   `out_neighbors(u)`.
/// - For undirected graphs, both directions of an edge carry the same
///   weight.
/// - Adding an edge that already exists updates its weight without
///   incrementing the edge count.
#[derive(Clone, Debug)]
pub struct Graph {
    n: usize,
    directed: bool,
    out_adj: Vec<HashSet<NodeId>>,
    in_adj: Vec<HashSet<NodeId>>,
    weight: HashMap<(NodeId, NodeId), f64>,
    m: usize,
}

impl Graph {
    /// Creates an empty graph on `n` nodes.
    #[must_use]
    pub fn new(n: usize, directed: bool) -> Self {
        Self {
            n,
            directed,
            out_adj: vec![HashSet::new(); n],
            in_adj: vec![HashSet::new(); n],
            weight: HashMap::new(),
            m: 0,
        }
    }

    /// Creates a graph on `n` nodes populated from an edge list, with
    /// optional per-edge weights (defaulting to `1.0`).
    ///
    /// # Errors
    /// Returns [`ImError::LengthMismatch`] if `weights` is given and its
    /// length differs from `edges`, or [`ImError::InvalidNode`] if any edge
    /// references a node outside `[0, n)`.
    #[instrument(name = "graph.from_edges", skip(edges, weights), fields(n, directed, edge_count = edges.len()))]
    pub fn from_edges(
        n: usize,
        directed: bool,
        edges: &[(NodeId, NodeId)],
        weights: Option<&[f64]>,
    ) -> Result<Self> {
        let mut graph = Self::new(n, directed);
        graph.add_edges(edges, weights)?;
        Ok(graph)
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Returns the number of (logical) edges in the graph.
    #[must_use]
    pub const fn m(&self) -> usize {
        self.m
    }

    /// Returns whether the graph is directed.
    #[must_use]
    pub const fn directed(&self) -> bool {
        self.directed
    }

    fn check_node(&self, u: NodeId) -> Result<()> {
        if u >= self.n {
            return Err(ImError::InvalidNode { node: u, n: self.n });
        }
        Ok(())
    }

    /// Inserts edge `(u, v)` with weight `w`. If the edge already exists,
    /// only its weight is updated and the edge count is unchanged.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` or `v` is outside `[0, n)`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, w: f64) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;

        let is_new = !self.out_adj[u].contains(&v);
        self.out_adj[u].insert(v);
        self.weight.insert((u, v), w);
        if self.directed {
            self.in_adj[v].insert(u);
        } else if u != v {
            self.out_adj[v].insert(u);
            self.weight.insert((v, u), w);
        }

        if is_new {
            self.m += 1;
        }
        Ok(())
    }

    /// Inserts a batch of edges, with optional per-edge weights (defaulting
    /// to `1.0` when `weights` is `None`).
    ///
    /// # Errors
    /// Returns [`ImError::LengthMismatch`] if `weights` is given and its
    /// length differs from `edges`, or [`ImError::InvalidNode`] for any
    /// out-of-range endpoint.
    pub fn add_edges(
        &mut self,
        edges: &[(NodeId, NodeId)],
        weights: Option<&[f64]>,
    ) -> Result<()> {
        if let Some(weights) = weights {
            if weights.len() != edges.len() {
                return Err(ImError::LengthMismatch {
                    edges: edges.len(),
                    weights: weights.len(),
                });
            }
        }
        for (i, &(u, v)) in edges.iter().enumerate() {
            let w = weights.map_or(1.0, |weights| weights[i]);
            self.add_edge(u, v, w)?;
        }
        Ok(())
    }

    /// Updates the weight of an existing edge.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] if `(u, v)` does not exist.
    pub fn update_edge_weight(&mut self, u: NodeId, v: NodeId, w: f64) -> Result<()> {
        if u >= self.n || v >= self.n || !self.out_adj[u].contains(&v) {
            return Err(ImError::EdgeNotFound { u, v });
        }
        self.weight.insert((u, v), w);
        if !self.directed {
            self.weight.insert((v, u), w);
        }
        Ok(())
    }

    /// Removes an existing edge.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] if `(u, v)` does not exist.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        if u >= self.n || v >= self.n || !self.out_adj[u].contains(&v) {
            return Err(ImError::EdgeNotFound { u, v });
        }
        self.out_adj[u].remove(&v);
        self.weight.remove(&(u, v));
        if self.directed {
            self.in_adj[v].remove(&u);
        } else {
            self.out_adj[v].remove(&u);
            self.weight.remove(&(v, u));
        }
        self.m -= 1;
        Ok(())
    }

    /// Removes a batch of existing edges.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] at the first edge in `edges` that
    /// does not exist.
    pub fn remove_edges(&mut self, edges: &[(NodeId, NodeId)]) -> Result<()> {
        for &(u, v) in edges {
            self.remove_edge(u, v)?;
        }
        Ok(())
    }

    /// Returns the weight of edge `(u, v)`, or `None` if it does not exist.
    #[must_use]
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.weight.get(&(u, v)).copied()
    }

    /// Returns the out-neighbours of `u`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` is outside `[0, n)`.
    pub fn out_neighbors(&self, u: NodeId) -> Result<&HashSet<NodeId>> {
        self.check_node(u)?;
        Ok(&self.out_adj[u])
    }

    /// Returns the in-neighbours of `u`. For undirected graphs this is the
    /// same set as [`Self::out_neighbors`].
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` is outside `[0, n)`.
    pub fn in_neighbors(&self, u: NodeId) -> Result<&HashSet<NodeId>> {
        self.check_node(u)?;
        if self.directed {
            Ok(&self.in_adj[u])
        } else {
            Ok(&self.out_adj[u])
        }
    }

    /// Returns the out-degree of `u`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` is outside `[0, n)`.
    pub fn out_degree(&self, u: NodeId) -> Result<usize> {
        Ok(self.out_neighbors(u)?.len())
    }

    /// Returns the in-degree of `u`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` is outside `[0, n)`.
    pub fn in_degree(&self, u: NodeId) -> Result<usize> {
        Ok(self.in_neighbors(u)?.len())
    }

    /// Returns the out-degree of `u` (an alias for [`Self::out_degree`]).
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] if `u` is outside `[0, n)`.
    pub fn degree(&self, u: NodeId) -> Result<usize> {
        self.out_degree(u)
    }

    /// Materialises a dense `n x n` adjacency matrix of edge weights (`0.0`
    /// where no edge exists). Intended only for small graphs: this is O(n^2)
    /// memory.
    #[must_use]
    pub fn adj_matrix(&self) -> Vec<Vec<f64>> {
        let mut matrix = vec![vec![0.0_f64; self.n]; self.n];
        for (&(u, v), &w) in &self.weight {
            matrix[u][v] = w;
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_sets_weight_and_increments_m() {
        let mut g = Graph::new(3, true);
        g.add_edge(0, 1, 0.5).expect("valid edge");
        assert_eq!(g.m(), 1);
        assert_eq!(g.weight(0, 1), Some(0.5));
        assert!(g.out_neighbors(0).expect("valid node").contains(&1));
        assert!(g.in_neighbors(1).expect("valid node").contains(&0));
    }

    #[test]
    fn re_adding_an_edge_updates_weight_without_incrementing_m() {
        let mut g = Graph::new(2, true);
        g.add_edge(0, 1, 0.1).expect("valid edge");
        g.add_edge(0, 1, 0.9).expect("valid edge");
        assert_eq!(g.m(), 1);
        assert_eq!(g.weight(0, 1), Some(0.9));
    }

    #[test]
    fn add_edge_rejects_out_of_bounds_nodes() {
        let mut g = Graph::new(2, true);
        let err = g.add_edge(0, 5, 1.0).expect_err("node 5 is out of bounds");
        assert_eq!(err.code(), crate::error::ImErrorCode::InvalidNode);
    }

    #[test]
    fn undirected_edges_mirror_weight_and_adjacency() {
        let mut g = Graph::new(2, false);
        g.add_edge(0, 1, 0.3).expect("valid edge");
        assert_eq!(g.weight(1, 0), Some(0.3));
        assert!(g.out_neighbors(1).expect("valid node").contains(&0));
        assert_eq!(g.in_neighbors(0).expect("valid node"), g.out_neighbors(0).expect("valid node"));
    }

    #[test]
    fn remove_edge_fails_when_absent() {
        let mut g = Graph::new(2, true);
        let err = g.remove_edge(0, 1).expect_err("edge does not exist");
        assert_eq!(err.code(), crate::error::ImErrorCode::EdgeNotFound);
    }

    #[test]
    fn remove_edge_decrements_m_and_clears_weight() {
        let mut g = Graph::new(2, true);
        g.add_edge(0, 1, 1.0).expect("valid edge");
        g.remove_edge(0, 1).expect("edge exists");
        assert_eq!(g.m(), 0);
        assert_eq!(g.weight(0, 1), None);
        assert!(!g.out_neighbors(0).expect("valid node").contains(&1));
    }

    #[test]
    fn add_edges_rejects_length_mismatch() {
        let mut g = Graph::new(3, true);
        let err = g
            .add_edges(&[(0, 1), (1, 2)], Some(&[1.0]))
            .expect_err("weights shorter than edges");
        assert_eq!(err.code(), crate::error::ImErrorCode::LengthMismatch);
    }

    #[test]
    fn adj_matrix_reflects_weights() {
        let g = Graph::from_edges(3, true, &[(0, 1), (1, 2)], Some(&[0.5, 0.25]))
            .expect("valid edges");
        let m = g.adj_matrix();
        assert_eq!(m[0][1], 0.5);
        assert_eq!(m[1][2], 0.25);
        assert_eq!(m[2][0], 0.0);
    }
}
