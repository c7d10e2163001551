//! In-memory undirected weighted graph.
//!
//! [`WeightedGraph`] is the input type for community detection: a fixed node
//! set with strictly positive edge weights, no self-loops, and no duplicate
//! edges. Loaders populate it once; the optimizer and metrics consume it
//! read-only and never mutate it.
//!
//! Node attributes (position, label) are opaque payload carried through for
//! exporters; no algorithm in this crate reads them.
//!
//! ## Determinism
//!
//! Adjacency is stored in ordered maps, so [`WeightedGraph::node_ids`],
//! [`WeightedGraph::neighbors`], and [`WeightedGraph::edges`] iterate in
//! ascending-id order. Neighbor iteration is restartable: calling
//! [`WeightedGraph::neighbors`] twice yields the same sequence with no cursor
//! side effects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CommunityError, EdgeRejection};

/// Stable node identifier. Loaders are expected to hand out dense ids
/// `0..N-1`, but any distinct ids are accepted.
pub type NodeId = usize;

/// Opaque per-node payload for downstream exporters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Spatial position, when the node set comes from an embedded network.
    pub position: Option<[f64; 3]>,
    /// Human-readable label.
    pub label: Option<String>,
}

/// Undirected weighted graph with an immutable-once-built node/edge set.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    attributes: BTreeMap<NodeId, NodeAttributes>,
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    total_weight: f64,
    edge_count: usize,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given attributes.
    ///
    /// # Errors
    /// [`CommunityError::DuplicateNode`] if `id` is already present.
    pub fn add_node(&mut self, id: NodeId, attrs: NodeAttributes) -> Result<(), CommunityError> {
        if self.attributes.contains_key(&id) {
            return Err(CommunityError::DuplicateNode(id));
        }
        self.attributes.insert(id, attrs);
        self.adjacency.insert(id, BTreeMap::new());
        Ok(())
    }

    /// Add an undirected edge `(u, v)` with weight `weight`.
    ///
    /// # Errors
    /// [`CommunityError::InvalidEdge`] on a self-loop, a weight that is not
    /// strictly positive and finite, a missing endpoint, or a duplicate edge.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<(), CommunityError> {
        let reject = |reason| CommunityError::InvalidEdge { u, v, reason };
        if u == v {
            return Err(reject(EdgeRejection::SelfLoop));
        }
        if !(weight > 0.0) || !weight.is_finite() {
            return Err(reject(EdgeRejection::NonPositiveWeight(weight)));
        }
        for endpoint in [u, v] {
            if !self.adjacency.contains_key(&endpoint) {
                return Err(reject(EdgeRejection::MissingEndpoint(endpoint)));
            }
        }
        if self.adjacency[&u].contains_key(&v) {
            return Err(reject(EdgeRejection::DuplicateEdge));
        }
        if let Some(neighbors) = self.adjacency.get_mut(&u) {
            neighbors.insert(v, weight);
        }
        if let Some(neighbors) = self.adjacency.get_mut(&v) {
            neighbors.insert(u, weight);
        }
        self.total_weight += weight;
        self.edge_count += 1;
        Ok(())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `id` was added to the graph.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.attributes.contains_key(&id)
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.attributes.keys().copied()
    }

    /// Attributes for `id`.
    ///
    /// # Errors
    /// [`CommunityError::UnknownNode`] if `id` is absent.
    pub fn attributes(&self, id: NodeId) -> Result<&NodeAttributes, CommunityError> {
        self.attributes
            .get(&id)
            .ok_or(CommunityError::UnknownNode(id))
    }

    /// Sum of weights of edges incident to `node`. Returns `0.0` for an
    /// isolated node; that is a valid state, not an error.
    ///
    /// # Errors
    /// [`CommunityError::UnknownNode`] if `node` is absent.
    pub fn weighted_degree(&self, node: NodeId) -> Result<f64, CommunityError> {
        let neighbors = self
            .adjacency
            .get(&node)
            .ok_or(CommunityError::UnknownNode(node))?;
        Ok(neighbors.values().sum())
    }

    /// Sum over all edges of their weight; the modularity normalization
    /// constant `m`.
    pub fn total_edge_weight(&self) -> f64 {
        self.total_weight
    }

    /// Neighbors of `node` as `(neighbor, weight)` pairs in ascending neighbor
    /// order. The iterator is finite and restartable.
    ///
    /// # Errors
    /// [`CommunityError::UnknownNode`] if `node` is absent.
    pub fn neighbors(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = (NodeId, f64)> + '_, CommunityError> {
        let neighbors = self
            .adjacency
            .get(&node)
            .ok_or(CommunityError::UnknownNode(node))?;
        Ok(neighbors.iter().map(|(&v, &w)| (v, w)))
    }

    /// All undirected edges, each reported once as `(u, v, w)` with `u < v`,
    /// in ascending `(u, v)` order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        use std::ops::Bound;
        self.adjacency.iter().flat_map(|(&u, neighbors)| {
            neighbors
                .range((Bound::Excluded(u), Bound::Unbounded))
                .map(move |(&v, &w)| (u, v, w))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_nodes(n: usize) -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for id in 0..n {
            g.add_node(id, NodeAttributes::default()).unwrap();
        }
        g
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut g = graph_with_nodes(1);
        assert_eq!(
            g.add_node(0, NodeAttributes::default()),
            Err(CommunityError::DuplicateNode(0))
        );
    }

    #[test]
    fn edge_invariants_enforced() {
        let mut g = graph_with_nodes(2);
        assert!(matches!(
            g.add_edge(0, 0, 1.0),
            Err(CommunityError::InvalidEdge {
                reason: EdgeRejection::SelfLoop,
                ..
            })
        ));
        assert!(matches!(
            g.add_edge(0, 1, 0.0),
            Err(CommunityError::InvalidEdge {
                reason: EdgeRejection::NonPositiveWeight(_),
                ..
            })
        ));
        assert!(matches!(
            g.add_edge(0, 1, -2.5),
            Err(CommunityError::InvalidEdge {
                reason: EdgeRejection::NonPositiveWeight(_),
                ..
            })
        ));
        assert!(matches!(
            g.add_edge(0, 2, 1.0),
            Err(CommunityError::InvalidEdge {
                reason: EdgeRejection::MissingEndpoint(2),
                ..
            })
        ));
        g.add_edge(0, 1, 1.0).unwrap();
        // Same edge from either direction is a duplicate.
        assert!(matches!(
            g.add_edge(1, 0, 2.0),
            Err(CommunityError::InvalidEdge {
                reason: EdgeRejection::DuplicateEdge,
                ..
            })
        ));
    }

    #[test]
    fn degrees_and_total_weight() {
        let mut g = graph_with_nodes(4);
        g.add_edge(0, 1, 1.5).unwrap();
        g.add_edge(1, 2, 2.0).unwrap();
        assert_eq!(g.weighted_degree(0).unwrap(), 1.5);
        assert_eq!(g.weighted_degree(1).unwrap(), 3.5);
        assert_eq!(g.weighted_degree(3).unwrap(), 0.0);
        assert_eq!(g.total_edge_weight(), 3.5);
        assert_eq!(
            g.weighted_degree(9),
            Err(CommunityError::UnknownNode(9))
        );

        // Handshake: degree sum equals twice the total edge weight.
        let degree_sum: f64 = g
            .node_ids()
            .map(|n| g.weighted_degree(n).unwrap())
            .sum();
        assert_eq!(degree_sum, 2.0 * g.total_edge_weight());
    }

    #[test]
    fn neighbors_restartable_and_ordered() {
        let mut g = graph_with_nodes(4);
        g.add_edge(2, 0, 1.0).unwrap();
        g.add_edge(2, 3, 0.5).unwrap();
        g.add_edge(2, 1, 2.0).unwrap();
        let first: Vec<_> = g.neighbors(2).unwrap().collect();
        let second: Vec<_> = g.neighbors(2).unwrap().collect();
        assert_eq!(first, vec![(0, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(first, second);
    }

    #[test]
    fn edges_reported_once() {
        let mut g = graph_with_nodes(3);
        g.add_edge(1, 0, 1.0).unwrap();
        g.add_edge(2, 1, 2.0).unwrap();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1, 1.0), (1, 2, 2.0)]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn edges_tolerate_extreme_node_ids() {
        // Ids need not be dense; the largest representable id must not trip
        // edge enumeration.
        let mut g = WeightedGraph::new();
        g.add_node(usize::MAX, NodeAttributes::default()).unwrap();
        g.add_node(0, NodeAttributes::default()).unwrap();
        g.add_edge(usize::MAX, 0, 1.5).unwrap();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, usize::MAX, 1.5)]);
        assert_eq!(g.weighted_degree(usize::MAX).unwrap(), 1.5);
    }
}
