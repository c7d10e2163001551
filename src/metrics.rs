//! Partition quality and per-node metrics.
//!
//! [`modularity`] scores a partition against the objective the optimizer
//! maximizes; [`participation_coefficients`] derives the per-node hub metric
//! from a graph/partition pair. Both are pure functions over their inputs and
//! require the partition to cover every graph node.

use std::collections::BTreeMap;

use hashbrown::HashMap as FastMap;

use crate::error::CommunityError;
use crate::graph::{NodeId, WeightedGraph};
use crate::partition::{CommunityId, Partition};

/// Fail with [`CommunityError::PartitionMismatch`] unless `partition` assigns
/// a community to every node of `graph`.
fn ensure_coverage(graph: &WeightedGraph, partition: &Partition) -> Result<(), CommunityError> {
    for node in graph.node_ids() {
        if partition.community_of(node).is_err() {
            return Err(CommunityError::PartitionMismatch(node));
        }
    }
    Ok(())
}

/// Modularity `Q` of `partition` on `graph` at the given resolution.
///
/// `Q = (1/2m) Σ_{i,j} [A_ij − γ k_i k_j / (2m)] δ(c_i, c_j)`; an edgeless
/// graph scores `0.0`.
///
/// # Errors
/// [`CommunityError::PartitionMismatch`] if `partition` misses a graph node.
pub fn modularity(
    graph: &WeightedGraph,
    partition: &Partition,
    resolution: f64,
) -> Result<f64, CommunityError> {
    ensure_coverage(graph, partition)?;
    let m = graph.total_edge_weight();
    if m <= 0.0 {
        return Ok(0.0);
    }
    let mut intra = 0.0;
    for (u, v, w) in graph.edges() {
        if partition.community_of(u)? == partition.community_of(v)? {
            intra += w;
        }
    }
    let mut community_degree: FastMap<CommunityId, f64> = FastMap::new();
    for node in graph.node_ids() {
        *community_degree
            .entry(partition.community_of(node)?)
            .or_insert(0.0) += graph.weighted_degree(node)?;
    }
    let penalty: f64 = community_degree.values().map(|s| s * s).sum();
    Ok(intra / m - resolution * penalty / (4.0 * m * m))
}

/// Participation coefficient of one node: `1 − (k_in / k)²`, where `k` is the
/// weighted degree and `k_in` the summed weight of edges to same-community
/// neighbors. Isolated nodes score `0.0`.
fn coefficient(
    graph: &WeightedGraph,
    partition: &Partition,
    node: NodeId,
) -> Result<f64, CommunityError> {
    let degree = graph.weighted_degree(node)?;
    if degree == 0.0 {
        return Ok(0.0);
    }
    let community = partition.community_of(node)?;
    let mut internal = 0.0;
    for (neighbor, w) in graph.neighbors(node)? {
        if partition.community_of(neighbor)? == community {
            internal += w;
        }
    }
    Ok(1.0 - (internal / degree).powi(2))
}

/// Participation coefficient for every node of `graph`.
///
/// Each value lies in `[0, 1]`: `0.0` for nodes whose weight is entirely
/// intra-community (and for isolated nodes), rising as weight spreads over
/// foreign communities, up to exactly `1.0` for an edged node whose own
/// community holds none of its weight (a singleton with edges).
///
/// # Errors
/// [`CommunityError::PartitionMismatch`] if `partition` misses a graph node.
#[cfg(not(feature = "parallel"))]
pub fn participation_coefficients(
    graph: &WeightedGraph,
    partition: &Partition,
) -> Result<BTreeMap<NodeId, f64>, CommunityError> {
    ensure_coverage(graph, partition)?;
    graph
        .node_ids()
        .map(|node| Ok((node, coefficient(graph, partition, node)?)))
        .collect()
}

/// Participation coefficient for every node of `graph`.
///
/// Each value lies in `[0, 1]`; see the sequential rendition for the exact
/// range semantics. Per-node work is read-only and independent, so the
/// parallel result is identical to the sequential path.
///
/// # Errors
/// [`CommunityError::PartitionMismatch`] if `partition` misses a graph node.
#[cfg(feature = "parallel")]
pub fn participation_coefficients(
    graph: &WeightedGraph,
    partition: &Partition,
) -> Result<BTreeMap<NodeId, f64>, CommunityError> {
    use rayon::prelude::*;
    ensure_coverage(graph, partition)?;
    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let pairs: Vec<(NodeId, f64)> = nodes
        .into_par_iter()
        .map(|node| Ok((node, coefficient(graph, partition, node)?)))
        .collect::<Result<_, CommunityError>>()?;
    Ok(pairs.into_iter().collect())
}
