//! Unified error type for louvain-communities public APIs.
//!
//! Every failure surfaced by this crate is a construction-time or precondition
//! violation: bad graph input, a query for a node that does not exist, or a
//! partition that does not cover the graph it is paired with. None of these are
//! transient; callers are expected to fix the input rather than retry. An
//! isolated node is explicitly a valid state, not an error.

use thiserror::Error;

use crate::graph::NodeId;

/// Reason an edge insertion was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EdgeRejection {
    /// Self-loops are not graph edges.
    #[error("self-loop")]
    SelfLoop,
    /// Weights must be strictly positive and finite.
    #[error("non-positive or non-finite weight {0}")]
    NonPositiveWeight(f64),
    /// One of the endpoints was never added to the graph.
    #[error("endpoint {0} not in graph")]
    MissingEndpoint(NodeId),
    /// The edge is already present; duplicate insertion is an error, never
    /// last-write-wins or weight accumulation.
    #[error("edge already present")]
    DuplicateEdge,
}

/// Unified error type for graph construction, community detection, and metrics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommunityError {
    /// A node id was inserted twice.
    #[error("node {0} already present")]
    DuplicateNode(NodeId),
    /// An edge insertion violated a graph invariant.
    #[error("invalid edge ({u}, {v}): {reason}")]
    InvalidEdge {
        u: NodeId,
        v: NodeId,
        #[source]
        reason: EdgeRejection,
    },
    /// A query named a node that is not present.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Community detection requires at least one node.
    #[error("graph has no nodes")]
    EmptyGraph,
    /// The partition does not assign a community to every graph node.
    #[error("partition missing assignment for node {0}")]
    PartitionMismatch(NodeId),
}
