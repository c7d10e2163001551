//! # louvain-communities
//!
//! louvain-communities detects community structure in weighted undirected
//! graphs by greedy modularity optimization (the Louvain method) and derives
//! per-node participation coefficients from the resulting partition. It is
//! aimed at network-analysis pipelines where a loader builds the graph, this
//! crate assigns communities and scores nodes, and an exporter writes the
//! results downstream.
//!
//! ## Determinism
//!
//! Detection is a pure function of the input graph and configuration: nodes
//! are swept in a fixed ascending order and gain ties break toward the lowest
//! community id, so repeated runs produce identical partitions. Modularity
//! optimization is NP-hard; the result is a deterministic heuristic optimum,
//! not necessarily unique among optima.
//!
//! ## Usage
//!
//! ```
//! use louvain_communities::prelude::*;
//!
//! let mut graph = WeightedGraph::new();
//! for id in 0..4 {
//!     graph.add_node(id, NodeAttributes::default())?;
//! }
//! graph.add_edge(0, 1, 1.0)?;
//! graph.add_edge(1, 2, 0.5)?;
//! graph.add_edge(2, 3, 2.0)?;
//!
//! let partition = detect_communities(&graph, 1.0)?;
//! let coefficients = participation_coefficients(&graph, &partition)?;
//! assert_eq!(coefficients.len(), graph.node_count());
//! # Ok::<(), louvain_communities::CommunityError>(())
//! ```
//!
//! Enable the `parallel` feature to compute participation coefficients with
//! rayon; results are identical to the sequential path.

pub mod community;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod partition;

pub use error::CommunityError;

/// A convenient prelude importing the working set.
pub mod prelude {
    pub use crate::community::{LouvainConfig, detect_communities, detect_communities_with};
    pub use crate::error::{CommunityError, EdgeRejection};
    pub use crate::graph::{NodeAttributes, NodeId, WeightedGraph};
    pub use crate::metrics::{modularity, participation_coefficients};
    pub use crate::partition::{CommunityId, Partition};
}
