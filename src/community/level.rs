//! Dense working graph for one level of the Louvain hierarchy.
//!
//! Level 0 mirrors the input [`WeightedGraph`] with node ids mapped to dense
//! indices. Each later level is the super-graph of the previous one:
//! nodes are communities, inter-community weights are summed, intra-community
//! weight is folded into a per-node self-weight. A level exclusively owns its
//! storage; the previous level is dropped once its assignment is retained for
//! back-mapping.

use hashbrown::HashMap as FastMap;

use crate::graph::{NodeId, WeightedGraph};

/// One super-graph level. Indices are dense `0..node_count()`.
#[derive(Debug, Clone)]
pub(crate) struct LevelGraph {
    /// Inter-node adjacency, each list sorted by neighbor index.
    adjacency: Vec<Vec<(usize, f64)>>,
    /// Folded intra-community weight per node (zero at level 0; the graph
    /// type admits no self-loops).
    self_weight: Vec<f64>,
    /// Weighted degree per node, counting self-weight twice.
    degree: Vec<f64>,
    /// Total edge weight `m`, invariant across levels.
    total_weight: f64,
}

impl LevelGraph {
    /// Build level 0 from the input graph. Returns the level and the node-id
    /// order defining the dense indices (ascending, so index order matches id
    /// order).
    pub fn from_graph(graph: &WeightedGraph) -> (Self, Vec<NodeId>) {
        let order: Vec<NodeId> = graph.node_ids().collect();
        let index: FastMap<NodeId, usize> = order
            .iter()
            .copied()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        let n = order.len();
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (u, v, w) in graph.edges() {
            let (iu, iv) = (index[&u], index[&v]);
            adjacency[iu].push((iv, w));
            adjacency[iv].push((iu, w));
        }
        for list in &mut adjacency {
            list.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        }
        let degree: Vec<f64> = adjacency
            .iter()
            .map(|list| list.iter().map(|&(_, w)| w).sum())
            .collect();
        let level = Self {
            adjacency,
            self_weight: vec![0.0; n],
            degree,
            total_weight: graph.total_edge_weight(),
        };
        (level, order)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn degree(&self, node: usize) -> f64 {
        self.degree[node]
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degree
    }

    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    /// Collapse communities into super-nodes. `assignment` must be dense
    /// (`0..community_count`), one entry per node of this level.
    pub fn aggregate(&self, assignment: &[usize], community_count: usize) -> LevelGraph {
        debug_assert_eq!(assignment.len(), self.node_count());
        let mut self_weight = vec![0.0; community_count];
        for (node, &community) in assignment.iter().enumerate() {
            self_weight[community] += self.self_weight[node];
        }
        let mut inter: FastMap<(usize, usize), f64> = FastMap::new();
        for (u, list) in self.adjacency.iter().enumerate() {
            for &(v, w) in list.iter().filter(|&&(v, _)| u < v) {
                let (cu, cv) = (assignment[u], assignment[v]);
                if cu == cv {
                    self_weight[cu] += w;
                } else {
                    let key = if cu < cv { (cu, cv) } else { (cv, cu) };
                    *inter.entry(key).or_insert(0.0) += w;
                }
            }
        }
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); community_count];
        for (&(cu, cv), &w) in &inter {
            adjacency[cu].push((cv, w));
            adjacency[cv].push((cu, w));
        }
        for list in &mut adjacency {
            list.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        }
        let degree: Vec<f64> = adjacency
            .iter()
            .zip(&self_weight)
            .map(|(list, &sw)| list.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * sw)
            .collect();
        LevelGraph {
            adjacency,
            self_weight,
            degree,
            total_weight: self.total_weight,
        }
    }

    /// Modularity of `assignment` at this level:
    /// `Q = W_intra / m - resolution * sum_c S_c^2 / (4 m^2)`, with `W_intra`
    /// the intra-community weight (self-weights included) and `S_c` the summed
    /// degree of community `c`.
    pub fn modularity(&self, assignment: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight;
        if m <= 0.0 {
            return 0.0;
        }
        let community_count = assignment.iter().copied().max().map_or(0, |c| c + 1);
        let mut intra: f64 = self.self_weight.iter().sum();
        for (u, list) in self.adjacency.iter().enumerate() {
            for &(v, w) in list.iter().filter(|&&(v, _)| u < v) {
                if assignment[u] == assignment[v] {
                    intra += w;
                }
            }
        }
        let mut community_degree = vec![0.0; community_count];
        for (node, &community) in assignment.iter().enumerate() {
            community_degree[community] += self.degree[node];
        }
        let penalty: f64 = community_degree.iter().map(|s| s * s).sum();
        intra / m - resolution * penalty / (4.0 * m * m)
    }
}
