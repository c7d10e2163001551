//! Phase 1 of Louvain: greedy local node moving.
//!
//! Nodes start in singleton communities and are visited in ascending index
//! order, repeatedly, until a full sweep makes no move or the pass bound is
//! hit. A node moves only for a strictly positive modularity gain; on a tie
//! the lowest community id wins. Moves commit immediately, so each decision
//! sees its neighbors' up-to-date assignments; the sweep is deliberately
//! sequential to keep convergence deterministic.

use hashbrown::HashMap as FastMap;
use itertools::Itertools;

use super::LouvainConfig;
use super::level::LevelGraph;

/// Run local-moving sweeps on one level. Returns the community id per node;
/// ids are drawn from the initial singleton ids and are not dense.
pub(crate) fn local_moving(level: &LevelGraph, cfg: &LouvainConfig) -> Vec<usize> {
    let n = level.node_count();
    let mut assignment: Vec<usize> = (0..n).collect();
    let m = level.total_weight();
    if m <= 0.0 {
        return assignment;
    }
    let two_m = 2.0 * m;
    // Summed degree per community, indexed by community id (== initial node
    // index, so a flat vec suffices).
    let mut community_degree: Vec<f64> = level.degrees().to_vec();
    let mut weight_to: FastMap<usize, f64> = FastMap::new();

    for pass in 0..cfg.max_passes {
        let mut moves = 0usize;
        for node in 0..n {
            let current = assignment[node];
            let k_i = level.degree(node);

            // Edge weight from `node` to each adjacent community. Communities
            // it shares no edge with can only lose modularity.
            weight_to.clear();
            for &(neighbor, w) in level.neighbors(node) {
                *weight_to.entry(assignment[neighbor]).or_insert(0.0) += w;
            }
            if weight_to.is_empty() {
                // Isolated at this level; stays singleton.
                continue;
            }

            // Evaluate gains with the node lifted out of its community.
            community_degree[current] -= k_i;
            let stay = weight_to.get(&current).copied().unwrap_or(0.0)
                - cfg.resolution * community_degree[current] * k_i / two_m;

            let mut best_community = current;
            let mut best_gain = 0.0;
            for (community, w) in weight_to
                .iter()
                .map(|(&c, &w)| (c, w))
                .sorted_unstable_by_key(|&(c, _)| c)
            {
                if community == current {
                    continue;
                }
                let gain =
                    w - cfg.resolution * community_degree[community] * k_i / two_m - stay;
                // Strict inequality over ascending ids: ties keep the lowest.
                if gain > best_gain {
                    best_gain = gain;
                    best_community = community;
                }
            }

            community_degree[best_community] += k_i;
            if best_community != current {
                assignment[node] = best_community;
                moves += 1;
            }
        }
        log::trace!("local moving pass {pass}: {moves} moves");
        if moves == 0 {
            break;
        }
    }
    assignment
}

/// Renumber community ids to dense `0..k`, in order of first appearance over
/// ascending node index. Returns the dense assignment and `k`.
pub(crate) fn renumber(assignment: &[usize]) -> (Vec<usize>, usize) {
    let mut remap: FastMap<usize, usize> = FastMap::with_capacity(assignment.len());
    let mut dense = Vec::with_capacity(assignment.len());
    for &community in assignment {
        let next = remap.len();
        dense.push(*remap.entry(community).or_insert(next));
    }
    (dense, remap.len())
}
