use louvain_communities::prelude::*;

fn graph_of(n: usize, edges: &[(usize, usize, f64)]) -> WeightedGraph {
    let mut g = WeightedGraph::new();
    for id in 0..n {
        g.add_node(id, NodeAttributes::default()).unwrap();
    }
    for &(u, v, w) in edges {
        g.add_edge(u, v, w).unwrap();
    }
    g
}

fn clique(edges: &mut Vec<(usize, usize, f64)>, nodes: &[usize], weight: f64) {
    for (i, &u) in nodes.iter().enumerate() {
        for &v in &nodes[(i + 1)..] {
            edges.push((u, v, weight));
        }
    }
}

#[test]
fn two_disconnected_triangles() {
    let mut edges = Vec::new();
    clique(&mut edges, &[0, 1, 2], 1.0);
    clique(&mut edges, &[3, 4, 5], 1.0);
    let g = graph_of(6, &edges);

    let partition = detect_communities(&g, 1.0).unwrap();
    assert_eq!(partition.community_count(), 2);
    let first = partition.community_of(0).unwrap();
    let second = partition.community_of(3).unwrap();
    assert_ne!(first, second);
    assert_eq!(
        partition.members_of(first).iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        partition.members_of(second).iter().copied().collect::<Vec<_>>(),
        vec![3, 4, 5]
    );

    let coefficients = participation_coefficients(&g, &partition).unwrap();
    for node in 0..6 {
        assert_eq!(coefficients[&node], 0.0, "node {node} is purely intra");
    }
}

#[test]
fn single_edge_with_isolated_node() {
    let g = graph_of(3, &[(0, 1, 5.0)]);
    let partition = detect_communities(&g, 1.0).unwrap();
    assert_eq!(partition.len(), 3);
    assert!(partition.community_count() <= 3);
    // The isolated node is a singleton regardless of how {0, 1} merged.
    let lonely = partition.community_of(2).unwrap();
    assert_eq!(partition.members_of(lonely).len(), 1);

    let coefficients = participation_coefficients(&g, &partition).unwrap();
    assert_eq!(coefficients[&2], 0.0);
}

#[test]
fn barbell_bridge_endpoints_participate_most() {
    // Two dense 4-cliques joined by one weak bridge between nodes 3 and 4.
    let mut edges = Vec::new();
    clique(&mut edges, &[0, 1, 2, 3], 1.0);
    clique(&mut edges, &[4, 5, 6, 7], 1.0);
    edges.push((3, 4, 0.01));
    let g = graph_of(8, &edges);

    let partition = detect_communities(&g, 1.0).unwrap();
    assert_eq!(partition.community_count(), 2);
    let left = partition.community_of(0).unwrap();
    let right = partition.community_of(4).unwrap();
    assert_ne!(left, right);
    assert_eq!(
        partition.members_of(left).iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(
        partition.members_of(right).iter().copied().collect::<Vec<_>>(),
        vec![4, 5, 6, 7]
    );

    let coefficients = participation_coefficients(&g, &partition).unwrap();
    for interior in [0, 1, 2] {
        assert!(
            coefficients[&3] > coefficients[&interior],
            "bridge endpoint 3 must out-participate node {interior}"
        );
    }
    for interior in [5, 6, 7] {
        assert!(
            coefficients[&4] > coefficients[&interior],
            "bridge endpoint 4 must out-participate node {interior}"
        );
    }
}

#[test]
fn resolution_default_matches_explicit_config() {
    let mut edges = Vec::new();
    clique(&mut edges, &[0, 1, 2], 1.0);
    clique(&mut edges, &[3, 4, 5], 1.0);
    edges.push((2, 3, 0.5));
    let g = graph_of(6, &edges);

    let via_resolution = detect_communities(&g, 1.0).unwrap();
    let via_config = detect_communities_with(&g, &LouvainConfig::default()).unwrap();
    assert_eq!(via_resolution, via_config);
}

#[test]
fn detection_leaves_the_graph_untouched() {
    let g = graph_of(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
    let before: Vec<_> = g.edges().collect();
    let _ = detect_communities(&g, 1.0).unwrap();
    let after: Vec<_> = g.edges().collect();
    assert_eq!(before, after);
    assert_eq!(g.total_edge_weight(), 3.0);
}

#[test]
fn detected_partition_scores_at_least_singletons() {
    let mut edges = Vec::new();
    clique(&mut edges, &[0, 1, 2, 3], 1.0);
    clique(&mut edges, &[4, 5, 6], 2.0);
    edges.push((0, 4, 0.1));
    let g = graph_of(7, &edges);

    let singletons = Partition::from_assignment((0..7).map(|n| (n, n)));
    let detected = detect_communities(&g, 1.0).unwrap();
    let q_single = modularity(&g, &singletons, 1.0).unwrap();
    let q_detected = modularity(&g, &detected, 1.0).unwrap();
    assert!(q_detected >= q_single);
}
