//! Node-to-community assignment produced by community detection.
//!
//! A [`Partition`] is immutable once built: the optimizer constructs it, the
//! caller queries it. Community ids are arbitrary integers, unique per
//! community; the optimizer hands out dense ids `0..k` but
//! [`Partition::from_assignment`] accepts any.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CommunityError;
use crate::graph::NodeId;

/// Community identifier.
pub type CommunityId = usize;

static EMPTY_MEMBERS: BTreeSet<NodeId> = BTreeSet::new();

/// Mapping from node id to community id, with per-community member queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    assignment: BTreeMap<NodeId, CommunityId>,
    members: BTreeMap<CommunityId, BTreeSet<NodeId>>,
}

impl Partition {
    /// Build a partition from `(node, community)` pairs. A node listed twice
    /// keeps its last assignment.
    pub fn from_assignment<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, CommunityId)>,
    {
        let assignment: BTreeMap<NodeId, CommunityId> = pairs.into_iter().collect();
        let mut members: BTreeMap<CommunityId, BTreeSet<NodeId>> = BTreeMap::new();
        for (&node, &community) in &assignment {
            members.entry(community).or_default().insert(node);
        }
        Self { assignment, members }
    }

    /// Community assigned to `node`.
    ///
    /// # Errors
    /// [`CommunityError::UnknownNode`] if the partition does not cover `node`.
    pub fn community_of(&self, node: NodeId) -> Result<CommunityId, CommunityError> {
        self.assignment
            .get(&node)
            .copied()
            .ok_or(CommunityError::UnknownNode(node))
    }

    /// Members of `community`; the empty set for an unused community id.
    pub fn members_of(&self, community: CommunityId) -> &BTreeSet<NodeId> {
        self.members.get(&community).unwrap_or(&EMPTY_MEMBERS)
    }

    /// Number of distinct communities.
    pub fn community_count(&self) -> usize {
        self.members.len()
    }

    /// Number of covered nodes.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether the partition covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Covered `(node, community)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, CommunityId)> + '_ {
        self.assignment.iter().map(|(&n, &c)| (n, c))
    }
}
