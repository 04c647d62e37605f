//! A single graph node.

use molt_core::{AgentId, NodeId, NodeKind, Point};

/// A fixed point of the movement graph.
///
/// Fields are `pub` for read access by renderers and tests.  Mutate the
/// occupancy claims only through [`PathGraph`](crate::PathGraph) so the
/// reserve-then-occupy ordering is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Unique, human-authored key (`"aisle_60"`, `"pulpit"`, …).
    pub key: String,
    pub pos: Point,
    pub kind: NodeKind,
    /// Adjacent nodes.  Symmetric and free of duplicates.
    pub neighbors: Vec<NodeId>,
    /// Agent currently standing on this node.
    pub occupant: Option<AgentId>,
    /// Agent that has claimed the right to move onto this node next.
    pub reserved_by: Option<AgentId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, key: String, pos: Point, kind: NodeKind) -> Self {
        Self {
            id,
            key,
            pos,
            kind,
            neighbors:   Vec::new(),
            occupant:    None,
            reserved_by: None,
        }
    }

    /// `true` if nobody stands on the node and nobody has reserved it.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none() && self.reserved_by.is_none()
    }

    /// `true` if `agent` may reserve this node: it is unoccupied and either
    /// unreserved or already reserved by `agent`.
    #[inline]
    pub fn is_claimable_by(&self, agent: AgentId) -> bool {
        self.occupant.is_none() && self.reserved_by.is_none_or(|holder| holder == agent)
    }
}
