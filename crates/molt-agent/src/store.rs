//! The `AgentStore` — all agents in collection order.

use molt_core::{AgentId, AgentRole, NodeId, Skin};
use molt_graph::PathGraph;
use tracing::debug;

use crate::{Agent, AgentError, AgentResult};

/// Owns every agent.  `AgentId` is the index into the store and the order
/// of insertion is the order agents are updated and drawn in.
#[derive(Debug, Default, Clone)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Create an agent on `node` and mark the node occupied.
    ///
    /// # Errors
    ///
    /// [`AgentError::Graph`] if the node is unknown or already occupied.
    pub fn spawn(
        &mut self,
        graph: &mut PathGraph,
        node:  NodeId,
        role:  AgentRole,
        skin:  Skin,
    ) -> AgentResult<AgentId> {
        let id = AgentId::from_index(self.agents.len());
        graph.occupy(node, id)?;
        // occupy succeeded, so the node exists.
        let pos = graph.node(node).map(|n| n.pos).unwrap_or_default();
        debug!(agent = %id, node = graph.key_of(node), %role, "spawned");
        self.agents.push(Agent::new(id, role, skin, node, pos));
        Ok(id)
    }

    /// [`spawn`](Self::spawn) by node key.
    pub fn spawn_at(
        &mut self,
        graph: &mut PathGraph,
        key:   &str,
        role:  AgentRole,
        skin:  Skin,
    ) -> AgentResult<AgentId> {
        let node = graph.id_of(key).ok_or_else(|| AgentError::UnknownNode(key.to_owned()))?;
        self.spawn(graph, node, role, skin)
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.agents.iter_mut()
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len()).map(AgentId::from_index)
    }

    /// Ids of all agents with `role`, in collection order.
    pub fn with_role(&self, role: AgentRole) -> Vec<AgentId> {
        self.agents.iter().filter(|a| a.role == role).map(|a| a.id).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Check that the graph's occupancy claims and the agents agree:
    ///
    /// - each placed agent is the occupant of its current node;
    /// - every occupant stands on that node, every reservation belongs to
    ///   an agent moving onto that node;
    /// - no node is occupied and reserved at once.
    ///
    /// Intended for tests and debug runs; the simulation itself never
    /// needs it.
    pub fn audit(&self, graph: &PathGraph) -> AgentResult<()> {
        for agent in &self.agents {
            let Some(node_id) = agent.current_node else { continue };
            let node = graph.node(node_id).ok_or(AgentError::Audit {
                node:   node_id,
                detail: format!("{} stands on a node missing from the graph", agent.id),
            })?;
            if node.occupant != Some(agent.id) {
                return Err(AgentError::Audit {
                    node:   node_id,
                    detail: format!("{} stands here but occupant is {:?}", agent.id, node.occupant),
                });
            }
        }

        for node in graph.nodes() {
            if node.occupant.is_some() && node.reserved_by.is_some() {
                return Err(AgentError::Audit {
                    node:   node.id,
                    detail: format!("{} is both occupied and reserved", node.key),
                });
            }
            if let Some(occupant) = node.occupant {
                let here = self.get(occupant).and_then(|a| a.current_node);
                if here != Some(node.id) {
                    return Err(AgentError::Audit {
                        node:   node.id,
                        detail: format!("occupant {occupant} is recorded at {here:?}"),
                    });
                }
            }
            if let Some(holder) = node.reserved_by {
                let heading = self.get(holder).and_then(|a| a.next_node);
                if heading != Some(node.id) {
                    return Err(AgentError::Audit {
                        node:   node.id,
                        detail: format!("reservation by {holder} who is heading to {heading:?}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::ops::Index<AgentId> for AgentStore {
    type Output = Agent;

    fn index(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }
}
