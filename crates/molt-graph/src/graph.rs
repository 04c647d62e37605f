//! The `PathGraph` — node storage, key index, and occupancy primitives.
//!
//! # Data layout
//!
//! Nodes live in a `Vec<Node>` indexed by `NodeId`; a `FxHashMap` maps the
//! authored string keys to ids.  Adjacency is a small `Vec<NodeId>` per node:
//! chapel layouts have at most a handful of neighbors per node, so a linear
//! `contains` check for idempotent `connect` is cheaper than a set.

use rustc_hash::FxHashMap;
use tracing::trace;

use molt_core::{AgentId, NodeId, NodeKind, Point};

use crate::{GraphError, GraphResult, Node};

/// Undirected graph of canvas positions with per-node occupancy claims.
#[derive(Debug, Default, Clone)]
pub struct PathGraph {
    nodes: Vec<Node>,
    index: FxHashMap<String, NodeId>,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node and return its `NodeId` (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if `key` is already present.  The
    /// existing node is left untouched.
    pub fn add_node(
        &mut self,
        key:  impl Into<String>,
        x:    f32,
        y:    f32,
        kind: NodeKind,
    ) -> GraphResult<NodeId> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(GraphError::DuplicateNode(key));
        }
        let id = NodeId::from_index(self.nodes.len());
        self.index.insert(key.clone(), id);
        self.nodes.push(Node::new(id, key, Point::new(x, y), kind));
        Ok(id)
    }

    /// Connect two nodes by key, in both directions.
    ///
    /// Returns `false` and changes nothing if either key is unknown or both
    /// keys name the same node.  Connecting an already-connected pair is a
    /// no-op that still returns `true`.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        match (self.id_of(a), self.id_of(b)) {
            (Some(a), Some(b)) => self.connect_ids(a, b),
            _ => false,
        }
    }

    /// [`connect`](Self::connect) by id.
    pub fn connect_ids(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || a.index() >= self.nodes.len() || b.index() >= self.nodes.len() {
            return false;
        }
        let na = &mut self.nodes[a.index()].neighbors;
        if !na.contains(&b) {
            na.push(b);
        }
        let nb = &mut self.nodes[b.index()].neighbors;
        if !nb.contains(&a) {
            nb.push(a);
        }
        true
    }

    /// Connect consecutive keys of `chain` (`chain[0]–chain[1]`, …).
    ///
    /// Returns the number of pairs that were connected.
    pub fn connect_chain<S: AsRef<str>>(&mut self, chain: &[S]) -> usize {
        chain
            .windows(2)
            .filter(|pair| self.connect(pair[0].as_ref(), pair[1].as_ref()))
            .count()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Node by key; `None` if it was never added.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.id_of(key).map(|id| &self.nodes[id.index()])
    }

    #[inline]
    pub fn id_of(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Node by id; `None` for out-of-range or `NodeId::INVALID`.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Key of a node, or `"?"` for unknown ids (log-friendly).
    pub fn key_of(&self, id: NodeId) -> &str {
        self.node(id).map_or("?", |n| n.key.as_str())
    }

    /// Iterator over the neighbors of `id` (empty for unknown ids).
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id)
            .map(|n| n.neighbors.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&nb| &self.nodes[nb.index()])
    }

    /// Resolve authored keys into a route.
    ///
    /// Routes are configuration, so an unknown key is an error here rather
    /// than a silent hole in the route.
    pub fn resolve_route<S: AsRef<str>>(&self, keys: &[S]) -> GraphResult<Vec<NodeId>> {
        keys.iter()
            .map(|k| {
                let k = k.as_ref();
                self.id_of(k).ok_or_else(|| GraphError::UnknownKey(k.to_owned()))
            })
            .collect()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected connections.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// `true` if `agent` may reserve `id` right now (see
    /// [`Node::is_claimable_by`]).  Unknown ids are never claimable.
    #[inline]
    pub fn is_claimable(&self, id: NodeId, agent: AgentId) -> bool {
        self.node(id).is_some_and(|n| n.is_claimable_by(agent))
    }

    /// Reserve `id` for `agent` if it is claimable.  Returns whether the
    /// reservation is now held by `agent`.
    pub fn try_reserve(&mut self, id: NodeId, agent: AgentId) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.is_claimable_by(agent) => {
                node.reserved_by = Some(agent);
                true
            }
            Some(node) => {
                trace!(
                    node = %node.key,
                    %agent,
                    occupant = ?node.occupant,
                    reserved_by = ?node.reserved_by,
                    "reservation contended"
                );
                false
            }
            None => false,
        }
    }

    /// Drop `agent`'s reservation on `id`, if it holds one.
    pub fn release_reservation(&mut self, id: NodeId, agent: AgentId) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            if node.reserved_by == Some(agent) {
                node.reserved_by = None;
            }
        }
    }

    /// Place `agent` on `id` at setup time.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] for unknown ids and
    /// [`GraphError::Occupied`] when another agent already stands there.
    pub fn occupy(&mut self, id: NodeId, agent: AgentId) -> GraphResult<()> {
        let node = self.nodes.get_mut(id.index()).ok_or(GraphError::NodeNotFound(id))?;
        match node.occupant {
            Some(by) if by != agent => Err(GraphError::Occupied { node: id, by }),
            _ => {
                node.occupant = Some(agent);
                Ok(())
            }
        }
    }

    /// Finalize `agent`'s move from `from` onto `to` in one step:
    /// release `from` (only if `agent` is its occupant), occupy `to`, and
    /// clear `to`'s reservation.
    pub fn complete_move(&mut self, from: Option<NodeId>, to: NodeId, agent: AgentId) {
        if let Some(old) = from.and_then(|f| self.nodes.get_mut(f.index())) {
            if old.occupant == Some(agent) {
                old.occupant = None;
            }
        }
        if let Some(new) = self.nodes.get_mut(to.index()) {
            new.occupant = Some(agent);
            new.reserved_by = None;
        }
    }
}
