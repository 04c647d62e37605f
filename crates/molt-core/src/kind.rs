//! Category enums shared by the graph, agent, and output crates.
//!
//! All three carry `as_str` labels used for CSV columns and layout parsing.

use std::str::FromStr;

use crate::MoltError;

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// Category tag of a graph node.
///
/// Informational for movement: reservation and occupancy rules are the same
/// for every kind.  The procession lane is identified by kind (`Aisle`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    #[default]
    Walkable,
    Aisle,
    Seat,
    Altar,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Walkable => "walkable",
            NodeKind::Aisle    => "aisle",
            NodeKind::Seat     => "seat",
            NodeKind::Altar    => "altar",
        }
    }
}

impl FromStr for NodeKind {
    type Err = MoltError;

    /// Case-insensitive; accepts the labels produced by [`NodeKind::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walkable" => Ok(NodeKind::Walkable),
            "aisle"    => Ok(NodeKind::Aisle),
            "seat"     => Ok(NodeKind::Seat),
            "altar"    => Ok(NodeKind::Altar),
            other => Err(MoltError::Parse(format!(
                "invalid node kind {other:?}: expected walkable, aisle, seat, or altar"
            ))),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AgentRole ─────────────────────────────────────────────────────────────────

/// The choreography role of an agent, independent of how it is drawn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentRole {
    /// Member of the rotating procession queue (leader or follower).
    Procession,
    /// Seated; never moves, gestures when picked by the ambient timer.
    #[default]
    Congregation,
    /// Paces back and forth behind the pulpit.
    Preacher,
    /// Fixed decoration (the figure on the cross).
    Icon,
}

impl AgentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::Procession   => "procession",
            AgentRole::Congregation => "congregation",
            AgentRole::Preacher     => "preacher",
            AgentRole::Icon         => "icon",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Skin ──────────────────────────────────────────────────────────────────────

/// Visual skin of an agent.  Only the render boundary looks at this.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skin {
    #[default]
    Moltbot,
    Lobster,
}

impl Skin {
    pub fn as_str(self) -> &'static str {
        match self {
            Skin::Moltbot => "moltbot",
            Skin::Lobster => "lobster",
        }
    }
}

impl std::fmt::Display for Skin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
