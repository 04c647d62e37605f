//! Ritual script: where the leader goes and when its claws move.
//!
//! Authored as [`ScriptConfig`] with node keys, then resolved against a
//! graph into a [`RitualScript`] of node ids.  Resolution is the only place
//! a bad key is reported; the controller itself never fails.

use molt_core::{Cue, CueTable, NodeId, NodeKind, Point};
use molt_graph::{GraphError, PathGraph};

use crate::{RitualError, RitualResult};

/// Effect of a devotion cue on the leader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DevotionCue {
    Extend,
    Retract,
    /// Leave the altar along the exit route.
    Exit,
}

/// Authored ritual configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptConfig {
    /// Node the leader approaches along the lane.
    pub altar: String,
    /// Point the leader walks up to from the altar node.
    pub step_up: Point,
    /// Vertical distance to `step_up` that counts as arrived.
    pub step_up_tolerance: f32,
    /// Devotion timeline, in frames since devotion began.
    pub devotion: Vec<Cue<DevotionCue>>,
    /// Route from the altar back into the queue.  Must end at `rejoin`.
    pub exit_route: Vec<String>,
    /// Node where a finished leader is rotated to the back of the queue.
    pub rejoin: String,
    /// Node kind followers advance along.
    pub lane: NodeKind,
}

impl Default for ScriptConfig {
    /// The chapel ritual: three pinches at the altar, then out around the
    /// left return loop to rejoin at `aisle_115`.
    fn default() -> Self {
        Self {
            altar:             "aisle_60".to_owned(),
            step_up:           Point::new(61.0, 58.0),
            step_up_tolerance: 0.5,
            devotion: vec![
                Cue::new(40,  DevotionCue::Extend),
                Cue::new(80,  DevotionCue::Retract),
                Cue::new(100, DevotionCue::Extend),
                Cue::new(140, DevotionCue::Retract),
                Cue::new(170, DevotionCue::Extend),
                Cue::new(200, DevotionCue::Retract),
                Cue::new(260, DevotionCue::Exit),
            ],
            exit_route: ["altar_left", "return_mid", "return_back", "aisle_115"]
                .map(str::to_owned)
                .to_vec(),
            rejoin: "aisle_115".to_owned(),
            lane:   NodeKind::Aisle,
        }
    }
}

impl ScriptConfig {
    /// Resolve keys against `graph`.
    ///
    /// # Errors
    ///
    /// - [`RitualError::Graph`] for any unknown key.
    /// - [`RitualError::Config`] if the devotion timeline has no `Exit` cue
    ///   or the exit route does not end at the rejoin node.
    pub fn resolve(&self, graph: &PathGraph) -> RitualResult<RitualScript> {
        let lookup = |k: &str| graph.id_of(k).ok_or_else(|| GraphError::UnknownKey(k.to_owned()));
        let altar = lookup(&self.altar)?;
        let rejoin = lookup(&self.rejoin)?;
        let exit_route = graph.resolve_route(&self.exit_route)?;

        if exit_route.last() != Some(&rejoin) {
            return Err(RitualError::Config(format!(
                "exit route must end at rejoin node {:?}",
                self.rejoin
            )));
        }
        if !self.devotion.iter().any(|c| c.effect == DevotionCue::Exit) {
            return Err(RitualError::Config("devotion timeline has no exit cue".to_owned()));
        }
        if self.step_up_tolerance <= 0.0 {
            return Err(RitualError::Config(format!(
                "step-up tolerance must be positive, got {}",
                self.step_up_tolerance
            )));
        }

        Ok(RitualScript {
            altar,
            step_up: self.step_up,
            step_up_tolerance: self.step_up_tolerance,
            devotion: CueTable::new(self.devotion.clone()),
            exit_route,
            rejoin,
            lane: self.lane,
        })
    }
}

/// A [`ScriptConfig`] resolved against a specific graph.
#[derive(Clone, Debug, PartialEq)]
pub struct RitualScript {
    pub altar:             NodeId,
    pub step_up:           Point,
    pub step_up_tolerance: f32,
    pub devotion:          CueTable<DevotionCue>,
    pub exit_route:        Vec<NodeId>,
    pub rejoin:            NodeId,
    pub lane:              NodeKind,
}
