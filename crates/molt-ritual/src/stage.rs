//! The mutable frame view passed to every director.

use molt_agent::AgentStore;
use molt_core::{Frame, SimRng};
use molt_graph::PathGraph;

/// Everything a [`Director`](crate::Director) may touch during one frame.
///
/// Built by `molt-sim` from disjoint fields of the `Sim`, so directors get
/// mutable access to agents and graph without borrowing the whole
/// simulation.
pub struct Stage<'a> {
    pub frame:  Frame,
    pub graph:  &'a mut PathGraph,
    pub agents: &'a mut AgentStore,
    pub rng:    &'a mut SimRng,
}

impl<'a> Stage<'a> {
    #[inline]
    pub fn new(
        frame:  Frame,
        graph:  &'a mut PathGraph,
        agents: &'a mut AgentStore,
        rng:    &'a mut SimRng,
    ) -> Self {
        Self { frame, graph, agents, rng }
    }
}
