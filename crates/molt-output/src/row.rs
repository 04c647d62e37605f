//! Plain data row types written by output backends.

/// One agent's state at a snapshot frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFrameRow {
    pub agent_id:  u32,
    pub frame:     u64,
    pub role:      &'static str,
    pub x:         f32,
    pub y:         f32,
    pub state:     &'static str,
    /// Key of the node the agent occupies; empty if it has none.
    pub node:      String,
    pub claws_out: bool,
    pub gesturing: bool,
}

/// Counters for one simulated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    pub frame:        u64,
    /// Nominal seconds since frame 0.
    pub elapsed_secs: f64,
    /// Ritual phase label; empty without a procession.
    pub phase:        &'static str,
    pub leader:       Option<u32>,
    pub arrivals:     u64,
    pub travelling:   u64,
    pub waiting:      u64,
    pub gesturing:    u64,
    pub events:       u64,
}

/// One director event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub frame:  u64,
    pub kind:   &'static str,
    /// The agent the event is about.
    pub agent:  u32,
    /// Kind-specific detail, e.g. `approach->step_up`.
    pub detail: String,
}
