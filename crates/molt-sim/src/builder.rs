//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use molt_agent::AgentStore;
use molt_core::{AgentRole, SimConfig, Skin};
use molt_graph::PathGraph;
use molt_ritual::{AmbientConfig, AmbientGestures, Pacer, PacingConfig, RitualController, ScriptConfig};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total frames, seed, speed
/// - [`PathGraph`]: the layout, with no agents on it yet
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.procession(keys)`  | none (no ritual controller)              |
/// | `.congregation(keys)`| none (ambient gestures never fire)       |
/// | `.icon(key, skin)`   | none                                     |
/// | `.preacher(key)`     | none (no pacer)                          |
/// | `.script(cfg)`       | `ScriptConfig::default()` (the chapel)   |
/// | `.ambient(cfg)`      | every 180 frames                         |
/// | `.pacing(cfg)`       | every 240 frames, ±3 around x = 61       |
///
/// Agents are spawned in a fixed order regardless of call order:
/// procession, congregation, icons, preacher.  That order is the collection
/// order used for drawing and for updating agents outside the procession.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph)
///     .procession(["aisle_80", "aisle_85"])
///     .preacher("pulpit")
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    graph:        PathGraph,
    procession:   Vec<String>,
    congregation: Vec<String>,
    icons:        Vec<(String, Skin)>,
    preacher:     Option<String>,
    script:       ScriptConfig,
    ambient:      AmbientConfig,
    pacing:       PacingConfig,
}

impl SimBuilder {
    pub fn new(config: SimConfig, graph: PathGraph) -> Self {
        Self {
            config,
            graph,
            procession:   Vec::new(),
            congregation: Vec::new(),
            icons:        Vec::new(),
            preacher:     None,
            script:       ScriptConfig::default(),
            ambient:      AmbientConfig::default(),
            pacing:       PacingConfig::default(),
        }
    }

    /// Procession start nodes, leader first.
    pub fn procession<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.procession.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Seats for the congregation.  These agents form the ambient gesture
    /// pool.
    pub fn congregation<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.congregation.extend(keys.into_iter().map(Into::into));
        self
    }

    /// A static agent that never moves.
    pub fn icon(mut self, key: impl Into<String>, skin: Skin) -> Self {
        self.icons.push((key.into(), skin));
        self
    }

    pub fn preacher(mut self, key: impl Into<String>) -> Self {
        self.preacher = Some(key.into());
        self
    }

    pub fn script(mut self, script: ScriptConfig) -> Self {
        self.script = script;
        self
    }

    pub fn ambient(mut self, ambient: AmbientConfig) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Validate inputs, spawn every agent, resolve the ritual script, and
    /// return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] for a non-positive speed.
    /// - [`SimError::Agent`] if a start key is unknown or two agents share a
    ///   node.
    /// - [`SimError::Ritual`] if the script names unknown nodes or is
    ///   otherwise inconsistent.
    pub fn build(self) -> SimResult<Sim> {
        if self.config.speed.is_nan() || self.config.speed <= 0.0 {
            return Err(SimError::Config(format!(
                "speed must be positive, got {}",
                self.config.speed
            )));
        }

        let mut graph = self.graph;
        let mut agents = AgentStore::new();

        // ── Spawn in collection order ─────────────────────────────────────
        let mut queue = Vec::with_capacity(self.procession.len());
        for key in &self.procession {
            queue.push(agents.spawn_at(&mut graph, key, AgentRole::Procession, Skin::Moltbot)?);
        }
        let mut pool = Vec::with_capacity(self.congregation.len());
        for key in &self.congregation {
            pool.push(agents.spawn_at(&mut graph, key, AgentRole::Congregation, Skin::Moltbot)?);
        }
        for (key, skin) in &self.icons {
            agents.spawn_at(&mut graph, key, AgentRole::Icon, *skin)?;
        }
        let preacher = match &self.preacher {
            Some(key) => Some(agents.spawn_at(&mut graph, key, AgentRole::Preacher, Skin::Moltbot)?),
            None => None,
        };

        // ── Directors ─────────────────────────────────────────────────────
        let ritual = if queue.is_empty() {
            None
        } else {
            let script = self.script.resolve(&graph)?;
            Some(RitualController::new(script, queue))
        };
        let ambient = AmbientGestures::new(&self.ambient, pool);
        let pacer = preacher.map(|agent| Pacer::new(self.pacing, agent));

        debug!(
            agents = agents.len(),
            procession = self.procession.len(),
            congregation = self.congregation.len(),
            ritual = ritual.is_some(),
            pacer = pacer.is_some(),
            "simulation built"
        );

        let sim = Sim::from_parts(self.config, graph, agents, ritual, ambient, pacer);
        sim.audit()?;
        Ok(sim)
    }
}
