//! chapel — the moltbot procession, rendered as text.
//!
//! Eleven moltbots queue down the aisle.  The front one walks to the altar,
//! steps up, pinches three times, and loops back around to rejoin at the
//! rear while the queue closes up.  Meanwhile the congregation pinches now
//! and then and the preacher paces behind the pulpit.
//!
//! ```text
//! cargo run -p chapel -- [frames] [output_dir]
//! RUST_LOG=molt_ritual=debug cargo run -p chapel
//! ```

mod ascii;
mod layout;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use molt_agent::AgentStore;
use molt_core::{Frame, SimConfig};
use molt_graph::PathGraph;
use molt_output::{CsvWriter, OutputWriter, SimOutputObserver};
use molt_ritual::StageEvent;
use molt_sim::{FrameSummary, SimObserver, StopHandle};

use ascii::AsciiSurface;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const DEFAULT_FRAMES:  u64 = 60 * 60; // one minute at 60 fps
const RENDER_EVERY:    u64 = 600;
const SNAPSHOT_EVERY:  u64 = 60;
/// Stop early once this many leaders have completed the ritual.
const MAX_CYCLES:      u64 = 6;
const CANVAS_W:        f32 = 122.0;
const CANVAS_H:        f32 = 150.0;

// ── Observer: counts, cycle limit, optional CSV ───────────────────────────────

struct ChapelObserver<W: OutputWriter> {
    output:    Option<SimOutputObserver<W>>,
    stop:      StopHandle,
    cycles:    u64,
    gestures:  u64,
    max_wait:  usize,
    snapshots: usize,
}

impl<W: OutputWriter> ChapelObserver<W> {
    fn new(output: Option<SimOutputObserver<W>>, stop: StopHandle) -> Self {
        Self { output, stop, cycles: 0, gestures: 0, max_wait: 0, snapshots: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ChapelObserver<W> {
    fn on_event(&mut self, event: &StageEvent) {
        match event {
            StageEvent::Rotated { frame, finished, next } => {
                self.cycles += 1;
                info!(%frame, %finished, %next, cycle = self.cycles, "leader rejoined the procession");
                if self.cycles >= MAX_CYCLES {
                    self.stop.stop();
                }
            }
            StageEvent::GestureStarted { .. } => self.gestures += 1,
            _ => {}
        }
        if let Some(out) = self.output.as_mut() {
            out.on_event(event);
        }
    }

    fn on_frame_end(&mut self, summary: &FrameSummary) {
        self.max_wait = self.max_wait.max(summary.waiting);
        if let Some(out) = self.output.as_mut() {
            out.on_frame_end(summary);
        }
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore, graph: &PathGraph) {
        self.snapshots += 1;
        if let Some(out) = self.output.as_mut() {
            out.on_snapshot(frame, agents, graph);
        }
    }

    fn on_sim_end(&mut self, final_frame: Frame) {
        if let Some(out) = self.output.as_mut() {
            out.on_sim_end(final_frame);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chapel=info,molt_sim=info")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let total_frames = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {n:?}"))?,
        None => DEFAULT_FRAMES,
    };
    let output_dir = args.next();

    // 1. Scene.
    let config = SimConfig {
        total_frames,
        seed: SEED,
        snapshot_interval_frames: SNAPSHOT_EVERY,
        ..SimConfig::default()
    };
    let mut sim = layout::build_sim(config.clone()).context("building the chapel scene")?;
    info!(
        nodes = sim.graph.node_count(),
        edges = sim.graph.edge_count(),
        agents = sim.agents.len(),
        frames = total_frames,
        "chapel ready"
    );

    // 2. Output.
    let output = match &output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {dir}"))?;
            let writer = CsvWriter::new(Path::new(dir))?;
            Some(SimOutputObserver::new(writer, &config))
        }
        None => None,
    };
    let mut obs = ChapelObserver::new(output, sim.stop_handle());
    let mut surface = AsciiSurface::new(std::io::stdout().lock(), CANVAS_W, CANVAS_H, RENDER_EVERY);

    // 3. Run.
    let t0 = Instant::now();
    let outcome = sim.run_rendered(&mut obs, &mut surface)?;
    let elapsed = t0.elapsed();
    sim.audit().context("occupancy invariants after the run")?;

    if let Some(e) = obs.output.as_mut().and_then(SimOutputObserver::take_error) {
        warn!(error = %e, "trace output incomplete");
    }

    // 4. Summary.
    println!();
    println!(
        "Simulated {} frames ({:.1} s of scene) in {:.3} s{}",
        outcome.frames,
        sim.clock.elapsed_secs(),
        elapsed.as_secs_f64(),
        if outcome.cancelled { ", stopped after cycle limit" } else { "" },
    );
    println!("  completed rituals : {}", obs.cycles);
    println!("  ambient gestures  : {}", obs.gestures);
    println!("  most waiting      : {}", obs.max_wait);
    println!("  snapshots         : {}", obs.snapshots);
    println!("  frames printed    : {}", surface.printed());
    if let Some(dir) = &output_dir {
        println!("  trace written to  : {dir}");
    }
    println!();

    // 5. Procession order.
    println!("{:<8} {:<12} {:<10} {:>7} {:>7}", "Queue", "Node", "State", "x", "y");
    println!("{}", "-".repeat(48));
    if let Some(ritual) = sim.ritual.as_ref() {
        for (place, id) in ritual.queue().enumerate() {
            let Some(agent) = sim.agents.get(id) else { continue };
            let node = agent.current_node.map_or("-", |n| sim.graph.key_of(n));
            println!(
                "{:<8} {:<12} {:<10} {:>7.2} {:>7.2}",
                place,
                node,
                agent.state.as_str(),
                agent.pos.x,
                agent.pos.y,
            );
        }
        println!("Leader phase: {}", ritual.phase());
    }

    Ok(())
}
