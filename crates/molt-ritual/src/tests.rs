//! Unit tests for molt-ritual.

use molt_agent::AgentStore;
use molt_core::{AgentId, AgentRole, Frame, NodeKind, Point, Skin};
use molt_graph::PathGraph;

use crate::{RitualController, RitualPhase, RitualScript, ScriptConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SPEED: f32 = 0.25;

/// Miniature nave:
///
/// ```text
///   altar_left (56,60) ── aisle_60 (61,60)
///        │                   │
///        │                aisle_65 … aisle_95   (lane, x = 61)
///        │                   │
///   return_back (56,85) ── aisle_85
/// ```
fn nave() -> PathGraph {
    let mut g = PathGraph::new();
    let lane: Vec<String> = (0..8).map(|i| format!("aisle_{}", 60 + i * 5)).collect();
    for (i, key) in lane.iter().enumerate() {
        g.add_node(key.as_str(), 61.0, 60.0 + i as f32 * 5.0, NodeKind::Aisle).unwrap();
    }
    g.connect_chain(&lane);
    g.add_node("altar_left", 56.0, 60.0, NodeKind::Walkable).unwrap();
    g.add_node("return_back", 56.0, 85.0, NodeKind::Walkable).unwrap();
    g.connect_chain(&["aisle_60", "altar_left", "return_back", "aisle_85"]);
    g
}

fn nave_script() -> ScriptConfig {
    ScriptConfig {
        exit_route: vec!["altar_left".into(), "return_back".into(), "aisle_85".into()],
        rejoin: "aisle_85".into(),
        ..ScriptConfig::default()
    }
}

/// Procession agents on the given lane keys, leader first.
fn procession(g: &mut PathGraph, keys: &[&str]) -> (AgentStore, RitualController) {
    let mut agents = AgentStore::new();
    let ids: Vec<AgentId> = keys
        .iter()
        .map(|k| agents.spawn_at(g, k, AgentRole::Procession, Skin::Moltbot).unwrap())
        .collect();
    let script: RitualScript = nave_script().resolve(g).unwrap();
    (agents, RitualController::new(script, ids))
}

/// One frame in simulation order: controller, then every agent with
/// follower advance after each procession member.
fn frame(n: u64, ctrl: &mut RitualController, agents: &mut AgentStore, g: &mut PathGraph) {
    ctrl.step(Frame(n), agents, g, None);
    let ids: Vec<AgentId> = agents.agent_ids().collect();
    for id in ids {
        if let Some(agent) = agents.get_mut(id) {
            agent.update(g, SPEED);
        }
        ctrl.advance_follower(id, agents, g);
    }
}

/// Run frames until `ctrl` reaches `phase`; returns the frame number.
fn run_until(
    phase: RitualPhase,
    ctrl: &mut RitualController,
    agents: &mut AgentStore,
    g: &mut PathGraph,
    limit: u64,
) -> u64 {
    for n in 1..=limit {
        frame(n, ctrl, agents, g);
        agents.audit(g).unwrap();
        if ctrl.phase() == phase {
            return n;
        }
    }
    panic!("phase {phase} not reached within {limit} frames (stuck in {})", ctrl.phase());
}

// ── Script resolution ─────────────────────────────────────────────────────────

#[cfg(test)]
mod script {
    use super::*;
    use crate::{DevotionCue, RitualError};

    #[test]
    fn resolves_keys_to_ids() {
        let g = nave();
        let script = nave_script().resolve(&g).unwrap();
        assert_eq!(script.altar, g.id_of("aisle_60").unwrap());
        assert_eq!(script.rejoin, g.id_of("aisle_85").unwrap());
        assert_eq!(script.exit_route.len(), 3);
        assert_eq!(script.devotion.last_at(), Some(260));
        assert_eq!(script.lane, NodeKind::Aisle);
    }

    #[test]
    fn unknown_key_is_graph_error() {
        let g = nave();
        let cfg = ScriptConfig { altar: "chancel".into(), ..nave_script() };
        assert!(matches!(cfg.resolve(&g), Err(RitualError::Graph(_))));
    }

    #[test]
    fn exit_route_must_end_at_rejoin() {
        let g = nave();
        let cfg = ScriptConfig { rejoin: "aisle_95".into(), ..nave_script() };
        assert!(matches!(cfg.resolve(&g), Err(RitualError::Config(_))));
    }

    #[test]
    fn devotion_needs_exit_cue() {
        let g = nave();
        let mut cfg = nave_script();
        cfg.devotion.retain(|c| c.effect != DevotionCue::Exit);
        assert!(matches!(cfg.resolve(&g), Err(RitualError::Config(_))));
    }

    #[test]
    fn default_script_matches_chapel_timeline() {
        let cfg = ScriptConfig::default();
        let ats: Vec<u32> = cfg.devotion.iter().map(|c| c.at).collect();
        assert_eq!(ats, [40, 80, 100, 140, 170, 200, 260]);
        assert_eq!(cfg.step_up, Point::new(61.0, 58.0));
        assert_eq!(cfg.exit_route.last(), Some(&cfg.rejoin));
    }
}

// ── Leader phases ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod phases {
    use super::*;
    use molt_agent::MotionState;

    #[test]
    fn approach_assigns_route_once() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_70"]);
        let altar = g.id_of("aisle_60").unwrap();
        for n in 1..=3 {
            assert!(ctrl.step(Frame(n), &mut agents, &mut g, None).is_none());
        }
        let leader = &agents[AgentId(0)];
        assert_eq!(leader.route.iter().copied().collect::<Vec<_>>(), vec![altar]);
        assert_eq!(ctrl.phase(), RitualPhase::Approach);
    }

    #[test]
    fn approach_then_step_up() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_65"]);
        run_until(RitualPhase::StepUp, &mut ctrl, &mut agents, &mut g, 100);
        let leader = &agents[AgentId(0)];
        assert_eq!(leader.current_node, g.id_of("aisle_60"));
        assert_eq!(leader.pos, Point::new(61.0, 60.0));

        // Next frame the leader sets off toward the step-up point.
        frame(1000, &mut ctrl, &mut agents, &mut g);
        assert_eq!(agents[AgentId(0)].state, MotionState::Walking);
        assert_eq!(agents[AgentId(0)].target, Some(Point::new(61.0, 58.0)));
    }

    #[test]
    fn step_up_reaches_devotion_within_tolerance() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_60"]);
        run_until(RitualPhase::Devotion, &mut ctrl, &mut agents, &mut g, 100);
        let leader = &agents[AgentId(0)];
        assert!((leader.pos.y - 58.0).abs() < 0.5);
        // Still the occupant of the altar node while standing on the step.
        assert_eq!(g.get("aisle_60").unwrap().occupant, Some(AgentId(0)));
        assert_eq!(ctrl.phase_timer(), 0);
    }

    #[test]
    fn devotion_claw_timeline_and_exit() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_60"]);
        run_until(RitualPhase::Devotion, &mut ctrl, &mut agents, &mut g, 100);

        let mut claws = Vec::new();
        let mut n = 0;
        while ctrl.phase() == RitualPhase::Devotion {
            n += 1;
            frame(200 + n, &mut ctrl, &mut agents, &mut g);
            claws.push(agents[AgentId(0)].claws_out);
            assert!(n <= 260);
        }
        // claws[t - 1] is the state after devotion frame t.
        assert!(!claws[38]);
        assert!(claws[39], "extended at 40");
        assert!(!claws[79], "retracted at 80");
        assert!(claws[99], "extended at 100");
        assert!(!claws[139], "retracted at 140");
        assert!(claws[169], "extended at 170");
        assert!(!claws[199], "retracted at 200");
        assert_eq!(n, 260, "exit fires on devotion frame 260");
        assert_eq!(ctrl.phase(), RitualPhase::Exit);
        assert_eq!(agents[AgentId(0)].state, MotionState::Moving);
    }

    #[test]
    fn leader_held_still_during_devotion() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_60"]);
        run_until(RitualPhase::Devotion, &mut ctrl, &mut agents, &mut g, 100);
        let at = agents[AgentId(0)].pos;
        for n in 0..100 {
            frame(500 + n, &mut ctrl, &mut agents, &mut g);
            assert_eq!(agents[AgentId(0)].pos, at);
            assert!(agents[AgentId(0)].is_idle());
        }
    }

    #[test]
    fn full_cycle_rotates_leader() {
        let mut g = nave();
        let (mut agents, mut ctrl) =
            procession(&mut g, &["aisle_70", "aisle_75", "aisle_80", "aisle_85"]);

        run_until(RitualPhase::Exit, &mut ctrl, &mut agents, &mut g, 1_000);
        run_until(RitualPhase::Approach, &mut ctrl, &mut agents, &mut g, 1_000);

        assert_eq!(ctrl.cycles(), 1);
        assert_eq!(ctrl.leader(), Some(AgentId(1)));
        assert_eq!(
            ctrl.queue().collect::<Vec<_>>(),
            vec![AgentId(1), AgentId(2), AgentId(3), AgentId(0)]
        );
        assert_eq!(agents[AgentId(0)].current_node, g.id_of("aisle_85"));

        // The new leader completes a cycle too.
        run_until(RitualPhase::Exit, &mut ctrl, &mut agents, &mut g, 1_000);
        run_until(RitualPhase::Approach, &mut ctrl, &mut agents, &mut g, 1_000);
        assert_eq!(ctrl.cycles(), 2);
        assert_eq!(ctrl.leader(), Some(AgentId(2)));
    }

    #[test]
    fn exit_off_rejoin_recovers_to_approach() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_60"]);
        run_until(RitualPhase::Exit, &mut ctrl, &mut agents, &mut g, 1_000);

        // Abandon the exit route where the leader stands.
        let leader = agents.get_mut(AgentId(0)).unwrap();
        leader.route.clear();
        leader.hold(&mut g);

        let change = ctrl.step(Frame(9_999), &mut agents, &mut g, None).unwrap();
        assert_eq!(change.from, RitualPhase::Exit);
        assert_eq!(change.to, RitualPhase::Approach);
        assert_eq!(ctrl.cycles(), 0, "no rotation off the rejoin node");
        agents.audit(&g).unwrap();
    }

    #[test]
    fn empty_queue_is_inert() {
        let mut g = nave();
        let script = nave_script().resolve(&g).unwrap();
        let mut ctrl = RitualController::new(script, Vec::<AgentId>::new());
        let mut agents = AgentStore::new();
        assert!(ctrl.step(Frame(1), &mut agents, &mut g, None).is_none());
        assert_eq!(ctrl.leader(), None);
    }
}

// ── Follower advance ──────────────────────────────────────────────────────────

#[cfg(test)]
mod followers {
    use super::*;

    #[test]
    fn idle_follower_takes_free_lane_node() {
        let mut g = nave();
        let (mut agents, ctrl) = procession(&mut g, &["aisle_60", "aisle_75"]);
        assert!(ctrl.advance_follower(AgentId(1), &mut agents, &g));
        assert_eq!(agents[AgentId(1)].route.front().copied(), g.id_of("aisle_70"));
    }

    #[test]
    fn leader_is_never_advanced() {
        let mut g = nave();
        let (mut agents, ctrl) = procession(&mut g, &["aisle_75"]);
        assert!(!ctrl.advance_follower(AgentId(0), &mut agents, &g));
        assert!(agents[AgentId(0)].route.is_empty());
    }

    #[test]
    fn reserved_node_blocks_advance() {
        let mut g = nave();
        let (mut agents, ctrl) = procession(&mut g, &["aisle_60", "aisle_75"]);
        let ahead = g.id_of("aisle_70").unwrap();
        g.try_reserve(ahead, AgentId(0));
        assert!(!ctrl.advance_follower(AgentId(1), &mut agents, &g));
    }

    #[test]
    fn occupied_node_blocks_advance() {
        let mut g = nave();
        let (mut agents, ctrl) = procession(&mut g, &["aisle_60", "aisle_75", "aisle_70"]);
        assert!(!ctrl.advance_follower(AgentId(1), &mut agents, &g));
    }

    #[test]
    fn off_lane_neighbors_are_ignored() {
        let mut g = nave();
        // return_back sits at the same y as aisle_85 and is not a lane node;
        // from return_back itself the only smaller-y neighbor is walkable.
        let (mut agents, ctrl) = procession(&mut g, &["aisle_60", "return_back"]);
        assert!(!ctrl.advance_follower(AgentId(1), &mut agents, &g));
    }

    #[test]
    fn non_procession_agents_stay_put() {
        let mut g = nave();
        let (mut agents, ctrl) = procession(&mut g, &["aisle_60"]);
        let seated = agents
            .spawn_at(&mut g, "aisle_90", AgentRole::Congregation, Skin::Moltbot)
            .unwrap();
        assert!(!ctrl.advance_follower(seated, &mut agents, &g));
    }

    #[test]
    fn rotation_frame_skips_old_leader_and_frees_new_front() {
        let mut g = nave();
        let (mut agents, mut ctrl) =
            procession(&mut g, &["aisle_70", "aisle_75", "aisle_80", "aisle_85"]);
        run_until(RitualPhase::Exit, &mut ctrl, &mut agents, &mut g, 1_000);
        assert_eq!(agents[AgentId(1)].current_node, g.id_of("aisle_65"));

        // Only the exiting leader moves, so the queue stays put behind it.
        let mut n = 2_000;
        loop {
            n += 1;
            assert!(n < 3_000, "leader never rejoined");
            let change = ctrl.step(Frame(n), &mut agents, &mut g, None);
            if change.is_some_and(|c| c.to == RitualPhase::Approach) {
                break;
            }
            if let Some(leader) = agents.get_mut(AgentId(0)) {
                leader.update(&mut g, SPEED);
            }
        }
        assert_eq!(ctrl.leader(), Some(AgentId(1)));

        // Same frame: the rejoined agent is skipped, the new front closes up.
        assert!(!ctrl.advance_follower(AgentId(0), &mut agents, &g));
        assert!(agents[AgentId(0)].route.is_empty());
        assert!(ctrl.advance_follower(AgentId(1), &mut agents, &g));
        assert_eq!(agents[AgentId(1)].route.front().copied(), g.id_of("aisle_60"));

        // From the next frame on the old leader is an ordinary follower.
        ctrl.step(Frame(n + 1), &mut agents, &mut g, None);
        assert!(ctrl.advance_follower(AgentId(0), &mut agents, &g));
        assert_eq!(agents[AgentId(0)].route.front().copied(), g.id_of("aisle_80"));
        assert!(!ctrl.advance_follower(AgentId(1), &mut agents, &g));
    }

    #[test]
    fn queue_closes_up_behind_leader() {
        let mut g = nave();
        let (mut agents, mut ctrl) =
            procession(&mut g, &["aisle_75", "aisle_85", "aisle_95"]);
        for n in 1..=300 {
            frame(n, &mut ctrl, &mut agents, &mut g);
            agents.audit(&g).unwrap();
        }
        assert_eq!(agents[AgentId(0)].current_node, g.id_of("aisle_60"));
        assert_eq!(agents[AgentId(1)].current_node, g.id_of("aisle_65"));
        assert_eq!(agents[AgentId(2)].current_node, g.id_of("aisle_70"));
    }
}

// ── Ambient gestures ──────────────────────────────────────────────────────────

#[cfg(test)]
mod ambient {
    use molt_core::SimRng;

    use super::*;
    use crate::{AmbientConfig, AmbientGestures};

    fn pews(n: usize) -> (PathGraph, AgentStore, Vec<AgentId>) {
        let mut g = PathGraph::new();
        let mut agents = AgentStore::new();
        let mut ids = Vec::new();
        for i in 0..n {
            let node = g.add_node(format!("seat_{i}"), i as f32 * 6.0, 76.0, NodeKind::Seat).unwrap();
            ids.push(agents.spawn(&mut g, node, AgentRole::Congregation, Skin::Moltbot).unwrap());
        }
        (g, agents, ids)
    }

    #[test]
    fn picks_once_per_interval() {
        let (_, mut agents, ids) = pews(3);
        let mut rng = SimRng::new(7);
        let mut ambient = AmbientGestures::new(&AmbientConfig { interval_frames: 5 }, ids.clone());

        for _ in 0..4 {
            assert!(ambient.tick(&mut agents, &mut rng).is_none());
        }
        let picked = ambient.tick(&mut agents, &mut rng).unwrap();
        assert!(ids.contains(&picked));
        assert!(agents[picked].is_gesturing());
        assert!(agents[picked].claws_out);
        assert_eq!(ambient.countdown(), 5);
    }

    #[test]
    fn gesturing_agents_are_skipped_and_countdown_still_resets() {
        let (_, mut agents, ids) = pews(2);
        for &id in &ids {
            agents.get_mut(id).unwrap().start_gesture();
        }
        let mut rng = SimRng::new(1);
        let mut ambient = AmbientGestures::new(&AmbientConfig { interval_frames: 1 }, ids);
        assert!(ambient.tick(&mut agents, &mut rng).is_none());
        assert_eq!(ambient.countdown(), 1);
    }

    #[test]
    fn same_seed_same_picks() {
        let picks = |seed| {
            // More seats than can be mid-gesture at once, so every pick succeeds.
            let (mut g, mut agents, ids) = pews(20);
            let mut rng = SimRng::new(seed);
            let mut ambient = AmbientGestures::new(&AmbientConfig { interval_frames: 10 }, ids);
            let mut out = Vec::new();
            for _ in 0..600 {
                if let Some(id) = ambient.tick(&mut agents, &mut rng) {
                    out.push(id);
                }
                for agent in agents.iter_mut() {
                    agent.update(&mut g, SPEED);
                }
            }
            out
        };
        let a = picks(42);
        assert_eq!(a.len(), 60);
        assert_eq!(a, picks(42));
    }

    #[test]
    fn default_interval_is_180_frames() {
        assert_eq!(AmbientConfig::default().interval_frames, 180);
    }
}

// ── Preacher pacing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod pacing {
    use super::*;
    use crate::{Pacer, PacingConfig};

    fn pulpit() -> (PathGraph, AgentStore, AgentId) {
        let mut g = PathGraph::new();
        g.add_node("pulpit", 61.0, 42.0, NodeKind::Altar).unwrap();
        let mut agents = AgentStore::new();
        let p = agents.spawn_at(&mut g, "pulpit", AgentRole::Preacher, Skin::Moltbot).unwrap();
        (g, agents, p)
    }

    #[test]
    fn turns_after_interval_and_alternates_sides() {
        let (mut g, mut agents, p) = pulpit();
        let cfg = PacingConfig { interval_frames: 3, ..PacingConfig::default() };
        let mut pacer = Pacer::new(cfg, p);

        for _ in 0..3 {
            assert!(pacer.tick(&mut agents).is_none());
        }
        assert_eq!(pacer.tick(&mut agents), Some(Point::new(64.0, 42.0)));

        for _ in 0..40 {
            agents.get_mut(p).unwrap().update(&mut g, SPEED);
        }
        assert_eq!(agents[p].pos, Point::new(64.0, 42.0));

        let mut next = None;
        for _ in 0..10 {
            next = next.or(pacer.tick(&mut agents));
        }
        assert_eq!(next, Some(Point::new(58.0, 42.0)));
    }

    #[test]
    fn waits_while_walking() {
        let (_, mut agents, p) = pulpit();
        let cfg = PacingConfig { interval_frames: 0, ..PacingConfig::default() };
        let mut pacer = Pacer::new(cfg, p);
        assert!(pacer.tick(&mut agents).is_some());
        // Still walking: no new target.
        assert!(pacer.tick(&mut agents).is_none());
    }

    #[test]
    fn pacing_keeps_pulpit_occupied() {
        let (mut g, mut agents, p) = pulpit();
        let mut pacer = Pacer::new(PacingConfig { interval_frames: 1, ..PacingConfig::default() }, p);
        for _ in 0..200 {
            pacer.tick(&mut agents);
            agents.get_mut(p).unwrap().update(&mut g, SPEED);
        }
        assert_eq!(g.get("pulpit").unwrap().occupant, Some(p));
        agents.audit(&g).unwrap();
    }
}

// ── Director dispatch ─────────────────────────────────────────────────────────

#[cfg(test)]
mod directors {
    use molt_core::SimRng;

    use super::*;
    use crate::{Director, Stage, StageEvent};

    #[test]
    fn ritual_director_reports_phase_changes() {
        let mut g = nave();
        let (mut agents, mut ctrl) = procession(&mut g, &["aisle_60"]);
        let mut rng = SimRng::new(0);
        let mut events = Vec::new();
        {
            let mut stage = Stage::new(Frame(1), &mut g, &mut agents, &mut rng);
            ctrl.direct(&mut stage, &mut events);
        }
        assert_eq!(ctrl.name(), "ritual");
        assert!(matches!(
            events.as_slice(),
            [StageEvent::Phase(c)] if c.from == RitualPhase::Approach && c.to == RitualPhase::StepUp
        ));
        assert_eq!(events[0].frame(), Frame(1));
    }
}
