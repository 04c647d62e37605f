//! The chapel floor plan.
//!
//! Canvas units, origin top-left, y grows toward the doors.  The aisle runs
//! down the middle at x = 61; the procession faces the altar (small y) and
//! returns along x = 56.

use molt_core::{NodeKind, SimConfig, Skin};
use molt_graph::{GraphResult, PathGraph};
use molt_ritual::ScriptConfig;
use molt_sim::{Sim, SimBuilder, SimResult};

pub const AISLE_X: f32 = 61.0;
pub const RETURN_X: f32 = 56.0;

/// Pew columns, left bank then right bank.
const PEW_XS: [f32; 12] = [10.0, 16.0, 22.0, 28.0, 34.0, 40.0, 82.0, 88.0, 94.0, 100.0, 106.0, 112.0];
const PEW_YS: [f32; 4] = [76.0, 90.0, 104.0, 118.0];

pub fn aisle_key(y: u32) -> String {
    format!("aisle_{y}")
}

/// Build the chapel graph: aisle, return loop, two aisle seats, the
/// congregation's pews, the cross, and the pulpit.
pub fn build_chapel() -> GraphResult<PathGraph> {
    let mut g = PathGraph::new();

    // Aisle, doors to altar.
    let mut aisle = Vec::new();
    for y in (60..=140).rev().step_by(5) {
        let key = aisle_key(y);
        g.add_node(key.as_str(), AISLE_X, y as f32, NodeKind::Aisle)?;
        aisle.push(key);
    }
    g.connect_chain(&aisle);

    // Return loop along the left of the aisle.
    g.add_node("altar_left", RETURN_X, 60.0, NodeKind::Walkable)?;
    g.add_node("return_mid", RETURN_X, 90.0, NodeKind::Walkable)?;
    g.add_node("return_back", RETURN_X, 115.0, NodeKind::Walkable)?;
    g.connect_chain(&["aisle_60", "altar_left", "return_mid", "return_back", "aisle_115"]);

    g.add_node("seat_l_1", 20.0, 80.0, NodeKind::Seat)?;
    g.add_node("seat_r_1", 100.0, 80.0, NodeKind::Seat)?;
    g.connect("seat_l_1", "aisle_80");
    g.connect("seat_r_1", "aisle_80");

    for (i, (x, y)) in pew_positions().enumerate() {
        g.add_node(format!("static_seat_{i}"), x, y, NodeKind::Seat)?;
    }

    g.add_node("cross", AISLE_X, 12.0, NodeKind::Altar)?;
    g.add_node("pulpit", AISLE_X, 42.0, NodeKind::Altar)?;
    Ok(g)
}

fn pew_positions() -> impl Iterator<Item = (f32, f32)> {
    PEW_YS.into_iter().flat_map(|y| PEW_XS.into_iter().map(move |x| (x, y)))
}

/// Procession start nodes, leader first: aisle_80 back to aisle_130.
pub fn procession_keys() -> Vec<String> {
    (80..=130).step_by(5).map(aisle_key).collect()
}

pub fn congregation_keys() -> Vec<String> {
    (0..PEW_XS.len() * PEW_YS.len()).map(|i| format!("static_seat_{i}")).collect()
}

/// The full chapel scene, ready to run.
pub fn build_sim(config: SimConfig) -> SimResult<Sim> {
    let graph = build_chapel()?;
    SimBuilder::new(config, graph)
        .procession(procession_keys())
        .congregation(congregation_keys())
        .icon("cross", Skin::Lobster)
        .preacher("pulpit")
        .script(ScriptConfig::default())
        .build()
}
