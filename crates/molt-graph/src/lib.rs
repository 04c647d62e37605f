//! `molt-graph` — the shared position graph agents move on.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`node`]   | `Node` — position, kind, neighbors, occupant, reservation    |
//! | [`graph`]  | `PathGraph` — key index, adjacency, occupancy primitives     |
//! | [`loader`] | `load_layout_csv`, `load_layout_reader`                      |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                               |
//!
//! # Occupancy model
//!
//! Every node carries two claims:
//!
//! - `occupant` — the agent standing on the node;
//! - `reserved_by` — the agent that has committed to walk onto it next.
//!
//! A reservation is only granted while the node has no occupant, and the
//! arrival step that makes the reserving agent the occupant clears the
//! reservation in the same call ([`PathGraph::complete_move`]).  Together
//! these keep two agents from ever standing on, or walking into, the same
//! node.
//!
//! Lookups with unknown keys return `None` and `connect` with unknown keys
//! does nothing; only layout construction (`add_node`, route resolution,
//! the CSV loader) reports errors.

pub mod error;
pub mod graph;
pub mod loader;
pub mod node;


pub use error::{GraphError, GraphResult};
pub use graph::PathGraph;
pub use loader::{load_layout_csv, load_layout_reader};
pub use node::Node;
