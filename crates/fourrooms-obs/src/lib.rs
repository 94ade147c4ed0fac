//! Observation encoding for the Four Rooms grid-world.
//!
//! An [`ObservationEncoder`] renders the 7x7 window centred on an agent
//! into a caller-provided `7 * 7 * 3` byte slot. Two encodings exist:
//!
//! - [`ObsEncoding::Binary`] (default): channel 0 is the cell kind
//!   (floor 0, wall or out-of-grid 1), channel 1 marks the agent,
//!   channel 2 marks the goal.
//! - [`ObsEncoding::MiniGrid`]: `(object, color, state)` triples using the
//!   MiniGrid object/colour tables, with wall occlusion unless
//!   `see_through_walls` is set.
//!
//! Encoding is a pure function of map, agent and goal, and never allocates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod sight;

pub use config::{minigrid, ObsConfig, ObsEncoding};
pub use encoder::ObservationEncoder;
pub use sight::line_of_sight;
