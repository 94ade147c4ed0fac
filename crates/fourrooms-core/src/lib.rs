//! Core types and traits for the Four Rooms batched grid-world.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! grid positions and cell kinds, the discrete action table, the engine
//! error type, and the [`EnvBuffers`] binding through which the engine
//! writes into caller-owned memory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod buffers;
pub mod cell;
pub mod error;
pub mod traits;

pub use action::{Action, NUM_ACTIONS};
pub use buffers::{BorrowedBuffers, OwnedBuffers, OBS_CHANNELS, OBS_LEN, OBS_WINDOW};
pub use cell::{CellKind, Pos};
pub use error::EngineError;
pub use traits::{BufferViews, EnvBuffers, ShapeMismatch};
