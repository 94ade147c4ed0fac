//! Four Rooms: a batched, lock-step grid-world for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all sub-crates. For most users, adding `fourrooms` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fourrooms::prelude::*;
//!
//! let config = EnvConfig { num_envs: 4, seed: 42, ..EnvConfig::default() };
//! let mut engine = BatchedEngine::new(config, OwnedBuffers::new(4)).unwrap();
//!
//! engine.buffers_mut().actions_mut().fill(Action::East.into());
//! engine.step().unwrap();
//!
//! assert_eq!(engine.buffers().observation(0).len(), OBS_LEN);
//! assert!(engine.buffers().rewards().iter().all(|&r| r == -0.01 || r == 1.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fourrooms-core` | positions, actions, buffer binding, engine errors |
//! | [`space`] | `fourrooms-space` | map generation, reachability, shared map cache |
//! | [`obs`] | `fourrooms-obs` | observation window encoders |
//! | [`engine`] | `fourrooms-engine` | the batched engine, configuration, stats, rendering |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Positions, the action table, buffer binding, and errors (`fourrooms-core`).
pub use fourrooms_core as types;

/// Map generation and reachability (`fourrooms-space`).
pub use fourrooms_space as space;

/// Observation encoders (`fourrooms-obs`).
pub use fourrooms_obs as obs;

/// The batched engine (`fourrooms-engine`).
///
/// [`engine::BatchedEngine`] is generic over the buffer binding: use
/// [`types::OwnedBuffers`] for engine-allocated memory or
/// [`types::BorrowedBuffers`] to write into slices you own.
pub use fourrooms_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use fourrooms::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use fourrooms_core::{
        Action, BorrowedBuffers, EngineError, EnvBuffers, OwnedBuffers, Pos, NUM_ACTIONS,
        OBS_LEN,
    };

    // Map
    pub use fourrooms_space::{GridMap, MapError};

    // Observation
    pub use fourrooms_obs::{ObsConfig, ObsEncoding};

    // Engine
    pub use fourrooms_engine::{
        BatchedEngine, ConfigError, EnvConfig, EpisodeRules, EpisodeStats, RenderSink,
        RenderSnapshot, TextSink,
    };
}
