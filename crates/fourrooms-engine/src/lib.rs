//! Batched lock-step simulation engine for the Four Rooms grid-world.
//!
//! [`BatchedEngine`] owns N [`EnvironmentInstance`]s over one shared
//! [`GridMap`](fourrooms_space::GridMap) and advances all of them by one
//! tick per [`step()`](BatchedEngine::step) call, writing rewards, flags
//! and observations straight into caller-owned buffers bound at
//! construction. Finished episodes are reset inside the same call.
//!
//! The engine is single-threaded; run one engine per thread for
//! parallelism. Nothing on the step path allocates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod config;
pub mod instance;
pub mod render;
pub mod stats;

pub use batched::BatchedEngine;
pub use config::{ConfigError, EnvConfig, EpisodeRules};
pub use instance::{EnvironmentInstance, EpisodeStatus, EpisodeSummary, Transition};
pub use render::{RenderSink, RenderSnapshot, TextSink};
pub use stats::{EpisodeStats, StatsAggregator};
