//! Test fixtures and trajectory recording for Four Rooms development.
//!
//! Provides scripted [`ActionSource`]s, a [`TrajectoryRecorder`] that
//! folds every output buffer into an FNV-1a digest after each step, and
//! [`rollout`] which ties the two to an engine for bit-exact comparison
//! of runs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod hash;
pub mod recorder;

pub use fixtures::{ActionSource, ConstActions, CyclingActions, OutOfRangeActions, RandomActions};
pub use hash::buffers_hash;
pub use recorder::TrajectoryRecorder;

use fourrooms_core::OwnedBuffers;
use fourrooms_engine::{BatchedEngine, ConfigError, EnvConfig};

/// Build an engine over freshly allocated buffers.
pub fn owned_engine(config: EnvConfig) -> Result<BatchedEngine<OwnedBuffers>, ConfigError> {
    BatchedEngine::new(config, OwnedBuffers::new(config.num_envs))
}

/// Run `ticks` steps with actions from `source`, recording every step.
///
/// The initial observations are recorded before the first step.
pub fn rollout(
    config: EnvConfig,
    source: &mut dyn ActionSource,
    ticks: u64,
) -> Result<TrajectoryRecorder, ConfigError> {
    let mut engine = owned_engine(config)?;
    let mut recorder = TrajectoryRecorder::new();
    recorder.record(engine.buffers());
    for tick in 0..ticks {
        source.fill(tick, engine.buffers_mut().actions_mut());
        // A freshly built engine cannot be closed.
        if engine.step().is_err() {
            break;
        }
        recorder.record(engine.buffers());
    }
    Ok(recorder)
}
