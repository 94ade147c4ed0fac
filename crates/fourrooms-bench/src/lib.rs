//! Benchmark profiles and utilities for the Four Rooms engine.
//!
//! - [`BATCH_SIZES`]: instance counts swept by the step benchmarks
//! - [`batch_profile`]: default rules at a given batch size
//! - [`minigrid_profile`]: same, with MiniGrid encoding and occlusion
//! - [`scripted_actions`]: a cheap deterministic action pattern

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fourrooms_core::{OwnedBuffers, NUM_ACTIONS};
use fourrooms_engine::{BatchedEngine, EnvConfig};
use fourrooms_obs::{ObsConfig, ObsEncoding};

/// Instance counts for throughput sweeps.
pub const BATCH_SIZES: [usize; 3] = [1, 64, 1024];

/// Default 19x19 task with `num_envs` instances.
pub fn batch_profile(num_envs: usize, seed: u64) -> EnvConfig {
    EnvConfig {
        num_envs,
        seed,
        ..EnvConfig::default()
    }
}

/// [`batch_profile`] with MiniGrid codes and wall occlusion.
pub fn minigrid_profile(num_envs: usize, seed: u64) -> EnvConfig {
    EnvConfig {
        obs: ObsConfig {
            encoding: ObsEncoding::MiniGrid,
            see_through_walls: false,
        },
        ..batch_profile(num_envs, seed)
    }
}

/// Build an engine over fresh owned buffers.
///
/// # Panics
///
/// Panics if `config` is invalid; profiles here are always valid.
pub fn build(config: EnvConfig) -> BatchedEngine<OwnedBuffers> {
    match BatchedEngine::new(config, OwnedBuffers::new(config.num_envs)) {
        Ok(e) => e,
        Err(e) => panic!("benchmark profile rejected: {e}"),
    }
}

/// Write a deterministic action pattern for `tick`.
///
/// Mixes instance index and tick through a multiplicative hash so the
/// agents wander instead of marching in lock-step.
pub fn scripted_actions(tick: u64, actions: &mut [i32]) {
    for (i, a) in actions.iter_mut().enumerate() {
        let h = (tick ^ ((i as u64) << 20)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        *a = ((h >> 59) % NUM_ACTIONS as u64) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        for n in BATCH_SIZES {
            assert!(batch_profile(n, 0).validate().is_ok());
            assert!(minigrid_profile(n, 0).validate().is_ok());
        }
    }

    #[test]
    fn scripted_actions_are_valid_and_varied() {
        let mut a = vec![0i32; 64];
        scripted_actions(3, &mut a);
        assert!(a.iter().all(|&x| (0..NUM_ACTIONS as i32).contains(&x)));
        let distinct: std::collections::HashSet<_> = a.iter().collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn build_runs_a_step() {
        let mut e = build(batch_profile(4, 1));
        scripted_actions(0, e.buffers_mut().actions_mut());
        assert!(e.step().is_ok());
    }
}
