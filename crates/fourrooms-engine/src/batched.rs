//! The batched lock-step engine.
//!
//! [`BatchedEngine`] owns N [`EnvironmentInstance`]s over one shared map
//! and a binding to the five shared buffers. Each [`step()`](BatchedEngine::step)
//! reads every instance's action, applies the transition, writes reward
//! and flags, resets finished episodes in place, and writes the next
//! observation. Observations after a finished episode are the first
//! observation of the new episode.
//!
//! # Lifecycle
//!
//! ```text
//! new() ─► Ready ─► step()* / reset_all() / reset_instance() ─► close() ─► Closed
//! ```
//!
//! Once closed, every operation except [`close()`](BatchedEngine::close)
//! and the buffer accessors returns [`EngineError::Closed`].

use std::sync::Arc;

use fourrooms_core::{Action, EngineError, EnvBuffers, OBS_LEN};
use fourrooms_obs::ObservationEncoder;
use fourrooms_space::{shared_map, GridMap};

use crate::config::{ConfigError, EnvConfig, EpisodeRules};
use crate::instance::EnvironmentInstance;
use crate::render::RenderSnapshot;
use crate::stats::{EpisodeStats, StatsAggregator};

/// State released by [`BatchedEngine::close`].
struct EngineCore {
    map: Arc<GridMap>,
    instances: Vec<EnvironmentInstance>,
    encoder: ObservationEncoder,
    rules: EpisodeRules,
    stats: StatsAggregator,
}

/// N independent Four Rooms instances advanced in lock-step.
pub struct BatchedEngine<B: EnvBuffers> {
    config: EnvConfig,
    buffers: B,
    core: Option<EngineCore>,
}

impl<B: EnvBuffers> BatchedEngine<B> {
    /// Validate `config`, check the buffer shapes, build the instances,
    /// and write initial observations.
    ///
    /// Instance `i` is seeded with `config.seed ^ i`.
    pub fn new(config: EnvConfig, mut buffers: B) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(mismatch) = buffers.views().shape_mismatch(config.num_envs) {
            return Err(mismatch.into());
        }
        let map = shared_map(config.size)?;
        let instances = (0..config.num_envs)
            .map(|i| EnvironmentInstance::new(i, config.seed, &map))
            .collect();

        let mut engine = Self {
            config,
            buffers,
            core: Some(EngineCore {
                map,
                instances,
                encoder: ObservationEncoder::new(config.obs),
                rules: config.rules,
                stats: StatsAggregator::new(),
            }),
        };
        engine.write_initial_outputs();

        tracing::info!(
            num_envs = config.num_envs,
            size = config.size,
            seed = config.seed,
            horizon = config.rules.horizon,
            encoding = ?config.obs.encoding,
            "four rooms engine ready"
        );
        Ok(engine)
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Number of instances in the batch.
    pub fn num_envs(&self) -> usize {
        self.config.num_envs
    }

    /// Whether [`close()`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.core.is_none()
    }

    /// The bound buffers.
    pub fn buffers(&self) -> &B {
        &self.buffers
    }

    /// Mutable access to the bound buffers, used to write actions
    /// between steps.
    pub fn buffers_mut(&mut self) -> &mut B {
        &mut self.buffers
    }

    /// Release the buffer binding.
    pub fn into_buffers(self) -> B {
        self.buffers
    }

    /// The shared map.
    pub fn map(&self) -> Result<&GridMap, EngineError> {
        Ok(&self.core()?.map)
    }

    /// Read-only access to instance `index`.
    pub fn instance(&self, index: usize) -> Result<&EnvironmentInstance, EngineError> {
        let core = self.core()?;
        core.instances
            .get(index)
            .ok_or(EngineError::InvalidIndex {
                index,
                num_envs: core.instances.len(),
            })
    }

    /// Reseed every instance from `seed`, start fresh episodes, and
    /// rewrite all observations.
    ///
    /// Rewards and flags are zeroed. The action buffer is left alone.
    /// Episodes cut short by the reset are not recorded in the stats.
    pub fn reset_all(&mut self, seed: u64) -> Result<(), EngineError> {
        let core = self.core.as_mut().ok_or(EngineError::Closed)?;
        for inst in &mut core.instances {
            inst.reseed(seed, &core.map);
        }
        self.config.seed = seed;
        self.write_initial_outputs();
        tracing::debug!(seed, num_envs = self.config.num_envs, "reset all instances");
        Ok(())
    }

    /// Reseed instance `index` alone as if the global seed were `seed`,
    /// and rewrite its outputs.
    pub fn reset_instance(&mut self, index: usize, seed: u64) -> Result<(), EngineError> {
        let core = self.core.as_mut().ok_or(EngineError::Closed)?;
        let num_envs = core.instances.len();
        let inst = core
            .instances
            .get_mut(index)
            .ok_or(EngineError::InvalidIndex { index, num_envs })?;
        inst.reseed(seed, &core.map);

        let views = self.buffers.views();
        views.rewards[index] = 0.0;
        views.terminals[index] = 0;
        views.truncations[index] = 0;
        let slot = &mut views.observations[index * OBS_LEN..(index + 1) * OBS_LEN];
        core.encoder
            .encode(&core.map, inst.position(), inst.goal(), slot);
        tracing::debug!(index, seed, "reset instance");
        Ok(())
    }

    /// Advance every instance by one tick.
    ///
    /// Reads `actions[i]` (out-of-range values mean stay), writes
    /// `rewards[i]`, `terminals[i]`, `truncations[i]`, and the next
    /// observation. A finished episode is recorded in the stats and
    /// replaced by a new one before its observation is written.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let core = self.core.as_mut().ok_or(EngineError::Closed)?;
        let views = self.buffers.views();

        let slots = views.observations.chunks_exact_mut(OBS_LEN);
        for (i, (inst, slot)) in core.instances.iter_mut().zip(slots).enumerate() {
            let action = Action::from_raw(views.actions[i]);
            let t = inst.transition(action, &core.map, &core.rules);
            views.rewards[i] = t.reward;
            views.terminals[i] = u8::from(t.terminated());
            views.truncations[i] = u8::from(t.truncated());

            if t.is_done() {
                let summary = inst.summary(t.status);
                tracing::trace!(
                    index = i,
                    length = summary.length,
                    episode_return = summary.episode_return,
                    reached_goal = summary.reached_goal,
                    "episode finished"
                );
                core.stats.record(&summary);
                inst.begin_episode(&core.map);
            }

            core.encoder
                .encode(&core.map, inst.position(), inst.goal(), slot);
        }
        Ok(())
    }

    /// Snapshot instance `index` for rendering.
    pub fn render_snapshot(&self, index: usize) -> Result<RenderSnapshot<'_>, EngineError> {
        let core = self.core()?;
        let inst = core.instances.get(index).ok_or(EngineError::InvalidIndex {
            index,
            num_envs: core.instances.len(),
        })?;
        Ok(RenderSnapshot {
            index,
            map: &core.map,
            agent: inst.position(),
            goal: inst.goal(),
            step_count: inst.step_count(),
            episode_return: inst.episode_return(),
        })
    }

    /// Means over episodes completed since the last call, then reset.
    ///
    /// `Ok(None)` when no episode has completed since the last call.
    pub fn stats_snapshot(&mut self) -> Result<Option<EpisodeStats>, EngineError> {
        let core = self.core.as_mut().ok_or(EngineError::Closed)?;
        Ok(core.stats.drain())
    }

    /// Release all instances and the map reference. Idempotent.
    ///
    /// The buffer binding stays in place; recover it with
    /// [`into_buffers()`](Self::into_buffers).
    pub fn close(&mut self) {
        if self.core.take().is_some() {
            tracing::debug!(num_envs = self.config.num_envs, "engine closed");
        }
    }

    fn core(&self) -> Result<&EngineCore, EngineError> {
        self.core.as_ref().ok_or(EngineError::Closed)
    }

    fn write_initial_outputs(&mut self) {
        let Some(core) = self.core.as_ref() else {
            return;
        };
        let views = self.buffers.views();
        views.rewards.fill(0.0);
        views.terminals.fill(0);
        views.truncations.fill(0);
        for (inst, slot) in core
            .instances
            .iter()
            .zip(views.observations.chunks_exact_mut(OBS_LEN))
        {
            core.encoder
                .encode(&core.map, inst.position(), inst.goal(), slot);
        }
    }
}

impl<B: EnvBuffers> std::fmt::Debug for BatchedEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedEngine")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourrooms_core::{BorrowedBuffers, OwnedBuffers};

    fn engine(num_envs: usize, seed: u64) -> BatchedEngine<OwnedBuffers> {
        let cfg = EnvConfig {
            num_envs,
            seed,
            ..EnvConfig::default()
        };
        BatchedEngine::new(cfg, OwnedBuffers::new(num_envs)).unwrap()
    }

    #[test]
    fn construction_writes_observations() {
        let e = engine(4, 0);
        for i in 0..4 {
            let obs = e.buffers().observation(i);
            // Agent mark at the window centre.
            assert_eq!(obs[24 * 3 + 1], 1);
        }
        assert!(e.buffers().rewards().iter().all(|&r| r == 0.0));
    }

    #[test]
    fn wrong_buffer_shape_is_rejected() {
        let cfg = EnvConfig {
            num_envs: 3,
            ..EnvConfig::default()
        };
        let err = BatchedEngine::new(cfg, OwnedBuffers::new(2)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BufferShape {
                buffer: "observations",
                expected: 3 * OBS_LEN,
                actual: 2 * OBS_LEN,
            }
        );
    }

    #[test]
    fn short_action_slice_is_rejected() {
        let cfg = EnvConfig {
            num_envs: 2,
            ..EnvConfig::default()
        };
        let mut obs = vec![0u8; 2 * OBS_LEN];
        let mut rew = vec![0f32; 2];
        let mut term = vec![0u8; 2];
        let mut trunc = vec![0u8; 2];
        let mut act = vec![0i32; 1];
        let bufs = BorrowedBuffers::new(&mut obs, &mut rew, &mut term, &mut trunc, &mut act);
        let err = BatchedEngine::new(cfg, bufs).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BufferShape {
                buffer: "actions",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EnvConfig {
            size: 8,
            ..EnvConfig::default()
        };
        assert!(matches!(
            BatchedEngine::new(cfg, OwnedBuffers::new(1)),
            Err(ConfigError::Map(_))
        ));
    }

    #[test]
    fn step_writes_step_cost_and_flags() {
        let mut e = engine(2, 7);
        e.buffers_mut().actions_mut().fill(i32::from(Action::Stay));
        e.step().unwrap();
        for i in 0..2 {
            assert_eq!(e.buffers().rewards()[i], -0.01);
            assert_eq!(e.buffers().terminals()[i], 0);
            assert_eq!(e.buffers().truncations()[i], 0);
            assert_eq!(e.instance(i).unwrap().step_count(), 1);
        }
    }

    #[test]
    fn reset_all_zeroes_flags_and_counters() {
        let mut e = engine(3, 1);
        e.step().unwrap();
        e.reset_all(5).unwrap();
        assert!(e.buffers().rewards().iter().all(|&r| r == 0.0));
        for i in 0..3 {
            assert_eq!(e.instance(i).unwrap().step_count(), 0);
        }
        assert_eq!(e.config().seed, 5);
    }

    #[test]
    fn reset_all_matches_fresh_engine() {
        let mut a = engine(3, 1);
        a.step().unwrap();
        a.reset_all(9).unwrap();
        let b = engine(3, 9);
        assert_eq!(a.buffers().observations(), b.buffers().observations());
    }

    #[test]
    fn reset_instance_touches_only_its_slot() {
        let mut e = engine(3, 2);
        let before = e.buffers().observations().to_vec();
        e.reset_instance(1, 1234).unwrap();
        let after = e.buffers().observations();
        assert_eq!(&before[..OBS_LEN], &after[..OBS_LEN]);
        assert_eq!(&before[2 * OBS_LEN..], &after[2 * OBS_LEN..]);

        let fresh = EnvironmentInstance::new(1, 1234, e.map().unwrap());
        assert_eq!(e.instance(1).unwrap().position(), fresh.position());
    }

    #[test]
    fn reset_instance_out_of_range() {
        let mut e = engine(2, 0);
        assert_eq!(
            e.reset_instance(2, 0),
            Err(EngineError::InvalidIndex {
                index: 2,
                num_envs: 2
            })
        );
    }

    #[test]
    fn render_snapshot_reflects_instance() {
        let e = engine(2, 3);
        let snap = e.render_snapshot(1).unwrap();
        let inst = e.instance(1).unwrap();
        assert_eq!(snap.agent, inst.position());
        assert_eq!(snap.goal, inst.goal());
        assert!(e.render_snapshot(2).is_err());
    }

    #[test]
    fn stats_none_before_any_episode_ends() {
        let mut e = engine(2, 0);
        e.step().unwrap();
        assert_eq!(e.stats_snapshot().unwrap(), None);
    }

    #[test]
    fn close_is_idempotent_and_blocks_operations() {
        let mut e = engine(1, 0);
        e.close();
        e.close();
        assert!(e.is_closed());
        assert_eq!(e.step(), Err(EngineError::Closed));
        assert_eq!(e.reset_all(0), Err(EngineError::Closed));
        assert_eq!(e.reset_instance(0, 0), Err(EngineError::Closed));
        assert_eq!(e.stats_snapshot(), Err(EngineError::Closed));
        assert!(e.render_snapshot(0).is_err());
        assert_eq!(e.into_buffers().num_envs(), 1);
    }
}
