//! Engine configuration, validation, and error types.
//!
//! [`EnvConfig`] is the constructor input for a [`BatchedEngine`](crate::BatchedEngine).
//! [`validate()`](EnvConfig::validate) checks every parameter before the
//! engine allocates anything, so a failed construction leaves nothing
//! half-built behind.

use std::error::Error;
use std::fmt;

use fourrooms_core::ShapeMismatch;
use fourrooms_obs::ObsConfig;
use fourrooms_space::{GridMap, MapError};

// ── EpisodeRules ───────────────────────────────────────────────────

/// Reward magnitudes and episode horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeRules {
    /// Ticks after which an episode that has not reached the goal is
    /// truncated. Default: 512.
    pub horizon: u32,
    /// Reward on every tick that does not reach the goal. Default: -0.01.
    pub step_cost: f32,
    /// Reward on the tick the agent reaches the goal. Default: 1.0.
    pub goal_reward: f32,
}

impl Default for EpisodeRules {
    fn default() -> Self {
        Self {
            horizon: 512,
            step_cost: -0.01,
            goal_reward: 1.0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing an engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `num_envs` is zero.
    NoInstances,
    /// The grid size cannot host the four-rooms layout.
    Map(MapError),
    /// `horizon` is zero.
    ZeroHorizon,
    /// A reward value is NaN or infinite.
    InvalidReward {
        /// Which value was rejected and why.
        reason: String,
    },
    /// A bound buffer's length does not match `num_envs`.
    BufferShape {
        /// Which buffer is wrong.
        buffer: &'static str,
        /// Required element count.
        expected: usize,
        /// Element count actually bound.
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInstances => write!(f, "num_envs must be at least 1"),
            Self::Map(e) => write!(f, "map: {e}"),
            Self::ZeroHorizon => write!(f, "horizon must be at least 1"),
            Self::InvalidReward { reason } => write!(f, "invalid reward: {reason}"),
            Self::BufferShape {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{buffer} buffer has {actual} elements, expected {expected}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for ConfigError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

impl From<ShapeMismatch> for ConfigError {
    fn from(m: ShapeMismatch) -> Self {
        Self::BufferShape {
            buffer: m.buffer,
            expected: m.expected,
            actual: m.actual,
        }
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Complete configuration for constructing a batched engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvConfig {
    /// Number of environment instances. Default: 1.
    pub num_envs: usize,
    /// Global seed; instance `i` draws from `seed ^ i`. Default: 0.
    pub seed: u64,
    /// Grid side length, odd and at least 9. Default: 19.
    pub size: u32,
    /// Reward and horizon settings.
    pub rules: EpisodeRules,
    /// Observation settings.
    pub obs: ObsConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            num_envs: 1,
            seed: 0,
            size: GridMap::DEFAULT_SIZE,
            rules: EpisodeRules::default(),
            obs: ObsConfig::default(),
        }
    }
}

impl EnvConfig {
    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_envs == 0 {
            return Err(ConfigError::NoInstances);
        }
        GridMap::check_size(self.size)?;
        if self.rules.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if !self.rules.step_cost.is_finite() {
            return Err(ConfigError::InvalidReward {
                reason: format!("step_cost must be finite, got {}", self.rules.step_cost),
            });
        }
        if !self.rules.goal_reward.is_finite() {
            return Err(ConfigError::InvalidReward {
                reason: format!("goal_reward must be finite, got {}", self.rules.goal_reward),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_succeeds() {
        assert!(EnvConfig::default().validate().is_ok());
    }

    #[test]
    fn default_rules_match_classic_task() {
        let r = EpisodeRules::default();
        assert_eq!(r.horizon, 512);
        assert_eq!(r.goal_reward, 1.0);
        assert!(r.step_cost < 0.0);
    }

    #[test]
    fn validate_zero_envs_fails() {
        let cfg = EnvConfig {
            num_envs: 0,
            ..EnvConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoInstances));
    }

    #[test]
    fn validate_small_grid_fails() {
        let cfg = EnvConfig {
            size: 5,
            ..EnvConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Map(MapError::TooSmall { size: 5, .. }))
        ));
    }

    #[test]
    fn validate_even_grid_fails() {
        let cfg = EnvConfig {
            size: 18,
            ..EnvConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Map(MapError::EvenSize { size: 18 }))
        ));
    }

    #[test]
    fn validate_zero_horizon_fails() {
        let mut cfg = EnvConfig::default();
        cfg.rules.horizon = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroHorizon));
    }

    #[test]
    fn validate_nan_reward_fails() {
        let mut cfg = EnvConfig::default();
        cfg.rules.step_cost = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidReward { .. })
        ));

        let mut cfg = EnvConfig::default();
        cfg.rules.goal_reward = f32::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidReward { .. })
        ));
    }

    #[test]
    fn map_error_is_exposed_as_source() {
        let e = ConfigError::from(MapError::EvenSize { size: 10 });
        assert!(e.source().is_some());
        assert!(e.to_string().contains("must be odd"));
    }

    #[test]
    fn shape_mismatch_converts() {
        let e = ConfigError::from(ShapeMismatch {
            buffer: "actions",
            expected: 4,
            actual: 3,
        });
        assert_eq!(
            e.to_string(),
            "actions buffer has 3 elements, expected 4"
        );
    }
}
