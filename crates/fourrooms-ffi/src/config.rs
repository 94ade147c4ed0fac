//! C-layout engine configuration.

use fourrooms_engine::{EnvConfig, EpisodeRules};
use fourrooms_obs::{ObsConfig, ObsEncoding};

use crate::status::FourRoomsStatus;

/// Engine configuration as seen from C.
///
/// Fill with [`fourrooms_config_default`] and override fields as needed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourRoomsConfig {
    /// Number of environment instances.
    pub num_envs: usize,
    /// Global seed; instance `i` uses `seed ^ i`.
    pub seed: u64,
    /// Grid side length (odd, at least 9).
    pub size: u32,
    /// Ticks before an unfinished episode is truncated.
    pub horizon: u32,
    /// Reward on every tick that does not reach the goal.
    pub step_cost: f32,
    /// Reward on reaching the goal.
    pub goal_reward: f32,
    /// 0 = binary channels, 1 = MiniGrid codes.
    pub encoding: i32,
    /// MiniGrid only: nonzero disables wall occlusion.
    pub see_through_walls: u8,
}

impl From<&EnvConfig> for FourRoomsConfig {
    fn from(c: &EnvConfig) -> Self {
        Self {
            num_envs: c.num_envs,
            seed: c.seed,
            size: c.size,
            horizon: c.rules.horizon,
            step_cost: c.rules.step_cost,
            goal_reward: c.rules.goal_reward,
            encoding: match c.obs.encoding {
                ObsEncoding::Binary => 0,
                ObsEncoding::MiniGrid => 1,
            },
            see_through_walls: u8::from(c.obs.see_through_walls),
        }
    }
}

impl TryFrom<&FourRoomsConfig> for EnvConfig {
    type Error = FourRoomsStatus;

    fn try_from(c: &FourRoomsConfig) -> Result<Self, Self::Error> {
        let encoding = match c.encoding {
            0 => ObsEncoding::Binary,
            1 => ObsEncoding::MiniGrid,
            _ => return Err(FourRoomsStatus::InvalidArgument),
        };
        Ok(EnvConfig {
            num_envs: c.num_envs,
            seed: c.seed,
            size: c.size,
            rules: EpisodeRules {
                horizon: c.horizon,
                step_cost: c.step_cost,
                goal_reward: c.goal_reward,
            },
            obs: ObsConfig {
                encoding,
                see_through_walls: c.see_through_walls != 0,
            },
        })
    }
}

/// Write the default configuration into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_config_default(out: *mut FourRoomsConfig) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return FourRoomsStatus::InvalidArgument as i32;
        }
        // SAFETY: out is non-null and points to a writable FourRoomsConfig.
        unsafe { *out = FourRoomsConfig::from(&EnvConfig::default()) };
        FourRoomsStatus::Ok as i32
    })
}
