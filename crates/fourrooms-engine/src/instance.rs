//! One environment instance: position, goal, counters, and its RNG.

use fourrooms_core::{Action, Pos};
use fourrooms_space::GridMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::EpisodeRules;

/// Where an episode stands after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// Neither terminated nor truncated.
    InProgress,
    /// The agent reached the goal.
    Terminated,
    /// The horizon was reached without reaching the goal.
    Truncated,
}

/// Result of advancing an instance by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Reward for this tick.
    pub reward: f32,
    /// Episode status after this tick.
    pub status: EpisodeStatus,
}

impl Transition {
    /// Whether the goal was reached on this tick.
    pub fn terminated(&self) -> bool {
        self.status == EpisodeStatus::Terminated
    }

    /// Whether the horizon cut the episode on this tick.
    pub fn truncated(&self) -> bool {
        self.status == EpisodeStatus::Truncated
    }

    /// Whether the episode ended on this tick.
    pub fn is_done(&self) -> bool {
        self.status != EpisodeStatus::InProgress
    }
}

/// Record of a finished episode, fed to the stats aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeSummary {
    /// Instance that ran the episode.
    pub index: usize,
    /// Sum of rewards over the episode.
    pub episode_return: f32,
    /// Ticks the episode lasted.
    pub length: u32,
    /// Whether the episode ended at the goal.
    pub reached_goal: bool,
}

/// A single grid-world episode stream.
///
/// Each instance owns a ChaCha8 stream seeded with `seed ^ index`, so its
/// trajectory depends only on the global seed, its index, and the
/// actions it is fed.
#[derive(Clone, Debug)]
pub struct EnvironmentInstance {
    index: usize,
    position: Pos,
    goal: Pos,
    step_count: u32,
    episode_return: f32,
    rng: ChaCha8Rng,
}

impl EnvironmentInstance {
    /// Create instance `index` under the global `seed` and start its
    /// first episode.
    pub fn new(index: usize, seed: u64, map: &GridMap) -> Self {
        let mut inst = Self {
            index,
            position: Pos::new(0, 0),
            goal: Pos::new(0, 0),
            step_count: 0,
            episode_return: 0.0,
            rng: rng_for(seed, index),
        };
        inst.begin_episode(map);
        inst
    }

    /// Reseed from a new global seed and start a fresh episode.
    pub fn reseed(&mut self, seed: u64, map: &GridMap) {
        self.rng = rng_for(seed, self.index);
        self.begin_episode(map);
    }

    /// Sample a goal and a distinct agent start, and zero the counters.
    ///
    /// The goal is drawn first, uniformly over floor cells; the agent is
    /// then drawn uniformly over the remaining floor cells.
    pub fn begin_episode(&mut self, map: &GridMap) {
        let floor = map.floor_cells();
        let n = floor.len() as u32;
        let g = self.rng.random_range(0..n);
        let mut a = self.rng.random_range(0..n - 1);
        if a >= g {
            a += 1;
        }
        self.goal = floor[g as usize];
        self.position = floor[a as usize];
        self.step_count = 0;
        self.episode_return = 0.0;
    }

    /// Advance one tick under `action`.
    ///
    /// Moves into the target cell when it is floor, otherwise stays.
    /// Reaching the goal terminates; otherwise the horizon may truncate.
    /// Termination wins when both apply on the same tick.
    pub fn transition(&mut self, action: Action, map: &GridMap, rules: &EpisodeRules) -> Transition {
        self.step_count = self.step_count.saturating_add(1);

        let (dr, dc) = action.offset();
        let target = self.position.offset(dr, dc);
        if map.is_floor(target) {
            self.position = target;
        }

        let (reward, status) = if self.position == self.goal {
            (rules.goal_reward, EpisodeStatus::Terminated)
        } else if self.step_count >= rules.horizon {
            (rules.step_cost, EpisodeStatus::Truncated)
        } else {
            (rules.step_cost, EpisodeStatus::InProgress)
        };
        self.episode_return += reward;
        Transition { reward, status }
    }

    /// Summarise the current episode as ending with `status`.
    pub fn summary(&self, status: EpisodeStatus) -> EpisodeSummary {
        EpisodeSummary {
            index: self.index,
            episode_return: self.episode_return,
            length: self.step_count,
            reached_goal: status == EpisodeStatus::Terminated,
        }
    }

    /// Index within the batch.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Agent cell.
    pub fn position(&self) -> Pos {
        self.position
    }

    /// Goal cell.
    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Ticks taken in the current episode.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Reward accumulated in the current episode.
    pub fn episode_return(&self) -> f32 {
        self.episode_return
    }
}

fn rng_for(seed: u64, index: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> GridMap {
        GridMap::four_rooms(19).unwrap()
    }

    /// Place an instance at a known position and goal.
    fn placed(map: &GridMap, position: Pos, goal: Pos) -> EnvironmentInstance {
        let mut inst = EnvironmentInstance::new(0, 0, map);
        inst.position = position;
        inst.goal = goal;
        inst
    }

    #[test]
    fn start_is_floor_and_distinct_from_goal() {
        let map = map();
        for seed in 0..200 {
            let inst = EnvironmentInstance::new(3, seed, &map);
            assert!(map.is_floor(inst.position()));
            assert!(map.is_floor(inst.goal()));
            assert_ne!(inst.position(), inst.goal());
            assert_eq!(inst.step_count(), 0);
            assert_eq!(inst.episode_return(), 0.0);
        }
    }

    #[test]
    fn same_seed_and_index_give_same_start() {
        let map = map();
        let a = EnvironmentInstance::new(5, 42, &map);
        let b = EnvironmentInstance::new(5, 42, &map);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.goal(), b.goal());
    }

    #[test]
    fn reseed_matches_fresh_construction() {
        let map = map();
        let mut a = EnvironmentInstance::new(2, 1, &map);
        a.begin_episode(&map);
        a.reseed(99, &map);
        let b = EnvironmentInstance::new(2, 99, &map);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.goal(), b.goal());
    }

    #[test]
    fn move_into_floor() {
        let map = map();
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(15, 15));
        let t = inst.transition(Action::East, &map, &EpisodeRules::default());
        assert_eq!(inst.position(), Pos::new(5, 6));
        assert_eq!(t.status, EpisodeStatus::InProgress);
        assert_eq!(t.reward, EpisodeRules::default().step_cost);
        assert_eq!(inst.step_count(), 1);
    }

    #[test]
    fn wall_blocks_movement_but_costs_a_tick() {
        let map = map();
        let mut inst = placed(&map, Pos::new(1, 1), Pos::new(15, 15));
        inst.transition(Action::North, &map, &EpisodeRules::default());
        assert_eq!(inst.position(), Pos::new(1, 1));
        inst.transition(Action::West, &map, &EpisodeRules::default());
        assert_eq!(inst.position(), Pos::new(1, 1));
        assert_eq!(inst.step_count(), 2);
    }

    #[test]
    fn diagonal_moves() {
        let map = map();
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(15, 15));
        inst.transition(Action::NorthEast, &map, &EpisodeRules::default());
        assert_eq!(inst.position(), Pos::new(4, 6));
        inst.transition(Action::SouthWest, &map, &EpisodeRules::default());
        assert_eq!(inst.position(), Pos::new(5, 5));
    }

    #[test]
    fn reaching_goal_terminates_with_goal_reward() {
        let map = map();
        let rules = EpisodeRules::default();
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(5, 6));
        let t = inst.transition(Action::East, &map, &rules);
        assert!(t.terminated());
        assert!(!t.truncated());
        assert_eq!(t.reward, rules.goal_reward);
        assert_eq!(inst.episode_return(), rules.goal_reward);
    }

    #[test]
    fn horizon_truncates() {
        let map = map();
        let rules = EpisodeRules {
            horizon: 3,
            ..EpisodeRules::default()
        };
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(15, 15));
        assert!(!inst.transition(Action::Stay, &map, &rules).is_done());
        assert!(!inst.transition(Action::Stay, &map, &rules).is_done());
        let t = inst.transition(Action::Stay, &map, &rules);
        assert!(t.truncated());
        assert!(!t.terminated());
        let s = inst.summary(t.status);
        assert_eq!(s.length, 3);
        assert!(!s.reached_goal);
        assert!((s.episode_return - 3.0 * rules.step_cost).abs() < 1e-6);
    }

    #[test]
    fn goal_on_horizon_tick_terminates_only() {
        let map = map();
        let rules = EpisodeRules {
            horizon: 1,
            ..EpisodeRules::default()
        };
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(6, 5));
        let t = inst.transition(Action::South, &map, &rules);
        assert!(t.terminated());
        assert!(!t.truncated());
    }

    #[test]
    fn begin_episode_zeroes_counters() {
        let map = map();
        let mut inst = placed(&map, Pos::new(5, 5), Pos::new(15, 15));
        inst.transition(Action::Stay, &map, &EpisodeRules::default());
        inst.begin_episode(&map);
        assert_eq!(inst.step_count(), 0);
        assert_eq!(inst.episode_return(), 0.0);
    }
}
