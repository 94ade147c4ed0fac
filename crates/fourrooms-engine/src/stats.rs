//! Running episode statistics with drain-on-read semantics.

use crate::instance::EpisodeSummary;

/// Aggregates over the episodes completed since the last drain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeStats {
    /// Episodes completed.
    pub episodes: u64,
    /// Mean undiscounted return.
    pub mean_return: f64,
    /// Mean episode length in ticks.
    pub mean_length: f64,
    /// Fraction of episodes that ended at the goal.
    pub success_rate: f64,
}

/// Accumulates completed-episode summaries across all instances.
#[derive(Clone, Debug, Default)]
pub struct StatsAggregator {
    episodes: u64,
    successes: u64,
    return_sum: f64,
    length_sum: u64,
}

impl StatsAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one finished episode.
    pub fn record(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        self.successes += u64::from(summary.reached_goal);
        self.return_sum += f64::from(summary.episode_return);
        self.length_sum += u64::from(summary.length);
    }

    /// Episodes recorded since the last drain.
    pub fn pending(&self) -> u64 {
        self.episodes
    }

    /// Return the means since the last drain and reset the accumulators.
    ///
    /// Returns `None` when no episode has completed since the last drain;
    /// the accumulators are left untouched in that case.
    pub fn drain(&mut self) -> Option<EpisodeStats> {
        if self.episodes == 0 {
            return None;
        }
        let n = self.episodes as f64;
        let stats = EpisodeStats {
            episodes: self.episodes,
            mean_return: self.return_sum / n,
            mean_length: self.length_sum as f64 / n,
            success_rate: self.successes as f64 / n,
        };
        *self = Self::default();
        Some(stats)
    }
}
