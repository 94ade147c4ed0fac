//! Step-by-step trajectory recording.

use fourrooms_core::OwnedBuffers;

use crate::hash::{fold_buffers, FNV_OFFSET};

/// Chains an FNV-1a digest over every recorded frame and tallies
/// rewards and episode endings.
///
/// Two runs with equal [`digest()`](Self::digest) produced bit-identical
/// observations, rewards, and flags on every recorded frame.
#[derive(Clone, Debug)]
pub struct TrajectoryRecorder {
    digest: u64,
    frames: u64,
    total_reward: f64,
    terminations: u64,
    truncations: u64,
    frame_digests: Vec<u64>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self {
            digest: FNV_OFFSET,
            frames: 0,
            total_reward: 0.0,
            terminations: 0,
            truncations: 0,
            frame_digests: Vec::new(),
        }
    }

    /// Fold the current buffer contents into the trajectory.
    pub fn record(&mut self, buffers: &OwnedBuffers) {
        self.digest = fold_buffers(self.digest, buffers);
        self.frame_digests.push(self.digest);
        self.frames += 1;
        self.total_reward += buffers.rewards().iter().map(|&r| f64::from(r)).sum::<f64>();
        self.terminations += buffers.terminals().iter().map(|&f| u64::from(f)).sum::<u64>();
        self.truncations += buffers.truncations().iter().map(|&f| u64::from(f)).sum::<u64>();
    }

    /// Chained digest over all frames.
    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// Digest after each recorded frame.
    pub fn frame_digests(&self) -> &[u64] {
        &self.frame_digests
    }

    /// Index of the first frame where `self` and `other` diverge.
    pub fn first_divergence(&self, other: &Self) -> Option<usize> {
        let common = self.frame_digests.len().min(other.frame_digests.len());
        (0..common)
            .find(|&i| self.frame_digests[i] != other.frame_digests[i])
            .or_else(|| (self.frame_digests.len() != other.frame_digests.len()).then_some(common))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn terminations(&self) -> u64 {
        self.terminations
    }

    pub fn truncations(&self) -> u64 {
        self.truncations
    }
}

impl Default for TrajectoryRecorder {
    fn default() -> Self {
        Self::new()
    }
}
