//! Runtime errors from a constructed engine.
//!
//! Construction-time failures live in the engine crate's `ConfigError`;
//! this enum covers calls made against an engine after it exists.

use std::error::Error;
use std::fmt;

/// Errors from engine operations after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine was closed; its instances have been released.
    Closed,
    /// Instance index out of bounds.
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// Total number of instances.
        num_envs: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "engine is closed"),
            Self::InvalidIndex { index, num_envs } => {
                write!(f, "instance index {index} out of range (num_envs={num_envs})")
            }
        }
    }
}

impl Error for EngineError {}
