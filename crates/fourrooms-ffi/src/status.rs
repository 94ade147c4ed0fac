//! C-compatible status codes.
//!
//! [`FourRoomsStatus`] is a `repr(i32)` enum covering every failure the
//! C ABI can report. Conversions from the engine's `ConfigError` and
//! `EngineError` are provided.

use fourrooms_core::EngineError;
use fourrooms_engine::ConfigError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FourRoomsStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or the engine was already closed.
    InvalidHandle = -1,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -2,
    /// Configuration validation failed.
    ConfigError = -3,
    /// A bound buffer's length does not match the instance count.
    BufferShape = -4,
    /// Instance index out of range.
    IndexOutOfRange = -5,
    /// The engine behind the handle has been closed.
    Closed = -6,
    /// Caller-provided output buffer is too small.
    BufferTooSmall = -7,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ConfigError> for FourRoomsStatus {
    fn from(e: &ConfigError) -> Self {
        match e {
            ConfigError::BufferShape { .. } => FourRoomsStatus::BufferShape,
            _ => FourRoomsStatus::ConfigError,
        }
    }
}

impl From<&EngineError> for FourRoomsStatus {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::Closed => FourRoomsStatus::Closed,
            EngineError::InvalidIndex { .. } => FourRoomsStatus::IndexOutOfRange,
        }
    }
}
