//! Engine lifecycle FFI: create, reset, step, stats, render, close.
//!
//! Each engine sits behind its own `Arc<Mutex<_>>`, so the global table
//! lock is only held for handle lookup and engines on different trainer
//! threads step concurrently.

use std::os::raw::c_char;
use std::sync::{Arc, Mutex};

use fourrooms_engine::{BatchedEngine, EnvConfig};

use crate::buffers::{FourRoomsBuffers, RawBuffers};
use crate::config::FourRoomsConfig;
use crate::handle::HandleTable;
use crate::status::FourRoomsStatus;

type EngineArc = Arc<Mutex<BatchedEngine<RawBuffers>>>;

static ENGINES: Mutex<HandleTable<EngineArc>> = Mutex::new(HandleTable::new());

fn get_engine(handle: u64) -> Option<EngineArc> {
    ENGINES.lock().ok()?.get(handle).cloned()
}

/// Episode statistics drained by [`fourrooms_engine_stats`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourRoomsStats {
    /// Episodes completed since the previous drain.
    pub episodes: u64,
    /// Mean undiscounted return.
    pub mean_return: f64,
    /// Mean episode length in ticks.
    pub mean_length: f64,
    /// Fraction of episodes that reached the goal.
    pub success_rate: f64,
}

/// Create an engine bound to caller-owned buffers.
///
/// Initial observations are written before this returns. On success the
/// handle is written to `handle_out`. The buffers must outlive the
/// engine; see [`FourRoomsBuffers`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_create(
    config: *const FourRoomsConfig,
    buffers: *const FourRoomsBuffers,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if config.is_null() || buffers.is_null() || handle_out.is_null() {
            return FourRoomsStatus::InvalidArgument as i32;
        }
        // SAFETY: both pointers are non-null and point to initialised values.
        let (config, buffers) = unsafe { (*config, *buffers) };

        let env_config = match EnvConfig::try_from(&config) {
            Ok(c) => c,
            Err(status) => return status as i32,
        };
        // SAFETY: validity and lifetime of the buffers are the caller's contract.
        let raw = match unsafe { RawBuffers::new(buffers) } {
            Some(r) => r,
            None => return FourRoomsStatus::InvalidArgument as i32,
        };
        let engine = match BatchedEngine::new(env_config, raw) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "engine creation rejected");
                return FourRoomsStatus::from(&e) as i32;
            }
        };

        let handle = ffi_lock!(ENGINES).insert(Arc::new(Mutex::new(engine)));
        // SAFETY: handle_out is non-null per the check above.
        unsafe { *handle_out = handle };
        FourRoomsStatus::Ok as i32
    })
}

/// Number of instances, or 0 for an unknown handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_num_envs(handle: u64) -> usize {
    ffi_guard_or!(0, {
        let Some(arc) = get_engine(handle) else {
            return 0;
        };
        let n = match arc.lock() {
            Ok(engine) => engine.num_envs(),
            Err(_) => 0,
        };
        n
    })
}

/// Reseed every instance from `seed` and rewrite all observations.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_reset(handle: u64, seed: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return FourRoomsStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        match engine.reset_all(seed) {
            Ok(()) => FourRoomsStatus::Ok as i32,
            Err(e) => FourRoomsStatus::from(&e) as i32,
        }
    })
}

/// Reseed and restart instance `index` alone.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_reset_instance(handle: u64, index: usize, seed: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return FourRoomsStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        match engine.reset_instance(index, seed) {
            Ok(()) => FourRoomsStatus::Ok as i32,
            Err(e) => FourRoomsStatus::from(&e) as i32,
        }
    })
}

/// Advance every instance by one tick, reading the bound action buffer
/// and writing rewards, flags and observations.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_step(handle: u64) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return FourRoomsStatus::InvalidHandle as i32;
        };
        let mut engine = ffi_lock!(arc);
        match engine.step() {
            Ok(()) => FourRoomsStatus::Ok as i32,
            Err(e) => FourRoomsStatus::from(&e) as i32,
        }
    })
}

/// Drain episode statistics.
///
/// Writes 1 to `has_data_out` and fills `out` when at least one episode
/// completed since the previous drain; otherwise writes 0 and a zeroed
/// `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_stats(
    handle: u64,
    out: *mut FourRoomsStats,
    has_data_out: *mut u8,
) -> i32 {
    ffi_guard!({
        if out.is_null() || has_data_out.is_null() {
            return FourRoomsStatus::InvalidArgument as i32;
        }
        let Some(arc) = get_engine(handle) else {
            return FourRoomsStatus::InvalidHandle as i32;
        };
        let drained = match ffi_lock!(arc).stats_snapshot() {
            Ok(s) => s,
            Err(e) => return FourRoomsStatus::from(&e) as i32,
        };
        let (stats, has_data) = match drained {
            Some(s) => (
                FourRoomsStats {
                    episodes: s.episodes,
                    mean_return: s.mean_return,
                    mean_length: s.mean_length,
                    success_rate: s.success_rate,
                },
                1,
            ),
            None => (FourRoomsStats::default(), 0),
        };
        // SAFETY: both pointers are non-null per the check above.
        unsafe {
            *out = stats;
            *has_data_out = has_data;
        }
        FourRoomsStatus::Ok as i32
    })
}

/// Draw instance `index` as NUL-terminated text into `buf`.
///
/// The text length (excluding the NUL) is always written to `len_out`
/// when it is non-null. Returns `BufferTooSmall` if `buf` cannot hold
/// the text and its terminator.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_render(
    handle: u64,
    index: usize,
    buf: *mut c_char,
    cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let Some(arc) = get_engine(handle) else {
            return FourRoomsStatus::InvalidHandle as i32;
        };
        let engine = ffi_lock!(arc);
        let text = match engine.render_snapshot(index) {
            Ok(snap) => snap.to_string(),
            Err(e) => return FourRoomsStatus::from(&e) as i32,
        };
        if !len_out.is_null() {
            // SAFETY: len_out is non-null and writable per caller contract.
            unsafe { *len_out = text.len() };
        }
        if buf.is_null() || cap <= text.len() {
            return FourRoomsStatus::BufferTooSmall as i32;
        }
        // SAFETY: buf holds at least `cap > text.len()` writable bytes.
        unsafe {
            std::ptr::copy_nonoverlapping(text.as_ptr(), buf.cast::<u8>(), text.len());
            *buf.add(text.len()) = 0;
        }
        FourRoomsStatus::Ok as i32
    })
}

/// Close an engine and release its handle. Idempotent: unknown or
/// already-closed handles also return `Ok`.
///
/// After this returns the engine no longer touches the bound buffers.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fourrooms_engine_close(handle: u64) -> i32 {
    ffi_guard!({
        let removed = ffi_lock!(ENGINES).remove(handle);
        if let Some(arc) = removed {
            if let Ok(mut engine) = arc.lock() {
                engine.close();
            }
        }
        FourRoomsStatus::Ok as i32
    })
}
