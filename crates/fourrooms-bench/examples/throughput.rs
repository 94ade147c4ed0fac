//! Steps-per-second sweep over the standard batch sizes.
//!
//! ```text
//! cargo run --release -p fourrooms-bench --example throughput
//! ```

use std::time::Instant;

use fourrooms_bench::{batch_profile, build, scripted_actions, BATCH_SIZES};

const TICKS: u64 = 2_000;

fn main() {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    for n in BATCH_SIZES {
        let mut engine = build(batch_profile(n, 0));
        let start = Instant::now();
        for tick in 0..TICKS {
            scripted_actions(tick, engine.buffers_mut().actions_mut());
            if let Err(e) = engine.step() {
                eprintln!("step failed: {e}");
                return;
            }
        }
        let secs = start.elapsed().as_secs_f64();
        let env_steps = (n as u64 * TICKS) as f64;
        let episodes = engine
            .stats_snapshot()
            .ok()
            .flatten()
            .map_or(0, |s| s.episodes);
        println!(
            "num_envs={n:>5}  {:>12.0} env-steps/s  {:>8} episodes",
            env_steps / secs,
            episodes
        );
    }
}
