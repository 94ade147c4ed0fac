//! Drive a batch of Four Rooms instances with uniform random actions.
//!
//! ```text
//! RUST_LOG=fourrooms_engine=debug cargo run -p fourrooms-engine --example random_rollout
//! ```

use std::error::Error;
use std::io;

use fourrooms_core::{OwnedBuffers, NUM_ACTIONS};
use fourrooms_engine::{BatchedEngine, EnvConfig, RenderSink, TextSink};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

const NUM_ENVS: usize = 64;
const TICKS: u64 = 20_000;
const REPORT_EVERY: u64 = 5_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = EnvConfig {
        num_envs: NUM_ENVS,
        seed: 42,
        ..EnvConfig::default()
    };
    let mut engine = BatchedEngine::new(config, OwnedBuffers::new(NUM_ENVS))?;
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut sink = TextSink::new(io::stdout().lock()).with_view(true);
    sink.present(&engine.render_snapshot(0)?)?;

    for tick in 1..=TICKS {
        for a in engine.buffers_mut().actions_mut() {
            *a = rng.random_range(0..NUM_ACTIONS as i32);
        }
        engine.step()?;

        if tick % REPORT_EVERY == 0 {
            if let Some(stats) = engine.stats_snapshot()? {
                tracing::info!(
                    tick,
                    episodes = stats.episodes,
                    mean_return = stats.mean_return,
                    mean_length = stats.mean_length,
                    success_rate = stats.success_rate,
                    "random policy"
                );
            }
        }
    }

    sink.present(&engine.render_snapshot(0)?)?;
    engine.close();
    Ok(())
}
