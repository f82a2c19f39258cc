//! Headless demo loop
//!
//! Runs a world for a fixed number of ticks, relaying events to the log
//! and printing final stats as JSON. Useful for eyeballing emergent
//! behavior without the session layer.

use civitas::{World, WorldConfig};

const TICKS: u64 = 5_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = WorldConfig::default();
    let mut world = World::new(config);
    if let Err(e) = world.initialize() {
        tracing::error!(error = %e, "initialization failed");
        return;
    }

    for _ in 0..TICKS {
        if let Err(e) = world.tick() {
            tracing::error!(error = %e, tick = world.tick_count, "fatal tick error");
            break;
        }
        for event in world.take_events() {
            tracing::info!(tick = event.tick, event = ?event.kind, "world event");
        }
    }

    let stats = world.stats();
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize stats"),
    }
}
