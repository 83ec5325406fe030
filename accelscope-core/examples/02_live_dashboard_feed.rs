//! Live Dashboard Feed Example
//!
//! Runs the engine on its own timer and streams snapshots to a subscriber,
//! the way a dashboard backend would.
//!
//! ## What You'll Learn
//!
//! - Starting and stopping the tick scheduler
//! - Subscribing to snapshot, configuration and log events
//! - Changing configuration while the scheduler runs
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_live_dashboard_feed
//! ```

use std::time::Duration;

use accelscope_core::{Engine, EngineEvent, EngineSettings, PartialConfiguration};

#[tokio::main]
async fn main() -> accelscope_core::Result<()> {
    println!("AccelScope Live Feed");
    println!("====================\n");

    let engine = Engine::new(EngineSettings::default().with_tick_interval_ms(200));

    let subscription = engine.subscribe(|event| match event {
        EngineEvent::Snapshot(snapshot) => {
            if let Some(sample) = snapshot.current {
                println!(
                    "[tick {:>2}] latency {:>6.2}us  throughput {:>7.2} MB/s  p99 {:>6.2}us",
                    snapshot.tick,
                    sample.latency_us,
                    sample.throughput_mbps,
                    snapshot.stats.p99_latency_us,
                );
            }
        }
        EngineEvent::ConfigChanged(config) => {
            println!("           config -> {} cores", config.active_cores);
        }
        EngineEvent::Log(entry) => {
            println!("           log    -> [{}] {}", entry.level, entry.message);
        }
    });

    engine.start()?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    engine.update_config(&PartialConfiguration {
        active_cores: Some(2),
        ..Default::default()
    });
    tokio::time::sleep(Duration::from_secs(2)).await;

    engine.stop();
    engine.unsubscribe(subscription);

    let snapshot = engine.snapshot();
    println!(
        "\nStopped after {} ticks; {} log entries recorded",
        snapshot.tick,
        snapshot.log.len()
    );
    Ok(())
}
