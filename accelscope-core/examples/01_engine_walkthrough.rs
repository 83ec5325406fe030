//! Engine Walkthrough Example
//!
//! Drives the engine by hand, one tick at a time, to show what each
//! operation does to the published snapshot.
//!
//! ## What You'll Learn
//!
//! - Constructing a reproducible engine (seeded randomness)
//! - Running ticks without a timer
//! - Merging partial configuration updates, including clamped values
//! - Reading derived statistics and the event log
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_engine_walkthrough
//! ```

use accelscope_core::{Engine, EngineSettings, EngineSnapshot, PartialConfiguration};

fn print_stats(snapshot: &EngineSnapshot) {
    let stats = &snapshot.stats;
    println!(
        "  tick {:>3} | avg {:>6.2}us | p99 {:>6.2}us | max jitter {:>4.2}us | speedup {:>5.3}x | DMA {:>5.2} GB/s",
        snapshot.tick,
        stats.avg_latency_us,
        stats.p99_latency_us,
        stats.max_jitter_us,
        stats.speedup,
        stats.dma_bandwidth_gbps,
    );
}

fn main() {
    println!("AccelScope Engine Walkthrough");
    println!("=============================\n");

    let engine = Engine::new(EngineSettings::default().with_seed(2024));
    let config = engine.config();
    println!(
        "Default configuration: {} cores, window {}, {} MB/s, threshold {}\n",
        config.active_cores, config.window_size, config.data_rate, config.filter_threshold
    );

    // 1. A few ticks at the default configuration
    println!("1. Ten ticks with 4 active cores:");
    for _ in 0..10 {
        let snapshot = engine.tick();
        if snapshot.tick % 5 == 0 {
            print_stats(&snapshot);
        }
    }

    // 2. Scale up to all eight cores
    println!("\n2. Enabling all 8 cores:");
    engine.update_config(&PartialConfiguration {
        active_cores: Some(8),
        ..Default::default()
    });
    for _ in 0..50 {
        let snapshot = engine.tick();
        if snapshot.tick % 25 == 0 {
            print_stats(&snapshot);
        }
    }

    // 3. Out-of-range requests are clamped and logged
    println!("\n3. Requesting 64 cores and a 100k window:");
    let config = engine.update_config(&PartialConfiguration {
        active_cores: Some(64),
        window_size: Some(100_000),
        ..Default::default()
    });
    println!(
        "  applied: {} cores, window {}",
        config.active_cores, config.window_size
    );

    // 4. The event log, newest first
    println!("\n4. Event log:");
    let snapshot = engine.snapshot();
    for entry in snapshot.log.iter() {
        println!("  [{:<7}] {}", entry.level, entry.message);
    }

    // 5. The snapshot as the presentation layer receives it
    println!("\n5. Latest sample as JSON:");
    match serde_json::to_string_pretty(&snapshot.current) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("  serialisation failed: {e}"),
    }
}
