//! Ticks and configuration updates racing from several threads
//!
//! Every snapshot returned by `tick()` must pair its statistics with the
//! windows they were computed from, and its sample with the configuration
//! it was generated under.

mod common;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use accelscope_core::{
    constants::MAX_LOG_ENTRIES, generator::base_latency_us, Engine, EngineEvent, EngineSettings,
    EngineSnapshot, PartialConfiguration, StatsAggregator,
};

const TICK_THREADS: usize = 4;
const TICKS_PER_THREAD: usize = 250;
const UPDATE_THREADS: usize = 2;
const UPDATES_PER_THREAD: usize = 400;

fn assert_consistent(snapshot: &EngineSnapshot) {
    let sample = snapshot.current.expect("tick publishes a sample");

    let recomputed = StatsAggregator::compute(
        &snapshot.history.latency,
        &snapshot.history.throughput,
        &snapshot.history.jitter,
        sample.throughput_mbps,
    );
    assert_eq!(
        snapshot.stats, recomputed,
        "stats out of step at tick {}",
        snapshot.tick
    );

    let noise = sample.latency_us - base_latency_us(snapshot.config.active_cores);
    assert!(
        (0.0..20.0).contains(&noise),
        "latency {} does not belong to {} cores",
        sample.latency_us,
        snapshot.config.active_cores
    );
    assert_eq!(
        snapshot.history.latency.last().map(|p| p.value),
        Some(sample.latency_us)
    );
}

#[test]
fn ticks_and_updates_never_interleave() {
    let (engine, _clock) = common::seeded_engine(2024);

    let published: Vec<_> = thread::scope(|scope| {
        let tickers: Vec<_> = (0..TICK_THREADS)
            .map(|_| {
                let engine = engine.clone();
                scope.spawn(move || {
                    (0..TICKS_PER_THREAD)
                        .map(|_| engine.tick())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for worker in 0..UPDATE_THREADS {
            let engine = engine.clone();
            scope.spawn(move || {
                for i in 0..UPDATES_PER_THREAD {
                    let cores = ((i + worker) % 8 + 1) as i64;
                    engine.update_config(&PartialConfiguration {
                        active_cores: Some(cores),
                        ..Default::default()
                    });
                }
            });
        }

        tickers
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(published.len(), TICK_THREADS * TICKS_PER_THREAD);
    for snapshot in &published {
        assert_consistent(snapshot);
    }

    // Each tick got its own counter value
    let mut ticks: Vec<u64> = published.iter().map(|s| s.tick).collect();
    ticks.sort_unstable();
    ticks.dedup();
    assert_eq!(ticks.len(), TICK_THREADS * TICKS_PER_THREAD);

    let last = engine.snapshot();
    assert_eq!(last.tick, (TICK_THREADS * TICKS_PER_THREAD) as u64);
    assert_eq!(last.log.len(), MAX_LOG_ENTRIES);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn scheduled_ticks_stay_consistent_under_updates() {
    let settings = EngineSettings::default()
        .with_seed(7)
        .with_tick_interval_ms(10);
    let engine = Engine::new(settings);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.subscribe(move |event| {
        if let EngineEvent::Snapshot(snapshot) = event {
            sink.lock().unwrap().push(Arc::clone(snapshot));
        }
    });
    engine.start().unwrap();

    let updater = {
        let engine = engine.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..500 {
                engine.update_config(&PartialConfiguration {
                    active_cores: Some(i % 8 + 1),
                    ..Default::default()
                });
                engine.tick();
            }
        })
    };
    updater.await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    engine.stop();

    let seen = seen.lock().unwrap();
    assert!(seen.len() >= 500);
    for snapshot in seen.iter() {
        assert_consistent(snapshot);
    }
}
