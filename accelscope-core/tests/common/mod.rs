//! Shared fixtures for the integration tests
//!
//! Engines built here run on a [`FixedTime`] clock the test keeps a handle
//! to, so labels and log timestamps are predictable.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use accelscope_core::{
    Engine, EngineEvent, EngineSettings, FixedRandom, FixedTime, RandomSource, SeededRandom,
};

/// 2024-01-01 13:45:30 UTC
pub const START_MS: u64 = 1_704_116_730_000;

/// Engine whose every draw is 0, plus the clock it reads
pub fn zero_engine() -> (Engine, FixedTime) {
    engine_with(EngineSettings::default(), FixedRandom::zero())
}

/// Engine on a seeded stream, plus the clock it reads
pub fn seeded_engine(seed: u64) -> (Engine, FixedTime) {
    engine_with(EngineSettings::default(), SeededRandom::from_seed(seed))
}

pub fn engine_with<R: RandomSource + 'static>(
    settings: EngineSettings,
    random: R,
) -> (Engine, FixedTime) {
    let clock = FixedTime::new(START_MS);
    let engine = Engine::with_sources(settings, random, clock.clone());
    (engine, clock)
}

/// Listener that records every event it receives
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl Recorder {
    pub fn attach(engine: &Engine) -> Self {
        let recorder = Self::default();
        let sink = Arc::clone(&recorder.events);
        engine.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        recorder
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn snapshot_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, EngineEvent::Snapshot(_)))
            .count()
    }

    /// Messages of every `Log` event, in delivery order
    pub fn log_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Log(entry) => Some(entry.message),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
