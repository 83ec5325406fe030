//! The Telemetry Engine
//!
//! ## Overview
//!
//! [`Engine`] ties the pieces together and is the only surface the
//! presentation layer talks to:
//!
//! ```text
//!                 ┌──────────────── Engine ─────────────────┐
//! TickScheduler ─→│ generate → history.record → aggregate   │─→ EngineSnapshot ─→ listeners
//!                 │     ↑                                    │
//! update_config ─→│ ConfigStore ─→ EventLog                  │─→ ConfigChanged / Log ─→ listeners
//!                 └──────────────────────────────────────────┘
//! ```
//!
//! Each engine is an explicitly constructed instance; a dashboard session
//! holds one and clones the handle freely (clones share state).
//!
//! ## Serialisation of Mutations
//!
//! Ticks and configuration updates are the only mutation paths. Both run to
//! completion under a single state mutex, so no tick can observe a
//! half-applied update and no update can interleave with a tick's
//! read-then-write of the windows. The lock is never held across an await or
//! any I/O.
//!
//! Snapshots are built under the same lock and published as
//! `Arc<EngineSnapshot>`: a consumer always sees statistics that match the
//! windows they were computed from, and cannot mutate what others see.
//!
//! ## Notification
//!
//! Listeners are invoked after the state lock is released, so a listener may
//! call back into the engine. A panicking listener is logged and skipped; it
//! cannot take the timer task down with it.

use std::ops::ControlFlow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::buffer::MetricHistory;
use crate::config::{ConfigStore, Configuration, PartialConfiguration};
use crate::errors::Result;
use crate::event_log::{EventLog, LogEntry, LogLevel};
use crate::generator::SampleGenerator;
use crate::random::{RandomSource, SeededRandom};
use crate::sample::Sample;
use crate::scheduler::{SchedulerState, TickScheduler};
use crate::settings::EngineSettings;
use crate::stats::{DerivedStatistics, StatsAggregator};
use crate::time::{format_label, SystemClock, TimeSource};

/// Log entries written when the scheduler starts, in order
pub const STARTUP_MESSAGES: [(LogLevel, &str); 3] = [
    (LogLevel::Info, "FPGA controller initialized"),
    (LogLevel::Success, "PCIe link established (Gen3 x8)"),
    (LogLevel::Success, "DMA engine ready"),
];

/// Log entry written when a running scheduler is stopped
pub const SHUTDOWN_MESSAGE: (LogLevel, &str) = (LogLevel::Info, "DMA engine shut down, link idle");

/// Full externally visible state
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    /// Number of metric ticks run so far
    pub tick: u64,
    /// Scheduler state at capture time
    pub state: SchedulerState,
    /// Latest sample; `None` before the first tick
    pub current: Option<Sample>,
    /// The three metric windows
    pub history: MetricHistory,
    /// Statistics computed from `history`
    pub stats: DerivedStatistics,
    pub config: Configuration,
    /// Event log, newest first
    pub log: EventLog,
}

/// Notification delivered to listeners
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A tick completed; once per tick
    Snapshot(Arc<EngineSnapshot>),
    /// The configuration was updated; once per update
    ConfigChanged(Configuration),
    /// An entry was appended to the event log
    Log(LogEntry),
}

/// Handle returned by [`Engine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

struct EngineState {
    store: ConfigStore,
    generator: SampleGenerator<Box<dyn RandomSource>>,
    history: MetricHistory,
    log: EventLog,
    current: Option<Sample>,
    stats: DerivedStatistics,
    tick: u64,
    scheduler: SchedulerState,
    /// Incremented on every start; stale timer tasks compare against it
    session: u64,
    published: Arc<EngineSnapshot>,
}

impl EngineState {
    fn publish(&mut self) -> Arc<EngineSnapshot> {
        let snapshot = Arc::new(EngineSnapshot {
            tick: self.tick,
            state: self.scheduler,
            current: self.current,
            history: self.history.clone(),
            stats: self.stats,
            config: self.store.get(),
            log: self.log.clone(),
        });
        self.published = Arc::clone(&snapshot);
        snapshot
    }
}

struct Shared {
    state: Mutex<EngineState>,
    scheduler: Mutex<TickScheduler>,
    clock: Box<dyn TimeSource>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulation and telemetry aggregation engine
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    /// Engine on the system clock, seeded from `settings.seed` or entropy
    pub fn new(settings: EngineSettings) -> Self {
        let random = match settings.seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        Self::with_sources(settings, random, SystemClock)
    }

    /// Engine with explicit randomness and time sources
    pub fn with_sources<R, C>(settings: EngineSettings, random: R, clock: C) -> Self
    where
        R: RandomSource + 'static,
        C: TimeSource + 'static,
    {
        let mut store = ConfigStore::default();
        if !settings.initial.is_empty() {
            let outcome = store.update(&settings.initial);
            log::info!("applying initial settings: {}", outcome.summary());
        }

        let mut state = EngineState {
            store,
            generator: SampleGenerator::new(Box::new(random)),
            history: MetricHistory::new(),
            log: EventLog::new(),
            current: None,
            stats: DerivedStatistics::default(),
            tick: 0,
            scheduler: SchedulerState::Stopped,
            session: 0,
            published: Arc::default(),
        };
        state.publish();

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                scheduler: Mutex::new(TickScheduler::new(settings.tick_interval())),
                clock: Box::new(clock),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        Arc::clone(&lock(&self.shared.state).published)
    }

    /// Current configuration
    pub fn config(&self) -> Configuration {
        lock(&self.shared.state).store.get()
    }

    pub fn state(&self) -> SchedulerState {
        lock(&self.shared.state).scheduler
    }

    /// Merge a partial configuration and return the result
    ///
    /// Out-of-range fields are clamped (one `warning` log entry each) and the
    /// update itself is recorded as one `info` entry. The next tick's sample
    /// reflects the new configuration.
    pub fn update_config(&self, patch: &PartialConfiguration) -> Configuration {
        let mut events = Vec::new();

        let config = {
            let mut state = lock(&self.shared.state);
            let now = self.shared.clock.now();
            let outcome = state.store.update(patch);

            for warning in outcome.warnings() {
                events.push(EngineEvent::Log(state.log.append(now, LogLevel::Warning, warning)));
            }
            let summary = outcome.summary();
            log::info!("{summary}");
            events.push(EngineEvent::Log(state.log.append(now, LogLevel::Info, summary)));
            events.push(EngineEvent::ConfigChanged(outcome.config));

            state.publish();
            outcome.config
        };

        self.notify(&events);
        config
    }

    /// Run one generate → append → aggregate pass and publish the result
    ///
    /// Used by the scheduler on every period, and directly by hosts that
    /// drive the engine from their own loop.
    pub fn tick(&self) -> Arc<EngineSnapshot> {
        let snapshot = {
            let mut state = lock(&self.shared.state);
            self.run_tick(&mut state)
        };
        self.notify(&[EngineEvent::Snapshot(Arc::clone(&snapshot))]);
        snapshot
    }

    /// Tick from the timer task; skipped if that task's session has ended
    fn scheduled_tick(&self, session: u64) {
        let snapshot = {
            let mut state = lock(&self.shared.state);
            if state.scheduler != SchedulerState::Running || state.session != session {
                return;
            }
            self.run_tick(&mut state)
        };
        self.notify(&[EngineEvent::Snapshot(snapshot)]);
    }

    fn run_tick(&self, state: &mut EngineState) -> Arc<EngineSnapshot> {
        let now = self.shared.clock.now();
        let config = state.store.get();

        let sample = state.generator.generate(&config, now);
        state.history.record(&format_label(now), &sample);
        state.stats = StatsAggregator::compute(
            &state.history.latency,
            &state.history.throughput,
            &state.history.jitter,
            sample.throughput_mbps,
        );
        state.current = Some(sample);
        state.tick += 1;

        log::debug!(
            "tick {}: latency={:.2}us avg={:.2}us p99={:.2}us speedup={:.3}x bw={:.2}GB/s",
            state.tick,
            sample.latency_us,
            state.stats.avg_latency_us,
            state.stats.p99_latency_us,
            state.stats.speedup,
            state.stats.dma_bandwidth_gbps,
        );

        state.publish()
    }

    /// Start the tick scheduler on the current Tokio runtime
    ///
    /// Writes the three startup log entries before the first metric tick,
    /// which fires one period later. Starting a running engine is a no-op.
    pub fn start(&self) -> Result<SchedulerState> {
        let mut scheduler = lock(&self.shared.scheduler);
        if scheduler.is_running() {
            return Ok(SchedulerState::Running);
        }

        let events = {
            let mut state = lock(&self.shared.state);
            let session = state.session + 1;
            let weak = Arc::downgrade(&self.shared);

            scheduler.start(move || match weak.upgrade() {
                Some(shared) => {
                    Engine { shared }.scheduled_tick(session);
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            })?;

            state.session = session;
            state.scheduler = SchedulerState::Running;

            let now = self.shared.clock.now();
            let events: Vec<EngineEvent> = STARTUP_MESSAGES
                .iter()
                .map(|(level, message)| EngineEvent::Log(state.log.append(now, *level, *message)))
                .collect();
            state.publish();
            events
        };

        log::info!("tick scheduler started, period {:?}", scheduler.period());
        drop(scheduler);

        self.notify(&events);
        Ok(SchedulerState::Running)
    }

    /// Cancel the tick scheduler; no snapshots are published until restarted
    pub fn stop(&self) -> SchedulerState {
        let mut scheduler = lock(&self.shared.scheduler);
        scheduler.stop();

        let events = {
            let mut state = lock(&self.shared.state);
            if state.scheduler != SchedulerState::Running {
                return SchedulerState::Stopped;
            }
            state.scheduler = SchedulerState::Stopped;

            let (level, message) = SHUTDOWN_MESSAGE;
            let entry = state.log.append(self.shared.clock.now(), level, message);
            state.publish();
            vec![EngineEvent::Log(entry)]
        };
        drop(scheduler);

        log::info!("tick scheduler stopped");
        self.notify(&events);
        SchedulerState::Stopped
    }

    /// Register a listener for every subsequent [`EngineEvent`]
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.shared.next_subscription.fetch_add(1, Ordering::Relaxed));
        lock(&self.shared.listeners).push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = lock(&self.shared.listeners);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, events: &[EngineEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = lock(&self.shared.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for event in events {
            for listener in &listeners {
                log::trace!("dispatching {event:?}");
                if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                    log::error!("engine listener panicked; continuing");
                }
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;
    use crate::time::FixedTime;

    fn zero_engine() -> Engine {
        Engine::with_sources(
            EngineSettings::default(),
            FixedRandom::zero(),
            FixedTime::new(1_704_116_730_000),
        )
    }

    #[test]
    fn snapshot_before_first_tick_is_empty() {
        let engine = zero_engine();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.tick, 0);
        assert!(snapshot.current.is_none());
        assert_eq!(snapshot.stats, DerivedStatistics::default());
        assert!(snapshot.history.latency.is_empty());
        assert_eq!(snapshot.state, SchedulerState::Stopped);
    }

    #[test]
    fn one_tick_with_zero_draws() {
        let engine = zero_engine();
        let snapshot = engine.tick();

        let sample = snapshot.current.unwrap();
        assert_eq!(sample.latency_us, 90.0);
        assert_eq!(sample.throughput_mbps, 1000.0);
        assert_eq!(sample.jitter_us, 0.0);
        assert_eq!(snapshot.stats.avg_latency_us, 90.0);
        assert!((snapshot.stats.speedup - 150.0 / 90.0).abs() < 1e-12);
        assert_eq!(snapshot.stats.dma_bandwidth_gbps, 8.0);
        assert_eq!(snapshot.history.latency.last().unwrap().label, "13:45:30");
        assert!(Arc::ptr_eq(&snapshot, &engine.snapshot()));
    }

    #[test]
    fn config_update_is_logged_and_applied_next_tick() {
        let engine = zero_engine();
        let config = engine.update_config(&PartialConfiguration {
            active_cores: Some(8),
            ..Default::default()
        });
        assert_eq!(config.active_cores, 8);

        let snapshot = engine.snapshot();
        let entry = snapshot.log.latest().unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "Configuration updated: activeCores=8");

        let sample = engine.tick().current.unwrap();
        assert_eq!(sample.latency_us, 50.0);
        assert_eq!(sample.throughput_mbps, 2000.0);
    }

    #[test]
    fn clamped_update_logs_warning_then_info() {
        let engine = zero_engine();
        engine.update_config(&PartialConfiguration {
            active_cores: Some(-3),
            ..Default::default()
        });

        let snapshot = engine.snapshot();
        let levels: Vec<LogLevel> = snapshot.log.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warning]);
        assert_eq!(snapshot.config.active_cores, 1);
    }

    #[test]
    fn initial_settings_apply_without_log_entries() {
        let settings = EngineSettings {
            initial: PartialConfiguration {
                window_size: Some(2048),
                ..Default::default()
            },
            ..Default::default()
        };
        let engine = Engine::with_sources(settings, FixedRandom::zero(), FixedTime::new(0));

        assert_eq!(engine.config().window_size, 2048);
        assert!(engine.snapshot().log.is_empty());
    }

    #[test]
    fn listeners_see_events_and_can_unsubscribe() {
        let engine = zero_engine();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = engine.subscribe(move |event| {
            let tag = match event {
                EngineEvent::Snapshot(s) => format!("snapshot:{}", s.tick),
                EngineEvent::ConfigChanged(c) => format!("config:{}", c.active_cores),
                EngineEvent::Log(e) => format!("log:{}", e.level),
            };
            sink.lock().unwrap().push(tag);
        });

        engine.tick();
        engine.update_config(&PartialConfiguration {
            active_cores: Some(2),
            ..Default::default()
        });
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.tick();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["snapshot:1", "log:info", "config:2"]
        );
    }

    #[test]
    fn panicking_listener_does_not_poison_engine() {
        let engine = zero_engine();
        engine.subscribe(|_| panic!("listener failure"));
        engine.tick();
        assert_eq!(engine.tick().tick, 2);
    }

    #[test]
    fn listener_may_reenter_engine() {
        let engine = zero_engine();
        let handle = engine.clone();
        let observed = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&observed);
        engine.subscribe(move |event| {
            if let EngineEvent::Snapshot(_) = event {
                sink.store(handle.snapshot().tick, Ordering::SeqCst);
            }
        });

        engine.tick();
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn start_outside_runtime_leaves_engine_stopped() {
        let engine = zero_engine();
        assert!(engine.start().is_err());
        assert_eq!(engine.state(), SchedulerState::Stopped);
        assert!(engine.snapshot().log.is_empty());
    }
}
