//! Full Validation Suite Example
//!
//! Tunes the accelerator model for peak performance and runs the latency,
//! jitter and throughput tests against it.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_validation_suite
//! ```

use accelscope_core::{Engine, EngineSettings, PartialConfiguration, SeededRandom};
use accelscope_profiler::{Profiler, ValidationPlan};

fn main() {
    println!("{}", "=".repeat(70));
    println!("FPGA ACCELERATOR PERFORMANCE VALIDATION");
    println!("{}", "=".repeat(70));

    // Configure through the engine so the usual clamping applies
    let engine = Engine::new(EngineSettings::default());
    let config = engine.update_config(&PartialConfiguration {
        active_cores: Some(8),
        window_size: Some(2048),
        data_rate: Some(2000.0),
        ..Default::default()
    });

    let mut profiler = Profiler::new(config, SeededRandom::from_entropy());
    let report = profiler.run_full_validation(&ValidationPlan::default());

    println!("\n{report}\n");
    println!("{}", "=".repeat(70));
    if report.passed() {
        println!("VALIDATION COMPLETE: all targets met");
    } else {
        println!("VALIDATION COMPLETE: targets missed");
    }
    println!("{}", "=".repeat(70));
}
