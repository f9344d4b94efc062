//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Simulation engine exports."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
//! Simulated-execution engine for a model workunit.
//!
//! Given [`RunParameters`], the engine walks steps `0..=max_step` inside a slot
//! directory, appending status lines to `ifs.stat`, emitting `ICM*` output
//! batches on upload boundaries, and finishing with a `CNTO` record and the
//! `NODE.001_01` diagnostic file.

pub mod batch;
pub mod engine;
pub mod format;
pub mod params;
pub mod status;

pub use batch::{OutputBatch, BATCH_FAMILIES};
pub use engine::{
    run, EngineOptions, RunReport, SimulationEngine, StepRecord, DIAGNOSTIC_FILE,
    RESTART_CONTROL_FILE, STARTUP_DELAY,
};
pub use format::{digit_count, pad_step, Padding};
pub use params::RunParameters;
pub use status::{StatusTag, STATUS_FILE};
