//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Shared primitives for the workunit harness."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
//! Shared primitives for the workunit simulation harness.
//! This crate exposes the error taxonomy, configuration loading, logging
//! setup, opaque payload generation and the scoped file helpers consumed by
//! the fixture builder and the simulation engine.

pub mod config;
pub mod error;
pub mod fsio;
pub mod logging;
pub mod payload;
pub mod time;

pub use config::{
    FixtureConfig, HarnessConfig, LoggingConfig, SimulationConfig, TerminalAlignment,
};
pub use error::{HarnessError, IoContext, Result};
pub use logging::{init_tracing, LogFormat};
pub use payload::PayloadSource;
pub use time::{Clock, ManualClock, SystemClock};
