//! ---
//! wusim_section: "03-logging"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Structured logging context and lifecycle events."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
#![warn(missing_docs)]

pub mod macros;

#[doc(hidden)]
pub use tracing;

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Workunit name associated with the log event.
    pub workunit: Option<&'a str>,
    /// Slot directory the event concerns.
    pub slot: Option<&'a str>,
    /// Simulated step number.
    pub step: Option<u64>,
    /// Harness phase (setup, run, finish).
    pub phase: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a workunit name.
    pub fn with_workunit(mut self, workunit: &'a str) -> Self {
        self.workunit = Some(workunit);
        self
    }

    /// Attach a slot directory.
    pub fn with_slot(mut self, slot: &'a str) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Attach a step value.
    pub fn with_step(mut self, step: u64) -> Self {
        self.step = Some(step);
        self
    }

    /// Attach a phase descriptor.
    pub fn with_phase(mut self, phase: &'a str) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed or was aborted.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event with a success/fault outcome.
pub fn log_system_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    match outcome {
        SystemEventOutcome::Success => tracing::info!(
            event,
            outcome = outcome.as_str(),
            workunit = ctx.workunit.unwrap_or(""),
            slot = ctx.slot.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
        SystemEventOutcome::Fault => tracing::error!(
            event,
            outcome = outcome.as_str(),
            workunit = ctx.workunit.unwrap_or(""),
            slot = ctx.slot.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
    }
}
