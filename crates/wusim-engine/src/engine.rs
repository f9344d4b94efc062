//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Step loop driving status lines and output emission."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::time::Duration;

use wusim_common::{
    fsio, Clock, PayloadSource, Result, SimulationConfig, SystemClock, TerminalAlignment,
};
use wusim_logging::{
    log_system_event, wu_debug, wu_info, wu_warn, LogContext, SystemEventOutcome,
};

use crate::batch::{self, batch_suffix, OutputBatch};
use crate::format::{pad_step, Padding};
use crate::params::RunParameters;
use crate::status::{self, ensure_fits, StatusTag, STATUS_FILE};

/// Wait before the first step, standing in for model start-up.
pub const STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Diagnostic artifact written once at the end of a run.
pub const DIAGNOSTIC_FILE: &str = "NODE.001_01";

/// Restart control file rewritten on restart boundaries when enabled.
pub const RESTART_CONTROL_FILE: &str = "rcf";

const RESTART_STATUS_LINES: usize = 3;
const CSTEP_WIDTH: usize = 8;

/// Behaviour switches that do not affect step scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub restart_control: bool,
    pub terminal_alignment: TerminalAlignment,
}

impl EngineOptions {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            restart_control: config.restart_control,
            terminal_alignment: config.terminal_alignment,
        }
    }
}

/// What happened at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: u64,
    pub status_lines: usize,
    pub batch: Option<OutputBatch>,
    pub restart_control: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub slot: PathBuf,
    pub steps: Vec<StepRecord>,
    /// Step value printed on the `CNTO` record.
    pub terminal_step: u64,
    pub diagnostic: PathBuf,
}

impl RunReport {
    pub fn iterations(&self) -> usize {
        self.steps.len()
    }

    /// Status lines written, terminal record included.
    pub fn status_lines(&self) -> usize {
        self.steps.iter().map(|record| record.status_lines).sum::<usize>() + 1
    }

    pub fn batches(&self) -> impl Iterator<Item = &OutputBatch> {
        self.steps.iter().filter_map(|record| record.batch.as_ref())
    }

    pub fn status_path(&self) -> PathBuf {
        self.slot.join(STATUS_FILE)
    }
}

/// Fakes a model run inside a slot directory.
#[derive(Debug)]
pub struct SimulationEngine<C: Clock = SystemClock> {
    slot: PathBuf,
    params: RunParameters,
    options: EngineOptions,
    clock: C,
    payloads: PayloadSource,
}

impl SimulationEngine<SystemClock> {
    pub fn new(slot: impl Into<PathBuf>, params: RunParameters) -> Self {
        Self {
            slot: slot.into(),
            params,
            options: EngineOptions::default(),
            clock: SystemClock,
            payloads: PayloadSource::from_entropy(),
        }
    }
}

impl<C: Clock> SimulationEngine<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> SimulationEngine<D> {
        SimulationEngine {
            slot: self.slot,
            params: self.params,
            options: self.options,
            clock,
            payloads: self.payloads,
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_payloads(mut self, payloads: PayloadSource) -> Self {
        self.payloads = payloads;
        self
    }

    /// Execute every step and the terminal transition.
    ///
    /// Parameters are checked before anything is written or waited for.
    pub fn run(mut self) -> Result<RunReport> {
        let slot_label = self.slot.display().to_string();
        match self.execute(&slot_label) {
            Ok(report) => {
                log_system_event(
                    Some(&LogContext::new().with_slot(&slot_label).with_phase("finish")),
                    "engine.finish",
                    &format!(
                        "simulated run complete after {} steps",
                        report.iterations()
                    ),
                    SystemEventOutcome::Success,
                );
                Ok(report)
            }
            Err(error) => {
                log_system_event(
                    Some(&LogContext::new().with_slot(&slot_label).with_phase("run")),
                    "engine.abort",
                    &error.to_string(),
                    SystemEventOutcome::Fault,
                );
                Err(error)
            }
        }
    }

    fn execute(&mut self, slot_label: &str) -> Result<RunReport> {
        let restart = self.params.restart_modulus()?;
        let upload = self.params.upload_modulus()?;
        self.preflight(upload)?;

        for (name, value, modulus) in [
            ("restart_frequency", self.params.restart_frequency, restart),
            ("upload_interval", self.params.upload_interval, upload),
        ] {
            if value < 0 {
                wu_warn!(
                    context = LogContext::new().with_slot(slot_label).with_phase("start"),
                    "negative {} {} taken as {}",
                    name,
                    value,
                    modulus
                );
            }
        }

        let max_step = self.params.max_step;
        let status_path = self.slot.join(STATUS_FILE);
        wu_info!(
            context = LogContext::new().with_slot(slot_label).with_phase("start"),
            "starting simulated run: restart_frequency={} upload_interval={} max_step={}",
            restart,
            upload,
            max_step
        );
        self.clock.sleep(STARTUP_DELAY);

        let mut steps = Vec::new();
        let mut step = 0u64;
        while step <= max_step {
            let ctx = LogContext::new()
                .with_slot(slot_label)
                .with_step(step)
                .with_phase("run");
            let restart_boundary = step % restart == 0;
            let lines = if restart_boundary {
                RESTART_STATUS_LINES
            } else {
                1
            };
            for _ in 0..lines {
                let line = status::status_line(self.clock.now(), StatusTag::Stepo, step)?;
                fsio::append_text(&status_path, &line)?;
                wu_debug!(context = ctx, "{}", line.trim_end());
            }

            let restart_control = self.options.restart_control && restart_boundary && step > 0;
            if restart_control {
                let path = self.slot.join(RESTART_CONTROL_FILE);
                fsio::write_text(&path, &restart_control_text(step)?)?;
                wu_debug!(context = ctx, "restart control file rewritten");
            }

            let batch = if step > 0 && step % upload == 0 {
                let batch = batch::write_batch(
                    &self.slot,
                    step,
                    self.params.experiment_id.as_deref(),
                    &mut self.payloads,
                )?;
                wu_info!(context = ctx, "output batch written");
                Some(batch)
            } else {
                None
            };

            steps.push(StepRecord {
                step,
                status_lines: lines,
                batch,
                restart_control,
            });
            step += 1;
        }

        // `step` is one past the last executed step here.
        let terminal_step = step - 1;
        let width_source = match self.options.terminal_alignment {
            TerminalAlignment::Legacy => step,
            TerminalAlignment::Aligned => terminal_step,
        };
        let line = status::status_line_padded_for(
            self.clock.now(),
            StatusTag::Cnto,
            terminal_step,
            width_source,
        )?;
        fsio::append_text(&status_path, &line)?;
        wu_info!(
            context = LogContext::new()
                .with_slot(slot_label)
                .with_step(terminal_step)
                .with_phase("finish"),
            "{}",
            line.trim_end()
        );

        let diagnostic = self.slot.join(DIAGNOSTIC_FILE);
        fsio::append_text(&diagnostic, &self.payloads.hex_line())?;

        Ok(RunReport {
            slot: self.slot.clone(),
            steps,
            terminal_step,
            diagnostic,
        })
    }

    /// Fail before any output when the widest value of the run cannot be
    /// rendered.
    fn preflight(&self, upload: u64) -> Result<()> {
        let max_step = self.params.max_step;
        ensure_fits(StatusTag::Stepo, max_step)?;
        if self.options.terminal_alignment == TerminalAlignment::Legacy {
            ensure_fits(StatusTag::Cnto, max_step + 1)?;
        }
        if max_step >= upload {
            let last_batch = max_step - max_step % upload;
            batch_suffix(last_batch, self.params.experiment_id.as_deref())?;
        }
        Ok(())
    }
}

/// Run with the system clock and entropy-seeded payloads.
pub fn run(slot: &Path, params: &RunParameters) -> Result<RunReport> {
    SimulationEngine::new(slot, params.clone()).run()
}

fn restart_control_text(step: u64) -> Result<String> {
    let cstep = pad_step(step, CSTEP_WIDTH, Padding::Space)?;
    Ok(format!(
        "&NAMRCF\n\
         CSTEP=\"{cstep}\",\n\
         CTIME=\"01410000      \",\n\
         NSTEPLPP=201        ,202        ,49         ,228226     ,228227     ,5*0          ,\n\
         IPRGPNSRES=1          ,\n\
         IPRGPEWRES=1          ,\n\
         IPRTRWRES=1          ,\n\
         IPRTRVRES=1          ,\n\
         GMASS0=  98334.671526536738     ,\n\
         GMASSI=  98334.601637818661     ,\n \
         /\n"
    ))
}
