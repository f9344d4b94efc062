//! ---
//! wusim_section: "05-command-line"
//! wusim_subsection: "binary"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Simulated model run subcommand."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use wusim_common::{HarnessConfig, PayloadSource, TerminalAlignment};
use wusim_engine::{EngineOptions, RunParameters, SimulationEngine};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Slot directory to run in (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    slot: Option<PathBuf>,

    /// Read NFRRES, NFRPOS, CUSTOP and CNMEXP from a namelist file.
    #[arg(long, value_name = "FILE")]
    namelist: Option<PathBuf>,

    /// Restart frequency in steps.
    #[arg(long = "nfrres", value_name = "STEPS", allow_negative_numbers = true)]
    restart_frequency: Option<i64>,

    /// Upload interval in steps.
    #[arg(
        long = "upload-interval",
        visible_alias = "upload_interval",
        value_name = "STEPS",
        allow_negative_numbers = true
    )]
    upload_interval: Option<i64>,

    /// Last step to simulate.
    #[arg(long = "max-step", value_name = "STEP")]
    max_step: Option<u64>,

    /// Experiment id embedded in output batch names.
    #[arg(long, value_name = "ID")]
    exptid: Option<String>,

    /// Rewrite the restart control file on restart boundaries.
    #[arg(long = "restart-control")]
    restart_control: bool,

    /// Pad the terminal record for the printed step instead of the counter.
    #[arg(long = "aligned-terminal")]
    aligned_terminal: bool,

    /// Seed for payload content.
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    /// Config file, then namelist, then flags.
    fn parameters(&self, config: &HarnessConfig) -> Result<RunParameters> {
        let mut params = RunParameters::from_config(&config.simulation);
        if let Some(namelist) = &self.namelist {
            params = params
                .overlay_namelist(namelist)
                .with_context(|| format!("failed to read namelist {}", namelist.display()))?;
        }
        if let Some(value) = self.restart_frequency {
            params.restart_frequency = value;
        }
        if let Some(value) = self.upload_interval {
            params.upload_interval = value;
        }
        if let Some(value) = self.max_step {
            params.max_step = value;
        }
        if let Some(id) = &self.exptid {
            params.experiment_id = Some(id.clone());
        }
        params
            .validate()
            .context("invalid run parameters after merging config, namelist and flags")?;
        Ok(params)
    }

    fn options(&self, config: &HarnessConfig) -> EngineOptions {
        let mut options = EngineOptions::from_config(&config.simulation);
        if self.restart_control {
            options.restart_control = true;
        }
        if self.aligned_terminal {
            options.terminal_alignment = TerminalAlignment::Aligned;
        }
        options
    }
}

pub fn run(args: RunArgs, config: &HarnessConfig) -> Result<()> {
    let slot = match &args.slot {
        Some(slot) => slot.clone(),
        None => std::env::current_dir().context("unable to determine the current directory")?,
    };
    let params = args.parameters(config)?;
    let options = args.options(config);
    let seed = args.seed.or(config.simulation.seed);

    let report = SimulationEngine::new(&slot, params)
        .with_options(options)
        .with_payloads(PayloadSource::from_seed(seed))
        .run()
        .with_context(|| format!("simulated run failed in {}", slot.display()))?;

    println!(
        "Simulated {} steps in {}: {} status lines, {} output batches, terminal step {}",
        report.iterations(),
        report.slot.display(),
        report.status_lines(),
        report.batches().count(),
        report.terminal_step
    );
    println!("Status log: {}", report.status_path().display());
    Ok(())
}
