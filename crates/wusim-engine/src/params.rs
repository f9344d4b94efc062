//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Run parameters and namelist loading."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;
use wusim_common::{HarnessError, IoContext, Result, SimulationConfig};

/// Scheduling parameters for one simulated run.
///
/// The two intervals are used through their absolute value as moduli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub restart_frequency: i64,
    pub upload_interval: i64,
    pub max_step: u64,
    pub experiment_id: Option<String>,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl RunParameters {
    pub fn new(restart_frequency: i64, upload_interval: i64) -> Self {
        Self {
            restart_frequency,
            upload_interval,
            ..Self::default()
        }
    }

    pub fn with_max_step(mut self, max_step: u64) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn with_experiment_id(mut self, experiment_id: impl Into<String>) -> Self {
        self.experiment_id = Some(experiment_id.into());
        self
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            restart_frequency: config.restart_frequency,
            upload_interval: config.upload_interval,
            max_step: config.max_step,
            experiment_id: config.experiment_id.clone(),
        }
    }

    /// Modulus deciding the 1-vs-3 status line multiplicity.
    pub fn restart_modulus(&self) -> Result<u64> {
        non_zero(self.restart_frequency, "restart_frequency")
    }

    /// Modulus deciding output batch emission.
    pub fn upload_modulus(&self) -> Result<u64> {
        non_zero(self.upload_interval, "upload_interval")
    }

    pub fn validate(&self) -> Result<()> {
        self.restart_modulus()?;
        self.upload_modulus()?;
        Ok(())
    }

    /// Defaults overridden by a `fort.4` namelist.
    pub fn from_namelist(path: &Path) -> Result<Self> {
        Self::default().overlay_namelist(path)
    }

    /// Read a `fort.4` namelist, overriding the fields it names.
    pub fn overlay_namelist(self, path: &Path) -> Result<Self> {
        debug!(namelist = %path.display(), "reading run parameters from namelist");
        let contents = fs::read_to_string(path).at(path)?;
        self.apply_namelist(&contents)
    }

    /// Apply `NFRRES`, `NFRPOS`, `CUSTOP` and `CNMEXP` assignments from
    /// namelist text. Directive lines (`!KEY=VALUE`) and group markers are
    /// skipped.
    pub fn apply_namelist(mut self, contents: &str) -> Result<Self> {
        for line in contents.lines() {
            let line = line.trim();
            if line.starts_with('!') || line.starts_with('&') || line.starts_with('/') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_end_matches(',').trim();
            match key.trim().to_ascii_uppercase().as_str() {
                "NFRRES" => self.restart_frequency = parse_value("NFRRES", value)?,
                "NFRPOS" => self.upload_interval = parse_value("NFRPOS", value)?,
                "CUSTOP" => self.max_step = parse_value("CUSTOP", value)?,
                "CNMEXP" => {
                    let id = value.trim_matches(|c| c == '\'' || c == '"').trim();
                    if !id.is_empty() {
                        self.experiment_id = Some(id.to_owned());
                    }
                }
                _ => {}
            }
        }
        Ok(self)
    }
}

fn non_zero(value: i64, parameter: &'static str) -> Result<u64> {
    match value.unsigned_abs() {
        0 => Err(HarnessError::ZeroModulus { parameter }),
        modulus => Ok(modulus),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim_matches(|c| c == '\'' || c == '"')
        .parse()
        .map_err(|_| HarnessError::Configuration(format!("invalid {key} value '{value}'")))
}
