//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Harness configuration file loading and validation."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarnessError, IoContext, Result};
use crate::logging::LogFormat;

fn default_restart_frequency() -> i64 {
    10_000
}

fn default_upload_interval() -> i64 {
    10_000
}

fn default_max_step() -> u64 {
    5
}

fn default_expected_suffix() -> String {
    "test".to_owned()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Top-level configuration for a harness invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub fixture: FixtureConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path).at(path)?;
        let config = toml::from_str::<HarnessConfig>(&contents).map_err(|err| {
            HarnessError::Configuration(format!("failed to parse {}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when one is given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.fixture.validate()
    }
}

impl std::str::FromStr for HarnessConfig {
    type Err = HarnessError;

    fn from_str(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)
            .map_err(|err| HarnessError::Configuration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Column layout used for the terminal `CNTO` status record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TerminalAlignment {
    /// Pad according to the digit count of the incremented step counter.
    #[default]
    Legacy,
    /// Pad according to the digit count of the printed step.
    Aligned,
}

/// Parameters driving the simulated model run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_restart_frequency")]
    pub restart_frequency: i64,
    #[serde(default = "default_upload_interval")]
    pub upload_interval: i64,
    #[serde(default = "default_max_step")]
    pub max_step: u64,
    #[serde(default)]
    pub experiment_id: Option<String>,
    #[serde(default)]
    pub restart_control: bool,
    #[serde(default)]
    pub terminal_alignment: TerminalAlignment,
    /// Seed for payload content; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Zero intervals pass here; the merged run parameters are checked
    /// instead.
    fn validate(&self) -> Result<()> {
        if let Some(id) = &self.experiment_id {
            if id.trim().is_empty() {
                return Err(HarnessError::Configuration(
                    "experiment_id cannot be blank".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            restart_frequency: default_restart_frequency(),
            upload_interval: default_upload_interval(),
            max_step: default_max_step(),
            experiment_id: None,
            restart_control: false,
            terminal_alignment: TerminalAlignment::default(),
            seed: None,
        }
    }
}

/// Settings for laying out the fixture tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Suffix the fixture root directory name must carry.
    #[serde(default = "default_expected_suffix")]
    pub expected_suffix: String,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Emit the stray `</global_preferences>` closing tag older controllers
    /// saw in `init_data.xml`.
    #[serde(default)]
    pub legacy_descriptor: bool,
}

impl FixtureConfig {
    fn validate(&self) -> Result<()> {
        if self.expected_suffix.trim().is_empty() {
            return Err(HarnessError::Configuration(
                "fixture.expected_suffix cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            expected_suffix: default_expected_suffix(),
            seed: None,
            legacy_descriptor: false,
        }
    }
}

/// Logging sinks for the harness binaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory receiving a daily rolling JSON log; stderr only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}
