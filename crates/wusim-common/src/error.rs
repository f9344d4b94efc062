//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Error taxonomy shared by every harness component."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the harness crates.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Every fault the harness can detect. All of them are terminal.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Run parameters or configuration values that cannot be used.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A step interval of zero would be used as a modulus.
    #[error("configuration error: {parameter} must be non-zero")]
    ZeroModulus { parameter: &'static str },
    /// The fixture builder was pointed at a root it must not populate.
    #[error(
        "fixture root {} must end with '{expected_suffix}'",
        .root.display()
    )]
    Precondition {
        root: PathBuf,
        expected_suffix: String,
    },
    /// Any I/O failure, tagged with the path being touched.
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Packaging a payload into its archived form failed.
    #[error("failed to package {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    /// A step value does not fit the fixed-width field it is rendered into.
    #[error("step {step} does not fit a {width}-column field")]
    StepOverflow { step: u64, width: usize },
}

impl HarnessError {
    /// Wrap an I/O error with the path that triggered it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarnessError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// True for the configuration family (bad parameters or config values).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HarnessError::Configuration(_) | HarnessError::ZeroModulus { .. }
        )
    }
}

/// Attach a path to `std::io` results.
pub trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| HarnessError::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_modulus_message_names_parameter() {
        let err = HarnessError::ZeroModulus {
            parameter: "restart_frequency",
        };
        assert_eq!(
            format!("{err}"),
            "configuration error: restart_frequency must be non-zero"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn io_context_keeps_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        let err = result.at(Path::new("slot/ifs.stat")).unwrap_err();
        assert!(format!("{err}").contains("slot/ifs.stat"));
        assert!(!err.is_configuration());
    }
}
