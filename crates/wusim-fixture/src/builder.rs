//! ---
//! wusim_section: "04-fixture"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixture tree construction."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use wusim_common::{fsio, FixtureConfig, HarnessError, IoContext, PayloadSource, Result};
use wusim_logging::{log_system_event, wu_debug, wu_info, LogContext, SystemEventOutcome};

use crate::archive::package_single;
use crate::catalog::FixtureCatalog;
use crate::descriptor::{InitData, INIT_DATA_FILE};

/// Application directory holding the packaged model binary.
pub const PROJECTS_DIR: &str = "projects";
/// Slot working directory.
pub const SLOT_DIR: &str = "slot";

const NAMELIST_FILE: &str = "fort.4";
const NAMELIST_ARCHIVE: &str = "jf_namelist";

/// Paths produced by a fixture build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureReport {
    pub root: PathBuf,
    pub projects_dir: PathBuf,
    pub slot_dir: PathBuf,
    /// Every file written, in write order, after renames.
    pub files: Vec<PathBuf>,
}

impl FixtureReport {
    pub fn namelist_path(&self) -> PathBuf {
        self.slot_dir.join(NAMELIST_FILE)
    }
}

/// Lays out a staged workunit under a root directory.
#[derive(Debug)]
pub struct FixtureBuilder {
    root: PathBuf,
    expected_suffix: String,
    catalog: FixtureCatalog,
    payloads: PayloadSource,
}

impl FixtureBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &FixtureConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &FixtureConfig) -> Self {
        Self {
            root: root.into(),
            expected_suffix: config.expected_suffix.clone(),
            catalog: FixtureCatalog {
                legacy_descriptor: config.legacy_descriptor,
                ..FixtureCatalog::default()
            },
            payloads: PayloadSource::from_seed(config.seed),
        }
    }

    pub fn with_expected_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.expected_suffix = suffix.into();
        self
    }

    pub fn with_catalog(mut self, catalog: FixtureCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_payloads(mut self, payloads: PayloadSource) -> Self {
        self.payloads = payloads;
        self
    }

    /// Resolve the root to an absolute path and check its name carries the
    /// expected suffix. Touches nothing on disk.
    pub fn check_root(&self) -> Result<PathBuf> {
        if self.expected_suffix.trim().is_empty() {
            return Err(HarnessError::Configuration(
                "fixture expected_suffix must not be blank".into(),
            ));
        }
        let root = self.root.absolutize().at(&self.root)?.into_owned();
        let matches = root
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.expected_suffix));
        if !matches {
            return Err(HarnessError::Precondition {
                root,
                expected_suffix: self.expected_suffix.clone(),
            });
        }
        Ok(root)
    }

    /// Build the tree. Directories are reused; payload files are appended to
    /// and descriptors rewritten, so repeated builds accumulate payload data.
    pub fn build(mut self) -> Result<FixtureReport> {
        let label = self.root.display().to_string();
        let workunit = self.catalog.workunit_name.clone();
        let result = self.populate();
        let ctx = LogContext::new().with_workunit(&workunit).with_phase("setup");
        match &result {
            Ok(report) => log_system_event(
                Some(&ctx),
                "fixture.build",
                &format!("{} files staged under {}", report.files.len(), label),
                SystemEventOutcome::Success,
            ),
            Err(error) => log_system_event(
                Some(&ctx),
                "fixture.build",
                &error.to_string(),
                SystemEventOutcome::Fault,
            ),
        }
        result
    }

    fn populate(&mut self) -> Result<FixtureReport> {
        let root = self.check_root()?;
        let projects_dir = root.join(PROJECTS_DIR);
        let slot_dir = root.join(SLOT_DIR);
        fsio::ensure_dir(&projects_dir)?;
        fsio::ensure_dir(&slot_dir)?;
        wu_info!("fixture directories ready under {}", root.display());

        let mut files = Vec::new();
        self.stage_application(&projects_dir, &mut files)?;

        let init_data = slot_dir.join(INIT_DATA_FILE);
        fsio::write_text(&init_data, &InitData::new(&root, &self.catalog).render())?;
        files.push(init_data);

        let namelist = slot_dir.join(NAMELIST_FILE);
        fsio::write_text(&namelist, &self.catalog.namelist.render())?;
        files.push(package_single(&namelist, &slot_dir.join(NAMELIST_ARCHIVE))?);
        files.push(namelist);

        let logical = slot_dir.join(format!("{}.zip", self.catalog.workunit_name));
        fsio::write_text(&logical, &placeholder_line(NAMELIST_ARCHIVE))?;
        files.push(logical);

        for dataset in self.catalog.ancillaries.clone() {
            self.stage_ancillary(&slot_dir, &dataset, &mut files)?;
        }

        Ok(FixtureReport {
            root,
            projects_dir,
            slot_dir,
            files,
        })
    }

    fn stage_application(&mut self, projects_dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let binary = projects_dir.join(&self.catalog.app_file);
        fsio::append_text(&binary, &self.payloads.hex_line())?;
        let archive = projects_dir.join(format!("{}.zip", self.catalog.app_file));
        package_single(&binary, &archive)?;
        files.push(binary);
        files.push(archive);
        Ok(())
    }

    /// Placeholder, raw payload, archive, then the archive takes over the
    /// payload's logical name.
    fn stage_ancillary(
        &mut self,
        slot_dir: &Path,
        dataset: &str,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let payload_name = FixtureCatalog::payload_name(dataset);

        let placeholder = slot_dir.join(FixtureCatalog::placeholder_name(dataset));
        fsio::write_text(&placeholder, &placeholder_line(&payload_name))?;
        files.push(placeholder);

        let payload = slot_dir.join(&payload_name);
        fsio::append_text(&payload, &self.payloads.hex_line())?;
        let packed = slot_dir.join(format!("{payload_name}.zip"));
        package_single(&payload, &packed)?;
        fsio::replace(&packed, &payload)?;
        wu_debug!("packaged {} over its logical name", payload_name);
        files.push(payload);
        Ok(())
    }
}

/// Build a fixture under `root` with the default catalog.
pub fn build_fixture(root: &Path) -> Result<FixtureReport> {
    FixtureBuilder::new(root).build()
}

fn placeholder_line(logical_name: &str) -> String {
    format!(">{logical_name}<\n")
}
