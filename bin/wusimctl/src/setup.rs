//! ---
//! wusim_section: "05-command-line"
//! wusim_subsection: "binary"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixture staging subcommand."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use wusim_common::HarnessConfig;
use wusim_fixture::{FixtureBuilder, FixtureCatalog};

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Fixture root directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Suffix the root directory name must end with.
    #[arg(long = "expected-suffix", value_name = "SUFFIX")]
    expected_suffix: Option<String>,

    /// Seed for payload content, for reproducible fixtures.
    #[arg(long)]
    seed: Option<u64>,

    /// Override a namelist entry in fort.4, e.g. `NAMCT0.NFRRES=3`.
    #[arg(long = "set", value_name = "GROUP.KEY=VALUE", value_parser = parse_entry)]
    entries: Vec<NamelistEntry>,

    /// Write the legacy closing preferences tag into init_data.xml.
    #[arg(long = "legacy-descriptor")]
    legacy_descriptor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NamelistEntry {
    group: String,
    key: String,
    value: String,
}

fn parse_entry(raw: &str) -> Result<NamelistEntry> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected GROUP.KEY=VALUE, got '{raw}'"))?;
    let (group, key) = target
        .split_once('.')
        .ok_or_else(|| anyhow!("expected GROUP.KEY before '=', got '{target}'"))?;
    let (group, key) = (group.trim(), key.trim());
    if group.is_empty() || key.is_empty() {
        return Err(anyhow!("namelist group and key must be non-empty in '{raw}'"));
    }
    Ok(NamelistEntry {
        group: group.to_ascii_uppercase(),
        key: key.to_ascii_uppercase(),
        value: value.trim().to_owned(),
    })
}

pub fn run(args: SetupArgs, config: &HarnessConfig) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("unable to determine the current directory")?,
    };
    let mut fixture = config.fixture.clone();
    if let Some(suffix) = args.expected_suffix {
        fixture.expected_suffix = suffix;
    }
    if args.seed.is_some() {
        fixture.seed = args.seed;
    }
    if args.legacy_descriptor {
        fixture.legacy_descriptor = true;
    }

    let mut catalog = FixtureCatalog {
        legacy_descriptor: fixture.legacy_descriptor,
        ..FixtureCatalog::default()
    };
    for entry in args.entries {
        catalog.namelist.set(&entry.group, entry.key, entry.value);
    }

    let report = FixtureBuilder::from_config(&root, &fixture)
        .with_catalog(catalog)
        .build()
        .with_context(|| format!("failed to stage fixture under {}", root.display()))?;

    println!("Fixture staged under {}", report.root.display());
    println!("Application directory: {}", report.projects_dir.display());
    println!("Slot directory: {}", report.slot_dir.display());
    println!("Files written: {}", report.files.len());
    Ok(())
}
