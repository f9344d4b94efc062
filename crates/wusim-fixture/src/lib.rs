//! ---
//! wusim_section: "04-fixture"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixture builder exports."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
//! Builds the directory tree a freshly staged workunit would find: an
//! application directory with the packaged model binary and a slot directory
//! with the execution-context descriptor, the namelist, logical-name
//! placeholders and packaged ancillary datasets.

pub mod archive;
pub mod builder;
pub mod catalog;
pub mod descriptor;

pub use builder::{build_fixture, FixtureBuilder, FixtureReport, PROJECTS_DIR, SLOT_DIR};
pub use catalog::{FixtureCatalog, NamelistGroup, RunConfiguration};
pub use descriptor::InitData;
