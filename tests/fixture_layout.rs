//! ---
//! wusim_section: "15-testing"
//! wusim_subsection: "integration-tests"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Fixture tree layout and fixture-to-run pipeline checks."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::fs;
use std::fs::File;
use std::path::Path;

use chrono::NaiveTime;
use wusim_common::payload::PAYLOAD_LINE_LEN;
use wusim_common::{ManualClock, PayloadSource};
use wusim_engine::{RunParameters, SimulationEngine, STATUS_FILE};
use wusim_fixture::{FixtureBuilder, FixtureCatalog, FixtureReport, PROJECTS_DIR, SLOT_DIR};

fn build(root: &Path, seed: u64) -> FixtureReport {
    FixtureBuilder::new(root)
        .with_payloads(PayloadSource::seeded(seed))
        .build()
        .expect("fixture build")
}

fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|index| archive.by_index(index).unwrap().name().to_owned())
        .collect()
}

#[test]
fn fixture_tree_has_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("harness_test");
    fs::create_dir(&root).unwrap();
    let report = build(&root, 5);
    let catalog = FixtureCatalog::default();

    assert_eq!(report.projects_dir, root.join(PROJECTS_DIR));
    assert_eq!(report.slot_dir, root.join(SLOT_DIR));
    assert!(report.files.iter().all(|file| file.is_file()));

    let binary = report.projects_dir.join(&catalog.app_file);
    assert_eq!(
        fs::metadata(&binary).unwrap().len(),
        PAYLOAD_LINE_LEN as u64
    );
    assert_eq!(
        archive_entries(&report.projects_dir.join(format!("{}.zip", catalog.app_file))),
        vec![catalog.app_file.clone()]
    );

    let init_data = fs::read_to_string(report.slot_dir.join("init_data.xml")).unwrap();
    assert!(init_data.trim_start().starts_with("<app_init_data>"));
    assert!(init_data.contains(&format!(
        "<project_dir>{}</project_dir>",
        report.projects_dir.display()
    )));

    assert_eq!(archive_entries(&report.slot_dir.join("jf_namelist")), vec!["fort.4"]);
    assert_eq!(
        fs::read_to_string(report.slot_dir.join(format!("{}.zip", catalog.workunit_name)))
            .unwrap(),
        ">jf_namelist<\n"
    );

    for dataset in &catalog.ancillaries {
        let placeholder = report
            .slot_dir
            .join(FixtureCatalog::placeholder_name(dataset));
        assert_eq!(
            fs::read_to_string(placeholder).unwrap(),
            format!(">jf_{dataset}<\n")
        );
        let payload = report.slot_dir.join(FixtureCatalog::payload_name(dataset));
        assert_eq!(archive_entries(&payload), vec![format!("jf_{dataset}")]);
        assert!(!report.slot_dir.join(format!("jf_{dataset}.zip")).exists());
    }
}

#[test]
fn rebuilding_reuses_directories_and_grows_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("test");
    fs::create_dir(&root).unwrap();
    let catalog = FixtureCatalog::default();

    let first = build(&root, 1);
    let namelist = fs::read_to_string(first.namelist_path()).unwrap();
    let second = build(&root, 2);

    assert_eq!(first.files, second.files);
    let binary = second.projects_dir.join(&catalog.app_file);
    assert_eq!(
        fs::metadata(&binary).unwrap().len(),
        2 * PAYLOAD_LINE_LEN as u64
    );
    assert_eq!(fs::read_to_string(second.namelist_path()).unwrap(), namelist);
    assert_eq!(
        archive_entries(&second.slot_dir.join("jf_ifsdata")),
        vec!["jf_ifsdata"]
    );
}

#[test]
fn misnamed_root_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("production");
    fs::create_dir(&root).unwrap();

    let err = FixtureBuilder::new(&root).build().unwrap_err();
    assert!(err.to_string().contains("'test'"));
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
}

#[test]
fn staged_namelist_drives_a_run_in_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("pipeline_test");
    fs::create_dir(&root).unwrap();
    let report = build(&root, 3);

    let params = RunParameters::from_namelist(&report.namelist_path()).unwrap();
    assert_eq!(params.restart_frequency, 1);
    assert_eq!(params.upload_interval, 1);

    let run = SimulationEngine::new(&report.slot_dir, params)
        .with_clock(ManualClock::new(NaiveTime::from_hms_opt(6, 0, 0).unwrap()))
        .with_payloads(PayloadSource::seeded(3))
        .run()
        .unwrap();

    // Every step is a restart boundary and every positive step uploads.
    assert_eq!(run.status_lines(), 6 * 3 + 1);
    assert_eq!(run.batches().count(), 5);
    let stat = fs::read_to_string(report.slot_dir.join(STATUS_FILE)).unwrap();
    assert_eq!(stat.lines().count(), 19);
    assert!(report.slot_dir.join("ICMUA000005").is_file());
    assert!(report.slot_dir.join("fort.4").is_file());
}
