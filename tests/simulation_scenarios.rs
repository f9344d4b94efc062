//! ---
//! wusim_section: "15-testing"
//! wusim_subsection: "integration-tests"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "End-to-end checks of the simulated run timing contract."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use wusim_common::{ManualClock, PayloadSource};
use wusim_engine::{
    RunParameters, RunReport, SimulationEngine, BATCH_FAMILIES, DIAGNOSTIC_FILE, STATUS_FILE,
};

fn simulate(slot: &Path, params: RunParameters) -> RunReport {
    SimulationEngine::new(slot, params)
        .with_clock(ManualClock::new(NaiveTime::from_hms_opt(23, 59, 58).unwrap()))
        .with_payloads(PayloadSource::seeded(42))
        .run()
        .expect("simulated run")
}

fn step_values(slot: &Path) -> Vec<(String, u64)> {
    fs::read_to_string(slot.join(STATUS_FILE))
        .unwrap()
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            (fields[2].to_owned(), fields[3].parse().unwrap())
        })
        .collect()
}

fn batch_files(slot: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(slot)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| BATCH_FAMILIES.iter().any(|family| name.starts_with(family)))
        .collect();
    names.sort();
    names
}

#[test]
fn restart_three_upload_four_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let report = simulate(dir.path(), RunParameters::new(3, 4));

    let steps = step_values(dir.path());
    let expected: Vec<(String, u64)> = [0, 0, 0, 1, 2, 3, 3, 3, 4, 5]
        .into_iter()
        .map(|step| ("STEPO".to_owned(), step))
        .chain([("CNTO".to_owned(), 5)])
        .collect();
    assert_eq!(steps, expected);
    assert_eq!(
        batch_files(dir.path()),
        vec!["ICMGG000004", "ICMSH000004", "ICMUA000004"]
    );
    assert_eq!(report.iterations(), 6);
}

#[test]
fn multiplicity_and_batches_follow_the_moduli() {
    for restart in 1..=7i64 {
        for upload in 1..=7i64 {
            let dir = tempfile::tempdir().unwrap();
            let report = simulate(dir.path(), RunParameters::new(restart, upload));
            assert_eq!(report.iterations(), 6);
            for record in &report.steps {
                let expected_lines = if record.step % restart as u64 == 0 { 3 } else { 1 };
                assert_eq!(record.status_lines, expected_lines, "r={restart} step={}", record.step);
                let expect_batch = record.step > 0 && record.step % upload as u64 == 0;
                assert_eq!(record.batch.is_some(), expect_batch, "u={upload} step={}", record.step);
                if let Some(batch) = &record.batch {
                    assert_eq!(batch.files.len(), 3);
                }
            }
            let batches = report.batches().count();
            assert_eq!(batch_files(dir.path()).len(), batches * 3);
            assert_eq!(
                step_values(dir.path())
                    .iter()
                    .filter(|(tag, _)| tag == "CNTO")
                    .count(),
                1
            );
            assert!(dir.path().join(DIAGNOSTIC_FILE).is_file());
        }
    }
}

#[test]
fn defaults_write_no_batches() {
    let dir = tempfile::tempdir().unwrap();
    let report = simulate(dir.path(), RunParameters::default());
    assert_eq!(report.batches().count(), 0);
    // Only step 0 is a restart boundary.
    assert_eq!(report.status_lines(), 3 + 5 + 1);
    assert!(batch_files(dir.path()).is_empty());
}

#[test]
fn rerunning_in_the_same_slot_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    simulate(dir.path(), RunParameters::new(3, 4));
    let first_stat = fs::metadata(dir.path().join(STATUS_FILE)).unwrap().len();
    let first_batch = fs::metadata(dir.path().join("ICMGG000004")).unwrap().len();
    let first_node = fs::metadata(dir.path().join(DIAGNOSTIC_FILE)).unwrap().len();

    simulate(dir.path(), RunParameters::new(3, 4));
    assert_eq!(
        fs::metadata(dir.path().join(STATUS_FILE)).unwrap().len(),
        first_stat * 2
    );
    assert_eq!(
        fs::metadata(dir.path().join("ICMGG000004")).unwrap().len(),
        first_batch * 2
    );
    assert_eq!(
        fs::metadata(dir.path().join(DIAGNOSTIC_FILE)).unwrap().len(),
        first_node * 2
    );
    assert_eq!(step_values(dir.path()).len(), 22);
}

#[test]
fn zero_parameters_produce_nothing() {
    for params in [RunParameters::new(0, 4), RunParameters::new(3, 0)] {
        let dir = tempfile::tempdir().unwrap();
        let err = SimulationEngine::new(dir.path(), params)
            .with_clock(ManualClock::new(NaiveTime::from_hms_opt(0, 0, 0).unwrap()))
            .run()
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

#[test]
fn longer_runs_keep_the_status_column() {
    let dir = tempfile::tempdir().unwrap();
    simulate(dir.path(), RunParameters::new(50, 40).with_max_step(120));
    let stat = fs::read_to_string(dir.path().join(STATUS_FILE)).unwrap();
    let widths: Vec<usize> = stat.lines().map(str::len).collect();
    // Legacy terminal record: counter 121 and printed 120 have equal width.
    assert!(widths.iter().all(|&width| width == widths[0]));
    assert_eq!(
        batch_files(dir.path()),
        vec![
            "ICMGG000040",
            "ICMGG000080",
            "ICMGG000120",
            "ICMSH000040",
            "ICMSH000080",
            "ICMSH000120",
            "ICMUA000040",
            "ICMUA000080",
            "ICMUA000120",
        ]
    );
}
