//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Output batch naming and emission."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use wusim_common::{fsio, PayloadSource, Result};

use crate::format::{pad_step, Padding};

/// File families written together at every upload boundary.
pub const BATCH_FAMILIES: [&str; 3] = ["ICMGG", "ICMSH", "ICMUA"];

const SUFFIX_WIDTH: usize = 6;

/// Three output files emitted for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBatch {
    pub step: u64,
    pub files: Vec<PathBuf>,
}

/// Suffix shared by the files of a batch: `000004`, or `NNNN+000004` with an
/// experiment id.
pub fn batch_suffix(step: u64, experiment_id: Option<&str>) -> Result<String> {
    let digits = pad_step(step, SUFFIX_WIDTH, Padding::Zero)?;
    Ok(match experiment_id {
        Some(id) => format!("{id}+{digits}"),
        None => digits,
    })
}

/// File names of the batch for `step`, in family order.
pub fn batch_file_names(step: u64, experiment_id: Option<&str>) -> Result<Vec<String>> {
    let suffix = batch_suffix(step, experiment_id)?;
    Ok(BATCH_FAMILIES
        .iter()
        .map(|family| format!("{family}{suffix}"))
        .collect())
}

pub(crate) fn write_batch(
    slot: &Path,
    step: u64,
    experiment_id: Option<&str>,
    payloads: &mut PayloadSource,
) -> Result<OutputBatch> {
    let mut files = Vec::with_capacity(BATCH_FAMILIES.len());
    for name in batch_file_names(step, experiment_id)? {
        let path = slot.join(name);
        fsio::append_text(&path, &payloads.hex_line())?;
        files.push(path);
    }
    Ok(OutputBatch { step, files })
}
