//! ---
//! wusim_section: "02-simulation"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Status log line layout."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
//! Status lines look like ` 12:34:56 0AAA00AAA STEPO       4`. The tag and the
//! step share a 13-column field, so the step column ends at the same offset
//! for every tag and every step width. Log scrapers depend on that column.

use chrono::NaiveTime;
use wusim_common::{HarnessError, Result};

use crate::format::{digit_count, pad_step, Padding};

/// Status log written in the slot directory.
pub const STATUS_FILE: &str = "ifs.stat";

const JOB_TOKEN: &str = "0AAA00AAA";
const TAG_FIELD: usize = 13;

/// Record kind of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    /// A completed model step.
    Stepo,
    /// End of the run.
    Cnto,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Stepo => "STEPO",
            StatusTag::Cnto => "CNTO",
        }
    }

    /// Columns left for the step after the tag.
    pub fn step_columns(&self) -> usize {
        TAG_FIELD - self.as_str().len()
    }
}

/// Render a status line for `step`, newline included.
pub fn status_line(time: NaiveTime, tag: StatusTag, step: u64) -> Result<String> {
    status_line_padded_for(time, tag, step, step)
}

/// Render `printed` with the padding that `width_source` would receive.
///
/// When `width_source` has more digits than `printed` the step column ends
/// early; the legacy terminal record relies on this.
pub fn status_line_padded_for(
    time: NaiveTime,
    tag: StatusTag,
    printed: u64,
    width_source: u64,
) -> Result<String> {
    ensure_fits(tag, width_source)?;
    let width = tag.step_columns() - digit_count(width_source) + digit_count(printed);
    let column = pad_step(printed, width, Padding::Space)?;
    Ok(format!(
        " {} {JOB_TOKEN} {}{column}\n",
        time.format("%H:%M:%S"),
        tag.as_str()
    ))
}

/// Reject steps whose digits do not fit the column after `tag`.
pub fn ensure_fits(tag: StatusTag, step: u64) -> Result<()> {
    let columns = tag.step_columns();
    if digit_count(step) > columns {
        return Err(HarnessError::StepOverflow {
            step,
            width: columns,
        });
    }
    Ok(())
}
