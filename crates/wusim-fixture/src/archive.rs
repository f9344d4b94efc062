//! ---
//! wusim_section: "04-fixture"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Single-entry zip packaging of payload files."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use wusim_common::{HarnessError, IoContext, Result};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Package `source` into a fresh archive at `archive` holding a single entry
/// named after the source file.
pub fn package_single(source: &Path, archive: &Path) -> Result<PathBuf> {
    let entry_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            HarnessError::Configuration(format!(
                "cannot derive an archive entry name from {}",
                source.display()
            ))
        })?;

    let mut input = File::open(source).at(source)?;
    let output = File::create(archive).at(archive)?;
    let mut writer = ZipWriter::new(output);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file(entry_name, options)
        .map_err(|err| archive_error(archive, err))?;
    io::copy(&mut input, &mut writer).at(archive)?;
    writer
        .finish()
        .map_err(|err| archive_error(archive, err))?;
    Ok(archive.to_path_buf())
}

fn archive_error(path: &Path, source: zip::result::ZipError) -> HarnessError {
    HarnessError::Archive {
        path: path.to_path_buf(),
        source,
    }
}
