//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Scoped open-write-close file helpers."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
//! Every helper opens its handle, writes, and drops it before returning, so no
//! handle outlives a single emission.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{IoContext, Result};

/// Create a directory and its parents; an existing directory is not an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).at(path)
}

/// Append `text`, creating the file when missing.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .at(path)?;
    file.write_all(text.as_bytes()).at(path)?;
    file.flush().at(path)
}

/// Truncate (or create) the file and write `text`.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path).at(path)?;
    file.write_all(text.as_bytes()).at(path)?;
    file.flush().at(path)
}

/// Move `from` over `to`, replacing any existing file.
pub fn replace(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).at(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ifs.stat");
        append_text(&path, "a\n").unwrap();
        append_text(&path, "b\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn write_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fort.4");
        write_text(&path, "first\n").unwrap();
        write_text(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("projects");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn replace_overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("jf_ifsdata.zip");
        let to = dir.path().join("jf_ifsdata");
        write_text(&to, "raw").unwrap();
        write_text(&from, "packed").unwrap();
        replace(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "packed");
    }

    #[test]
    fn append_into_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ifs.stat");
        let err = append_text(&path, "x").unwrap_err();
        assert!(format!("{err}").contains("missing"));
    }
}
