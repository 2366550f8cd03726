//! Release directory discovery.
//!
//! A release directory is any directory that directly holds `*.flac` files.
//! Each one becomes one section of the release document.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// Name of the quality-check log written by auCDtect/audiochecker.
pub const QUALITY_LOG_NAME: &str = "audiochecker.log";

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Sorted, deduplicated directories under `root` that contain FLAC files.
///
/// If `root` is itself a FLAC file, its parent directory is returned.
pub fn release_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = BTreeSet::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), "flac") {
            if let Some(parent) = entry.path().parent() {
                dirs.insert(parent.to_path_buf());
            }
        }
    }

    debug!("Found {} release directories under {:?}", dirs.len(), root);
    dirs.into_iter().collect()
}

/// FLAC files directly inside `dir`, sorted by file name.
pub fn flac_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, "flac") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Track title from a file stem, dropping a leading `NN.` track number.
///
/// ```
/// use classical_release::scan::title_from_stem;
///
/// assert_eq!(title_from_stem("01. Concerto - I. Allegro"), "Concerto - I. Allegro");
/// assert_eq!(title_from_stem("Prelude"), "Prelude");
/// ```
pub fn title_from_stem(stem: &str) -> &str {
    stem.split_once('.').map_or(stem, |(_, rest)| rest.trim())
}

/// Title for the FLAC file at `path`.
pub fn track_title(path: &Path) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    title_from_stem(&stem).to_string()
}

fn sorted_files_matching(dir: &Path, pred: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && file_name(&path).is_some_and(&pred) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The quality-check log, if present.
pub fn quality_log(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(QUALITY_LOG_NAME);
    path.is_file().then_some(path)
}

/// The ripper's log: the first `*.log` by name that is not the quality log.
pub fn rip_log(dir: &Path) -> Result<Option<PathBuf>> {
    let logs = sorted_files_matching(dir, |name| {
        name != QUALITY_LOG_NAME && has_extension(Path::new(name), "log")
    })?;
    Ok(logs.into_iter().next())
}

/// The first `dr14*.txt` dynamic range report by name.
pub fn dr_report(dir: &Path) -> Result<Option<PathBuf>> {
    let reports = sorted_files_matching(dir, |name| {
        name.starts_with("dr14") && has_extension(Path::new(name), "txt")
    })?;
    Ok(reports.into_iter().next())
}
