//! Target discovery: illegal directories, file listing, output naming

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// System and top-level directories that are never processed
pub const ILLEGAL_DIRECTORIES: &[&str] = &[
    "/etc",
    "/var",
    "C:/Program Files",
    "C:/Program Files (x86)",
    "C:/Windows",
    "C:/Windows/System32",
];

/// Suffix appended to the file stem of every output file
pub const OUTPUT_SUFFIX: &str = "_redacted";

/// Whether a path names a directory inside one of [`ILLEGAL_DIRECTORIES`].
///
/// Files are never illegal; only directory targets are checked.
pub fn is_illegal_directory(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    let resolved = fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());

    is_illegal_path(&resolved.to_string_lossy())
}

/// Prefix check on a path string, with `\` treated as `/`
pub fn is_illegal_path(path: &str) -> bool {
    let normalized = path.trim_start_matches(r"\\?\").replace('\\', "/");

    ILLEGAL_DIRECTORIES.iter().any(|dir| {
        normalized == *dir
            || normalized
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Regular files directly inside `dir`, sorted by file name
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Output location for a processed file: `<stem>_redacted<.ext>`.
///
/// The file goes into `output_dir` when that names an existing directory,
/// otherwise next to the source.
pub fn output_path(file: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = format!("{}{}", stem, OUTPUT_SUFFIX);
    if let Some(ext) = file.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    match output_dir {
        Some(dir) if dir.is_dir() => dir.join(name),
        _ => file
            .parent()
            .map(|parent| parent.join(&name))
            .unwrap_or_else(|| PathBuf::from(&name)),
    }
}
