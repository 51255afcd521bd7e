//! Atomic output writing
//!
//! Output goes to a uniquely named temporary file in the destination
//! directory and is renamed into place, so a failed write never leaves a
//! partial result behind and never touches a neighbouring file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes to a temporary file and renames it over the final path on commit.
///
/// Dropping the writer without committing deletes the temporary file.
pub struct AtomicWriter {
    temp: NamedTempFile,
    final_path: PathBuf,
}

impl AtomicWriter {
    /// Create a writer for `path`; the parent directory must exist
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let final_path = path.as_ref().to_path_buf();
        let parent = match final_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(parent)?;

        Ok(Self { temp, final_path })
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.temp.write_all(data)
    }

    /// Flush to disk and move the temporary file into place
    pub fn commit(mut self) -> io::Result<()> {
        self.temp.flush()?;
        self.temp.as_file().sync_all()?;
        self.temp.persist(&self.final_path).map_err(|e| e.error)?;

        Ok(())
    }
}

/// Write `data` to `path` in one atomic step
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut writer = AtomicWriter::new(path)?;
    writer.write(data)?;
    writer.commit()
}
