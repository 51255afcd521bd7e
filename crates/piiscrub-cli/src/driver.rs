//! Batch driver: one file at a time, read → detect → transform → write

use crate::atomic_writer::write_atomic;
use crate::discovery::{is_illegal_directory, list_files, output_path};
use crate::prompt::Approver;
use piiscrub_pii::{DetectionSummary, Engine, Mode};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Directories with more files than this get a single bulk question first
pub const BULK_PROMPT_THRESHOLD: usize = 20;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Could not access {path}: {source}")]
    TargetNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Illegal directory selected: {path}")]
    IllegalDirectory { path: PathBuf },

    #[error("Could not list directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-run options
#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub mode: Mode,
    pub output_dir: Option<PathBuf>,
    /// Report counts without writing anything
    pub dry_run: bool,
}

/// What happened to one approved file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written {
        output: PathBuf,
        summary: DetectionSummary,
    },
    DryRun {
        summary: DetectionSummary,
    },
}

impl FileOutcome {
    pub fn summary(&self) -> DetectionSummary {
        match self {
            FileOutcome::Written { summary, .. } | FileOutcome::DryRun { summary } => *summary,
        }
    }
}

/// Tally of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Matches summed over every processed file
    pub matches: DetectionSummary,
}

impl BatchReport {
    fn record(&mut self, file: &Path, result: Result<FileOutcome, DriverError>) {
        match result {
            Ok(outcome) => {
                let summary = outcome.summary();
                self.processed += 1;
                self.matches.pii += summary.pii;
                self.matches.spii += summary.spii;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                self.failed += 1;
            }
        }
    }
}

pub struct Driver<A> {
    engine: Engine,
    options: DriverOptions,
    approver: A,
}

impl<A: Approver> Driver<A> {
    pub fn new(engine: Engine, options: DriverOptions, approver: A) -> Self {
        Self {
            engine,
            options,
            approver,
        }
    }

    /// Process a file or every file in a directory.
    ///
    /// Problems with the target itself end the run. Problems with a single
    /// file, including an unreadable approval answer, are logged and
    /// counted, and the batch moves on.
    pub fn run(&mut self, target: &Path) -> Result<BatchReport, DriverError> {
        let metadata = std::fs::metadata(target).map_err(|source| DriverError::TargetNotFound {
            path: target.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            self.run_directory(target)
        } else {
            let mut report = BatchReport::default();
            if self.ask(&format!("Process file {}?", target.display())) {
                report.record(target, self.process_file(target));
            } else {
                report.skipped += 1;
            }
            Ok(report)
        }
    }

    fn run_directory(&mut self, dir: &Path) -> Result<BatchReport, DriverError> {
        if is_illegal_directory(dir) {
            return Err(DriverError::IllegalDirectory {
                path: dir.to_path_buf(),
            });
        }

        let files = list_files(dir).map_err(|source| DriverError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!("Found {} files in {}", files.len(), dir.display());

        let approve_all = files.len() > BULK_PROMPT_THRESHOLD
            && self.ask(&format!(
                "Found {} files in directory. Do you want to process all of them?",
                files.len()
            ));

        let mut report = BatchReport::default();
        for file in &files {
            if !approve_all && !self.ask(&format!("Process file {}?", file.display())) {
                debug!("Skipping {}", file.display());
                report.skipped += 1;
                continue;
            }
            report.record(file, self.process_file(file));
        }

        Ok(report)
    }

    /// An answer that cannot be read counts as a decline
    fn ask(&mut self, question: &str) -> bool {
        self.approver.confirm(question).unwrap_or_else(|e| {
            error!("Could not read approval, skipping: {}", e);
            false
        })
    }

    /// Read, transform and write one file
    pub fn process_file(&self, file: &Path) -> Result<FileOutcome, DriverError> {
        let document = std::fs::read(file).map_err(|source| DriverError::Read {
            path: file.to_path_buf(),
            source,
        })?;

        let processed = self.engine.process(&document, self.options.mode);
        info!(
            "Processing {}: found {} PII matches and {} SPII matches",
            file.display(),
            processed.summary.pii,
            processed.summary.spii
        );

        if self.options.dry_run {
            return Ok(FileOutcome::DryRun {
                summary: processed.summary,
            });
        }

        if let Some(dir) = &self.options.output_dir {
            if !dir.is_dir() {
                warn!(
                    "Output directory {} does not exist, writing next to the source",
                    dir.display()
                );
            }
        }

        let output = output_path(file, self.options.output_dir.as_deref());
        write_atomic(&output, &processed.output).map_err(|source| DriverError::Write {
            path: output.clone(),
            source,
        })?;

        info!(
            "Processed {}, output saved to {}",
            file.display(),
            output.display()
        );

        Ok(FileOutcome::Written {
            output,
            summary: processed.summary,
        })
    }
}
