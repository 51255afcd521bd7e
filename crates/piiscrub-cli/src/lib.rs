//! piiscrub file driver
//!
//! Everything around the engine that touches the outside world:
//! - Configuration from file, environment and flags
//! - Target discovery and illegal directory filtering
//! - Interactive approval
//! - Atomic output writing
//! - The batch loop tying them together

pub mod atomic_writer;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod prompt;

pub use config::{ConfigError, LoggingConfig, PatternOverrides, ScrubConfig};
pub use driver::{BatchReport, Driver, DriverError, DriverOptions, FileOutcome};
pub use prompt::{Approver, AutoApprove, InteractiveApprover};
