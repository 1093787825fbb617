//! Exit codes for the subgraph-docs CLI.
//!
//! Each fatal error kind gets its own code so scripts and CI jobs can tell a
//! gateway outage from a broken schema.

use crate::generate::SchemaFileError;
use crate::settings::SettingsError;
use subgraph_config::ConfigError;
use subgraph_ipfs::FetchError;
use subgraph_schema::SchemaError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - document written
    Success = 0,
    /// Any failure not covered below
    Failure = 1,
    /// Configuration error (invalid config file or command-line settings)
    ConfigError = 2,
    /// Schema source could not be retrieved (gateway or local file)
    FetchError = 3,
    /// I/O error writing the document
    IoError = 4,
    /// An entity in the schema could not be parsed
    SchemaError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for the first recognised error in the chain.
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if cause.is::<ConfigError>() || cause.is::<SettingsError>() {
                return Self::ConfigError;
            }
            if cause.is::<FetchError>() || cause.is::<SchemaFileError>() {
                return Self::FetchError;
            }
            if cause.is::<SchemaError>() {
                return Self::SchemaError;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::Failure
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::FetchError => write!(f, "schema fetch error"),
            Self::IoError => write!(f, "I/O error"),
            Self::SchemaError => write!(f, "malformed schema"),
        }
    }
}
