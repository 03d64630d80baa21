//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use exposure_grid::config::ConfigFileError;
use exposure_grid::publish::PublishError;
use exposure_grid::region::GridError;
use exposure_grid::store::StoreError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Invalid command-line argument
    InvalidArgument(GridError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Input file is not a valid report payload
    Parse { path: String, error: serde_json::Error },
    /// Report could not be published
    Publish(PublishError),
    /// Store request failed
    Store(StoreError),
    /// Some cells did not receive their record
    Incomplete { published: usize, total: usize },
    /// No cell received its record
    Unpublished { total: usize },
}

impl CliError {
    /// Exit code for this error.
    ///
    /// Partial fan-outs exit with 2 so scripts can tell them apart from
    /// outright failures, which exit with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Incomplete { .. } => 2,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Config(_) = self {
            eprintln!();
            eprintln!("Check the configuration file, or pass --config <path> to use another one.");
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::Parse { path, error } => {
                write!(f, "Failed to parse report '{}': {}", path, error)
            }
            CliError::Publish(e) => write!(f, "Failed to publish report: {}", e),
            CliError::Store(e) => write!(f, "Store error: {}", e),
            CliError::Incomplete { published, total } => write!(
                f,
                "Report reached only {} of {} cells",
                published, total
            ),
            CliError::Unpublished { total } => {
                write!(f, "Report reached none of its {} cells", total)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidArgument(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::Parse { error, .. } => Some(error),
            CliError::Publish(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        CliError::InvalidArgument(e)
    }
}

impl From<PublishError> for CliError {
    fn from(e: PublishError) -> Self {
        CliError::Publish(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}
