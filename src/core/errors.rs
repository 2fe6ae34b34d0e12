/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::{Pid, Serial};
use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Common result type for tomography operations
pub type TomographyResult<T> = Result<T, TomographyError>;

/// Tomography errors
///
/// Only [`TomographyError::NoSuchUniverse`] and [`TomographyError::NotNavigated`]
/// are expected to reach the user during a normal session; everything else
/// degrades into a logged diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum TomographyError {
    #[error("Duplicate universe identifier: pid {pid}, serial {serial}")]
    #[diagnostic(
        code(registry::duplicate_identifier),
        help("A pid or serial can only be tracked once per process.")
    )]
    DuplicateIdentifier { pid: Pid, serial: Serial },

    #[error("No universes recorded")]
    #[diagnostic(code(registry::empty))]
    Empty,

    #[error("No such universe: {0}")]
    #[diagnostic(
        code(navigation::no_such_universe),
        help("Run list-universes to see the live universes and their indices.")
    )]
    NoSuchUniverse(String),

    #[error("This universe was not entered through a jump")]
    #[diagnostic(
        code(navigation::not_navigated),
        help("hand-back-control only works inside a universe reached with jump.")
    )]
    NotNavigated,

    #[error("Fork failed: {0}")]
    #[diagnostic(
        code(snapshot::fork_failed),
        help("The system may be out of processes or memory. Lower the universe capacity.")
    )]
    ForkFailed(Errno),

    #[error("Signal operation '{operation}' failed: {errno}")]
    #[diagnostic(code(signals::operation_failed))]
    Signal {
        operation: &'static str,
        errno: Errno,
    },

    #[error("I/O error: {0}")]
    #[diagnostic(code(signals::io))]
    Io(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Check the TOMOGRAPHY_* environment variables.")
    )]
    InvalidConfig(String),
}

impl TomographyError {
    /// Build a signal error for a failed primitive
    pub fn signal(operation: &'static str, errno: Errno) -> Self {
        TomographyError::Signal { operation, errno }
    }
}

impl From<std::io::Error> for TomographyError {
    fn from(err: std::io::Error) -> Self {
        TomographyError::Io(err.to_string())
    }
}
