use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Every failure here is terminal for the run: nothing is retried and no
/// statistics are reported once one of these is raised.
#[derive(Error, Debug)]
pub enum SimError {
    /// Missing or malformed flag, unknown algorithm, or `-r` absent for `nru`.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArguments { arg: &'static str, reason: String },

    #[error("unable to read trace file {}", .path.display())]
    TraceFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("malformed trace record on line {line}: {reason}")]
    MalformedTraceRecord { line: usize, reason: String },
}

impl SimError {
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidArguments {
            arg,
            reason: reason.into(),
        }
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SimError::MalformedTraceRecord {
            line,
            reason: reason.into(),
        }
    }
}
