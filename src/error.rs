use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with status {code}")]
    ListingStatus { program: String, code: i32 },
    #[error("malformed percent escape at byte {offset}: {reason}")]
    Decode { offset: usize, reason: &'static str },
    #[error("write failed: {0}")]
    Output(#[source] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

impl Error {
    /// Status the process should exit with: the listing's own code when it
    /// failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ListingStatus { code, .. } => *code,
            _ => 1,
        }
    }

    /// Stdout was closed early, e.g. `lsn | head`.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Error::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
