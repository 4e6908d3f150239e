use std::path::PathBuf;

/// Errors that can occur while extracting junctions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    Parameter(String),

    #[error("I/O error: {source} ({path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("unable to read alignments from {source_name}: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    #[error("unknown cigar operation '{0}'")]
    UnknownCigarOp(char),

    #[error("malformed cigar: {0}")]
    InvalidCigar(String),

    #[error("reference id {0} not present in header")]
    UnknownReference(usize),
}

impl Error {
    /// Convenience for wrapping an `io::Error` with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// Wrap a decode failure from the alignment input.
    pub fn decode(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Source {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    /// True for errors confined to a single alignment record.
    ///
    /// The extraction loop skips the offending record and keeps going; every
    /// other variant aborts the run.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCigarOp(_) | Self::InvalidCigar(_) | Self::UnknownReference(_)
        )
    }
}
