use std::path::PathBuf;
use thiserror::Error;

/// Failures while restoring protected regions after a transform ran.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    #[error("placeholder for region {0} was removed by the transform")]
    Lost(usize),

    #[error("placeholder for region {0} appears more than once after the transform")]
    Duplicated(usize),

    #[error("placeholder refers to unknown region {0}")]
    Unknown(usize),

    #[error("malformed placeholder at byte {0}")]
    Malformed(usize),
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("{path}:{line}: expected `misspelling->correction`, found {content:?}")]
    Syntax {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("failed to read dictionary {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build dictionary index")]
    Index(#[from] fst::Error),
}
