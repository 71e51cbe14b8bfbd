use std::path::PathBuf;

use thiserror::Error;

use crate::Scalar;

/// Everything that can go wrong loading or querying a table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is empty, expected a header row")]
    MissingHeader,

    #[error("header has {0} column(s), need at least one key field plus a value column")]
    MalformedHeader(usize),

    #[error("line {line}: expected {expected} columns, found {actual}")]
    MalformedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("keys passed {supplied:?} do not match table fields {expected:?}")]
    KeyMismatch {
        supplied: Vec<String>,
        expected: Vec<String>,
    },

    #[error("no entry for key {key:?}")]
    LookupMiss { key: Vec<Scalar> },
}
