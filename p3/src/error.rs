// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_file_format::coverage::CoverageError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("table does not contain a column named `{column}`. The following columns are required: {required:?}")]
    MissingColumn {
        column: String,
        required: Vec<String>,
    },

    #[error("table must contain at least one of the columns {any_of:?}")]
    MissingAnyColumn { any_of: Vec<String> },

    #[error("column `{column}` must contain only numeric values (row {row})")]
    NonNumeric { column: String, row: usize },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("figure of merit interpretation must be `lower` or `higher`, not `{0}`")]
    InvalidFoms(String),

    #[error("`{column}` must be in range [0, 1], found {value} at row {row}")]
    OutOfRange {
        column: String,
        row: usize,
        value: f64,
    },

    #[error("no coverage found for coverage_key `{key}`")]
    MissingCoverage { key: String },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

/// The class of a failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A required column is missing.
    Schema,

    /// An argument has the wrong type, or a column holds values of the wrong type.
    TypeValidation,

    /// A value or argument breaks a domain rule.
    Validation,

    /// A packaged schema document is defective. Not caused by the caller.
    SchemaDefinition,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;

        match self {
            MissingColumn { .. } | MissingAnyColumn { .. } => ErrorKind::Schema,
            NonNumeric { .. } | InvalidArgument(..) => ErrorKind::TypeValidation,
            InvalidFoms(..) | OutOfRange { .. } | MissingCoverage { .. } | Validation(..) => {
                ErrorKind::Validation
            }
            Coverage(err) if err.is_schema_definition() => ErrorKind::SchemaDefinition,
            Coverage(..) => ErrorKind::Validation,
        }
    }

    pub(crate) fn missing_column(column: &str, required: &[&str]) -> Self {
        Self::MissingColumn {
            column: column.to_owned(),
            required: required.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}
