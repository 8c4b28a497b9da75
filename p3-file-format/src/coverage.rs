// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_coverage::SourceCoverage;
use thiserror::Error;

pub mod schema;
pub mod v0;
pub mod v1;

pub use schema::{CoverageSchema, Revision};

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("coverage data failed schema validation: {0}")]
    Validation(#[from] serde_json::Error),

    #[error("coverage data failed schema validation: {0}")]
    InvalidRegion(String),

    /// The packaged schema document itself is unusable.
    #[error("coverage schema is not a valid schema: {0}")]
    SchemaDefinition(String),
}

impl CoverageError {
    /// `true` if the failure is a defect of the schema document, rather than
    /// of the data checked against it.
    pub fn is_schema_definition(&self) -> bool {
        matches!(self, Self::SchemaDefinition(..))
    }
}

/// Coverage decoded according to one schema revision.
pub enum CoverageJson {
    V0(v0::CoverageJson),
    V1(v1::CoverageJson),
}

// Convert into the latest format.
impl From<SourceCoverage> for CoverageJson {
    fn from(source: SourceCoverage) -> Self {
        v1::CoverageJson::from(source).into()
    }
}

impl From<v0::CoverageJson> for CoverageJson {
    fn from(v0: v0::CoverageJson) -> Self {
        Self::V0(v0)
    }
}

impl From<v1::CoverageJson> for CoverageJson {
    fn from(v1: v1::CoverageJson) -> Self {
        Self::V1(v1)
    }
}

impl TryFrom<CoverageJson> for SourceCoverage {
    type Error = CoverageError;

    fn try_from(json: CoverageJson) -> Result<Self, Self::Error> {
        use CoverageJson::*;

        match json {
            V0(v0) => v0.try_into(),
            V1(v1) => v1.try_into(),
        }
    }
}
