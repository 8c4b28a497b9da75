// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_coverage::SourceCoverage;
use serde::Deserialize;

use super::{v0, v1, CoverageError, CoverageJson};

/// Schema document for coverage traces with `file`, `id` and `lines`.
pub const CANONICAL_SCHEMA: &str = include_str!("../../schema/coverage-1.0.0.schema");

/// Schema document for coverage traces with `file` and `regions`, and no ids.
pub const LEGACY_SCHEMA: &str = include_str!("../../schema/coverage-0.1.0.schema");

/// Incompatible revisions of the coverage format.
///
/// Both revisions use half-open intervals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Revision {
    /// `{file, regions: [[start, end, count]]}`
    V0,

    /// `{file, id, lines: [line | [start, end]]}`
    V1,
}

impl Revision {
    fn from_id(id: &str) -> Option<Self> {
        if id.ends_with("coverage-0.1.0.schema") {
            return Some(Self::V0);
        }

        if id.ends_with("coverage-1.0.0.schema") {
            return Some(Self::V1);
        }

        None
    }

    fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::V0 => &["file", "regions"],
            Self::V1 => &["file", "id", "lines"],
        }
    }
}

// The subset of a schema document needed to identify its revision.
#[derive(Deserialize)]
struct SchemaDocument {
    #[serde(rename = "$id")]
    id: String,

    #[serde(rename = "type")]
    kind: String,

    items: ItemsDocument,
}

#[derive(Deserialize)]
struct ItemsDocument {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    required: Vec<String>,
}

/// A loaded coverage schema, used to decode traces of its revision.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoverageSchema {
    id: String,
    revision: Revision,
}

impl CoverageSchema {
    /// Load the packaged schema for the current revision.
    pub fn canonical() -> Result<Self, CoverageError> {
        Self::parse(CANONICAL_SCHEMA)
    }

    /// Load the packaged schema for the pre-id revision.
    pub fn legacy() -> Result<Self, CoverageError> {
        Self::parse(LEGACY_SCHEMA)
    }

    pub fn parse(text: &str) -> Result<Self, CoverageError> {
        let doc: SchemaDocument = serde_json::from_str(text)
            .map_err(|err| CoverageError::SchemaDefinition(err.to_string()))?;

        if doc.kind != "array" || doc.items.kind != "object" {
            return Err(CoverageError::SchemaDefinition(format!(
                "`{}` does not describe an array of objects",
                doc.id
            )));
        }

        let revision = Revision::from_id(&doc.id).ok_or_else(|| {
            CoverageError::SchemaDefinition(format!("unknown coverage revision `{}`", doc.id))
        })?;

        for field in revision.required_fields() {
            if !doc.items.required.iter().any(|r| r == field) {
                return Err(CoverageError::SchemaDefinition(format!(
                    "`{}` does not require field `{}`",
                    doc.id, field
                )));
            }
        }

        Ok(Self {
            id: doc.id,
            revision,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Decode and validate serialized coverage.
    pub fn decode_str(&self, text: &str) -> Result<SourceCoverage, CoverageError> {
        let json: CoverageJson = match self.revision {
            Revision::V0 => serde_json::from_str::<v0::CoverageJson>(text)?.into(),
            Revision::V1 => serde_json::from_str::<v1::CoverageJson>(text)?.into(),
        };

        json.try_into()
    }

    /// Validate coverage that has already been parsed as JSON.
    pub fn decode_value(&self, value: &serde_json::Value) -> Result<SourceCoverage, CoverageError> {
        let json: CoverageJson = match self.revision {
            Revision::V0 => v0::CoverageJson::deserialize(value)?.into(),
            Revision::V1 => v1::CoverageJson::deserialize(value)?.into(),
        };

        json.try_into()
    }
}
