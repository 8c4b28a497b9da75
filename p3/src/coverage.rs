// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_file_format::coverage::CoverageSchema;

pub use p3_coverage::{Region, SourceCoverage, SourceUnit, UnitCoverage};

use crate::error::{Error, Result};
use crate::table::Value;

/// Validate and decode one coverage trace against the packaged schema.
///
/// `data` is either serialized JSON (a string) or an already-decoded JSON
/// array or object.
pub fn validate_coverage(data: &Value) -> Result<SourceCoverage> {
    let schema = CoverageSchema::canonical()?;
    validate_coverage_with(&schema, data)
}

/// Validate and decode one coverage trace against `schema`.
pub fn validate_coverage_with(schema: &CoverageSchema, data: &Value) -> Result<SourceCoverage> {
    use serde_json::Value as Json;

    let coverage = match data {
        Value::Str(text) | Value::Json(Json::String(text)) => schema.decode_str(text)?,
        Value::Json(json @ (Json::Array(..) | Json::Object(..))) => schema.decode_value(json)?,
        _ => {
            return Err(Error::InvalidArgument(
                "coverage must be a JSON string, list or object".to_owned(),
            ));
        }
    };

    Ok(coverage)
}
