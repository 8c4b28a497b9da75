// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_coverage::{Region, SourceCoverage, SourceUnit, UnitCoverage};
use serde::{Deserialize, Serialize};

use super::CoverageError;

/// Build id assigned to every file of a legacy trace, which predates ids.
pub const LEGACY_ID: &str = "";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverageJson {
    pub files: Vec<SourceFile>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// UTF-8 encoding of the path to the source file.
    pub file: String,

    /// `[start, end, count]`, where `[start, end)` is half-open.
    ///
    /// `count` is the number of lines reported as used within the interval.
    /// It is not needed to reconstruct the covered lines.
    pub regions: Vec<(u64, u64, u64)>,
}

impl TryFrom<CoverageJson> for SourceCoverage {
    type Error = CoverageError;

    fn try_from(json: CoverageJson) -> Result<Self, Self::Error> {
        let mut source = SourceCoverage::default();

        for file in json.files {
            let mut entry = UnitCoverage::new(SourceUnit::new(file.file, LEGACY_ID));

            for (start, end, count) in file.regions {
                let region = Region::interval(start, end.max(start))
                    .map_err(|err| CoverageError::InvalidRegion(err.to_string()))?;

                if count > region.len() {
                    debug!(
                        "legacy region [{}, {}) of `{}` reports {} used lines",
                        start, end, entry.unit.file, count
                    );
                }

                entry.regions.push(region);
            }

            source.units.push(entry);
        }

        Ok(source)
    }
}
