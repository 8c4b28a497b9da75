// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use p3_coverage::{Region, SourceCoverage, SourceUnit, UnitCoverage};
use serde::{Deserialize, Serialize};

use super::CoverageError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverageJson {
    pub files: Vec<SourceFile>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// UTF-8 encoding of the path to the source file.
    pub file: String,

    /// Distinguishes builds of the same `file`.
    pub id: String,

    pub lines: Vec<LineRegion>,
}

/// Either one line, or a half-open `[start, end)` interval of lines.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineRegion {
    Line(u64),
    Interval([u64; 2]),
}

impl TryFrom<LineRegion> for Region {
    type Error = CoverageError;

    fn try_from(json: LineRegion) -> Result<Self, Self::Error> {
        match json {
            LineRegion::Line(line) => Ok(Region::point(line)),
            // A reversed interval names no lines.
            LineRegion::Interval([start, end]) => Region::interval(start, end.max(start))
                .map_err(|err| CoverageError::InvalidRegion(err.to_string())),
        }
    }
}

impl From<Region> for LineRegion {
    fn from(region: Region) -> Self {
        match region {
            Region::Point(line) => Self::Line(line),
            Region::Interval { start, end } => Self::Interval([start, end]),
        }
    }
}

impl TryFrom<CoverageJson> for SourceCoverage {
    type Error = CoverageError;

    fn try_from(json: CoverageJson) -> Result<Self, Self::Error> {
        let mut source = SourceCoverage::default();

        for file in json.files {
            let mut entry = UnitCoverage::new(SourceUnit::new(file.file, file.id));

            for region in file.lines {
                entry.regions.push(region.try_into()?);
            }

            source.units.push(entry);
        }

        Ok(source)
    }
}

impl From<SourceCoverage> for CoverageJson {
    fn from(source: SourceCoverage) -> Self {
        let files = source
            .units
            .into_iter()
            .map(|entry| SourceFile {
                file: entry.unit.file,
                id: entry.unit.id,
                lines: entry.regions.into_iter().map(LineRegion::from).collect(),
            })
            .collect();

        Self { files }
    }
}
