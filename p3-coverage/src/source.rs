// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A compiled source file.
///
/// Two units with the same `file` but different `id` values were built with
/// different provenance (e.g. compiler flags or preprocessor definitions) and
/// never share lines.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct SourceUnit {
    /// UTF-8 encoding of the path to the source file.
    pub file: String,

    /// Disambiguates builds of the same file.
    pub id: String,
}

impl SourceUnit {
    pub fn new(file: impl Into<String>, id: impl Into<String>) -> Self {
        let file = file.into();
        let id = id.into();

        Self { file, id }
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.file, self.id)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UnitCoverage {
    pub unit: SourceUnit,
    pub regions: Vec<Region>,
}

impl UnitCoverage {
    pub fn new(unit: SourceUnit) -> Self {
        Self {
            unit,
            regions: vec![],
        }
    }
}

/// Coverage trace for one build of an application.
///
/// Entries are kept in input order. The same unit may appear in more than one
/// entry; its lines are the union of every entry's regions.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SourceCoverage {
    pub units: Vec<UnitCoverage>,
}

impl SourceCoverage {
    /// Iterate over every `(unit, line)` pair named by the trace.
    ///
    /// Pairs repeat when regions overlap.
    pub fn lines(&self) -> impl Iterator<Item = (&SourceUnit, u64)> + '_ {
        self.units.iter().flat_map(|entry| {
            entry
                .regions
                .iter()
                .flat_map(Region::lines)
                .map(move |line| (&entry.unit, line))
        })
    }

    /// Expand the trace into the set of covered lines for each unit.
    pub fn covered_lines(&self) -> BTreeMap<&SourceUnit, BTreeSet<u64>> {
        let mut covered: BTreeMap<&SourceUnit, BTreeSet<u64>> = BTreeMap::new();

        for (unit, line) in self.lines() {
            covered.entry(unit).or_default().insert(line);
        }

        covered
    }

    /// Number of distinct `(unit, line)` pairs covered.
    pub fn line_count(&self) -> usize {
        self.covered_lines().values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }
}
