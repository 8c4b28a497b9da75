// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Code divergence, as proposed by Harrell and Kitson in "Effective
//! Performance Portability" (doi:10.1109/P3HPC.2018.00006).
//!
//! The divergence of an application is the mean Jaccard distance between the
//! lines of code used on each pair of platforms.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use fixedbitset::FixedBitSet;
use p3_coverage::{SourceCoverage, SourceUnit};
use p3_file_format::coverage::CoverageSchema;
use rayon::prelude::*;

use crate::coverage::validate_coverage_with;
use crate::error::{Error, Result};
use crate::table::{Table, Value, APPLICATION, COVERAGE, COVERAGE_KEY, PLATFORM, PROBLEM};
use crate::utils::{label_column, require_column, require_columns};

pub const DIVERGENCE: &str = "divergence";

/// Number of covered lines for each distinct set of platforms.
///
/// A line's support set is the set of platforms whose traces cover it. Lines
/// with the same support set are interchangeable when measuring distance, so
/// only their count is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SetMap {
    counts: HashMap<FixedBitSet, u64>,
    platforms: usize,
}

impl SetMap {
    /// Build the map for a list of traces, one per platform.
    ///
    /// Platforms are numbered by their position in `traces`.
    pub fn from_coverage<'a>(traces: impl IntoIterator<Item = &'a SourceCoverage>) -> Self {
        let traces: Vec<&SourceCoverage> = traces.into_iter().collect();
        let platforms = traces.len();

        let mut support: HashMap<(&SourceUnit, u64), FixedBitSet> = HashMap::new();

        for (platform, trace) in traces.iter().enumerate() {
            for key in trace.lines() {
                support
                    .entry(key)
                    .or_insert_with(|| FixedBitSet::with_capacity(platforms))
                    .insert(platform);
            }
        }

        let mut counts = HashMap::new();

        for set in support.into_values() {
            *counts.entry(set).or_insert(0) += 1;
        }

        Self { counts, platforms }
    }

    /// Number of platforms.
    pub fn platforms(&self) -> usize {
        self.platforms
    }

    /// Number of distinct support sets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Jaccard distance between the lines covered on two platforms.
    ///
    /// Two platforms that cover no lines at all have distance 0.
    pub fn distance(&self, p1: usize, p2: usize) -> f64 {
        let mut union = 0;
        let mut difference = 0;

        for (set, count) in &self.counts {
            let (in1, in2) = (set.contains(p1), set.contains(p2));

            if in1 || in2 {
                union += count;
            }

            if in1 != in2 {
                difference += count;
            }
        }

        if union == 0 {
            return 0.0;
        }

        difference as f64 / union as f64
    }

    /// Platforms that cover at least one line.
    pub fn covering_platforms(&self) -> Vec<usize> {
        let mut covering = FixedBitSet::with_capacity(self.platforms);

        for set in self.counts.keys() {
            covering.union_with(set);
        }

        covering.ones().collect()
    }

    /// Mean distance over every unordered pair of covering platforms, or 0 if
    /// there are fewer than two.
    ///
    /// A platform whose trace covers no lines takes no part in the mean.
    pub fn average_distance(&self) -> f64 {
        let platforms = self.covering_platforms();

        let mut total = 0.0;
        let mut pairs = 0usize;

        for (i, &p1) in platforms.iter().enumerate() {
            for &p2 in &platforms[i + 1..] {
                total += self.distance(p1, p2);
                pairs += 1;
            }
        }

        if pairs == 0 {
            return 0.0;
        }

        total / pairs as f64
    }
}

/// Code divergence of one application across platforms, one trace per
/// platform.
pub fn code_divergence(traces: &[SourceCoverage]) -> f64 {
    SetMap::from_coverage(traces).average_distance()
}

/// Compute the code divergence of each `(problem, application)`.
///
/// Platforms whose coverage is empty are left out of the comparison.
/// Coverage is read from the `coverage` column of `table`, or, if `coverage`
/// is given, looked up from its `coverage` column by `coverage_key`. Every
/// trace is validated against the packaged coverage schema. Records of the
/// same platform are merged.
///
/// The result has the columns `problem`, `application` and `divergence`,
/// sorted by `(problem, application)`.
pub fn divergence(table: &Table, coverage: Option<&Table>) -> Result<Table> {
    require_columns(table, &[PROBLEM, PLATFORM, APPLICATION])?;

    let data: Vec<&Value> = match coverage {
        None => {
            require_columns(table, &[PROBLEM, PLATFORM, APPLICATION, COVERAGE])?;
            require_column(table, COVERAGE)?.iter().collect()
        }
        Some(coverage) => join_coverage(table, coverage)?,
    };

    let schema = CoverageSchema::canonical()?;
    let traces = data
        .into_iter()
        .map(|value| validate_coverage_with(&schema, value))
        .collect::<Result<Vec<_>>>()?;

    let problems = label_column(table, PROBLEM)?;
    let platforms = label_column(table, PLATFORM)?;
    let applications = label_column(table, APPLICATION)?;

    let mut groups: BTreeMap<(&str, &str), BTreeMap<&str, SourceCoverage>> = BTreeMap::new();

    for (row, trace) in traces.into_iter().enumerate() {
        let key = (problems[row].as_str(), applications[row].as_str());
        let platform = platforms[row].as_str();

        match groups.entry(key).or_default().entry(platform) {
            Entry::Vacant(entry) => {
                entry.insert(trace);
            }
            Entry::Occupied(mut entry) => {
                debug!(
                    "merging coverage of platform `{}` for ({}, {})",
                    platform, key.0, key.1
                );
                entry.get_mut().units.extend(trace.units);
            }
        }
    }

    debug!(
        "code divergence: {} records, {} (problem, application) groups",
        table.num_rows(),
        groups.len()
    );

    let groups: Vec<_> = groups.into_iter().collect();

    let scores: Vec<f64> = groups
        .par_iter()
        .map(|((problem, application), traces)| {
            let setmap = SetMap::from_coverage(traces.values());
            let score = setmap.average_distance();

            trace!(
                "divergence({}, {}) = {} over {} platforms, {} support sets",
                problem,
                application,
                score,
                setmap.platforms(),
                setmap.len()
            );

            score
        })
        .collect();

    Table::new()
        .with_column(PROBLEM, groups.iter().map(|((problem, _), _)| *problem))?
        .with_column(
            APPLICATION,
            groups.iter().map(|((_, application), _)| *application),
        )?
        .with_column(DIVERGENCE, scores)
}

// Look up the coverage of each record of `table` by its `coverage_key`.
fn join_coverage<'a>(table: &Table, coverage: &'a Table) -> Result<Vec<&'a Value>> {
    require_columns(table, &[PROBLEM, PLATFORM, APPLICATION, COVERAGE_KEY])?;
    require_columns(coverage, &[COVERAGE_KEY, COVERAGE])?;

    let keys = label_column(coverage, COVERAGE_KEY)?;
    let values = require_column(coverage, COVERAGE)?;

    let mut lookup: HashMap<String, &Value> = HashMap::new();

    for (key, value) in keys.into_iter().zip(values) {
        if value.is_missing() {
            continue;
        }

        if lookup.contains_key(&key) {
            return Err(Error::Validation(format!(
                "coverage_key `{key}` names more than one coverage trace"
            )));
        }

        lookup.insert(key, value);
    }

    label_column(table, COVERAGE_KEY)?
        .into_iter()
        .map(|key| {
            lookup
                .get(&key)
                .copied()
                .ok_or(Error::MissingCoverage { key })
        })
        .collect()
}
