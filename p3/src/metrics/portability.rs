// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance portability, as proposed by Pennycook, Sewall and Lee in
//! "A Metric for Performance Portability" (arXiv:1611.07409).
//!
//! For a set of platforms `H`, the portability of application `a` solving
//! problem `p` is the harmonic mean of its efficiencies `e_i(a, p)` over
//! every `i` in `H`, or 0 if `a` is unsupported on any of them.

use std::collections::{BTreeMap, BTreeSet};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::{Error, Result};
use crate::metrics::efficiency::{APP_EFF, ARCH_EFF};
use crate::table::{Table, APPLICATION, PLATFORM, PROBLEM};
use crate::utils::{label_column, numeric_column, require_columns};

pub const APP_PP: &str = "app pp";
pub const ARCH_PP: &str = "arch pp";

/// The efficiency columns portability can be computed from.
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
pub enum Efficiency {
    Application,
    Architectural,
}

impl Efficiency {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Application => APP_EFF,
            Self::Architectural => ARCH_EFF,
        }
    }

    pub fn portability_column(&self) -> &'static str {
        match self {
            Self::Application => APP_PP,
            Self::Architectural => ARCH_PP,
        }
    }

    /// The efficiencies present in `table`, in output order.
    pub fn present_in(table: &Table) -> Vec<Self> {
        Self::iter().filter(|e| table.contains(e.column())).collect()
    }
}

/// Compute the performance portability of each `(problem, application)`.
///
/// Every present efficiency column must be numeric, with values in `[0, 1]`
/// or missing. A platform observed anywhere in `table` on which an
/// application has no record counts as unsupported, as does a missing
/// efficiency.
///
/// The result has the columns `problem`, `application`, then `app pp` and/or
/// `arch pp`, sorted by `(problem, application)`.
pub fn performance_portability(table: &Table) -> Result<Table> {
    require_columns(table, &[PROBLEM, PLATFORM, APPLICATION])?;

    let efficiencies = Efficiency::present_in(table);
    if efficiencies.is_empty() {
        return Err(Error::MissingAnyColumn {
            any_of: Efficiency::iter().map(|e| e.column().to_owned()).collect(),
        });
    }

    let mut values = vec![];
    for efficiency in &efficiencies {
        values.push(checked_efficiency(table, efficiency.column())?);
    }

    let problems = label_column(table, PROBLEM)?;
    let platforms = label_column(table, PLATFORM)?;
    let applications = label_column(table, APPLICATION)?;

    let unique_problems: BTreeSet<&str> = problems.iter().map(String::as_str).collect();
    let unique_platforms: BTreeSet<&str> = platforms.iter().map(String::as_str).collect();
    let unique_applications: BTreeSet<&str> = applications.iter().map(String::as_str).collect();

    // Efficiencies of every record, zero-filled, by (problem, application).
    let mut groups: BTreeMap<(&str, &str), Vec<Vec<f64>>> = BTreeMap::new();
    let mut observed = BTreeSet::new();

    for row in 0..table.num_rows() {
        let problem = problems[row].as_str();
        let platform = platforms[row].as_str();
        let application = applications[row].as_str();

        observed.insert((problem, platform, application));

        let record = values.iter().map(|v| v[row].unwrap_or(0.0)).collect();
        groups
            .entry((problem, application))
            .or_default()
            .push(record);
    }

    // Materialize the combinations that did not run.
    let mut unsupported = 0;
    for &problem in &unique_problems {
        for &platform in &unique_platforms {
            for &application in &unique_applications {
                if !observed.contains(&(problem, platform, application)) {
                    unsupported += 1;
                    groups
                        .entry((problem, application))
                        .or_default()
                        .push(vec![0.0; efficiencies.len()]);
                }
            }
        }
    }

    debug!(
        "performance portability: {} records, {} platforms, {} unsupported combinations, {} groups",
        table.num_rows(),
        unique_platforms.len(),
        unsupported,
        groups.len()
    );

    let mut problem_column = vec![];
    let mut application_column = vec![];
    let mut portability = vec![vec![]; efficiencies.len()];

    for ((problem, application), records) in &groups {
        problem_column.push(*problem);
        application_column.push(*application);

        for (i, column) in portability.iter_mut().enumerate() {
            let pp = harmonic_mean(records.iter().map(|r| r[i]));
            trace!("pp({problem}, {application}) [{}] = {pp}", efficiencies[i].column());
            column.push(pp);
        }
    }

    let mut result = Table::new()
        .with_column(PROBLEM, problem_column)?
        .with_column(APPLICATION, application_column)?;

    for (efficiency, column) in efficiencies.iter().zip(portability) {
        result = result.with_column(efficiency.portability_column(), column)?;
    }

    Ok(result)
}

// Read an efficiency column, rejecting values outside [0, 1].
fn checked_efficiency(table: &Table, column: &str) -> Result<Vec<Option<f64>>> {
    let values = numeric_column(table, column)?;

    for (row, value) in values.iter().enumerate() {
        if let Some(value) = *value {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::OutOfRange {
                    column: column.to_owned(),
                    row,
                    value,
                });
            }
        }
    }

    Ok(values)
}

/// Harmonic mean of non-negative values; 0 if any value is 0 or there are
/// none.
pub(crate) fn harmonic_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();

    if values.iter().any(|&v| v <= 0.0) {
        return 0.0;
    }

    match values.as_slice() {
        [] => 0.0,
        [value] => *value,
        _ => values.len() as f64 / values.iter().map(|v| 1.0 / v).sum::<f64>(),
    }
}

#[cfg(test)]
mod tests;
