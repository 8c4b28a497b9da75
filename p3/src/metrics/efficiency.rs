// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::error::{Error, Result};
use crate::table::{Table, APPLICATION, FOM, PLATFORM, PROBLEM};
use crate::utils::{cast_to_numeric, label_column, numeric_column, require_columns};

pub const APP_EFF: &str = "app eff";
pub const ARCH_EFF: &str = "arch eff";

/// Interpretation of the figure of merit.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, IntoStaticStr, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Foms {
    /// Lower values are better, e.g. time to solution.
    #[default]
    Lower,

    /// Higher values are better, e.g. throughput.
    Higher,
}

impl FromStr for Foms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lower" => Ok(Self::Lower),
            "higher" => Ok(Self::Higher),
            _ => Err(Error::InvalidFoms(s.to_owned())),
        }
    }
}

impl Foms {
    fn best(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Lower => lhs.min(rhs),
            Self::Higher => lhs.max(rhs),
        }
    }

    fn efficiency(&self, best: f64, fom: f64) -> f64 {
        match self {
            Self::Lower => best / fom,
            Self::Higher => fom / best,
        }
    }
}

// A missing or non-positive figure of merit means the run did not produce a
// valid result.
fn valid(fom: Option<f64>) -> Option<f64> {
    fom.filter(|&f| f > 0.0)
}

/// Compute the efficiency of every record relative to the best figure of
/// merit for the same `(problem, platform)`.
///
/// The result has the columns `problem`, `platform`, `application`, `fom` and
/// `app eff`, with one row per input row. `fom` is numeric in the result. Records that did not run have an
/// efficiency of 0. Every record is kept: deduplicate repeated measurements
/// before or after calling this.
pub fn application_efficiency(table: &Table, foms: Foms) -> Result<Table> {
    const REQUIRED: [&str; 4] = [PROBLEM, PLATFORM, APPLICATION, FOM];

    require_columns(table, &REQUIRED)?;

    let fom = numeric_column(table, FOM)?;
    let problems = label_column(table, PROBLEM)?;
    let platforms = label_column(table, PLATFORM)?;

    let key = |row: usize| (problems[row].as_str(), platforms[row].as_str());

    // Best-known figure of merit for each (problem, platform).
    let mut best: HashMap<(&str, &str), f64> = HashMap::new();

    for (row, value) in fom.iter().enumerate() {
        if let Some(value) = valid(*value) {
            best.entry(key(row))
                .and_modify(|b| *b = foms.best(*b, value))
                .or_insert(value);
        }
    }

    debug!(
        "application efficiency: {} records, {} (problem, platform) pairs, foms = {}",
        table.num_rows(),
        best.len(),
        foms
    );

    let efficiency: Vec<f64> = fom
        .iter()
        .enumerate()
        .map(|(row, value)| match valid(*value) {
            // Can't panic: every valid record contributed to `best`.
            Some(value) => foms.efficiency(best[&key(row)], value),
            None => 0.0,
        })
        .collect();

    cast_to_numeric(&table.select(&REQUIRED)?, &[FOM])?.with_column(APP_EFF, efficiency)
}
