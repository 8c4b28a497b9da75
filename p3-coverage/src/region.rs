// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::Range;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A covered region of lines in a single source unit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Region {
    /// Exactly one line.
    Point(u64),

    /// Every line in `start..end`. The end is exclusive.
    Interval { start: u64, end: u64 },
}

impl Region {
    pub fn point(line: u64) -> Self {
        Self::Point(line)
    }

    /// Construct a half-open interval of lines.
    ///
    /// An empty interval (`start == end`) is allowed and covers no lines.
    pub fn interval(start: u64, end: u64) -> Result<Self> {
        if end < start {
            bail!("interval end {end} precedes its start {start}");
        }

        Ok(Self::Interval { start, end })
    }

    /// Return a `Range` object that describes the covered lines.
    pub fn range(&self) -> Range<u64> {
        match *self {
            // Can't overflow in practice: a line number of `u64::MAX` would
            // need a file of that many lines.
            Self::Point(line) => line..line.saturating_add(1),
            Self::Interval { start, end } => start..end,
        }
    }

    /// Number of lines in the region.
    pub fn len(&self) -> u64 {
        let range = self.range();
        range.end - range.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lines(&self) -> impl Iterator<Item = u64> {
        self.range()
    }
}
