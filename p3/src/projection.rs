// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Projection of raw performance data onto `problem`, `application` and
//! `platform` identities.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::{Table, Value, APPLICATION, PLATFORM, PROBLEM};
use crate::utils::require_columns;

/// Joins the values of a multi-column group.
pub const SEPARATOR: &str = "-";

/// The columns that define each identity.
///
/// By default, each identity is read from the column of the same name.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Projection {
    pub problem: Vec<String>,
    pub application: Vec<String>,
    pub platform: Vec<String>,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            problem: vec![PROBLEM.to_owned()],
            application: vec![APPLICATION.to_owned()],
            platform: vec![PLATFORM.to_owned()],
        }
    }
}

fn owned<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Vec<String> {
    columns.into_iter().map(Into::into).collect()
}

impl Projection {
    pub fn problem<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.problem = owned(columns);
        self
    }

    pub fn application<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.application = owned(columns);
        self
    }

    pub fn platform<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.platform = owned(columns);
        self
    }

    /// Read a definition from untyped JSON, e.g. a user-supplied config file.
    ///
    /// Groups that are absent keep their default.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| {
            Error::InvalidArgument("projection definition must be an object".to_owned())
        })?;

        let mut projection = Self::default();

        for (group, definition) in object {
            let columns = definition.as_array().ok_or_else(|| {
                Error::InvalidArgument(format!("projection definition `{group}` must be a list"))
            })?;

            let columns = columns
                .iter()
                .map(|column| {
                    column.as_str().map(str::to_owned).ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "column names in `{group}` must be strings, found {column}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            match group.as_str() {
                PROBLEM => projection.problem = columns,
                APPLICATION => projection.application = columns,
                PLATFORM => projection.platform = columns,
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "unknown projection definition `{group}`"
                    )));
                }
            }
        }

        Ok(projection)
    }

    fn groups(&self) -> [(&'static str, &[String]); 3] {
        [
            (PROBLEM, self.problem.as_slice()),
            (APPLICATION, self.application.as_slice()),
            (PLATFORM, self.platform.as_slice()),
        ]
    }
}

/// Project `table` onto the `problem`, `application` and `platform` columns
/// defined by `projection`.
///
/// A group of one column is renamed. A group of several columns is joined
/// into one string per row with [`SEPARATOR`], skipping missing values, and
/// its source columns are dropped. Identity columns are always strings; a
/// row with no value in any column of a group gets a missing identity. All
/// other columns pass through unchanged.
pub fn project(table: &Table, projection: &Projection) -> Result<Table> {
    let groups = projection.groups();

    for (name, columns) in &groups {
        if columns.is_empty() {
            return Err(Error::Validation(format!(
                "projection for `{name}` names no columns"
            )));
        }
    }

    let definitions: Vec<&str> = groups
        .iter()
        .flat_map(|(_, columns)| columns.iter().map(String::as_str))
        .collect();
    require_columns(table, &definitions)?;

    debug!(
        "projecting {} records: problem = {:?}, application = {:?}, platform = {:?}",
        table.num_rows(),
        projection.problem,
        projection.application,
        projection.platform,
    );

    let mut identities = vec![];
    for (name, columns) in &groups {
        identities.push((*name, collapse(table, columns)));
    }

    let mut result = Table::new();

    for column in table.columns() {
        let name = column.name();

        if definitions.contains(&name) {
            // Renamed in place.
            for ((canonical, values), (_, columns)) in identities.iter().zip(&groups) {
                if columns.len() == 1 && columns[0] == name {
                    result = result.with_column(*canonical, values.clone())?;
                }
            }
            continue;
        }

        if groups.iter().any(|(canonical, _)| *canonical == name) {
            return Err(Error::Validation(format!(
                "column `{name}` would be replaced by its projection"
            )));
        }

        result = result.with_column(name, column.values().to_vec())?;
    }

    for ((canonical, values), (_, columns)) in identities.into_iter().zip(&groups) {
        if columns.len() > 1 {
            result = result.with_column(canonical, values)?;
        }
    }

    Ok(result)
}

// Join the labels of `columns` in each row.
fn collapse(table: &Table, columns: &[String]) -> Vec<Value> {
    (0..table.num_rows())
        .map(|row| {
            let parts: Vec<String> = columns
                .iter()
                .filter_map(|column| table.value(row, column).and_then(Value::label))
                .collect();

            if parts.is_empty() {
                Value::Null
            } else {
                Value::Str(parts.join(SEPARATOR))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
