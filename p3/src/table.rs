// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Column-oriented tables of performance data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};

use crate::error::{Error, Result};

pub const PROBLEM: &str = "problem";
pub const APPLICATION: &str = "application";
pub const PLATFORM: &str = "platform";
pub const FOM: &str = "fom";
pub const COVERAGE: &str = "coverage";
pub const COVERAGE_KEY: &str = "coverage_key";

/// One JSON object per table row.
pub type Record = Map<String, serde_json::Value>;

/// A single table cell.
///
/// `Null` and a NaN `Float` both mean "missing".
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Str(String),

    /// Any other JSON value, e.g. a decoded coverage trace.
    Json(serde_json::Value),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null | Self::Json(serde_json::Value::Null) => true,
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Interpret the value as a real number, if it has a numeric reading.
    ///
    /// Strings are parsed. Missing values have no numeric reading.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Json(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Render the value as an identity label, or `None` if it is missing.
    pub fn label(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }

        let label = match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            // `Debug` keeps a trailing `.0` for integral values.
            Self::Float(f) => format!("{f:?}"),
            Self::Json(serde_json::Value::String(s)) => s.clone(),
            Self::Json(v) => v.to_string(),
            Self::Null => return None,
        };

        Some(label)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::String(s) => Self::Str(s),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            other => Self::Json(other),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int(i) => Self::from(i),
            Value::Float(f) => Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::Str(s) => Self::String(s),
            Value::Json(json) => json,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An ordered set of equal-length, uniquely named columns.
///
/// Tables are values: every operation in this crate borrows its input and
/// builds a new table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(into = "Vec<Record>", try_from = "Vec<Record>")]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns<S>(columns: impl IntoIterator<Item = (S, Vec<Value>)>) -> Result<Self>
    where
        S: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, values)| {
                table.with_column(name, values)
            })
    }

    /// Append a column.
    ///
    /// Fails if the name is taken, or if the column length differs from that
    /// of the columns already present.
    pub fn with_column<V>(mut self, name: impl Into<String>, values: V) -> Result<Self>
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let name = name.into();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if self.contains(&name) {
            return Err(Error::Validation(format!("duplicate column `{name}`")));
        }

        if !self.columns.is_empty() && values.len() != self.num_rows() {
            return Err(Error::Validation(format!(
                "column `{}` has {} rows, expected {}",
                name,
                values.len(),
                self.num_rows()
            )));
        }

        self.columns.push(Column { name, values });

        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(Column::values)
    }

    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)?.get(row)
    }

    /// Build a new table from the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let mut columns = vec![];

        for &name in names {
            let values = self
                .column(name)
                .ok_or_else(|| Error::missing_column(name, names))?;
            columns.push((name, values.to_vec()));
        }

        Self::from_columns(columns)
    }

    /// Build a table from JSON records.
    ///
    /// Columns appear in the order their keys are first seen. Keys absent
    /// from a record are missing values.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let records: Vec<Record> = records.into_iter().collect();

        let mut names: Vec<&str> = vec![];
        let mut seen = HashSet::new();

        for record in &records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    names.push(key.as_str());
                }
            }
        }

        let columns = names.iter().map(|&name| {
            let values = records
                .iter()
                .map(|record| record.get(name).cloned().map_or(Value::Null, Value::from))
                .collect();
            (name, values)
        });

        Self::from_columns(columns)
    }

    pub fn to_records(&self) -> Vec<Record> {
        (0..self.num_rows())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[row].clone().into()))
                    .collect()
            })
            .collect()
    }
}

impl From<Table> for Vec<Record> {
    fn from(table: Table) -> Self {
        table.to_records()
    }
}

impl TryFrom<Vec<Record>> for Table {
    type Error = Error;

    fn try_from(records: Vec<Record>) -> Result<Self> {
        Self::from_records(records)
    }
}
