// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Check that `table` has every named column.
pub fn require_columns(table: &Table, columns: &[&str]) -> Result<()> {
    for &column in columns {
        if !table.contains(column) {
            return Err(Error::missing_column(column, columns));
        }
    }

    Ok(())
}

/// Borrow the values of a column that must be present.
pub fn require_column<'a>(table: &'a Table, column: &str) -> Result<&'a [Value]> {
    table
        .column(column)
        .ok_or_else(|| Error::missing_column(column, &[column]))
}

/// Check that every value of the named columns is a number, or missing.
pub fn require_numeric(table: &Table, columns: &[&str]) -> Result<()> {
    for &column in columns {
        numeric_column(table, column)?;
    }

    Ok(())
}

/// Build a new table in which the named columns are numeric.
///
/// Numbers become `Float` and missing values become `Null`; all other
/// columns are copied unchanged.
pub fn cast_to_numeric(table: &Table, columns: &[&str]) -> Result<Table> {
    require_columns(table, columns)?;

    let mut result = Table::new();

    for column in table.columns() {
        let name = column.name();

        if columns.contains(&name) {
            let values = numeric_column(table, name)?;
            result = result.with_column(name, values)?;
        } else {
            result = result.with_column(name, column.values().to_vec())?;
        }
    }

    Ok(result)
}

/// Read a column as optional real numbers.
///
/// `None` marks a missing value (including NaN).
pub fn numeric_column(table: &Table, column: &str) -> Result<Vec<Option<f64>>> {
    require_column(table, column)?
        .iter()
        .enumerate()
        .map(|(row, value)| numeric(value, column, row))
        .collect()
}

fn numeric(value: &Value, column: &str, row: usize) -> Result<Option<f64>> {
    if value.is_missing() {
        return Ok(None);
    }

    let number = value.as_f64().ok_or_else(|| Error::NonNumeric {
        column: column.to_owned(),
        row,
    })?;

    if number.is_nan() {
        return Ok(None);
    }

    Ok(Some(number))
}

/// Read an identity column (e.g. `platform`) as labels.
///
/// Every row must have a value.
pub fn label_column(table: &Table, column: &str) -> Result<Vec<String>> {
    require_column(table, column)?
        .iter()
        .enumerate()
        .map(|(row, value)| {
            value.label().ok_or_else(|| {
                Error::Validation(format!("column `{column}` is missing a value at row {row}"))
            })
        })
        .collect()
}
