use anyhow::Result;
use pretty_assertions::assert_eq;

use super::*;
use crate::error::ErrorKind;
use crate::table::Value;

fn pp(table: &Table, column: &str) -> Vec<f64> {
    table
        .column(column)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_f64)
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, found {actual}"
    );
}

#[test]
fn test_harmonic_mean() {
    assert_eq!(harmonic_mean([0.0; 0]), 0.0);
    assert_eq!(harmonic_mean([0.2]), 0.2);
    assert_eq!(harmonic_mean([1.0, 0.0, 1.0]), 0.0);
    assert_eq!(harmonic_mean([0.5, 0.5]), 0.5);
    assert_close(harmonic_mean([1.0, 0.5]), 2.0 / 3.0);
}

#[test]
fn test_required_columns() -> Result<()> {
    let err = performance_portability(&Table::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);

    // No efficiency column.
    let table = Table::new()
        .with_column(PROBLEM, ["test"])?
        .with_column(PLATFORM, ["A"])?
        .with_column(APPLICATION, ["latest"])?;

    let err = performance_portability(&table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);

    Ok(())
}

#[test]
fn test_required_column_types() -> Result<()> {
    let table = Table::new()
        .with_column(PROBLEM, ["test"])?
        .with_column(PLATFORM, ["A"])?
        .with_column(APPLICATION, ["latest"])?
        .with_column(APP_EFF, ["non-numeric"])?;

    let err = performance_portability(&table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeValidation);

    Ok(())
}

#[test]
fn test_efficiency_range() -> Result<()> {
    // Percentages are never rescaled.
    let table = Table::new()
        .with_column(PROBLEM, ["test"; 2])?
        .with_column(PLATFORM, ["A", "B"])?
        .with_column(APPLICATION, ["latest"; 2])?
        .with_column(ARCH_EFF, [50.0, 100.0])?;

    let err = performance_portability(&table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let table = Table::new()
        .with_column(PROBLEM, ["test"])?
        .with_column(PLATFORM, ["A"])?
        .with_column(APPLICATION, ["latest"])?
        .with_column(APP_EFF, [-0.5])?;

    let err = performance_portability(&table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    Ok(())
}

#[test]
fn test_side_effects() -> Result<()> {
    let table = Table::new()
        .with_column(PROBLEM, ["test"; 2])?
        .with_column(PLATFORM, ["A", "B"])?
        .with_column(APPLICATION, ["latest"; 2])?
        .with_column(APP_EFF, [1.0, 0.5])?;

    let before = table.clone();
    performance_portability(&table)?;
    assert_eq!(table, before);

    Ok(())
}

#[test]
fn test_single_record() -> Result<()> {
    let table = Table::new()
        .with_column(PROBLEM, ["test"])?
        .with_column(PLATFORM, ["A"])?
        .with_column(APPLICATION, ["latest"])?
        .with_column(APP_EFF, [0.2])?
        .with_column(ARCH_EFF, [0.5])?;

    let result = performance_portability(&table)?;

    let expected = Table::new()
        .with_column(PROBLEM, ["test"])?
        .with_column(APPLICATION, ["latest"])?
        .with_column(APP_PP, [0.2])?
        .with_column(ARCH_PP, [0.5])?;
    assert_eq!(result, expected);

    Ok(())
}

#[test]
fn test_portability() -> Result<()> {
    let table = Table::new()
        .with_column(PROBLEM, ["test"; 15])?
        .with_column(
            PLATFORM,
            ["A", "B", "C", "D", "E"].repeat(3),
        )?
        .with_column(
            APPLICATION,
            [["latest"; 5], ["best"; 5], ["dummy"; 5]].concat(),
        )?
        .with_column(
            APP_EFF,
            [
                Some(1.0),
                Some(0.8),
                Some(0.5),
                Some(1.0),
                Some(0.2),
                Some(1.0),
                Some(1.0),
                Some(1.0),
                Some(1.0),
                Some(1.0),
                Some(0.5),
                None,
                Some(0.5),
                Some(0.5),
                Some(0.5),
            ],
        )?;

    let result = performance_portability(&table)?;

    assert_eq!(
        result.column(APPLICATION),
        Some(&[Value::from("best"), Value::from("dummy"), Value::from("latest")][..])
    );

    let values = pp(&result, APP_PP);
    assert_eq!(values.len(), 3);
    assert_eq!(values[0], 1.0);
    assert_eq!(values[1], 0.0);
    assert_close(values[2], 0.4878);

    Ok(())
}

#[test]
fn test_unsupported_platform() -> Result<()> {
    // "latest" never ran on B, which "best" did run on.
    let table = Table::new()
        .with_column(PROBLEM, ["test"; 3])?
        .with_column(PLATFORM, ["A", "A", "B"])?
        .with_column(APPLICATION, ["latest", "best", "best"])?
        .with_column(APP_EFF, [1.0, 1.0, 1.0])?;

    let result = performance_portability(&table)?;

    assert_eq!(
        result.column(APPLICATION),
        Some(&[Value::from("best"), Value::from("latest")][..])
    );
    assert_eq!(pp(&result, APP_PP), vec![1.0, 0.0]);

    Ok(())
}

#[test]
fn test_groups_by_problem() -> Result<()> {
    let table = Table::new()
        .with_column(PROBLEM, ["small", "small", "large", "large"])?
        .with_column(PLATFORM, ["A", "B", "A", "B"])?
        .with_column(APPLICATION, ["latest"; 4])?
        .with_column(APP_EFF, [0.5, 0.5, 1.0, 1.0])?;

    let result = performance_portability(&table)?;

    assert_eq!(
        result.column(PROBLEM),
        Some(&[Value::from("large"), Value::from("small")][..])
    );
    assert_eq!(pp(&result, APP_PP), vec![1.0, 0.5]);

    Ok(())
}
