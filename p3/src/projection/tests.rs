use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::error::ErrorKind;

fn names(table: &Table) -> Vec<&str> {
    table.column_names().collect()
}

#[test]
fn test_collapse() -> Result<()> {
    let table = Table::new()
        .with_column("c1", ["x", "y", "z"])?
        .with_column("c2", ["1", "2", "3"])?;

    let columns = vec!["c1".to_owned(), "c2".to_owned()];
    assert_eq!(
        collapse(&table, &columns),
        vec![Value::from("x-1"), Value::from("y-2"), Value::from("z-3")]
    );

    Ok(())
}

#[test]
fn test_collapse_skips_missing() -> Result<()> {
    let table = Table::new()
        .with_column("c1", ["x", "y", "z"])?
        .with_column("c2", [Some("1"), None, Some("3")])?;

    let columns = vec!["c1".to_owned(), "c2".to_owned()];
    assert_eq!(
        collapse(&table, &columns),
        vec![Value::from("x-1"), Value::from("y"), Value::from("z-3")]
    );

    // Only a trailing value present: no leading separator.
    let table = Table::new()
        .with_column("x", [None::<&str>, None])?
        .with_column("y", [Some("a"), None])?;

    let columns = vec!["x".to_owned(), "y".to_owned()];
    assert_eq!(collapse(&table, &columns), vec![Value::from("a"), Value::Null]);

    Ok(())
}

#[test]
fn test_required_columns() {
    let table = Table::new();

    for projection in [
        Projection::default().problem(["c1"]),
        Projection::default().application(["c1"]),
        Projection::default().platform(["c1"]),
    ] {
        let err = project(&table, &projection).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}

#[test]
fn test_definition_types() {
    let err = Projection::from_json(&json!({ "platform": "c1" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeValidation);

    let err = Projection::from_json(&json!({ "platform": [1] })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeValidation);

    let err = Projection::from_json(&json!(["c1"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeValidation);
}

#[test]
fn test_definition_from_json() -> Result<()> {
    let projection = Projection::from_json(&json!({
        "problem": ["kernel", "M", "N", "K"],
        "application": ["language", "branch"],
    }))?;

    assert_eq!(projection.problem, vec!["kernel", "M", "N", "K"]);
    assert_eq!(projection.application, vec!["language", "branch"]);
    assert_eq!(projection.platform, vec!["platform"]);

    Ok(())
}

#[test]
fn test_empty_group() -> Result<()> {
    let table = Table::new()
        .with_column("problem", ["x"])?
        .with_column("platform", ["X"])?
        .with_column("application", ["A"])?;

    let projection = Projection::default().problem(Vec::<String>::new());
    let err = project(&table, &projection).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    Ok(())
}

#[test]
fn test_side_effects() -> Result<()> {
    let table = Table::new()
        .with_column("c1", ["x", "y"])?
        .with_column("c2", ["1", "2"])?
        .with_column("application", ["A", "B"])?
        .with_column("platform", ["X", "Y"])?;

    let before = table.clone();
    let result = project(&table, &Projection::default().problem(["c1", "c2"]))?;

    assert_eq!(table, before);
    assert_ne!(result, table);

    Ok(())
}

#[test]
fn test_projection() -> Result<()> {
    let table = Table::new()
        .with_column("c1", ["x", "y"])?
        .with_column("c2", ["1", "2"])?
        .with_column("c3", ["A", "B"])?
        .with_column("c4", ["X", "Y"])?;

    let projection = Projection::default()
        .problem(["c1", "c2"])
        .application(["c3"])
        .platform(["c4"]);
    let result = project(&table, &projection)?;

    assert_eq!(names(&result), vec!["application", "platform", "problem"]);
    assert_eq!(
        result.column("problem"),
        Some(&[Value::from("x-1"), Value::from("y-2")][..])
    );
    assert_eq!(
        result.column("application"),
        Some(&[Value::from("A"), Value::from("B")][..])
    );
    assert_eq!(
        result.column("platform"),
        Some(&[Value::from("X"), Value::from("Y")][..])
    );

    Ok(())
}

#[test]
fn test_identities_are_strings() -> Result<()> {
    let table = Table::new()
        .with_column("kernel", ["DGEMM", "DGEMM"])?
        .with_column("M", [1024i64, 2048])?
        .with_column("language", ["OpenMP", "OpenMP"])?
        .with_column("branch", ["master", "optimized"])?
        .with_column("architecture", ["CPU", "CPU"])?
        .with_column("compiler", ["gcc", "icc"])?
        .with_column("fom", [1.0, 2.0])?;

    let projection = Projection::default()
        .problem(["kernel", "M"])
        .application(["language", "branch"])
        .platform(["architecture", "compiler"]);
    let result = project(&table, &projection)?;

    let expected = Table::new()
        .with_column("fom", [1.0, 2.0])?
        .with_column("problem", ["DGEMM-1024", "DGEMM-2048"])?
        .with_column("application", ["OpenMP-master", "OpenMP-optimized"])?
        .with_column("platform", ["CPU-gcc", "CPU-icc"])?;
    assert_eq!(result, expected);

    // Single-column groups are coerced too.
    let table = Table::new()
        .with_column("problem", [7i64])?
        .with_column("application", ["A"])?
        .with_column("platform", ["X"])?;
    let result = project(&table, &Projection::default())?;
    assert_eq!(result.value(0, "problem"), Some(&Value::from("7")));

    Ok(())
}

#[test]
fn test_default_projection() -> Result<()> {
    let table = Table::new()
        .with_column("problem", ["x"])?
        .with_column("platform", ["X"])?
        .with_column("application", ["A"])?;

    let result = project(&table, &Projection::default())?;
    assert_eq!(result, table);

    Ok(())
}

#[test]
fn test_conflicting_column() -> Result<()> {
    let table = Table::new()
        .with_column("problem", ["stale"])?
        .with_column("kernel", ["DGEMM"])?
        .with_column("size", ["1024"])?
        .with_column("application", ["A"])?
        .with_column("platform", ["X"])?;

    let projection = Projection::default().problem(["kernel", "size"]);
    let err = project(&table, &projection).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    Ok(())
}
