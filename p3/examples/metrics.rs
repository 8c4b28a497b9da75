// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use p3::metrics::{application_efficiency, divergence, performance_portability, Foms};
use p3::projection::{project, Projection};
use p3::table::{COVERAGE, COVERAGE_KEY};
use p3::Table;

#[derive(Debug, Parser)]
struct Args {
    /// JSON array of performance records.
    #[arg(short, long)]
    input: PathBuf,

    /// JSON array of `coverage_key`, `coverage` records.
    #[arg(short, long)]
    coverage: Option<PathBuf>,

    /// JSON object naming the columns of `problem`, `application` and `platform`.
    #[arg(short, long)]
    projection: Option<PathBuf>,

    /// Whether lower or higher figures of merit are better.
    #[arg(short, long, default_value = "lower")]
    foms: Foms,
}

impl Args {
    fn load_projection_or_default(&self) -> Result<Projection> {
        if let Some(path) = &self.projection {
            let data = std::fs::read(path)?;
            let definition: serde_json::Value = serde_json::from_slice(&data)?;
            Ok(Projection::from_json(&definition)?)
        } else {
            Ok(Projection::default())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init();

    let projection = args.load_projection_or_default()?;
    let table = project(&load_table(&args.input)?, &projection)?;

    log::info!(
        "input = {}, records = {}",
        args.input.display(),
        table.num_rows()
    );

    let efficiency = application_efficiency(&table, args.foms)?;
    print_table("efficiency", &efficiency)?;

    let portability = performance_portability(&efficiency)?;
    print_table("portability", &portability)?;

    if let Some(path) = &args.coverage {
        let coverage = load_table(path)?;
        print_table("divergence", &divergence(&table, Some(&coverage))?)?;
    } else if table.contains(COVERAGE) {
        print_table("divergence", &divergence(&table, None)?)?;
    } else if table.contains(COVERAGE_KEY) {
        log::warn!("records have a `{}` but no coverage was given", COVERAGE_KEY);
    }

    Ok(())
}

fn load_table(path: &Path) -> Result<Table> {
    let data = std::fs::read(path)?;
    let table = serde_json::from_slice(&data)?;

    Ok(table)
}

fn print_table(name: &str, table: &Table) -> Result<()> {
    println!("{name}:");
    println!("{}", serde_json::to_string_pretty(table)?);

    Ok(())
}
