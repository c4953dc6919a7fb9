/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! taskgen – writes a synthetic periodic task set for replica-pack.
//!
//! Usage:
//!   taskgen -n 12 -u 2.4 --periods 10,20,40 --seed 7 -o data.json

mod uunifast;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use replica_pack::document::write_document;

use uunifast::{generate, DEFAULT_PERIODS};

#[derive(Debug, Parser)]
#[command(name = "taskgen", about = "Synthetic periodic task-set generator (UUniFast)")]
struct Cli {
    /// Number of logical tasks.
    #[arg(short = 'n', long = "count")]
    count: usize,

    /// Total utilization of the task set.
    #[arg(short = 'u', long = "utilization", default_value_t = 0.9)]
    utilization: f64,

    /// Comma-separated set of periods to draw from.
    #[arg(long = "periods", value_delimiter = ',', default_values_t = DEFAULT_PERIODS)]
    periods: Vec<u32>,

    /// RNG seed for reproducible output.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Output file (JSON, or YAML for .yaml/.yml).
    #[arg(short = 'o', long = "output", default_value = "data.json")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let tasks = generate(cli.count, cli.utilization, &cli.periods, &mut rng)?;
    write_document(&cli.output, &tasks)?;

    info!(
        count = tasks.len(),
        utilization = cli.utilization,
        periods = ?cli.periods,
        output = %cli.output.display(),
        "task set written"
    );
    Ok(())
}
