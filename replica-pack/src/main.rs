/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use replica_pack::config::{load_tasks, RunConfig};
use replica_pack::export::write_schedule;
use replica_pack::scheduler::{Heuristic, ReplicaScheduler};

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum HeuristicArg {
    #[value(alias = "ffd")]
    FirstFit,
    #[value(alias = "wfd")]
    WorstFit,
    #[value(alias = "bfd")]
    BestFit,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::FirstFit => Heuristic::FirstFit,
            HeuristicArg::WorstFit => Heuristic::WorstFit,
            HeuristicArg::BestFit => Heuristic::BestFit,
        }
    }
}

/// Replicated periodic task allocator.
///
/// Expands every task into k+1 replicas and packs them onto m processors
/// with first-fit, worst-fit and best-fit decreasing.  Each fully scheduled
/// run is written to <output-dir>/<ffd|wfd|bfd>.json.
///
/// Example:
///   replica-pack -t data.json -k 1 -m 4 -o schedules
#[derive(Debug, Parser)]
#[command(
    name = "replica-pack",
    about = "Replicated periodic task allocator",
    long_about = None,
)]
struct Cli {
    /// Task definition file (JSON array, or YAML for .yaml/.yml).
    #[arg(short = 't', long = "tasks")]
    tasks: Option<PathBuf>,

    /// Number of extra replicas per task (k); 0 keeps a single instance.
    #[arg(short = 'k', long = "replicas")]
    replicas: Option<usize>,

    /// Number of processors in the pool (m).
    #[arg(short = 'm', long = "processors")]
    processors: Option<usize>,

    /// Directory for the per-heuristic schedule files.
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Heuristic to run; repeat to run several.  Defaults to all three.
    #[arg(short = 'H', long = "heuristic", value_enum)]
    heuristics: Vec<HeuristicArg>,

    /// Write schedules as YAML instead of JSON.
    #[arg(long = "yaml", default_value_t = false)]
    yaml: bool,

    /// Path to a YAML run configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
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
    let file_cfg = match &cli.config {
        Some(path) => RunConfig::load_from_file(path)?,
        None => RunConfig::new(),
    };

    let params = file_cfg.params(cli.replicas, cli.processors)?;
    let scheduler = ReplicaScheduler::new(params)?;

    let tasks_path = cli
        .tasks
        .or_else(|| file_cfg.tasks.clone())
        .unwrap_or_else(|| PathBuf::from("data.json"));
    let output_dir = cli
        .output_dir
        .or_else(|| file_cfg.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let heuristics: Vec<Heuristic> = if cli.heuristics.is_empty() {
        file_cfg
            .heuristics()
            .unwrap_or_else(|| Heuristic::ALL.to_vec())
    } else {
        cli.heuristics.into_iter().map(Heuristic::from).collect()
    };
    let extension = if cli.yaml { "yaml" } else { "json" };

    info!(
        replicas = params.replicas,
        processors = params.processors,
        tasks = %tasks_path.display(),
        output_dir = %output_dir.display(),
        heuristics = ?heuristics.iter().map(|h| h.short_name()).collect::<Vec<_>>(),
        "Configuration"
    );

    let defs = load_tasks(&tasks_path)?;

    let reports = scheduler.run(&defs, &heuristics, |heuristic, schedule| {
        let path = output_dir.join(format!("{}.{}", heuristic.short_name(), extension));
        write_schedule(&path, schedule)
    })?;

    let valid = reports.iter().filter(|r| r.valid).count();
    info!(
        runs = reports.len(),
        valid = valid,
        failed = reports.len() - valid,
        "=== All runs complete ==="
    );
    Ok(())
}
