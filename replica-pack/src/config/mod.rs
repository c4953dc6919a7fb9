/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Run parameters and run configuration loading.
//!
//! The two integers that drive a scheduling run, the replication factor `k`
//! and the processor-pool size `m`, are explicit [`RunParams`] passed to the
//! scheduler.  They can be given on the command line or in an optional YAML
//! run configuration file; every key is optional:
//! ```yaml
//! replicas: 1              # k, replicas per task beyond the original
//! processors: 4            # m
//! tasks: data.json         # task source (JSON array or YAML sequence)
//! output_dir: schedules    # where ffd.json / wfd.json / bfd.json go
//! heuristics: [ffd, wfd, bfd]
//! ```
//! Relative paths are resolved against the directory holding the file.

pub mod tasks;

pub use tasks::load_tasks;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::scheduler::{Heuristic, InputError};

// ── RunParams ─────────────────────────────────────────────────────────────────

/// Parameters of one scheduling session, shared by every heuristic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    /// `k`: each logical task is expanded into `k + 1` replicas.
    pub replicas: usize,
    /// `m`: number of processors in the pool.
    pub processors: usize,
}

impl RunParams {
    /// Check the parameters before any run starts.
    ///
    /// `replicas` may be zero (one instance per task).  An empty pool can
    /// never hold anything and is rejected.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.processors == 0 {
            return Err(InputError::InvalidParameter {
                name: "processors",
                value: self.processors,
                requirement: "the pool needs at least one processor",
            });
        }
        Ok(())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// YAML run configuration as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub replicas: Option<usize>,
    pub processors: Option<usize>,
    pub tasks: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub heuristics: Option<Vec<String>>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `path`.  Relative `tasks` / `output_dir` entries are rebased on
    /// the file's directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the YAML is
    /// structurally invalid (including unknown keys).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading run configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let mut cfg: RunConfig = if content.trim().is_empty() {
            RunConfig::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        cfg.tasks = cfg.tasks.map(|p| rebase(base, p));
        cfg.output_dir = cfg.output_dir.map(|p| rebase(base, p));

        debug!(
            replicas = ?cfg.replicas,
            processors = ?cfg.processors,
            tasks = ?cfg.tasks,
            output_dir = ?cfg.output_dir,
            heuristics = ?cfg.heuristics,
            "run configuration loaded"
        );
        Ok(cfg)
    }

    /// Combine command-line values (which win) with this file's values.
    ///
    /// # Errors
    /// Fails if `k` or `m` is given nowhere; there is no default for either.
    pub fn params(&self, replicas: Option<usize>, processors: Option<usize>) -> Result<RunParams> {
        let Some(replicas) = replicas.or(self.replicas) else {
            bail!("number of task replicas is required (--replicas or `replicas:` in the config file)");
        };
        let Some(processors) = processors.or(self.processors) else {
            bail!("number of processors is required (--processors or `processors:` in the config file)");
        };
        Ok(RunParams {
            replicas,
            processors,
        })
    }

    /// Heuristics named in the file, in file order.
    ///
    /// An empty list counts as absent, so the caller falls back to its
    /// default set.
    pub fn heuristics(&self) -> Option<Vec<Heuristic>> {
        let names = self.heuristics.as_ref()?;
        if names.is_empty() {
            warn!("`heuristics:` is empty in the config file, using the default set");
            return None;
        }
        Some(names.iter().map(|n| Heuristic::from_name(n)).collect())
    }
}

fn rebase(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_relative() {
        base.join(p)
    } else {
        p
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
