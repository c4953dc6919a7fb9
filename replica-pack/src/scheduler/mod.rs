/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Replica allocator.
//!
//! [`ReplicaScheduler`] places the expanded, decreasing-utilization replica
//! sequence onto a fixed pool of processors with one of three greedy
//! heuristics.  Every heuristic shares the same candidate filter and differs
//! only in how it orders the candidates before taking the first one:
//!
//! | Heuristic | Short name | Candidate order | Effect |
//! |---|---|---|---|
//! | [`FirstFit`](Heuristic::FirstFit) | `ffd` | pool index | fills low-indexed processors first |
//! | [`WorstFit`](Heuristic::WorstFit) | `wfd` | utilization ascending | spreads load |
//! | [`BestFit`](Heuristic::BestFit) | `bfd` | utilization descending | packs tightly |
//!
//! A processor is a candidate for a replica iff
//! `processor.util + replica.utilization <= 1` and it does not already host
//! a replica with the same name.  Deadlines are never consulted.
//!
//! # Run model
//! * One pass per heuristic, fresh pool per pass; nothing is shared between
//!   passes, so `schedule()` takes `&self` and is deterministic.
//! * A placement is final: no backtracking, no rebalancing, no retry.
//! * A replica with no candidate is left unplaced and the pass continues;
//!   the run is valid only if every replica was placed.
//!
//! # Example
//! ```rust,ignore
//! let scheduler = ReplicaScheduler::new(RunParams { replicas: 1, processors: 4 })?;
//! let replicas = scheduler.expand(&defs)?;
//! let schedule = scheduler.schedule(&replicas, Heuristic::BestFit).into_schedule()?;
//! ```

pub mod error;

pub use error::{InputError, RejectReason, SchedulerError, Unplaced};

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::config::RunParams;
use crate::export::Schedule;
use crate::processor::{self, Processor};
use crate::replica;
use crate::task::{TaskDef, TaskReplica};

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Placement heuristic: decides the order in which candidate processors are
/// considered.  All three visit replicas in decreasing-utilization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Lowest-indexed candidate.
    FirstFit,
    /// Least-loaded candidate.
    WorstFit,
    /// Most-loaded candidate that still fits.
    BestFit,
}

impl Heuristic {
    /// Default run order.
    pub const ALL: [Heuristic; 3] = [Heuristic::FirstFit, Heuristic::WorstFit, Heuristic::BestFit];

    /// Resolve a heuristic by name.
    ///
    /// Accepts the short (`wfd`, `bfd`) and long (`worst-fit`, `best-fit`)
    /// names, case-insensitively, with `-` or `_` separators.  Every other
    /// name selects first-fit, the default mode.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "wfd" | "worst-fit" => Heuristic::WorstFit,
            "bfd" | "best-fit" => Heuristic::BestFit,
            "ffd" | "first-fit" => Heuristic::FirstFit,
            other => {
                warn!(name = %other, "unrecognised heuristic name, using first-fit");
                Heuristic::FirstFit
            }
        }
    }

    /// Short name, also used as the output file stem.
    pub fn short_name(self) -> &'static str {
        match self {
            Heuristic::FirstFit => "ffd",
            Heuristic::WorstFit => "wfd",
            Heuristic::BestFit => "bfd",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::FirstFit => "first-fit",
            Heuristic::WorstFit => "worst-fit",
            Heuristic::BestFit => "best-fit",
        }
    }

    /// Order `candidates` (pool indices, ascending) in preference order.
    ///
    /// The sort is stable, so candidates with equal utilization keep their
    /// pool order.
    pub fn order(self, candidates: &mut [usize], pool: &[Processor]) {
        match self {
            Heuristic::FirstFit => {}
            Heuristic::WorstFit => {
                candidates.sort_by(|&a, &b| pool[a].util().total_cmp(&pool[b].util()))
            }
            Heuristic::BestFit => {
                candidates.sort_by(|&a, &b| pool[b].util().total_cmp(&pool[a].util()))
            }
        }
    }

    /// Pick the processor for `replica`: filter, order, take the first.
    ///
    /// Returns the rejection reason of every processor when there is no
    /// candidate.
    pub fn select(self, replica: &TaskReplica, pool: &[Processor]) -> Result<usize, Vec<RejectReason>> {
        let CandidateSet {
            mut indices,
            rejected,
        } = candidates(replica, pool);
        self.order(&mut indices, pool);
        indices.first().copied().ok_or(rejected)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Candidate filter ──────────────────────────────────────────────────────────

/// Result of filtering the pool for one replica.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    /// Indices of processors that can accept the replica, in pool order.
    pub indices: Vec<usize>,
    /// Why each remaining processor was filtered out.
    pub rejected: Vec<RejectReason>,
}

/// Split `pool` into processors that can legally accept `replica` and the
/// ones that cannot (with the bound each one violates).
pub fn candidates(replica: &TaskReplica, pool: &[Processor]) -> CandidateSet {
    let mut set = CandidateSet::default();
    for (i, proc) in pool.iter().enumerate() {
        match proc.admit(i, replica) {
            Ok(()) => set.indices.push(i),
            Err(reason) => {
                trace!(replica = %replica.name(), reason = %reason, "processor filtered out");
                set.rejected.push(reason);
            }
        }
    }
    set
}

// ── Allocation (one run's outcome) ────────────────────────────────────────────

/// Per-processor diagnostic row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorSummary {
    pub index: usize,
    pub util: f64,
    pub task_count: usize,
}

/// Outcome of one heuristic pass: the final pool plus every replica that
/// could not be placed.
#[derive(Debug, Clone)]
pub struct Allocation {
    heuristic: Heuristic,
    processors: Vec<Processor>,
    unplaced: Vec<Unplaced>,
    total: usize,
}

impl Allocation {
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn unplaced(&self) -> &[Unplaced] {
        &self.unplaced
    }

    /// Number of replicas the run was given.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of replicas sitting on some processor.
    pub fn placed(&self) -> usize {
        self.processors.iter().map(Processor::task_count).sum()
    }

    /// `true` iff every replica was placed.
    pub fn is_valid(&self) -> bool {
        self.placed() == self.total
    }

    pub fn summary(&self) -> Vec<ProcessorSummary> {
        self.processors
            .iter()
            .enumerate()
            .map(|(index, p)| ProcessorSummary {
                index,
                util: p.util(),
                task_count: p.task_count(),
            })
            .collect()
    }

    /// Emit the per-run diagnostic: heuristic, then utilization and task
    /// count of every processor.  Logged for valid and failed runs alike.
    pub fn log_diagnostic(&self) {
        info!(
            heuristic = %self.heuristic,
            placed = self.placed(),
            total = self.total,
            valid = self.is_valid(),
            "run diagnostic"
        );
        for row in self.summary() {
            info!(
                heuristic = %self.heuristic,
                processor = row.index,
                util = row.util,
                tasks = row.task_count,
                "  processor"
            );
        }
        if !self.is_valid() {
            let names: Vec<&str> = self.unplaced.iter().map(|u| u.name.as_str()).collect();
            warn!(
                heuristic = %self.heuristic,
                unplaced = ?names,
                "✗ could not schedule"
            );
            for u in &self.unplaced {
                for reason in &u.reasons {
                    debug!(replica = %u.name, reason = %reason, "  rejected");
                }
            }
        }
    }

    /// Convert a valid run into its exportable [`Schedule`].
    ///
    /// # Errors
    /// [`SchedulerError::Unschedulable`] if any replica was left unplaced; the
    /// partial assignment is dropped.
    pub fn into_schedule(self) -> Result<Schedule, SchedulerError> {
        if !self.is_valid() {
            return Err(SchedulerError::Unschedulable {
                heuristic: self.heuristic,
                unplaced: self.unplaced,
                total: self.total,
            });
        }
        Ok(Schedule::from_processors(&self.processors))
    }
}

// ── ReplicaScheduler ──────────────────────────────────────────────────────────

/// Short report of one run, returned by [`ReplicaScheduler::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub heuristic: Heuristic,
    pub valid: bool,
    pub placed: usize,
    pub total: usize,
    pub processors: Vec<ProcessorSummary>,
}

/// The replica allocator.
///
/// Holds only the validated run parameters.  All per-run state (the
/// processor pool) is allocated inside [`schedule`](Self::schedule) and
/// handed back in the [`Allocation`].
#[derive(Debug, Clone)]
pub struct ReplicaScheduler {
    params: RunParams,
}

impl ReplicaScheduler {
    /// # Errors
    /// [`InputError::InvalidParameter`] if the parameters are out of domain.
    pub fn new(params: RunParams) -> Result<Self, InputError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> RunParams {
        self.params
    }

    /// Expand `defs` with this scheduler's replication factor.
    pub fn expand(&self, defs: &[TaskDef]) -> Result<Vec<TaskReplica>, InputError> {
        replica::expand(defs, self.params.replicas)
    }

    /// Run one greedy pass of `heuristic` over `replicas` on a fresh pool.
    ///
    /// `replicas` must already be in visit order (see [`expand`](Self::expand)).
    pub fn schedule(&self, replicas: &[TaskReplica], heuristic: Heuristic) -> Allocation {
        let mut pool = processor::pool(self.params.processors);
        let mut unplaced = Vec::new();

        info!(
            heuristic = %heuristic,
            replicas = replicas.len(),
            processors = pool.len(),
            "=== ReplicaScheduler::schedule() ==="
        );

        for replica in replicas {
            match heuristic.select(replica, &pool) {
                Ok(idx) => {
                    let before = pool[idx].util();
                    pool[idx].assign(replica.clone());
                    debug!(
                        replica = %replica.name(),
                        processor = idx,
                        before_pct = before * 100.0,
                        after_pct = pool[idx].util() * 100.0,
                        "✓ placed"
                    );
                }
                Err(reasons) => {
                    debug!(
                        replica = %replica.name(),
                        utilization = replica.utilization(),
                        "✗ no candidate processor, left unplaced"
                    );
                    unplaced.push(Unplaced {
                        name: replica.name().to_string(),
                        utilization: replica.utilization(),
                        reasons,
                    });
                }
            }
        }

        let allocation = Allocation {
            heuristic,
            processors: pool,
            unplaced,
            total: replicas.len(),
        };

        info!(
            heuristic = %heuristic,
            placed = allocation.placed(),
            total = allocation.total(),
            "{} done",
            heuristic
        );
        allocation
    }

    /// Expand `defs` once, then run every heuristic in `heuristics` in order.
    ///
    /// Each run logs its diagnostic.  A valid run's schedule is handed to
    /// `export`; a failed run is reported and skipped without calling it.
    ///
    /// # Errors
    /// A malformed definition aborts before the first run.  An error returned
    /// by `export` aborts the remaining runs.
    pub fn run<E, F>(
        &self,
        defs: &[TaskDef],
        heuristics: &[Heuristic],
        mut export: F,
    ) -> Result<Vec<RunReport>, E>
    where
        E: From<InputError>,
        F: FnMut(Heuristic, &Schedule) -> Result<(), E>,
    {
        let replicas = self.expand(defs)?;
        let mut reports = Vec::with_capacity(heuristics.len());

        for &heuristic in heuristics {
            let allocation = self.schedule(&replicas, heuristic);
            allocation.log_diagnostic();

            let report = RunReport {
                heuristic,
                valid: allocation.is_valid(),
                placed: allocation.placed(),
                total: allocation.total(),
                processors: allocation.summary(),
            };

            match allocation.into_schedule() {
                Ok(schedule) => export(heuristic, &schedule)?,
                Err(e) => info!(output = %heuristic.short_name(), "{}; no schedule written", e),
            }
            reports.push(report);
        }

        Ok(reports)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
