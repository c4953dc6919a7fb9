/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the replica allocator.
//!
//! Three enums model the three failure layers:
//!
//! * [`InputError`]: malformed task data or run parameters.  Fatal: it is
//!   raised before any scheduling run starts and aborts the whole process.
//! * [`RejectReason`]: why one processor is not a candidate for one replica
//!   (low-level, carries exact utilization values).
//! * [`SchedulerError`]: a run that finished with at least one replica left
//!   unplaced.  Non-fatal and local to one heuristic: the other runs proceed.

use thiserror::Error;

use super::Heuristic;

// ── Malformed input ───────────────────────────────────────────────────────────

/// A task definition or run parameter that cannot be scheduled at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The task has `p == 0`; its utilization `c / p` is undefined.
    #[error("task '{task}' has a zero period")]
    ZeroPeriod { task: String },

    /// `c` or `p` is negative, NaN or infinite.
    #[error("task '{task}' has invalid {field} = {value}")]
    InvalidTiming {
        task: String,
        field: &'static str,
        value: f64,
    },

    /// `tasks × (replicas + 1)` replicas cannot be represented or allocated.
    #[error("replication factor {replicas} for {tasks} task(s) exceeds the addressable replica count")]
    ReplicationOverflow { replicas: usize, tasks: usize },

    /// A run parameter is outside its domain (e.g. a pool of zero processors).
    #[error("invalid parameter {name} = {value}: {requirement}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        requirement: &'static str,
    },
}

// ── Candidate filter ──────────────────────────────────────────────────────────

/// Reason a processor was filtered out of the candidate set for a replica.
///
/// Recorded per processor for every replica that ends up unplaced, so the
/// failure diagnostic can say exactly which bound blocked each processor.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// `current + added` would push the processor above utilization 1.
    CapacityExceeded {
        processor: usize,
        current: f64,
        added: f64,
    },

    /// The processor already hosts a replica with the same name.
    DuplicateReplica { processor: usize, name: String },
}

impl RejectReason {
    /// Index of the processor this reason applies to.
    pub fn processor(&self) -> usize {
        match self {
            RejectReason::CapacityExceeded { processor, .. }
            | RejectReason::DuplicateReplica { processor, .. } => *processor,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::CapacityExceeded {
                processor,
                current,
                added,
            } => write!(
                f,
                "processor {} utilization would be {:.1}% + {:.1}% = {:.1}% (capacity 100%)",
                processor,
                current * 100.0,
                added * 100.0,
                (current + added) * 100.0,
            ),

            RejectReason::DuplicateReplica { processor, name } => write!(
                f,
                "processor {} already hosts a replica of '{}'",
                processor, name
            ),
        }
    }
}

// ── Run outcome ───────────────────────────────────────────────────────────────

/// A replica that found no candidate processor when it was visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Unplaced {
    pub name: String,
    pub utilization: f64,
    /// One entry per processor in the pool, in pool order.
    pub reasons: Vec<RejectReason>,
}

/// Error returned by
/// [`Allocation::into_schedule()`](super::Allocation::into_schedule) when a
/// run could not place every replica.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// At least one replica had no candidate processor.  The partial
    /// assignment has been discarded.
    #[error("{heuristic} could not schedule {} of {total} replica(s)", .unplaced.len())]
    Unschedulable {
        heuristic: Heuristic,
        unplaced: Vec<Unplaced>,
        total: usize,
    },
}
