/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Allocation targets.
//!
//! A [`Processor`] is a plain accumulator: the replicas placed on it, in
//! placement order, and the running sum of their utilizations.  Its identity
//! is its index in the pool built by [`pool`]; a pool is owned by exactly one
//! scheduling run and dropped after export.

use crate::scheduler::RejectReason;
use crate::task::TaskReplica;

/// Utilization capacity of one processor.
pub const PROCESSOR_CAPACITY: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Processor {
    util: f64,
    tasks: Vec<TaskReplica>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the utilizations of the assigned replicas.
    pub fn util(&self) -> f64 {
        self.util
    }

    /// Assigned replicas in placement order.
    pub fn tasks(&self) -> &[TaskReplica] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if a replica named `name` is already placed here.
    pub fn hosts(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.name() == name)
    }

    /// Check both placement bounds for `replica` on this processor.
    ///
    /// `index` is only used to label the rejection.  Capacity is checked
    /// first, matching the order the bounds are documented in.
    pub fn admit(&self, index: usize, replica: &TaskReplica) -> Result<(), RejectReason> {
        let added = replica.utilization();
        if self.util + added > PROCESSOR_CAPACITY {
            return Err(RejectReason::CapacityExceeded {
                processor: index,
                current: self.util,
                added,
            });
        }
        if self.hosts(replica.name()) {
            return Err(RejectReason::DuplicateReplica {
                processor: index,
                name: replica.name().to_string(),
            });
        }
        Ok(())
    }

    /// Commit `replica` to this processor.
    ///
    /// The caller is responsible for having checked [`admit`](Self::admit);
    /// there is no way to undo a placement.
    pub fn assign(&mut self, replica: TaskReplica) {
        self.util += replica.utilization();
        self.tasks.push(replica);
    }
}

/// A fresh pool of `m` empty processors.
pub fn pool(m: usize) -> Vec<Processor> {
    (0..m).map(|_| Processor::new()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
