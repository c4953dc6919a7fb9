/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule export.
//!
//! A [`Schedule`] maps each processor index (0-based, pool order) to the
//! records of the replicas placed on it.  Every processor of the pool is
//! present, empty ones included.  Files are JSON unless the path ends in
//! `.yaml` / `.yml`:
//!
//! ```json
//! {
//!   "0": [ { "name": "B", "c": 1, "p": 2, "d": 2 }, { "name": "A", "c": 1, "p": 4, "d": 4 } ],
//!   "1": []
//! }
//! ```
//!
//! Keys are kept in an ordered map, so writing the same schedule twice
//! produces byte-identical files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::{read_document, write_document};
use crate::processor::Processor;
use crate::task::TaskRecord;

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Final assignment of one valid run: processor index → placed replicas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<usize, Vec<TaskRecord>>);

impl Schedule {
    /// Snapshot a processor pool, one entry per processor.
    pub fn from_processors(processors: &[Processor]) -> Self {
        Schedule(
            processors
                .iter()
                .enumerate()
                .map(|(i, p)| (i, p.tasks().iter().map(|t| t.to_record()).collect()))
                .collect(),
        )
    }

    /// Number of processors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, processor: usize) -> Option<&[TaskRecord]> {
        self.0.get(&processor).map(Vec::as_slice)
    }

    /// Total number of records across all processors.
    pub fn record_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[TaskRecord])> {
        self.0.iter().map(|(i, v)| (*i, v.as_slice()))
    }
}

/// Persist `schedule` to `path`.
pub fn write_schedule(path: &Path, schedule: &Schedule) -> Result<()> {
    write_document(path, schedule)?;
    info!(
        path = %path.display(),
        processors = schedule.len(),
        records = schedule.record_count(),
        "schedule written"
    );
    Ok(())
}

/// Load a schedule previously written by [`write_schedule`].
pub fn read_schedule(path: &Path) -> Result<Schedule> {
    read_document(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
