/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the replica allocator.
//!
//! Two distinct types model the two sides of the allocation pipeline:
//!
//! ```text
//! task file ──(TaskDef)──► TaskReplica × (k+1) ──(scheduler)──► TaskRecord ──► schedule file
//!                            ↑ validated, immutable               ↑ export form
//!                            utilization cached                     {name, c, p, d}
//! ```
//!
//! # Ownership model
//! `TaskReplica` values are created in bulk by
//! [`expand`](crate::replica::expand) and never mutated afterwards.  A
//! scheduling run clones the replicas it places into its processors, so the
//! expanded sequence can be shared by any number of runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scheduler::InputError;

// ── Numeric values ────────────────────────────────────────────────────────────

/// A timing parameter (`c`, `p` or `d`) exactly as it appeared in the task
/// source.
///
/// Integers and decimals are kept apart so that an exported record carries
/// the same literal the input did (`4` stays `4`, never `4.0`).  All
/// arithmetic goes through [`TimeValue::as_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Int(i64),
    Float(f64),
}

impl TimeValue {
    /// Numeric value as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            TimeValue::Int(v) => v as f64,
            TimeValue::Float(v) => v,
        }
    }
}

impl From<i64> for TimeValue {
    fn from(v: i64) -> Self {
        TimeValue::Int(v)
    }
}

impl From<f64> for TimeValue {
    fn from(v: f64) -> Self {
        TimeValue::Float(v)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Int(v) => write!(f, "{v}"),
            TimeValue::Float(v) => write!(f, "{v}"),
        }
    }
}

// ── TaskRecord (input / export form) ──────────────────────────────────────────

/// Plain `{name, c, p, d}` record.
///
/// This is both the shape read from the task source and the shape written
/// to a schedule file.  Utilization is deliberately absent: it is derived,
/// never persisted.  Extra keys in a source record are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Logical task name.  All replicas of one task share it.
    pub name: String,
    /// Execution-time cost.
    pub c: TimeValue,
    /// Period.
    pub p: TimeValue,
    /// Deadline.  Carried through to the output, never evaluated.
    pub d: TimeValue,
}

/// A logical task definition as read from the task source.
pub type TaskDef = TaskRecord;

// ── TaskReplica (validated working copy) ──────────────────────────────────────

/// One replica of a logical task.
///
/// Immutable once constructed.  The only way to build one is through
/// [`TaskReplica::new`] / [`TaskReplica::from_def`], which reject a zero
/// period, so `utilization` is always a finite, non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReplica {
    name: String,
    c: TimeValue,
    p: TimeValue,
    d: TimeValue,
    utilization: f64,
}

impl TaskReplica {
    /// Validate the timing parameters and build a replica.
    ///
    /// # Errors
    /// * [`InputError::ZeroPeriod`] if `p == 0`.
    /// * [`InputError::InvalidTiming`] if `c` or `p` is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        c: TimeValue,
        p: TimeValue,
        d: TimeValue,
    ) -> Result<Self, InputError> {
        let name = name.into();

        let period = p.as_f64();
        if period == 0.0 {
            return Err(InputError::ZeroPeriod { task: name });
        }
        for (field, value) in [("p", period), ("c", c.as_f64())] {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::InvalidTiming {
                    task: name,
                    field,
                    value,
                });
            }
        }

        let utilization = c.as_f64() / period;
        Ok(Self {
            name,
            c,
            p,
            d,
            utilization,
        })
    }

    /// Build a replica from a task-source definition.
    pub fn from_def(def: &TaskDef) -> Result<Self, InputError> {
        Self::new(def.name.clone(), def.c, def.p, def.d)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `c / p`, computed once at construction.
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    pub fn deadline(&self) -> TimeValue {
        self.d
    }

    /// Export form of this replica.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            name: self.name.clone(),
            c: self.c,
            p: self.p,
            d: self.d,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use super::TimeValue::{Float, Int};

    // ── TimeValue ─────────────────────────────────────────────────────────────

    #[test]
    fn time_value_keeps_integer_literal_on_round_trip() {
        let v: TimeValue = serde_json::from_str("4").unwrap();
        assert_eq!(v, Int(4));
        assert_eq!(serde_json::to_string(&v).unwrap(), "4");
    }

    #[test]
    fn time_value_parses_decimals_as_float() {
        let v: TimeValue = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, Float(2.5));
        assert_eq!(v.as_f64(), 2.5);
    }

    // ── TaskReplica ───────────────────────────────────────────────────────────

    #[test]
    fn utilization_is_cost_over_period() {
        let t = TaskReplica::new("A", Int(1), Int(4), Int(4)).unwrap();
        assert!((t.utilization() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn utilization_mixes_int_and_float_values() {
        let t = TaskReplica::new("A", Float(1.5), Int(6), Int(6)).unwrap();
        assert!((t.utilization() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = TaskReplica::new("Z", Int(1), Int(0), Int(5)).unwrap_err();
        assert_eq!(
            err,
            InputError::ZeroPeriod {
                task: "Z".to_string()
            }
        );
    }

    #[test]
    fn float_zero_period_is_rejected() {
        let err = TaskReplica::new("Z", Int(1), Float(0.0), Int(5)).unwrap_err();
        assert!(matches!(err, InputError::ZeroPeriod { .. }));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let err = TaskReplica::new("N", Int(-1), Int(4), Int(4)).unwrap_err();
        assert!(matches!(err, InputError::InvalidTiming { field: "c", .. }));
    }

    #[test]
    fn non_finite_period_is_rejected() {
        let err = TaskReplica::new("N", Int(1), Float(f64::INFINITY), Int(4)).unwrap_err();
        assert!(matches!(err, InputError::InvalidTiming { field: "p", .. }));
    }

    #[test]
    fn deadline_is_not_validated() {
        // d is carried, never evaluated; even a nonsensical value passes
        let t = TaskReplica::new("D", Int(1), Int(4), Int(-3)).unwrap();
        assert_eq!(t.deadline(), Int(-3));
    }

    #[test]
    fn to_record_drops_utilization_and_keeps_literals() {
        let t = TaskReplica::new("A", Int(1), Int(4), Float(3.5)).unwrap();
        let rec = t.to_record();
        assert_eq!(rec.name, "A");
        assert_eq!(rec.c, Int(1));
        assert_eq!(rec.p, Int(4));
        assert_eq!(rec.d, Float(3.5));

        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"name":"A","c":1,"p":4,"d":3.5}"#);
    }

    #[test]
    fn from_def_matches_new() {
        let def = TaskDef {
            name: "B".into(),
            c: Int(1),
            p: Int(2),
            d: Int(2),
        };
        let t = TaskReplica::from_def(&def).unwrap();
        assert_eq!(t, TaskReplica::new("B", Int(1), Int(2), Int(2)).unwrap());
        assert_eq!(t.to_record(), def);
    }

    #[test]
    fn task_record_ignores_extra_keys() {
        let rec: TaskRecord =
            serde_json::from_str(r#"{"name":"A","c":1,"p":4,"d":4,"id":7}"#).unwrap();
        assert_eq!(rec.p, Int(4));

        let exported = TaskReplica::from_def(&rec).unwrap().to_record();
        let json = serde_json::to_string(&exported).unwrap();
        assert_eq!(json, r#"{"name":"A","c":1,"p":4,"d":4}"#);
    }
}
