/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Replica expansion.
//!
//! Turns each logical task into `k + 1` identical replicas and produces the
//! single decreasing-utilization sequence that every heuristic consumes.
//! Heuristics differ only in which processor they pick, never in the order
//! replicas are visited.

use tracing::debug;

use crate::scheduler::InputError;
use crate::task::{TaskDef, TaskReplica};

/// Validate every definition, then expand each into `replicas + 1` copies
/// and sort the whole sequence by utilization, largest first.
///
/// The sort is stable: replicas of equal utilization keep their input order
/// (all copies of one task stay adjacent, tasks in file order).
///
/// # Errors
/// Returns the [`InputError`] of the first malformed definition, or
/// [`InputError::ReplicationOverflow`] when the expanded sequence is too
/// large to count or allocate.  No replica is produced in either case.
pub fn expand(defs: &[TaskDef], replicas: usize) -> Result<Vec<TaskReplica>, InputError> {
    let validated = defs
        .iter()
        .map(TaskReplica::from_def)
        .collect::<Result<Vec<_>, _>>()?;

    let overflow = || InputError::ReplicationOverflow {
        replicas,
        tasks: validated.len(),
    };
    let copies = replicas.checked_add(1).ok_or_else(overflow)?;
    let total = validated.len().checked_mul(copies).ok_or_else(overflow)?;

    let mut out: Vec<TaskReplica> = Vec::new();
    out.try_reserve_exact(total).map_err(|_| overflow())?;
    for task in validated {
        out.extend(std::iter::repeat(task).take(copies));
    }

    out.sort_by(|a, b| b.utilization().total_cmp(&a.utilization()));

    debug!(
        tasks = defs.len(),
        copies = copies,
        total = out.len(),
        "replicas expanded"
    );
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TimeValue::Int;

    fn def(name: &str, c: i64, p: i64) -> TaskDef {
        TaskDef {
            name: name.into(),
            c: Int(c),
            p: Int(p),
            d: Int(p),
        }
    }

    fn names(replicas: &[TaskReplica]) -> Vec<&str> {
        replicas.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn zero_replication_keeps_one_instance() {
        let out = expand(&[def("A", 1, 4), def("B", 1, 2)], 0).unwrap();
        assert_eq!(names(&out), vec!["B", "A"]);
    }

    #[test]
    fn each_task_gets_k_plus_one_copies_sorted_descending() {
        let out = expand(&[def("A", 1, 4), def("B", 1, 2)], 1).unwrap();
        assert_eq!(names(&out), vec!["B", "B", "A", "A"]);
        assert!(out
            .windows(2)
            .all(|w| w[0].utilization() >= w[1].utilization()));
    }

    #[test]
    fn equal_utilization_keeps_input_order() {
        let out = expand(&[def("X", 1, 4), def("Y", 2, 8), def("Z", 1, 4)], 1).unwrap();
        assert_eq!(names(&out), vec!["X", "X", "Y", "Y", "Z", "Z"]);
    }

    #[test]
    fn total_count_is_tasks_times_copies() {
        let defs = [def("A", 1, 10), def("B", 2, 10), def("C", 3, 10)];
        assert_eq!(expand(&defs, 4).unwrap().len(), 15);
    }

    #[test]
    fn empty_input_expands_to_nothing() {
        assert!(expand(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn replication_factor_overflow_is_rejected() {
        for (defs, k) in [
            (vec![def("A", 1, 4)], usize::MAX),
            (vec![def("A", 1, 4), def("B", 1, 2)], usize::MAX / 2 + 1),
            (vec![def("A", 1, 4)], usize::MAX / 2),
        ] {
            let err = expand(&defs, k).unwrap_err();
            assert_eq!(
                err,
                InputError::ReplicationOverflow {
                    replicas: k,
                    tasks: defs.len()
                }
            );
        }
    }

    #[test]
    fn zero_period_aborts_expansion() {
        let err = expand(&[def("A", 1, 4), def("bad", 1, 0)], 2).unwrap_err();
        assert_eq!(
            err,
            InputError::ZeroPeriod {
                task: "bad".into()
            }
        );
    }
}
