/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Synthetic task sets.
//!
//! Utilizations come from UUniFast (Bini & Buttazzo, 2005), which draws `n`
//! values uniformly from the simplex `sum = U`.  Each utilization is turned
//! into a task by picking a period from a fixed set and deriving the cost;
//! deadlines are implicit (`d = p`).

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use replica_pack::task::{TaskRecord, TimeValue};

/// Periods used when none are given on the command line.
pub const DEFAULT_PERIODS: [u32; 6] = [10, 20, 30, 40, 50, 60];

/// `n` utilizations summing to `total_util`.
///
/// Every value lies in `[0, total_util]`.  `n == 0` yields an empty vector.
pub fn uunifast<R: Rng>(n: usize, total_util: f64, rng: &mut R) -> Vec<f64> {
    let mut utilizations = Vec::with_capacity(n);
    if n == 0 {
        return utilizations;
    }

    let mut sum_u = total_util;
    for i in 1..n {
        let next_sum_u = sum_u * rng.gen::<f64>().powf(1.0 / (n - i) as f64);
        utilizations.push(sum_u - next_sum_u);
        sum_u = next_sum_u;
    }
    utilizations.push(sum_u);
    utilizations
}

/// Round to three decimals so generated files stay readable.
fn round3(v: f64) -> f64 {
    (v * 1_000.0).round() / 1_000.0
}

/// Generate `count` task records named `t0`, `t1`, … with total utilization
/// `total_util`.
///
/// # Errors
/// Rejects a non-positive or non-finite utilization and an empty or
/// zero-containing period set.
pub fn generate<R: Rng>(
    count: usize,
    total_util: f64,
    periods: &[u32],
    rng: &mut R,
) -> Result<Vec<TaskRecord>> {
    if !total_util.is_finite() || total_util <= 0.0 {
        bail!("total utilization must be a positive number, got {total_util}");
    }
    if periods.is_empty() {
        bail!("at least one period is required");
    }
    if periods.contains(&0) {
        bail!("periods must be non-zero, got {periods:?}");
    }

    uunifast(count, total_util, rng)
        .into_iter()
        .enumerate()
        .map(|(i, u)| {
            let Some(&period) = periods.choose(rng) else {
                bail!("at least one period is required");
            };
            Ok(TaskRecord {
                name: format!("t{i}"),
                c: TimeValue::Float(round3(f64::from(period) * u)),
                p: TimeValue::Int(i64::from(period)),
                d: TimeValue::Int(i64::from(period)),
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sum_matches_total_utilization() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let u: f64 = rng.gen_range(0.1..4.0);
            let utils = uunifast(10, u, &mut rng);
            let sum: f64 = utils.iter().sum();
            assert_eq!(utils.len(), 10);
            assert!((sum - u).abs() < 1e-9, "sum {sum} != {u}");
            assert!(utils.iter().all(|&x| (0.0..=u).contains(&x)));
        }
    }

    #[test]
    fn zero_tasks_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(uunifast(0, 0.9, &mut rng).is_empty());
    }

    #[test]
    fn single_task_takes_all_utilization() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uunifast(1, 0.9, &mut rng), vec![0.9]);
    }

    #[test]
    fn same_seed_same_tasks() {
        let a = generate(8, 0.9, &DEFAULT_PERIODS, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate(8, 0.9, &DEFAULT_PERIODS, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_tasks_use_the_period_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let tasks = generate(20, 2.0, &[25, 100], &mut rng).unwrap();
        assert_eq!(tasks.len(), 20);
        for (i, t) in tasks.iter().enumerate() {
            assert_eq!(t.name, format!("t{i}"));
            assert!(matches!(t.p, TimeValue::Int(25) | TimeValue::Int(100)));
            assert_eq!(t.d, t.p);
        }
    }

    #[test]
    fn generated_tasks_expand_cleanly() {
        let mut rng = StdRng::seed_from_u64(11);
        let tasks = generate(6, 1.5, &DEFAULT_PERIODS, &mut rng).unwrap();
        let replicas = replica_pack::replica::expand(&tasks, 1).unwrap();
        assert_eq!(replicas.len(), 12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(3, 0.0, &DEFAULT_PERIODS, &mut rng).is_err());
        assert!(generate(3, f64::NAN, &DEFAULT_PERIODS, &mut rng).is_err());
        assert!(generate(3, 0.9, &[], &mut rng).is_err());
        assert!(generate(3, 0.9, &[10, 0], &mut rng).is_err());
    }
}
