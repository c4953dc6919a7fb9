/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! replica-pack – replicated periodic task allocator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – task replica model, {name, c, p, d} records
//! ├── processor     – allocation target, utilization accumulator
//! ├── replica       – k+1 expansion, decreasing-utilization order
//! ├── scheduler/    – candidate filter, first/worst/best-fit, run driver
//! ├── export        – per-heuristic schedule files
//! ├── document      – JSON / YAML file helpers
//! └── config/       – run parameters, YAML run config, task source
//! ```

pub mod config;
pub mod document;
pub mod export;
pub mod processor;
pub mod replica;
pub mod scheduler;
pub mod task;
