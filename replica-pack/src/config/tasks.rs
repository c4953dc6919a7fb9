/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task source: the file of logical task definitions.
//!
//! A JSON array (the default) or, for `.yaml` / `.yml` files, a YAML
//! sequence of `{name, c, p, d}` records:
//! ```json
//! [ { "name": "A", "c": 1, "p": 4, "d": 4 }, { "name": "B", "c": 1, "p": 2, "d": 2 } ]
//! ```
//! Only the shape is checked here.  Timing validation (zero period and
//! friends) happens during replica expansion, before any run.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::document::read_document;
use crate::task::TaskDef;

/// Read every task definition from `path`.
///
/// # Errors
/// Returns an error if the file cannot be opened, is not valid JSON/YAML, or
/// a record is missing a field or carries an unknown one.
pub fn load_tasks(path: &Path) -> Result<Vec<TaskDef>> {
    let defs: Vec<TaskDef> = read_document(path)?;

    info!(
        path = %path.display(),
        count = defs.len(),
        "task definitions loaded"
    );
    for def in &defs {
        debug!("  Task: {} | c: {} | p: {} | d: {}", def.name, def.c, def.p, def.d);
    }
    Ok(defs)
}
