/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! JSON / YAML file helpers shared by the task source, the run
//! configuration and the schedule exporter.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

// ── File format ───────────────────────────────────────────────────────────────

/// Serialisation format, picked from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` / `.yml` (any case) → YAML, everything else → JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

/// Serialise `value` to `path` in the format implied by its extension,
/// creating the parent directory if needed.
pub fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory: {}", dir.display()))?;
    }

    let mut bytes = match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed to encode JSON for: {}", path.display()))?,
        FileFormat::Yaml => serde_yaml::to_string(value)
            .with_context(|| format!("Failed to encode YAML for: {}", path.display()))?
            .into_bytes(),
    };
    if bytes.last() != Some(&b'\n') {
        bytes.push(b'\n');
    }

    let mut file = fs::File::create(path)
        .with_context(|| format!("Cannot create file: {}", path.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("Cannot write file: {}", path.display()))?;
    Ok(())
}

/// Parse `path` in the format implied by its extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot open file: {}", path.display()))?;
    match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", path.display())),
        FileFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display())),
    }
}
