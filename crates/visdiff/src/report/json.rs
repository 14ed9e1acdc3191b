use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{SnapshotStatus, Summary};

#[derive(Debug, Serialize)]
pub struct SnapshotEntry {
    pub id: String,
    #[serde(flatten)]
    pub status: SnapshotStatus,
    pub elapsed_ms: u64,
}

/// Machine-readable record of a `visdiff test` run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub algorithm: String,
    pub training: bool,
    pub summary: &'a Summary,
    pub snapshots: &'a [SnapshotEntry],
}

pub fn write(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
