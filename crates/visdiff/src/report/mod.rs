pub mod json;
pub mod terminal;

use serde::Serialize;

/// Result of one snapshot in a `visdiff test` run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnapshotStatus {
    Pass,
    Fail {
        diff_pixels: u64,
        score: f64,
        dimension_mismatch: Option<(u32, u32, u32, u32)>,
    },
    /// No reference exists yet.
    New,
    /// Training run: differences were learned into the mask.
    Trained { masked_pixels: u64 },
    Error { message: String },
}

/// Running totals of a test run, with the names behind each actionable count.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub trained: usize,
    pub failed: Vec<String>,
    pub new: Vec<String>,
    pub errored: Vec<String>,
}

impl Summary {
    pub fn record(&mut self, name: &str, status: &SnapshotStatus) {
        self.total += 1;
        match status {
            SnapshotStatus::Pass => self.passed += 1,
            SnapshotStatus::Trained { .. } => self.trained += 1,
            SnapshotStatus::Fail { .. } => self.failed.push(name.to_owned()),
            SnapshotStatus::New => self.new.push(name.to_owned()),
            SnapshotStatus::Error { .. } => self.errored.push(name.to_owned()),
        }
    }

    /// Failures, new snapshots and errors make the run fail.
    pub fn exit_code(&self) -> i32 {
        if self.failed.is_empty() && self.new.is_empty() && self.errored.is_empty() {
            0
        } else {
            1
        }
    }
}
