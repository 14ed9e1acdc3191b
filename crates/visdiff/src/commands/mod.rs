mod approve;
mod compare;
mod init;

use visdiff::ComparisonOutcome;

use crate::report::SnapshotStatus;

pub use self::approve::approve;
pub use self::compare::{ComparePaths, compare};
pub use self::init::init;
pub use self::test::test;

/// Lowercase and treat `_` like a space, so terminal output and raw ids both
/// work as filter patterns.
fn normalize_for_filter(s: &str) -> String {
    s.to_lowercase().replace('_', " ")
}

/// Case-insensitive substring match of a snapshot id against an optional
/// pattern. A trailing `.png` on the pattern is ignored.
pub(crate) fn matches_filter(id: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|pat| {
        let pat = pat.strip_suffix(".png").unwrap_or(pat);
        normalize_for_filter(id).contains(&normalize_for_filter(pat))
    })
}

pub(crate) fn status_of(outcome: &ComparisonOutcome, training: bool) -> SnapshotStatus {
    if training {
        if outcome.diff_pixels > 0 {
            SnapshotStatus::Trained {
                masked_pixels: outcome.inactive_pixels(),
            }
        } else {
            SnapshotStatus::Pass
        }
    } else if outcome.is_match {
        SnapshotStatus::Pass
    } else {
        SnapshotStatus::Fail {
            diff_pixels: outcome.diff_pixels,
            score: outcome.score,
            dimension_mismatch: outcome.dimension_mismatch,
        }
    }
}
