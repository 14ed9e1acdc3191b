use anyhow::Result;

use super::matches_filter;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    New,
    Failed,
    Pending,
}

/// `visdiff approve`: promote current snapshots to reference.
pub fn approve(
    store: &Store,
    filter: Option<&str>,
    new_only: bool,
    failed_only: bool,
    all: bool,
) -> Result<usize> {
    let (new_only, failed_only) = if all {
        (false, false)
    } else {
        (new_only, failed_only)
    };
    let ids = store.list_current_ids()?;
    if ids.is_empty() {
        println!("Nothing to approve: current/ is empty.");
        return Ok(0);
    }

    // New: no reference yet. Failed: the last run left a marked image.
    let selected: Vec<(&str, Kind)> = ids
        .iter()
        .map(|id| {
            let kind = if !store.reference_path(id).exists() {
                Kind::New
            } else if store.has_marked(id) {
                Kind::Failed
            } else {
                Kind::Pending
            };
            (id.as_str(), kind)
        })
        .filter(|(_, kind)| {
            if new_only {
                *kind == Kind::New
            } else if failed_only {
                *kind == Kind::Failed
            } else {
                true
            }
        })
        .filter(|(id, _)| matches_filter(id, filter))
        .collect();

    if selected.is_empty() {
        println!("No snapshots matched the given filters.");
        return Ok(0);
    }

    let mut count_new = 0usize;
    let mut count_failed = 0usize;

    for (id, kind) in &selected {
        store.approve(id)?;
        let label = match kind {
            Kind::Failed => {
                count_failed += 1;
                "\x1b[31mFAIL\x1b[0m"
            }
            Kind::New => {
                count_new += 1;
                "\x1b[33m NEW\x1b[0m"
            }
            Kind::Pending => "    ",
        };
        println!("  Approved  {label}  {id}");
    }

    let total = selected.len();
    println!();
    println!("{total} snapshot(s) approved ({count_new} new, {count_failed} failed).");

    Ok(total)
}
