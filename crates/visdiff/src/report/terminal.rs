use std::io::Write;
use std::time::Duration;

use super::{SnapshotStatus, Summary};

/// Clear the current terminal line (wipes progress indicator).
pub fn clear_line() {
    print!("\r\x1b[2K");
}

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// Print a single snapshot result line.
pub fn print_line(name: &str, status: &SnapshotStatus, elapsed: Duration) {
    clear_line();
    let time_suffix = format!("  \x1b[2m{}\x1b[0m", format_duration(elapsed));

    match status {
        SnapshotStatus::Pass => {
            println!("  \x1b[32mPASS\x1b[0m  {name}{time_suffix}");
        }
        SnapshotStatus::Fail {
            diff_pixels,
            score,
            dimension_mismatch,
        } => {
            if let Some((rw, rh, cw, ch)) = dimension_mismatch {
                println!(
                    "  \x1b[31mFAIL\x1b[0m  {name}  (dimensions changed: {rw}x{rh} -> {cw}x{ch}){time_suffix}"
                );
            } else {
                println!(
                    "  \x1b[31mFAIL\x1b[0m  {name}  ({diff_pixels} pixels, {score:.4}){time_suffix}"
                );
            }
        }
        SnapshotStatus::New => {
            println!("  \x1b[33m NEW\x1b[0m  {name}  (no reference){time_suffix}");
        }
        SnapshotStatus::Trained { masked_pixels } => {
            println!("  \x1b[36mTRAIN\x1b[0m {name}  ({masked_pixels} pixels masked){time_suffix}");
        }
        SnapshotStatus::Error { message } => {
            println!("  \x1b[31m ERR\x1b[0m  {name}  ({message}){time_suffix}");
        }
    }
}

/// Show comparison progress indicator.
pub fn show_progress(done: usize, total: usize) {
    if done < total {
        print!("  Comparing  [{done}/{total}]");
        let _ = std::io::stdout().flush();
    }
}

/// Print an actionable summary listing snapshot names grouped by status.
/// Only prints sections with at least one entry.
pub fn print_actionable_summary(summary: &Summary) {
    if summary.exit_code() == 0 {
        return;
    }

    clear_line();
    println!();
    println!("Actionable snapshots:");

    for (label, names) in [
        ("Failed", &summary.failed),
        ("New", &summary.new),
        ("Errored", &summary.errored),
    ] {
        if !names.is_empty() {
            println!();
            println!("  {label} ({}):", names.len());
            for name in names {
                println!("    {name}");
            }
        }
    }
}

/// Print the final summary.
pub fn print_summary(summary: &Summary, elapsed: Duration) {
    let failed = summary.failed.len();
    let new = summary.new.len();
    let errored = summary.errored.len();

    clear_line();
    println!();
    print!(
        "Snapshots:  {} total, \x1b[32m{} passed\x1b[0m, \x1b[31m{failed} failed\x1b[0m, \x1b[33m{new} new\x1b[0m",
        summary.total, summary.passed
    );
    if summary.trained > 0 {
        print!(", \x1b[36m{} trained\x1b[0m", summary.trained);
    }
    if errored > 0 {
        print!(", \x1b[31m{errored} errored\x1b[0m");
    }
    println!();
    println!("Time:       {}", format_duration(elapsed));

    if failed > 0 || new > 0 || errored > 0 {
        println!();
        if failed > 0 {
            println!("{failed} snapshot(s) have visual differences. See marked/ for details.");
        }
        if new > 0 {
            println!("{new} snapshot(s) have no reference.");
        }
        if errored > 0 {
            println!("{errored} snapshot(s) could not be compared.");
        }
        println!("Run `visdiff approve` to accept, or `visdiff test --train` to mask the changes.");
    }
}
