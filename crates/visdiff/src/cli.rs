use clap::{Parser, Subcommand};

use crate::commands::ComparePaths;
use crate::config::CompareSettings;

#[derive(Parser)]
#[command(
    name = "visdiff",
    about = "Mask-aware visual regression comparison for screenshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .visdiff/config.toml with default settings
    Init {
        /// Overwrite existing config and gitignore
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare a single image pair (exit 0 equal, 1 different)
    Compare {
        #[command(flatten)]
        paths: ComparePaths,
        /// Learn differences into the mask instead of reporting them
        #[arg(long)]
        train: bool,
        #[command(flatten)]
        settings: CompareSettings,
    },

    /// Compare every current/ snapshot against reference/ (exit 0/1)
    Test {
        /// Only compare snapshots whose id contains PATTERN (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Learn differences into the per-snapshot masks instead of failing
        #[arg(long)]
        train: bool,
        /// Also write .visdiff/report.json
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        settings: CompareSettings,
    },

    /// Promote current/ snapshots to reference/
    Approve {
        /// Only approve snapshots whose id contains PATTERN (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Only approve new snapshots (no prior reference)
        #[arg(long)]
        new: bool,
        /// Only approve failed snapshots (have a marked image)
        #[arg(long)]
        failed: bool,
        /// Approve all pending snapshots (default when no kind flags)
        #[arg(long)]
        all: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use visdiff::Algorithm;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compare_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "visdiff",
            "compare",
            "--reference",
            "a.png",
            "--candidate",
            "b.png",
            "--algorithm",
            "color-fuzzy",
            "--close-mask",
            "--color-tolerance",
            "0.05",
        ])
        .unwrap();
        let Command::Compare {
            paths,
            train,
            settings,
        } = cli.command
        else {
            panic!("expected compare");
        };
        assert_eq!(paths.reference.to_str(), Some("a.png"));
        assert!(!train);
        assert_eq!(settings.algorithm, Some(Algorithm::ColorFuzzy));
        assert_eq!(settings.close_mask, Some(true));
        assert_eq!(settings.color_tolerance, Some(0.05));
    }

    #[test]
    fn out_of_range_tolerance_is_rejected() {
        assert!(
            Cli::try_parse_from(["visdiff", "test", "--pixel-tolerance", "1.5"]).is_err()
        );
    }
}
