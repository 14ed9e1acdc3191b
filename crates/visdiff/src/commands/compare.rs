use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use visdiff::{ImageComparison, MaskFile, codec};

use super::status_of;
use crate::config::ResolvedRunConfig;
use crate::report::terminal;

/// File arguments of `visdiff compare`.
#[derive(Debug, Clone, clap::Args)]
pub struct ComparePaths {
    /// Reference image
    #[arg(long, short = 'r')]
    pub reference: PathBuf,
    /// Candidate (screenshot) image
    #[arg(long, short = 'c')]
    pub candidate: PathBuf,
    /// Mask file [default: <candidate>.mask.png]
    #[arg(long)]
    pub mask: Option<PathBuf>,
    /// Where to write the marked candidate [default: <candidate>.marked.png]
    #[arg(long)]
    pub marked: Option<PathBuf>,
    /// Where to write the difference image [default: <candidate>.difference.png]
    #[arg(long)]
    pub difference: Option<PathBuf>,
}

impl ComparePaths {
    fn sibling(&self, suffix: &str) -> PathBuf {
        self.candidate.with_extension(suffix)
    }

    fn mask(&self) -> PathBuf {
        self.mask.clone().unwrap_or_else(|| self.sibling("mask.png"))
    }

    fn marked(&self) -> PathBuf {
        self.marked.clone().unwrap_or_else(|| self.sibling("marked.png"))
    }

    fn difference(&self) -> PathBuf {
        self.difference
            .clone()
            .unwrap_or_else(|| self.sibling("difference.png"))
    }
}

/// `visdiff compare`: compare one image pair.
/// Returns exit code: 0 = equal, 1 = different.
pub fn compare(paths: &ComparePaths, config: ResolvedRunConfig) -> Result<i32> {
    let training = config.comparison.training_mode;
    let engine = ImageComparison::new(config.comparison)?;

    let start = Instant::now();
    let reference = codec::load(&paths.reference)?;
    let candidate = codec::load(&paths.candidate)?;
    let mask_file = MaskFile::new(paths.mask());
    let stored = mask_file.load()?;

    let outcome = engine.evaluate(&reference, &candidate, stored);
    let marked = paths.marked();
    let difference = paths.difference();
    outcome
        .persist(&mask_file, &marked, Some(&difference))
        .context("Failed to write comparison outputs")?;

    let status = status_of(&outcome, training);
    terminal::print_line(&display_name(&paths.candidate), &status, start.elapsed());

    if outcome.mask_changed {
        info!(path = %mask_file.path().display(), "mask updated");
    }
    if outcome.marked_image.is_some() {
        info!(path = %marked.display(), "marked image written");
    }
    if outcome.difference_image.is_some() {
        info!(path = %difference.display(), "difference image written");
    }

    Ok(if outcome.is_match { 0 } else { 1 })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use visdiff::ComparisonConfig;

    fn resolved(comparison: ComparisonConfig) -> ResolvedRunConfig {
        ResolvedRunConfig { comparison }
    }

    #[test]
    fn default_outputs_sit_next_to_candidate() {
        let paths = ComparePaths {
            reference: "a/ref.png".into(),
            candidate: "b/shot.png".into(),
            mask: None,
            marked: Some("out/m.png".into()),
            difference: None,
        };
        assert_eq!(paths.mask(), PathBuf::from("b/shot.mask.png"));
        assert_eq!(paths.marked(), PathBuf::from("out/m.png"));
        assert_eq!(paths.difference(), PathBuf::from("b/shot.difference.png"));
    }

    #[test]
    fn exit_code_follows_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.png");
        let candidate = dir.path().join("shot.png");
        codec::save_png(&RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])), &reference).unwrap();
        codec::save_png(&RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])), &candidate).unwrap();
        let paths = ComparePaths {
            reference: reference.clone(),
            candidate: candidate.clone(),
            mask: None,
            marked: None,
            difference: None,
        };
        assert_eq!(compare(&paths, resolved(ComparisonConfig::default())).unwrap(), 0);
        assert!(!paths.marked().exists());

        let white = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        codec::save_png(&white, &candidate).unwrap();
        assert_eq!(compare(&paths, resolved(ComparisonConfig::default())).unwrap(), 1);
        assert!(paths.marked().exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ComparePaths {
            reference: dir.path().join("nope.png"),
            candidate: dir.path().join("also-nope.png"),
            mask: None,
            marked: None,
            difference: None,
        };
        assert!(compare(&paths, resolved(ComparisonConfig::default())).is_err());
    }
}
