use std::path::Path;
use std::time::Instant;

use image::RgbaImage;
use tracing::debug;

use super::mask::Mask;
use super::settings::ComparisonConfig;
use super::{algorithm, annotate, canvas};
use crate::codec::{self, MaskFile};
use crate::error::{ConfigError, Result};

/// Comparison engine for one set of settings. Holds no per-call state, so a
/// single instance can serve any number of comparisons.
#[derive(Debug, Clone)]
pub struct ImageComparison {
    config: ComparisonConfig,
}

/// Everything one comparison produced, before anything is written to disk.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub is_match: bool,
    /// Pixels reported by the algorithm (padding alone does not count).
    pub diff_pixels: u64,
    pub total_pixels: u64,
    /// `diff_pixels / total_pixels`.
    pub score: f64,
    /// `Some((ref_w, ref_h, cur_w, cur_h))` when images have different dimensions.
    pub dimension_mismatch: Option<(u32, u32, u32, u32)>,
    pub mask: Mask,
    /// The mask was trained or closed and should be stored.
    pub mask_changed: bool,
    /// Candidate with differences marked. Only set when `is_match` is false.
    pub marked_image: Option<RgbaImage>,
    /// Grayscale difference image. Only set when `is_match` is false and the
    /// engine is configured to produce one.
    pub difference_image: Option<RgbaImage>,
}

impl ImageComparison {
    pub fn new(config: ComparisonConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compare `candidate` against `reference`, reading and updating the mask
    /// in `mask_file`. Outputs are only written when the images differ.
    ///
    /// Returns `true` when the images are equal within tolerance.
    pub fn compare(
        &self,
        reference: &RgbaImage,
        candidate: &RgbaImage,
        mask_file: &MaskFile,
        marked_path: &Path,
        difference_path: Option<&Path>,
    ) -> Result<bool> {
        let stored = mask_file.load()?;
        let outcome = self.evaluate(reference, candidate, stored);
        outcome.persist(mask_file, marked_path, difference_path)?;
        Ok(outcome.is_match)
    }

    /// In-memory comparison. `stored_mask` is the previously persisted mask, if
    /// any; it is ignored when its size does not match the canvas.
    pub fn evaluate(
        &self,
        reference: &RgbaImage,
        candidate: &RgbaImage,
        stored_mask: Option<RgbaImage>,
    ) -> ComparisonOutcome {
        let config = &self.config;

        let (mut working_ref, adapted_candidate, adaptation) = canvas::adapt(reference, candidate);
        let mut working_cur = adapted_candidate.clone();

        let mut mask = Mask::initialize(adaptation.width, adaptation.height, stored_mask);
        mask.overlay(&mut working_ref);
        mask.overlay(&mut working_cur);

        let diffs = algorithm::find_differences(config, &working_ref, &working_cur);
        let diff_pixels = diffs.as_ref().map_or(0, |d| d.len() as u64);
        debug!(
            algorithm = %config.algorithm,
            diff_pixels,
            width = adaptation.width,
            height = adaptation.height,
            "comparison finished"
        );

        let mut is_match = true;
        let mut mask_changed = false;
        let mut marked_image = None;
        let mut difference_image = None;

        if let Some(diffs) = &diffs {
            if config.training_mode {
                let t = Instant::now();
                mask.mutate(
                    diffs.coords(),
                    config.marking_block_width,
                    config.marking_block_height,
                );
                mask_changed = true;
                debug!(
                    elapsed_ms = t.elapsed().as_millis() as u64,
                    "trained differences into mask"
                );
            } else {
                if config.difference_image {
                    difference_image = Some(annotate::difference_image(
                        &working_ref,
                        &working_cur,
                        Some(diffs),
                        config.transparency,
                    ));
                }
                let mut marked = adapted_candidate.clone();
                annotate::mark_differences(
                    &mut marked,
                    diffs,
                    config.marking_block_width,
                    config.marking_block_height,
                );
                marked_image = Some(marked);
                is_match = false;
            }
        }

        if config.close_mask {
            mask.close(
                config.structuring_element_width,
                config.structuring_element_height,
            );
            mask_changed = true;
        }

        if !config.training_mode && adaptation.was_resized() {
            debug!(
                reference_w = adaptation.reference.0,
                reference_h = adaptation.reference.1,
                candidate_w = adaptation.candidate.0,
                candidate_h = adaptation.candidate.1,
                "dimension mismatch, marking padded area"
            );
            let marked = marked_image.get_or_insert_with(|| adapted_candidate.clone());
            annotate::mark_missing_area(marked, &adaptation);
            if config.difference_image {
                let difference = difference_image.get_or_insert_with(|| {
                    annotate::difference_image(
                        &working_ref,
                        &working_cur,
                        None,
                        config.transparency,
                    )
                });
                annotate::mark_missing_area(difference, &adaptation);
            }
            is_match = false;
        }

        let total_pixels = adaptation.total_pixels();
        let score = if total_pixels > 0 {
            diff_pixels as f64 / total_pixels as f64
        } else {
            0.0
        };

        ComparisonOutcome {
            is_match,
            diff_pixels,
            total_pixels,
            score,
            dimension_mismatch: adaptation.dimension_mismatch(),
            mask,
            mask_changed,
            marked_image,
            difference_image,
        }
    }
}

impl ComparisonOutcome {
    pub fn inactive_pixels(&self) -> u64 {
        self.mask.inactive_pixels()
    }

    /// Write the mask if it changed, and the marked and difference images if
    /// they were produced.
    pub fn persist(
        &self,
        mask_file: &MaskFile,
        marked_path: &Path,
        difference_path: Option<&Path>,
    ) -> Result<()> {
        if self.mask_changed {
            mask_file.store(&self.mask)?;
        }
        if let Some(marked) = &self.marked_image {
            codec::save_png(marked, marked_path)?;
        }
        if let (Some(difference), Some(path)) = (&self.difference_image, difference_path) {
            codec::save_png(difference, path)?;
        }
        Ok(())
    }
}
