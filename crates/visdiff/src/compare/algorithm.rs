use image::{Rgba, RgbaImage};

use super::color;
use super::settings::{Algorithm, ComparisonConfig, TransparencyMode};
use super::{DifferenceSet, block_count, block_span};

/// Run the configured algorithm over two images of identical size.
///
/// Returns `None` when the images are equal under that algorithm.
pub fn find_differences(
    config: &ComparisonConfig,
    reference: &RgbaImage,
    candidate: &RgbaImage,
) -> Option<DifferenceSet> {
    debug_assert_eq!(reference.dimensions(), candidate.dimensions());
    match config.algorithm {
        Algorithm::Exact => exact(reference, candidate, config.transparency),
        Algorithm::ColorFuzzy => color_fuzzy(reference, candidate, config),
        Algorithm::BlockFuzzy => block_fuzzy(reference, candidate, config),
    }
}

/// Distance used by the fuzzy algorithms and the difference image.
pub fn pixel_distance(a: &Rgba<u8>, b: &Rgba<u8>, transparency: TransparencyMode) -> f64 {
    match transparency {
        TransparencyMode::ForceDifference
            if color::is_transparent(a) || color::is_transparent(b) =>
        {
            1.0
        }
        _ => color::distance(a, b),
    }
}

fn exact(
    reference: &RgbaImage,
    candidate: &RgbaImage,
    transparency: TransparencyMode,
) -> Option<DifferenceSet> {
    let (w, h) = reference.dimensions();
    let mut diffs = DifferenceSet::default();
    for x in 0..w {
        for y in 0..h {
            let a = reference.get_pixel(x, y);
            let b = candidate.get_pixel(x, y);
            let differs = match transparency {
                TransparencyMode::ForceDifference => {
                    a != b || color::is_transparent(a) || color::is_transparent(b)
                }
                TransparencyMode::CompareChannels => a != b,
            };
            if differs {
                diffs.push(x, y);
            }
        }
    }
    diffs.non_empty()
}

fn color_fuzzy(
    reference: &RgbaImage,
    candidate: &RgbaImage,
    config: &ComparisonConfig,
) -> Option<DifferenceSet> {
    let (w, h) = reference.dimensions();
    let mut diffs = DifferenceSet::default();
    for x in 0..w {
        for y in 0..h {
            let d = pixel_distance(
                reference.get_pixel(x, y),
                candidate.get_pixel(x, y),
                config.transparency,
            );
            if d > config.color_tolerance {
                diffs.push(x, y);
            }
        }
    }
    diffs.non_empty()
}

fn block_fuzzy(
    reference: &RgbaImage,
    candidate: &RgbaImage,
    config: &ComparisonConfig,
) -> Option<DifferenceSet> {
    let (w, h) = reference.dimensions();
    let block = config.pixel_per_block;
    let mut diffs = DifferenceSet::default();
    let mut in_block: Vec<(u32, u32)> = Vec::new();

    for bx in 0..block_count(block, w) {
        for by in 0..block_count(block, h) {
            let span_w = block_span(block, bx, w);
            let span_h = block_span(block, by, h);
            let allowed = allowed_differences(span_w, span_h, config.pixel_tolerance);

            in_block.clear();
            for dx in 0..span_w {
                for dy in 0..span_h {
                    let x = bx * block + dx;
                    let y = by * block + dy;
                    let d = pixel_distance(
                        reference.get_pixel(x, y),
                        candidate.get_pixel(x, y),
                        config.transparency,
                    );
                    if d > config.color_tolerance {
                        in_block.push((x, y));
                    }
                }
            }

            if in_block.len() as u64 > allowed {
                diffs.extend_from_slice(&in_block);
            }
        }
    }
    diffs.non_empty()
}

/// `floor(block pixels * tolerance)`.
fn allowed_differences(span_w: u32, span_h: u32, pixel_tolerance: f64) -> u64 {
    let pixels = u64::from(span_w) * u64::from(span_h);
    (pixels as f64 * pixel_tolerance).floor() as u64
}
