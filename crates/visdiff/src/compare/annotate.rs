use image::{Rgba, RgbaImage};

use super::algorithm::pixel_distance;
use super::canvas::CanvasAdaptation;
use super::color::marker_color;
use super::settings::TransparencyMode;
use super::{DifferenceSet, block_count, block_span};

const NO_DIFFERENCE: Rgba<u8> = Rgba([0, 0, 0, 255]);
const MISSING_AREA: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Mark differences on `img`.
///
/// With a 1x1 marking block each differing pixel is recolored; otherwise the
/// marking block around a difference gets a one-pixel outline, drawn once per
/// block.
pub fn mark_differences(img: &mut RgbaImage, diffs: &DifferenceSet, block_w: u32, block_h: u32) {
    if block_w == 1 && block_h == 1 {
        for &(x, y) in diffs.coords() {
            mark_pixel(img, x, y);
        }
        return;
    }

    let (w, h) = img.dimensions();
    let blocks_x = block_count(block_w, w);
    let blocks_y = block_count(block_h, h);
    let mut outlined = vec![false; (blocks_x * blocks_y) as usize];

    for &(x, y) in diffs.coords() {
        let (bx, by) = (x / block_w, y / block_h);
        let slot = (by * blocks_x + bx) as usize;
        if outlined[slot] {
            continue;
        }
        outlined[slot] = true;
        let span_w = block_span(block_w, bx, w);
        let span_h = block_span(block_h, by, h);
        outline(img, bx * block_w, by * block_h, span_w, span_h);
    }
}

fn outline(img: &mut RgbaImage, x0: u32, y0: u32, span_w: u32, span_h: u32) {
    let right = x0 + span_w - 1;
    let bottom = y0 + span_h - 1;

    for x in x0..=right {
        mark_pixel(img, x, y0);
        if bottom != y0 {
            mark_pixel(img, x, bottom);
        }
    }
    for y in (y0 + 1)..bottom {
        mark_pixel(img, x0, y);
        if right != x0 {
            mark_pixel(img, right, y);
        }
    }
}

fn mark_pixel(img: &mut RgbaImage, x: u32, y: u32) {
    let marker = marker_color(img.get_pixel(x, y));
    img.put_pixel(x, y, marker);
}

/// Grayscale rendering of how far apart each differing pixel is; black where
/// nothing differs.
pub fn difference_image(
    reference: &RgbaImage,
    candidate: &RgbaImage,
    diffs: Option<&DifferenceSet>,
    transparency: TransparencyMode,
) -> RgbaImage {
    let (w, h) = reference.dimensions();
    let mut out = RgbaImage::from_pixel(w, h, NO_DIFFERENCE);
    for &(x, y) in diffs.map(DifferenceSet::coords).unwrap_or_default() {
        let d = pixel_distance(reference.get_pixel(x, y), candidate.get_pixel(x, y), transparency);
        let level = (255.0 * d).round().clamp(0.0, 255.0) as u8;
        out.put_pixel(x, y, Rgba([level, level, level, 255]));
    }
    out
}

/// Blank out the area that only exists because of canvas padding: everything
/// right of or below the extent both source images share.
pub fn mark_missing_area(img: &mut RgbaImage, adaptation: &CanvasAdaptation) {
    let (shared_w, shared_h) = adaptation.shared_extent();
    let (w, h) = img.dimensions();
    for y in 0..h {
        for x in 0..w {
            if x >= shared_w || y >= shared_h {
                img.put_pixel(x, y, MISSING_AREA);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn diffs(coords: &[(u32, u32)]) -> DifferenceSet {
        let mut set = DifferenceSet::default();
        for &(x, y) in coords {
            set.push(x, y);
        }
        set
    }

    fn count(img: &RgbaImage, color: Rgba<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn single_pixel_marking() {
        let mut img = RgbaImage::from_pixel(5, 5, WHITE);
        mark_differences(&mut img, &diffs(&[(1, 1), (4, 0)]), 1, 1);
        assert_eq!(*img.get_pixel(1, 1), RED);
        assert_eq!(*img.get_pixel(4, 0), RED);
        assert_eq!(count(&img, RED), 2);
    }

    #[test]
    fn block_is_outlined_once() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        // Three differences in the same 10x10 block.
        mark_differences(&mut img, &diffs(&[(12, 12), (13, 14), (19, 19)]), 10, 10);
        // Perimeter of a 10x10 square.
        assert_eq!(count(&img, RED), 36);
        assert_eq!(*img.get_pixel(10, 10), RED);
        assert_eq!(*img.get_pixel(19, 10), RED);
        assert_eq!(*img.get_pixel(10, 19), RED);
        assert_eq!(*img.get_pixel(15, 15), WHITE);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
    }

    #[test]
    fn edge_block_outline_is_clipped() {
        let mut img = RgbaImage::from_pixel(25, 25, WHITE);
        mark_differences(&mut img, &diffs(&[(22, 22)]), 10, 10);
        // Clipped block is 5x5: perimeter of 16 pixels.
        assert_eq!(count(&img, RED), 16);
        assert_eq!(*img.get_pixel(24, 24), RED);
        assert_eq!(*img.get_pixel(20, 20), RED);
    }

    #[test]
    fn thin_blocks_are_marked_once_per_pixel() {
        // A 1 px tall clipped block must not be recolored twice.
        let mut img = RgbaImage::from_pixel(4, 11, WHITE);
        mark_differences(&mut img, &diffs(&[(1, 10)]), 4, 5);
        assert_eq!(count(&img, RED), 4);
    }

    #[test]
    fn difference_image_grays_by_distance() {
        let a = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 255]));
        let mut b = a.clone();
        b.put_pixel(0, 0, WHITE);
        b.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let out = difference_image(
            &a,
            &b,
            Some(&diffs(&[(0, 0), (1, 0)])),
            TransparencyMode::ForceDifference,
        );
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*out.get_pixel(2, 0), NO_DIFFERENCE);
    }

    #[test]
    fn difference_image_without_differences_is_black() {
        let a = RgbaImage::from_pixel(3, 3, WHITE);
        let out = difference_image(&a, &a, None, TransparencyMode::ForceDifference);
        assert_eq!(count(&out, NO_DIFFERENCE), 9);
    }

    #[test]
    fn missing_area_is_cleared() {
        let adaptation = CanvasAdaptation {
            width: 10,
            height: 8,
            reference: (10, 4),
            candidate: (6, 8),
        };
        let mut img = RgbaImage::from_pixel(10, 8, WHITE);
        mark_missing_area(&mut img, &adaptation);
        assert_eq!(*img.get_pixel(5, 3), WHITE);
        assert_eq!(*img.get_pixel(6, 0), MISSING_AREA);
        assert_eq!(*img.get_pixel(0, 4), MISSING_AREA);
        assert_eq!(count(&img, WHITE), 6 * 4);
    }
}
