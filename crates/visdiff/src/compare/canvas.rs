use image::{Rgba, RgbaImage};

const PADDING: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Extents recorded while bringing two images onto a common canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasAdaptation {
    pub width: u32,
    pub height: u32,
    /// Reference size before padding.
    pub reference: (u32, u32),
    /// Candidate size before padding.
    pub candidate: (u32, u32),
}

impl CanvasAdaptation {
    pub fn was_resized(&self) -> bool {
        self.reference != (self.width, self.height) || self.candidate != (self.width, self.height)
    }

    /// Area covered by real content in both images.
    pub fn shared_extent(&self) -> (u32, u32) {
        (
            self.reference.0.min(self.candidate.0),
            self.reference.1.min(self.candidate.1),
        )
    }

    /// `(ref_w, ref_h, cur_w, cur_h)` when the inputs differed in size.
    pub fn dimension_mismatch(&self) -> Option<(u32, u32, u32, u32)> {
        if self.reference == self.candidate {
            None
        } else {
            Some((
                self.reference.0,
                self.reference.1,
                self.candidate.0,
                self.candidate.1,
            ))
        }
    }

    pub fn total_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Copy both images onto a canvas large enough for either, padding with fully
/// transparent pixels. Content stays anchored at the top-left corner; neither
/// image is ever cropped.
pub fn adapt(
    reference: &RgbaImage,
    candidate: &RgbaImage,
) -> (RgbaImage, RgbaImage, CanvasAdaptation) {
    let width = reference.width().max(candidate.width());
    let height = reference.height().max(candidate.height());

    let adaptation = CanvasAdaptation {
        width,
        height,
        reference: reference.dimensions(),
        candidate: candidate.dimensions(),
    };

    (
        pad_to(reference, width, height),
        pad_to(candidate, width, height),
        adaptation,
    )
}

fn pad_to(src: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    if src.dimensions() == (w, h) {
        return src.clone();
    }
    let mut canvas = RgbaImage::from_pixel(w, h, PADDING);
    image::imageops::replace(&mut canvas, src, 0, 0);
    canvas
}
