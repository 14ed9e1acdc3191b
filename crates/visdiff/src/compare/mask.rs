use image::{Rgba, RgbaImage};
use tracing::debug;

use super::morphology;

/// Mask color for pixels excluded from comparison.
pub const INACTIVE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fill color of a freshly created mask. Anything but `INACTIVE` is active.
pub const ACTIVE: Rgba<u8> = Rgba([255, 255, 255, 0]);

pub fn is_inactive(p: &Rgba<u8>) -> bool {
    *p == INACTIVE
}

/// Per-pixel inclusion map with the same dimensions as the comparison canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    image: RgbaImage,
}

impl Mask {
    /// An all-active mask.
    pub fn fresh(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, ACTIVE),
        }
    }

    /// Reuse `stored` when it matches the canvas size, otherwise start over
    /// with a fresh mask.
    pub fn initialize(width: u32, height: u32, stored: Option<RgbaImage>) -> Self {
        match stored {
            Some(image) if image.dimensions() == (width, height) => Self { image },
            Some(image) => {
                debug!(
                    stored_w = image.width(),
                    stored_h = image.height(),
                    width,
                    height,
                    "stored mask does not fit canvas, starting fresh"
                );
                Self::fresh(width, height)
            }
            None => Self::fresh(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_active(&self, x: u32, y: u32) -> bool {
        !is_inactive(self.image.get_pixel(x, y))
    }

    pub fn inactive_pixels(&self) -> u64 {
        self.image.pixels().filter(|p| is_inactive(p)).count() as u64
    }

    /// Paint every inactive mask pixel black in `img`. Applied to both working
    /// copies, it makes them identical wherever the mask is inactive.
    pub fn overlay(&self, img: &mut RgbaImage) {
        for (dst, m) in img.pixels_mut().zip(self.image.pixels()) {
            if is_inactive(m) {
                *dst = INACTIVE;
            }
        }
    }

    /// Exclude a `block_w x block_h` rectangle around each coordinate. The
    /// rectangle starts half a block up and left of the pixel, clamped to the
    /// canvas.
    pub fn mutate(&mut self, coords: &[(u32, u32)], block_w: u32, block_h: u32) {
        let (w, h) = self.image.dimensions();
        for &(x, y) in coords {
            let x0 = x.saturating_sub(block_w / 2);
            let y0 = y.saturating_sub(block_h / 2);
            let x1 = x0.saturating_add(block_w).min(w);
            let y1 = y0.saturating_add(block_h).min(h);
            for py in y0..y1 {
                for px in x0..x1 {
                    self.image.put_pixel(px, py, INACTIVE);
                }
            }
        }
    }

    /// Morphological closing of the inactive area: gaps narrower than the
    /// structuring element between excluded regions become excluded too.
    pub fn close(&mut self, element_w: u32, element_h: u32) {
        let (w, h) = self.image.dimensions();
        let inactive: Vec<bool> = self.image.pixels().map(is_inactive).collect();
        let closed = morphology::close(&inactive, w, h, element_w, element_h);
        for (p, (&now, &before)) in self.image.pixels_mut().zip(closed.iter().zip(&inactive)) {
            if now && !before {
                *p = INACTIVE;
            }
        }
    }
}
