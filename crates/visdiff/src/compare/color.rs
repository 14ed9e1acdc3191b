use image::Rgba;

/// Largest value `weighted_distance` can reach: `255 * sqrt(2 + 4 + 2)`.
const MAX_WEIGHTED_DISTANCE: f64 = 721.248_916_810_278_5;

const MARK_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const MARK_GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Perceptual distance between two colors, normalized to 0.0 (same) - 1.0.
///
/// Red-weighted Euclidean distance in RGB space after
/// <https://www.compuphase.com/cmetric.htm>. Alpha is ignored; callers decide
/// what a transparent pixel means.
pub fn distance(a: &Rgba<u8>, b: &Rgba<u8>) -> f64 {
    weighted_distance(a, b) / MAX_WEIGHTED_DISTANCE
}

fn weighted_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> f64 {
    let dr = f64::from(a[0]) - f64::from(b[0]);
    let dg = f64::from(a[1]) - f64::from(b[1]);
    let db = f64::from(a[2]) - f64::from(b[2]);

    // Integer division, so the weights never leave 2/4/2 and the result
    // stays within MAX_WEIGHTED_DISTANCE.
    let r_level = (u32::from(a[0]) + u32::from(b[0])) / 2;
    let r_weight = 2.0 + f64::from(r_level / 256);
    let g_weight = 4.0;
    let b_weight = 2.0 + f64::from((255 - r_level) / 256);

    (r_weight * dr * dr + g_weight * dg * dg + b_weight * db * db).sqrt()
}

pub fn is_transparent(p: &Rgba<u8>) -> bool {
    p[3] == 0
}

/// Marker color that stands out against `p`: green on reddish pixels, red on
/// everything else.
pub fn marker_color(p: &Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = p.0;
    let max = r.max(g).max(b);
    if max - g < 30 || max == b {
        MARK_RED
    } else {
        MARK_GREEN
    }
}
