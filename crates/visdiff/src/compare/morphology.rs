//! Binary closing with a rectangular structuring element.
//!
//! Both passes are separable: a `w x h` rectangle is applied as a horizontal
//! run of `w` followed by a vertical run of `h`. Each run is evaluated with
//! prefix sums, so the cost does not depend on the element size.

/// Dilation followed by erosion of `set` (row-major, `width * height`).
///
/// Out-of-canvas pixels count as unset for the dilation and as set for the
/// erosion, which keeps the result a superset of the input. An element with a
/// zero side leaves `set` unchanged.
pub fn close(set: &[bool], width: u32, height: u32, element_w: u32, element_h: u32) -> Vec<bool> {
    if element_w == 0 || element_h == 0 {
        return set.to_vec();
    }
    let (w, h) = (width as usize, height as usize);
    let (ew, eh) = (element_w as usize, element_h as usize);
    // Anchor at the element center; erosion uses the reflected element.
    let (ax, ay) = (ew / 2, eh / 2);

    let dilated = sweep(set, w, h, Axis::Row, ew - 1 - ax, ax, Op::Dilate);
    let dilated = sweep(&dilated, w, h, Axis::Column, eh - 1 - ay, ay, Op::Dilate);
    let eroded = sweep(&dilated, w, h, Axis::Row, ax, ew - 1 - ax, Op::Erode);
    let mut closed = sweep(&eroded, w, h, Axis::Column, ay, eh - 1 - ay, Op::Erode);

    for (out, &orig) in closed.iter_mut().zip(set) {
        *out |= orig;
    }
    closed
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Column,
}

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

/// One-dimensional pass: each pixel looks at the window `[i - before, i + after]`
/// along `axis`, clipped to the canvas.
fn sweep(
    src: &[bool],
    w: usize,
    h: usize,
    axis: Axis,
    before: usize,
    after: usize,
    op: Op,
) -> Vec<bool> {
    let mut out = vec![false; src.len()];
    let (lines, len) = match axis {
        Axis::Row => (h, w),
        Axis::Column => (w, h),
    };
    let index = |line: usize, i: usize| match axis {
        Axis::Row => line * w + i,
        Axis::Column => i * w + line,
    };

    let mut prefix = vec![0usize; len + 1];
    for line in 0..lines {
        for i in 0..len {
            prefix[i + 1] = prefix[i] + usize::from(src[index(line, i)]);
        }
        for i in 0..len {
            let lo = i.saturating_sub(before);
            let hi = (i + after).min(len - 1);
            let count = prefix[hi + 1] - prefix[lo];
            out[index(line, i)] = match op {
                Op::Dilate => count > 0,
                Op::Erode => count == hi + 1 - lo,
            };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_set(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> Vec<bool> {
        let mut set = vec![false; (w * h) as usize];
        for &(x0, y0, x1, y1) in rects {
            for y in y0..y1 {
                for x in x0..x1 {
                    set[(y * w + x) as usize] = true;
                }
            }
        }
        set
    }

    fn at(set: &[bool], w: u32, x: u32, y: u32) -> bool {
        set[(y * w + x) as usize]
    }

    #[test]
    fn zero_element_is_noop() {
        let set = rect_set(20, 20, &[(2, 2, 5, 5), (9, 9, 12, 12)]);
        assert_eq!(close(&set, 20, 20, 0, 0), set);
        assert_eq!(close(&set, 20, 20, 0, 7), set);
    }

    #[test]
    fn unit_element_is_noop() {
        let set = rect_set(20, 20, &[(2, 2, 5, 5), (9, 9, 12, 12)]);
        assert_eq!(close(&set, 20, 20, 1, 1), set);
    }

    #[test]
    fn narrow_gap_is_bridged() {
        // Two 10x10 blocks with a 5 px horizontal gap.
        let set = rect_set(60, 40, &[(10, 15, 20, 25), (25, 15, 35, 25)]);
        let closed = close(&set, 60, 40, 10, 10);
        let expected = rect_set(60, 40, &[(10, 15, 35, 25)]);
        assert_eq!(closed, expected);
    }

    #[test]
    fn wide_gap_is_kept() {
        let set = rect_set(80, 40, &[(10, 15, 20, 25), (45, 15, 55, 25)]);
        let closed = close(&set, 80, 40, 10, 10);
        assert!(!at(&closed, 80, 32, 20));
        assert_eq!(closed, set);
    }

    #[test]
    fn result_is_superset_of_input() {
        let set = rect_set(30, 30, &[(0, 0, 3, 3), (27, 27, 30, 30), (14, 2, 15, 28)]);
        let closed = close(&set, 30, 30, 6, 4);
        assert_eq!(closed.len(), set.len());
        for (c, s) in closed.iter().zip(&set) {
            assert!(*c || !*s);
        }
    }

    #[test]
    fn far_pixels_stay_unset() {
        let set = rect_set(60, 40, &[(10, 15, 20, 25), (25, 15, 35, 25)]);
        let closed = close(&set, 60, 40, 10, 10);
        assert!(!at(&closed, 60, 22, 10));
        assert!(!at(&closed, 60, 50, 20));
    }
}
