pub mod algorithm;
pub mod annotate;
pub mod canvas;
pub mod color;
pub mod diff;
pub mod mask;
pub mod morphology;
pub mod settings;

/// Pixel coordinates found to differ, in the order the algorithm visited them.
///
/// An algorithm that finds nothing returns `None` instead of an empty set, so a
/// `DifferenceSet` in hand always means "not equal".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifferenceSet {
    coords: Vec<(u32, u32)>,
}

impl DifferenceSet {
    pub(crate) fn push(&mut self, x: u32, y: u32) {
        self.coords.push((x, y));
    }

    pub(crate) fn extend_from_slice(&mut self, coords: &[(u32, u32)]) {
        self.coords.extend_from_slice(coords);
    }

    /// `None` when nothing was collected.
    pub(crate) fn non_empty(self) -> Option<Self> {
        if self.coords.is_empty() { None } else { Some(self) }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[(u32, u32)] {
        &self.coords
    }
}

/// Number of pixels covered by block `n` along an axis of length `span`.
///
/// Blocks are `block` pixels long; the trailing block is clipped to whatever
/// is left of the axis.
pub(crate) fn block_span(block: u32, n: u32, span: u32) -> u32 {
    if block * (n + 1) > span {
        span % block
    } else {
        block
    }
}

/// Blocks needed to cover `span` pixels, including a clipped trailing one.
pub(crate) fn block_count(block: u32, span: u32) -> u32 {
    span.div_ceil(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_block_is_clipped() {
        assert_eq!(block_count(10, 25), 3);
        assert_eq!(block_span(10, 0, 25), 10);
        assert_eq!(block_span(10, 2, 25), 5);
    }

    #[test]
    fn exact_multiple_has_full_last_block() {
        assert_eq!(block_count(10, 30), 3);
        assert_eq!(block_span(10, 2, 30), 10);
    }

    #[test]
    fn block_larger_than_axis() {
        assert_eq!(block_count(50, 30), 1);
        assert_eq!(block_span(50, 0, 30), 30);
    }

    #[test]
    fn empty_set_collapses_to_none() {
        assert!(DifferenceSet::default().non_empty().is_none());
        let mut set = DifferenceSet::default();
        set.push(3, 4);
        let set = set.non_empty().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.coords(), &[(3, 4)]);
    }
}
