//! Slice planning.
//!
//! Given source dimensions and a slice count, compute the vertical sub-regions
//! each slice covers. Planning is pure: no pixels are touched and nothing is
//! cached, so the boundary overlay can recompute the plan on every selector
//! change without affecting previously generated artifacts.
//!
//! # Width policy
//!
//! `W/N` is rarely exact. Every region uses the truncated width `floor(W/N)`
//! except the last, which absorbs the remainder so the plan always reaches the
//! true right edge of the image. The union of the regions therefore covers
//! `[0,W) x [0,H)` exactly, with no gaps or overlaps.

use crate::error::InputError;

/// Smallest selectable slice count.
pub const MIN_SLICES: u32 = 2;

/// Largest selectable slice count.
pub const MAX_SLICES: u32 = 5;

/// A validated slice count from the fixed menu (2-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceCount(u32);

impl SliceCount {
    /// Validate a slice count against the menu.
    pub fn new(count: u32) -> Result<Self, InputError> {
        if (MIN_SLICES..=MAX_SLICES).contains(&count) {
            Ok(Self(count))
        } else {
            Err(InputError::InvalidSliceCount { count })
        }
    }

    /// The count as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SliceCount {
    fn default() -> Self {
        Self(3)
    }
}

/// One planned sub-region of the source image, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An ordered left-to-right sequence of planned regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicePlan {
    regions: Vec<Region>,
}

impl SlicePlan {
    /// Plan `count` vertical slices over a `width x height` source.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero. A width smaller than the
    /// slice count is not an error here; the resulting zero-width regions are
    /// rejected per slice at render time.
    pub fn new(width: u32, height: u32, count: SliceCount) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidDimensions { width, height });
        }

        let n = count.get();
        let base = width / n;

        let mut regions = Vec::with_capacity(n as usize);
        for i in 0..n {
            let x = i * base;
            // last region absorbs the division remainder
            let w = if i == n - 1 { width - x } else { base };
            regions.push(Region {
                x,
                y: 0,
                width: w,
                height,
            });
        }

        Ok(Self { regions })
    }

    /// The planned regions, index 0..N-1 left to right.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of planned regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the plan is empty. Never true for a plan built by [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Interior boundary x-offsets (N-1 of them), for drawing slice guides
    /// over the preview.
    pub fn boundaries(&self) -> Vec<u32> {
        self.regions.iter().skip(1).map(|r| r.x).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: u32) -> SliceCount {
        SliceCount::new(n).unwrap()
    }

    #[test]
    fn test_slice_count_menu() {
        assert!(SliceCount::new(1).is_err());
        assert!(SliceCount::new(2).is_ok());
        assert!(SliceCount::new(5).is_ok());
        assert!(SliceCount::new(6).is_err());
        assert!(SliceCount::new(0).is_err());
        assert_eq!(SliceCount::default().get(), 3);
    }

    #[test]
    fn test_even_split() {
        // 300x100 into 3: the documented reference scenario
        let plan = SlicePlan::new(300, 100, count(3)).unwrap();
        assert_eq!(plan.len(), 3);

        let regions = plan.regions();
        assert_eq!(regions[0], Region { x: 0, y: 0, width: 100, height: 100 });
        assert_eq!(regions[1], Region { x: 100, y: 0, width: 100, height: 100 });
        assert_eq!(regions[2], Region { x: 200, y: 0, width: 100, height: 100 });
    }

    #[test]
    fn test_remainder_goes_to_last_slice() {
        let plan = SlicePlan::new(301, 50, count(3)).unwrap();
        let regions = plan.regions();
        assert_eq!(regions[0].width, 100);
        assert_eq!(regions[1].width, 100);
        assert_eq!(regions[2].width, 101);
        assert_eq!(regions[2].x + regions[2].width, 301);
    }

    #[test]
    fn test_full_coverage_no_gaps() {
        for width in [7, 99, 100, 101, 1023, 4096] {
            for n in MIN_SLICES..=MAX_SLICES {
                let plan = SlicePlan::new(width, 64, count(n)).unwrap();
                let regions = plan.regions();
                assert_eq!(regions.len(), n as usize);

                // contiguous left to right, heights all equal H
                let mut edge = 0;
                for r in regions {
                    assert_eq!(r.x, edge);
                    assert_eq!(r.y, 0);
                    assert_eq!(r.height, 64);
                    edge = r.x + r.width;
                }
                // last right edge lands exactly on W
                assert_eq!(edge, width);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            SlicePlan::new(0, 100, count(2)),
            Err(InputError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            SlicePlan::new(100, 0, count(2)),
            Err(InputError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_width_smaller_than_count() {
        // 3 pixels across 4 slices: three zero-width regions, last gets all
        let plan = SlicePlan::new(3, 10, count(4)).unwrap();
        let regions = plan.regions();
        assert_eq!(regions[0].width, 0);
        assert_eq!(regions[1].width, 0);
        assert_eq!(regions[2].width, 0);
        assert_eq!(regions[3].width, 3);
    }

    #[test]
    fn test_boundaries() {
        let plan = SlicePlan::new(300, 100, count(3)).unwrap();
        assert_eq!(plan.boundaries(), vec![100, 200]);

        let plan = SlicePlan::new(100, 100, count(2)).unwrap();
        assert_eq!(plan.boundaries(), vec![50]);

        let plan = SlicePlan::new(103, 100, count(5)).unwrap();
        assert_eq!(plan.boundaries(), vec![20, 40, 60, 80]);
    }
}
