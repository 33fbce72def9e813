//! # Geometry
//!
//! Value types for sizes, aspect ratios and pointer coordinates, plus the two
//! pieces of math the slider depends on:
//!
//! - [`compute_layout_dimensions`] - derive a missing side from an aspect ratio
//! - [`pointer_percent`] - convert a page-space pointer into a track percentage
//!
//! ## Example
//!
//! ```rust
//! use juxta_core::geometry::{compute_layout_dimensions, NaturalSize};
//!
//! let before = NaturalSize::new(1000.0, 500.0);
//! let dims = compute_layout_dimensions(before, 800.0, 0.0);
//! assert_eq!(dims.height, 400.0);
//! assert_eq!(dims.ratio, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::options::Mode;

/// Intrinsic pixel size of an image, with its aspect ratio computed once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
    /// width / height, or 0.0 when the height is unknown
    pub ratio: f64,
}

impl NaturalSize {
    pub fn new(width: f64, height: f64) -> Self {
        let ratio = if height > 0.0 { width / height } else { 0.0 };
        NaturalSize { width, height, ratio }
    }

    /// Whether the image reported a usable size
    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Layout size of the container together with the ratio it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
}

/// Derive the missing side of a box from the natural ratio of `reference`.
///
/// A zero `width` or `height` means "derive this one". The width wins when
/// both are given. When neither is given the result is degenerate and both
/// sides are returned unchanged.
pub fn compute_layout_dimensions(reference: NaturalSize, width: f64, height: f64) -> Dimensions {
    let ratio = reference.ratio;
    let (mut width, mut height) = (width, height);

    if ratio > 0.0 && ratio.is_finite() {
        if width > 0.0 {
            height = width / ratio;
        } else if height > 0.0 {
            width = height * ratio;
        }
    }

    Dimensions { width, height, ratio }
}

/// Whether two images share the same aspect ratio.
///
/// Ratios of identical rationals divide to identical doubles, so exact
/// comparison is intentional here.
pub fn ratios_match(a: NaturalSize, b: NaturalSize) -> bool {
    a.ratio == b.ratio
}

/// Pointer position of a single event, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerSample {
    pub fn new(page_x: f64, page_y: f64) -> Self {
        PointerSample { page_x, page_y }
    }
}

/// Bounding box of an element in page coordinates (viewport rect + scroll).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PageBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        PageBox { left, top, width, height }
    }
}

/// Convert a pointer sample into a percentage of the track along `mode`'s axis.
///
/// Returns `None` for a collapsed track, where no meaningful percentage exists.
pub fn pointer_percent(track: PageBox, pointer: PointerSample, mode: Mode) -> Option<f64> {
    let (offset, length) = match mode {
        Mode::Horizontal => (pointer.page_x - track.left, track.width),
        Mode::Vertical => (pointer.page_y - track.top, track.height),
    };

    if length > 0.0 {
        Some(offset / length * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_ratio_computed_once() {
        let size = NaturalSize::new(1000.0, 500.0);
        assert_eq!(size.ratio, 2.0);
        assert!(size.is_known());

        let unknown = NaturalSize::new(0.0, 0.0);
        assert_eq!(unknown.ratio, 0.0);
        assert!(!unknown.is_known());
    }

    #[test]
    fn test_layout_from_width() {
        let dims = compute_layout_dimensions(NaturalSize::new(1000.0, 500.0), 800.0, 0.0);
        assert_eq!(dims, Dimensions { width: 800.0, height: 400.0, ratio: 2.0 });
    }

    #[test]
    fn test_layout_from_height() {
        let dims = compute_layout_dimensions(NaturalSize::new(1000.0, 500.0), 0.0, 400.0);
        assert_eq!(dims.width, 800.0);
        assert_eq!(dims.height, 400.0);
    }

    #[test]
    fn test_layout_width_wins() {
        let dims = compute_layout_dimensions(NaturalSize::new(1000.0, 500.0), 600.0, 999.0);
        assert_eq!(dims.height, 300.0);
    }

    #[test]
    fn test_layout_degenerate() {
        let dims = compute_layout_dimensions(NaturalSize::new(1000.0, 500.0), 0.0, 0.0);
        assert_eq!(dims.width, 0.0);
        assert_eq!(dims.height, 0.0);

        // Unknown reference size leaves the box untouched
        let dims = compute_layout_dimensions(NaturalSize::new(0.0, 0.0), 640.0, 480.0);
        assert_eq!((dims.width, dims.height), (640.0, 480.0));
    }

    #[test]
    fn test_ratios_match() {
        let a = NaturalSize::new(1000.0, 500.0);
        let b = NaturalSize::new(1000.0, 400.0);
        assert!(!ratios_match(a, b));
        assert!(ratios_match(a, NaturalSize::new(1000.0, 500.0)));
        assert!(ratios_match(NaturalSize::new(1920.0, 1080.0), NaturalSize::new(1280.0, 720.0)));
    }

    #[test]
    fn test_pointer_percent_horizontal() {
        let track = PageBox::new(100.0, 50.0, 800.0, 400.0);
        let pct = pointer_percent(track, PointerSample::new(300.0, 250.0), Mode::Horizontal);
        assert_eq!(pct, Some(25.0));
    }

    #[test]
    fn test_pointer_percent_keeps_subpixel_offsets() {
        let track = PageBox::new(0.0, 0.0, 1024.0, 512.0);
        let pct = pointer_percent(track, PointerSample::new(128.5, 0.0), Mode::Horizontal);
        assert_eq!(pct, Some(12.548828125));
    }

    #[test]
    fn test_pointer_percent_vertical_uses_y() {
        let track = PageBox::new(100.0, 50.0, 800.0, 400.0);
        let pct = pointer_percent(track, PointerSample::new(900.0, 150.0), Mode::Vertical);
        assert_eq!(pct, Some(25.0));
    }

    #[test]
    fn test_pointer_percent_collapsed_track() {
        let track = PageBox::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(pointer_percent(track, PointerSample::new(10.0, 10.0), Mode::Horizontal), None);
    }
}
