//! Geometric primitives for page-space and pixel-space bounding boxes.
//!
//! This module provides the bounding-box type shared by the spatial-text
//! index and the region-extraction routines, together with the pure
//! padding and overlap operations used on it.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
///
/// Coordinates are page-local (points) when produced by the PDF engine and
/// pixel coordinates when produced by object detection. Callers are
/// expected to supply `x0 <= x1` and `y0 <= y1`; the overlap operations
/// tolerate degenerate zero-area boxes by clamping negative intersections
/// to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_atlas::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box (`x1 - x0`).
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box (`y1 - y0`).
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

impl From<(f32, f32, f32, f32)> for BoundingBox {
    fn from((x0, y0, x1, y1): (f32, f32, f32, f32)) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

/// Pad a bounding box relative to the page it sits on.
///
/// Each pad value is a fraction of the *page* extent, not of the box's own
/// size: `x0_pad` and `x1_pad` scale by the page width, `y0_pad` and
/// `y1_pad` by the page height, and each scaled pad is **added** to the
/// corresponding coordinate. Negative pads shrink the box. Total function,
/// no error cases.
///
/// # Examples
///
/// ```
/// use pdf_atlas::geometry::{apply_bbox_padding, BoundingBox};
///
/// let page = BoundingBox::new(0.0, 0.0, 100.0, 200.0);
/// let bbox = BoundingBox::new(25.0, 50.0, 50.0, 75.0);
/// let padded = apply_bbox_padding(&page, &bbox, 0.01, 0.01, 0.01, 0.01);
/// assert_eq!(padded, BoundingBox::new(26.0, 52.0, 51.0, 77.0));
/// ```
pub fn apply_bbox_padding(
    page_dim: &BoundingBox,
    bbox: &BoundingBox,
    x0_pad: f32,
    y0_pad: f32,
    x1_pad: f32,
    y1_pad: f32,
) -> BoundingBox {
    let page_width = page_dim.width();
    let page_height = page_dim.height();
    BoundingBox::new(
        bbox.x0 + x0_pad * page_width,
        bbox.y0 + y0_pad * page_height,
        bbox.x1 + x1_pad * page_width,
        bbox.y1 + y1_pad * page_height,
    )
}

/// Intersection-over-union of two boxes on a pixel grid.
///
/// Uses the inclusive-pixel convention: every width and height is computed
/// as `hi - lo + 1`, so a box whose corners coincide still covers one
/// pixel. The intersection is clamped to zero per axis before multiplying,
/// and a non-positive union area yields `0.0` rather than a NaN or
/// infinity.
///
/// # Examples
///
/// ```
/// use pdf_atlas::geometry::{intersection_over_union, BoundingBox};
///
/// let a = BoundingBox::new(0.0, 0.0, 9.0, 9.0);
/// assert_eq!(intersection_over_union(&a, &a), 1.0);
///
/// let b = BoundingBox::new(100.0, 100.0, 109.0, 109.0);
/// assert_eq!(intersection_over_union(&a, &b), 0.0);
/// ```
pub fn intersection_over_union(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let x0 = a.x0.max(b.x0);
    let y0 = a.y0.max(b.y0);
    let x1 = a.x1.min(b.x1);
    let y1 = a.y1.min(b.y1);

    let inter_area = (x1 - x0 + 1.0).max(0.0) * (y1 - y0 + 1.0).max(0.0);
    let a_area = (a.x1 - a.x0 + 1.0) * (a.y1 - a.y0 + 1.0);
    let b_area = (b.x1 - b.x0 + 1.0) * (b.y1 - b.y0 + 1.0);

    let union_area = a_area + b_area - inter_area;
    if union_area <= 0.0 {
        return 0.0;
    }
    inter_area / union_area
}
