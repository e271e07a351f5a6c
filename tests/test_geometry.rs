//! Property tests for the bounding-box operations.

use pdf_atlas::geometry::{apply_bbox_padding, intersection_over_union, BoundingBox};
use proptest::prelude::*;

/// Strategy for well-formed boxes with `x0 <= x1` and `y0 <= y1`.
fn ordered_box() -> impl Strategy<Value = BoundingBox> {
    (
        0.0f32..500.0,
        0.0f32..500.0,
        0.0f32..500.0,
        0.0f32..500.0,
    )
        .prop_map(|(a, b, c, d)| {
            BoundingBox::new(a.min(c), b.min(d), a.max(c), b.max(d))
        })
}

proptest! {
    #[test]
    fn iou_is_within_unit_interval(a in ordered_box(), b in ordered_box()) {
        let iou = intersection_over_union(&a, &b);
        // One ulp of slack for near-identical boxes.
        prop_assert!(iou >= 0.0 && iou <= 1.0 + 1e-6);
    }

    #[test]
    fn iou_is_reflexive(a in ordered_box()) {
        prop_assert_eq!(intersection_over_union(&a, &a), 1.0);
    }

    #[test]
    fn iou_is_symmetric(a in ordered_box(), b in ordered_box()) {
        let forward = intersection_over_union(&a, &b);
        let backward = intersection_over_union(&b, &a);
        prop_assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn zero_padding_is_identity(bbox in ordered_box()) {
        let page = BoundingBox::new(0.0, 0.0, 612.0, 792.0);
        let padded = apply_bbox_padding(&page, &bbox, 0.0, 0.0, 0.0, 0.0);
        prop_assert_eq!(padded, bbox);
    }

    #[test]
    fn padding_shifts_scale_with_page_extent(bbox in ordered_box(), pad in -0.1f32..0.1) {
        let page = BoundingBox::new(0.0, 0.0, 100.0, 200.0);
        let padded = apply_bbox_padding(&page, &bbox, pad, pad, pad, pad);
        prop_assert!((padded.x0 - (bbox.x0 + pad * 100.0)).abs() < 1e-3);
        prop_assert!((padded.y0 - (bbox.y0 + pad * 200.0)).abs() < 1e-3);
        prop_assert!((padded.x1 - (bbox.x1 + pad * 100.0)).abs() < 1e-3);
        prop_assert!((padded.y1 - (bbox.y1 + pad * 200.0)).abs() < 1e-3);
    }
}
