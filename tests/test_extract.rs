//! Tests for embedded-image extraction through the engine boundary.

mod common;

use common::{image_resource, FixtureDocument, FixtureEngine};
use image::Rgb;
use pdf_atlas::engine::DecodedPixels;
use pdf_atlas::error::Error;
use pdf_atlas::extract::extract_embedded_image;

fn document_with_decoded(
    xref: u32,
    decoded: Option<DecodedPixels>,
    masked: Option<DecodedPixels>,
) -> FixtureDocument {
    let mut doc = FixtureDocument::default();
    if let Some(pixels) = decoded {
        doc.decoded.insert(xref, pixels);
    }
    if let Some(pixels) = masked {
        doc.decoded_masked.insert(xref, pixels);
    }
    doc
}

#[test]
fn test_masked_rgb_image_flattens_transparency_to_white() {
    // 2x1 RGBA: an opaque red pixel and a fully transparent one.
    let masked = DecodedPixels {
        width: 2,
        height: 1,
        channels: 4,
        samples: vec![200, 10, 10, 255, 40, 40, 40, 0],
    };
    let doc = document_with_decoded(3, None, Some(masked));
    let resource = image_resource(3, Some(4), "DeviceRGB");

    let image = extract_embedded_image::<FixtureEngine>(&doc, &resource)
        .unwrap()
        .expect("masked DeviceRGB image should be extractable");
    assert_eq!(image.get_pixel(0, 0), &Rgb([200, 10, 10]));
    assert_eq!(image.get_pixel(1, 0), &Rgb([255, 255, 255]));
}

#[test]
fn test_unmasked_grayscale_decodes_to_rgb() {
    let decoded = DecodedPixels {
        width: 2,
        height: 1,
        channels: 1,
        samples: vec![0, 180],
    };
    let doc = document_with_decoded(5, Some(decoded), None);
    let resource = image_resource(5, None, "DeviceGray");

    let image = extract_embedded_image::<FixtureEngine>(&doc, &resource)
        .unwrap()
        .expect("grayscale image should be extractable");
    assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(image.get_pixel(1, 0), &Rgb([180, 180, 180]));
}

#[test]
fn test_masked_non_rgb_falls_back_to_plain_decode() {
    // A masked image outside DeviceRGB takes the direct-decode branch.
    let decoded = DecodedPixels {
        width: 1,
        height: 1,
        channels: 3,
        samples: vec![9, 8, 7],
    };
    let doc = document_with_decoded(6, Some(decoded), None);
    let resource = image_resource(6, Some(9), "DeviceCMYK");

    let image = extract_embedded_image::<FixtureEngine>(&doc, &resource)
        .unwrap()
        .expect("plain decode should succeed");
    assert_eq!(image.get_pixel(0, 0), &Rgb([9, 8, 7]));
}

#[test]
fn test_wide_pixel_layout_is_soft_not_extractable() {
    // CMYK + alpha (5 channels) is the soft sentinel, not an error.
    let decoded = DecodedPixels {
        width: 1,
        height: 1,
        channels: 5,
        samples: vec![0; 5],
    };
    let doc = document_with_decoded(8, Some(decoded), None);
    let resource = image_resource(8, None, "DeviceCMYK");

    let result = extract_embedded_image::<FixtureEngine>(&doc, &resource).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_missing_image_stream_is_engine_error() {
    let doc = FixtureDocument::default();
    let resource = image_resource(11, None, "DeviceRGB");
    let result = extract_embedded_image::<FixtureEngine>(&doc, &resource);
    assert!(matches!(result, Err(Error::Engine(_))));
}
