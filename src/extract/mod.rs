//! Object extraction: labeled pixel crops from page images and decoded
//! embedded image resources.

use image::{imageops, Rgb, RgbImage, Rgba, RgbaImage};

use crate::engine::{DecodedPixels, ImageResource, PdfEngine};
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

/// Default padding applied around a detected box before cropping, as a
/// fraction of the image height.
pub const DEFAULT_CROP_PAD_FRACTION: f32 = 0.005;

/// Default fraction trimmed off the right edge by
/// [`crop_for_standard_layout`].
pub const DEFAULT_WIDTH_TRIM_FRACTION: f32 = 0.05;

/// Default fraction trimmed off the bottom edge by
/// [`crop_for_standard_layout`].
pub const DEFAULT_HEIGHT_TRIM_FRACTION: f32 = 0.08;

/// Default minimum width accepted by [`meets_minimum_dimension`].
pub const DEFAULT_MIN_WIDTH: u32 = 320;

/// Default minimum height accepted by [`meets_minimum_dimension`].
pub const DEFAULT_MIN_HEIGHT: u32 = 320;

/// A labeled pixel crop produced by the extractor.
///
/// Transient: not indexed anywhere, freed when the caller's pipeline drops
/// it.
#[derive(Debug, Clone)]
pub struct ExtractedObject {
    /// The cropped pixel region
    pub detected_object: RgbImage,
    /// Label attached by the detector that produced the box
    pub label: String,
}

/// Crop a padded region out of a page image and attach a label.
///
/// The box is padded outward by `pad_fraction` of the image *height* on
/// every coordinate: both axes scale by the height, not by their own
/// extents. Padded coordinates are truncated toward zero before cropping.
///
/// No clamping is performed: a box that leaves the image extent after
/// padding fails with [`Error::RegionOutOfBounds`]. A within-bounds
/// degenerate box yields a zero-area crop, which downstream stages must
/// reject themselves.
pub fn crop_with_padding(
    image: &RgbImage,
    bbox: &BoundingBox,
    label: impl Into<String>,
    pad_fraction: f32,
) -> Result<ExtractedObject> {
    let (width, height) = image.dimensions();
    let pad = height as f32 * pad_fraction;

    let x0 = (bbox.x0 - pad) as i64;
    let y0 = (bbox.y0 - pad) as i64;
    let x1 = (bbox.x1 + pad) as i64;
    let y1 = (bbox.y1 + pad) as i64;

    if x0 < 0 || y0 < 0 || x1 > width as i64 || y1 > height as i64 {
        return Err(Error::RegionOutOfBounds {
            x0,
            y0,
            x1,
            y1,
            width,
            height,
        });
    }

    let crop_width = (x1 - x0).max(0) as u32;
    let crop_height = (y1 - y0).max(0) as u32;
    let detected_object =
        imageops::crop_imm(image, x0 as u32, y0 as u32, crop_width, crop_height).to_image();

    Ok(ExtractedObject {
        detected_object,
        label: label.into(),
    })
}

/// Trim the fixed footer/margin fractions off a full page image.
///
/// Removes `width_trim_fraction` of the width from the right edge and
/// `height_trim_fraction` of the height from the bottom edge. Pure
/// function; an image smaller than the trim amounts degenerates to a
/// zero-area result, which callers must treat as invalid input to later
/// stages.
pub fn crop_for_standard_layout(
    image: &RgbImage,
    width_trim_fraction: f32,
    height_trim_fraction: f32,
) -> RgbImage {
    let (width, height) = image.dimensions();
    let trim_width = (width as f32 * width_trim_fraction) as u32;
    let trim_height = (height as f32 * height_trim_fraction) as u32;
    let kept_width = width.saturating_sub(trim_width);
    let kept_height = height.saturating_sub(trim_height);
    imageops::crop_imm(image, 0, 0, kept_width, kept_height).to_image()
}

/// Whether an image meets the given minimum dimensions.
pub fn meets_minimum_dimension(image: &RgbImage, min_width: u32, min_height: u32) -> bool {
    image.width() >= min_width && image.height() >= min_height
}

/// Decode an embedded image resource to an RGB pixel buffer.
///
/// Resources declaring an alpha mask over an RGB base are composited with
/// the mask, fully-transparent pixels are flattened to white, and the
/// alpha channel is dropped. Unmasked resources are decoded directly and
/// converted to RGB as long as the native channel count stays below five
/// (CMYK + alpha layouts are not converted).
///
/// Returns `Ok(None)`, a soft "not extractable" outcome rather than an
/// error, when neither branch applies.
pub fn extract_embedded_image<E: PdfEngine>(
    doc: &E::Document,
    resource: &ImageResource,
) -> Result<Option<RgbImage>> {
    if resource.has_mask() && resource.colorspace == "DeviceRGB" {
        let pixels = E::decode_image_with_mask(doc, resource)?;
        let rgba = samples_to_rgba(&pixels)?;
        return Ok(Some(flatten_transparent_to_white(&rgba)));
    }

    let pixels = E::decode_image(doc, resource)?;
    if pixels.channels < 5 {
        return Ok(Some(samples_to_rgb(&pixels)?));
    }

    log::warn!(
        "image resource {} ({} channels, {}) is not extractable",
        resource.xref,
        pixels.channels,
        resource.colorspace
    );
    Ok(None)
}

/// Reinterpret a decoded sample buffer as RGBA.
fn samples_to_rgba(pixels: &DecodedPixels) -> Result<RgbaImage> {
    if pixels.channels != 4 {
        return Err(Error::UnsupportedPixelLayout {
            channels: pixels.channels,
        });
    }
    RgbaImage::from_raw(pixels.width, pixels.height, pixels.samples.clone()).ok_or_else(|| {
        Error::Engine(format!(
            "decoded sample buffer is {} bytes, expected {}",
            pixels.samples.len(),
            pixels.width as usize * pixels.height as usize * 4
        ))
    })
}

/// Convert a decoded sample buffer of 1 to 4 channels to RGB.
fn samples_to_rgb(pixels: &DecodedPixels) -> Result<RgbImage> {
    let channels = pixels.channels as usize;
    if !(1..=4).contains(&channels) {
        return Err(Error::UnsupportedPixelLayout {
            channels: pixels.channels,
        });
    }

    let expected = pixels.width as usize * pixels.height as usize * channels;
    if pixels.samples.len() != expected {
        return Err(Error::Engine(format!(
            "decoded sample buffer is {} bytes, expected {}",
            pixels.samples.len(),
            expected
        )));
    }

    let mut out = RgbImage::new(pixels.width, pixels.height);
    for (i, pixel) in out.pixels_mut().enumerate() {
        let sample = &pixels.samples[i * channels..(i + 1) * channels];
        *pixel = match channels {
            // Gray, or gray + alpha: replicate the luma sample.
            1 | 2 => Rgb([sample[0], sample[0], sample[0]]),
            // RGB, or RGBA with the alpha dropped.
            _ => Rgb([sample[0], sample[1], sample[2]]),
        };
    }
    Ok(out)
}

/// Flatten fully-transparent pixels to white and drop the alpha channel.
fn flatten_transparent_to_white(image: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let Rgba([r, g, b, a]) = *src;
        *dst = if a == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([r, g, b])
        };
    }
    out
}
