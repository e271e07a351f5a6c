//! Skew estimation and correction for scanned regions.
//!
//! The estimator is a brute-force projection-profile search: rotate a
//! binarized region through a grid of candidate angles, build a horizontal
//! projection histogram at each, and score it by the sum of squared
//! differences between adjacent bins. Sharp row transitions mean text
//! lines aligned with the pixel rows, so the best candidate is the one
//! with the maximum score. Positive angles are counterclockwise.

use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rayon::prelude::*;

use crate::extract::ExtractedObject;

/// Parameters of the candidate-angle grid scanned by
/// [`estimate_skew_angle`].
#[derive(Debug, Clone, Copy)]
pub struct SkewScanParams {
    /// Grid step in degrees
    pub angle_step: f32,
    /// Grid half-width in degrees; candidates span `[-limit, limit]`
    pub angle_limit: f32,
}

impl Default for SkewScanParams {
    fn default() -> Self {
        Self {
            angle_step: 5.0,
            angle_limit: 45.0,
        }
    }
}

/// Binarize a region for skew scoring: grayscale plus inverted Otsu
/// threshold, so dark ink becomes foreground.
pub fn binarize_region(image: &RgbImage) -> GrayImage {
    let gray = imageops::grayscale(image);
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::BinaryInverted)
}

/// Projection-profile score of one candidate angle.
///
/// Rotates with nearest-neighbor interpolation and unchanged extent
/// (zero-filled corners), sums intensity per row, and scores the
/// histogram by the sum of squared adjacent-bin differences.
fn projection_score(binary: &GrayImage, angle: f32) -> f64 {
    // imageproc rotates clockwise for positive theta; negate to keep the
    // counterclockwise-positive convention.
    let rotated = rotate_about_center(
        binary,
        -angle.to_radians(),
        Interpolation::Nearest,
        Luma([0u8]),
    );

    let histogram: Vec<f64> = (0..rotated.height())
        .map(|y| {
            (0..rotated.width())
                .map(|x| rotated.get_pixel(x, y)[0] as f64)
                .sum()
        })
        .collect();

    histogram
        .windows(2)
        .map(|pair| {
            let diff = pair[1] - pair[0];
            diff * diff
        })
        .sum()
}

/// Estimate the rotation angle, in degrees, that best deskews a binarized
/// region.
///
/// Scans `[-angle_limit, angle_limit]` in `angle_step` increments (both
/// ends included) and returns the candidate with the maximum projection
/// score; ties go to the first candidate scanned. Deterministic grid
/// search, no gradient steps, no randomness.
pub fn estimate_skew_angle(binary: &GrayImage, params: &SkewScanParams) -> f32 {
    let steps = (2.0 * params.angle_limit / params.angle_step).round() as i32;
    let mut best_angle = -params.angle_limit;
    let mut best_score = f64::NEG_INFINITY;

    for i in 0..=steps {
        let angle = -params.angle_limit + i as f32 * params.angle_step;
        let score = projection_score(binary, angle);
        if score > best_score {
            best_score = score;
            best_angle = angle;
        }
    }

    log::debug!("estimated skew angle {best_angle} (score {best_score})");
    best_angle
}

/// Combine per-object skew estimates into one document angle.
///
/// If any estimate is negative the minimum (most negative) wins, otherwise
/// the maximum does. The asymmetry favors the strongest clockwise lean
/// when signs are mixed, not an average.
pub fn reduce_skew_angles(angles: &[f32]) -> Option<f32> {
    let min = angles.iter().copied().reduce(f32::min)?;
    let max = angles.iter().copied().reduce(f32::max)?;
    Some(if min < 0.0 { min } else { max })
}

/// Estimate the document skew angle from a set of extracted objects.
///
/// Each object's estimate is independent, so the per-object scans run as a
/// bounded parallel map; the sign-based reduction joins all of them before
/// deciding. Returns `None` for an empty object list.
pub fn estimate_document_skew(objects: &[ExtractedObject]) -> Option<f32> {
    let angles: Vec<f32> = objects
        .par_iter()
        .map(|object| {
            let binary = binarize_region(&object.detected_object);
            estimate_skew_angle(&binary, &SkewScanParams::default())
        })
        .collect();
    reduce_skew_angles(&angles)
}

/// Rotate an image about its center by `angle` degrees (positive is
/// counterclockwise) with unit scale, bicubic interpolation, and
/// edge-replicate border sampling. The output extent equals the input
/// extent.
pub fn rotate_to_correct_skew(image: &RgbImage, angle: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let theta = angle.to_radians();
    let (sin, cos) = theta.sin_cos();
    let cx = (width / 2) as f32;
    let cy = (height / 2) as f32;

    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let src_x = cos * dx - sin * dy + cx;
            let src_y = sin * dx + cos * dy + cy;
            out.put_pixel(x, y, sample_bicubic(image, src_x, src_y));
        }
    }
    out
}

/// Catmull-Rom cubic kernel (a = -0.5).
fn cubic_weight(t: f32) -> f32 {
    const A: f32 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        (A + 2.0) * t * t * t - (A + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        A * t * t * t - 5.0 * A * t * t + 8.0 * A * t - 4.0 * A
    } else {
        0.0
    }
}

/// Bicubic sample at a fractional source position, replicating edge
/// pixels for out-of-range taps.
fn sample_bicubic(image: &RgbImage, src_x: f32, src_y: f32) -> Rgb<u8> {
    let (width, height) = image.dimensions();
    let x_base = src_x.floor();
    let y_base = src_y.floor();
    let fx = src_x - x_base;
    let fy = src_y - y_base;

    let mut acc = [0.0f32; 3];
    for m in -1..=2 {
        let wy = cubic_weight(fy - m as f32);
        if wy == 0.0 {
            continue;
        }
        let tap_y = (y_base as i64 + m as i64).clamp(0, height as i64 - 1) as u32;
        for n in -1..=2 {
            let wx = cubic_weight(fx - n as f32);
            if wx == 0.0 {
                continue;
            }
            let tap_x = (x_base as i64 + n as i64).clamp(0, width as i64 - 1) as u32;
            let pixel = image.get_pixel(tap_x, tap_y);
            let w = wx * wy;
            acc[0] += w * pixel[0] as f32;
            acc[1] += w * pixel[1] as f32;
            acc[2] += w * pixel[2] as f32;
        }
    }

    Rgb([
        acc[0].round().clamp(0.0, 255.0) as u8,
        acc[1].round().clamp(0.0, 255.0) as u8,
        acc[2].round().clamp(0.0, 255.0) as u8,
    ])
}
