//! Template matching against extracted regions.

use image::{imageops, GrayImage, RgbImage};
use imageproc::template_matching::{match_template as ncc, MatchTemplateMethod};

use crate::error::{Error, Result};

/// Default correlation threshold for [`match_template`].
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.9;

/// Match a grayscale template against an image region.
///
/// Fails with [`Error::MissingTemplate`] when `template` is `None`,
/// regardless of the image, and with [`Error::TemplateTooLarge`] when the
/// template exceeds the search extent. Otherwise the search image is
/// converted to grayscale, normalized cross-correlation is computed, and
/// the match succeeds only if **every** cell of the correlation surface
/// meets `threshold`. This is an all-cells rule, stricter than the usual
/// best-peak check.
pub fn match_template(
    template: Option<&GrayImage>,
    image: &RgbImage,
    threshold: f32,
) -> Result<bool> {
    let template = template.ok_or(Error::MissingTemplate)?;
    let gray = imageops::grayscale(image);

    if template.width() > gray.width() || template.height() > gray.height() {
        return Err(Error::TemplateTooLarge {
            template_width: template.width(),
            template_height: template.height(),
            image_width: gray.width(),
            image_height: gray.height(),
        });
    }

    let correlation = ncc(
        &gray,
        template,
        MatchTemplateMethod::CrossCorrelationNormalized,
    );
    Ok(correlation.iter().all(|&value| value >= threshold))
}
