use crate::config::Background;
use fast_image_resize::{FilterType, ResizeAlg, ResizeError, ResizeOptions, Resizer};
use image::{DynamicImage, GenericImageView, RgbaImage, imageops};
use std::borrow::Cow;

/// Dimensions of `width x height` shrunk to fit a `size x size` box, keeping
/// the aspect ratio. Images that already fit are left at their own size, and
/// neither side drops below one pixel.
pub fn fit_within(width: u32, height: u32, size: u32) -> (u32, u32) {
    let (mut w, mut h) = (u64::from(width), u64::from(height));
    let size = u64::from(size);

    if w > size {
        h = (h * size / w).max(1);
        w = size;
    }
    if h > size {
        w = (w * size / h).max(1);
        h = size;
    }

    // Both sides are at most `size` now, which came from a u32.
    (w as u32, h as u32)
}

/// Top-left corner that centers an `inner` span inside `outer`, rounding down.
pub fn centered_offset(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)) / 2
}

/// Lanczos3 downscale of `source` into the `size x size` box. Sources that
/// already fit and are stored as RGBA8 are borrowed rather than copied.
fn shrink_to_fit(
    source: &DynamicImage,
    size: u32,
) -> Result<Cow<'_, RgbaImage>, ResizeError> {
    let (orig_w, orig_h) = source.dimensions();
    let (target_w, target_h) = fit_within(orig_w, orig_h, size);

    if (target_w, target_h) == (orig_w, orig_h) {
        return Ok(match source.as_rgba8() {
            Some(rgba) => Cow::Borrowed(rgba),
            None => Cow::Owned(source.to_rgba8()),
        });
    }

    let converted;
    let src = if let DynamicImage::ImageRgba8(_) = source {
        source
    } else {
        converted = DynamicImage::ImageRgba8(source.to_rgba8());
        &converted
    };

    let mut dst = DynamicImage::ImageRgba8(RgbaImage::new(target_w, target_h));
    let options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    Resizer::new().resize(src, &mut dst, &options)?;

    Ok(Cow::Owned(dst.into_rgba8()))
}

/// Builds the `size x size` thumbnail: `background` everywhere, with `source`
/// shrunk to fit and pasted over the middle.
///
/// The pasted pixels replace the background outright, alpha included, so a
/// translucent source pixel stays translucent instead of being blended.
pub fn composite(
    source: &DynamicImage,
    size: u32,
    background: Background,
) -> Result<RgbaImage, ResizeError> {
    let resized = shrink_to_fit(source, size)?;

    let mut canvas = RgbaImage::from_pixel(size, size, background.rgba());
    imageops::replace(
        &mut canvas,
        resized.as_ref(),
        centered_offset(size, resized.width()),
        centered_offset(size, resized.height()),
    );

    Ok(canvas)
}
