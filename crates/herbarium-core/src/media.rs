//! Image optimization and thumbnail generation for plant photos.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

use crate::error::{MediaError, Result};
use crate::models::config::MediaConfig;

/// Lowest JPEG quality tried before giving up on the byte budget.
const MIN_JPEG_QUALITY: u8 = 30;
/// Quality decrement per re-encode attempt.
const QUALITY_STEP: u8 = 10;

/// Settings for thumbnail generation.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailOptions {
    /// Maximum thumbnail width in pixels.
    pub max_width: u32,
    /// Initial JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Byte budget for the encoded thumbnail.
    pub max_bytes: usize,
}

impl From<&MediaConfig> for ThumbnailOptions {
    fn from(config: &MediaConfig) -> Self {
        Self {
            max_width: config.thumbnail_width,
            jpeg_quality: config.jpeg_quality,
            max_bytes: config.thumbnail_max_bytes,
        }
    }
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self::from(&MediaConfig::default())
    }
}

/// Derive a thumbnail URL from an image URL by inserting `-thumb`
/// before the extension.
///
/// Returns `None` when the URL has no extension to split on.
pub fn derive_thumbnail_url(url: &str) -> Option<String> {
    let (stem, ext) = url.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(format!("{}-thumb.{}", stem, ext))
}

/// Encode a width-bounded JPEG thumbnail within the byte budget.
///
/// Quality is stepped down until the encoded size fits; if the floor
/// quality still exceeds the budget the thumbnail is rejected.
pub fn make_thumbnail(image: &DynamicImage, options: &ThumbnailOptions) -> Result<Vec<u8>> {
    let resized = if image.width() > options.max_width {
        image.resize(options.max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        image.clone()
    };
    let flattened = DynamicImage::ImageRgb8(flatten_to_rgb(&resized));

    let mut quality = options.jpeg_quality;
    loop {
        let bytes = encode_jpeg(&flattened, quality)?;
        if bytes.len() <= options.max_bytes {
            return Ok(bytes);
        }
        if quality <= MIN_JPEG_QUALITY {
            return Err(MediaError::BudgetExceeded {
                limit: options.max_bytes,
            }
            .into());
        }
        quality = quality.saturating_sub(QUALITY_STEP).max(MIN_JPEG_QUALITY);
    }
}

/// Bound an image to `max_size` on its longer edge and flatten any
/// alpha channel onto white.
pub fn optimize_image(image: &DynamicImage, max_size: u32) -> DynamicImage {
    let resized = if image.width() > max_size || image.height() > max_size {
        image.resize(max_size, max_size, FilterType::Lanczos3)
    } else {
        image.clone()
    };
    DynamicImage::ImageRgb8(flatten_to_rgb(&resized))
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    image.write_with_encoder(encoder)?;
    Ok(buf)
}

fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if let DynamicImage::ImageRgb8(rgb) = image {
        return rgb.clone();
    }

    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| (((c as u32 * alpha) + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_thumbnail_url() {
        assert_eq!(
            derive_thumbnail_url("https://example.org/plants/astu.jpg").as_deref(),
            Some("https://example.org/plants/astu-thumb.jpg")
        );
        assert_eq!(
            derive_thumbnail_url("photo.jpeg").as_deref(),
            Some("photo-thumb.jpeg")
        );
    }

    #[test]
    fn test_derive_thumbnail_url_requires_extension() {
        assert_eq!(derive_thumbnail_url("noext"), None);
        // The only dot is in the domain, not the file name.
        assert_eq!(derive_thumbnail_url("https://example.org/image"), None);
    }

    #[test]
    fn test_thumbnail_bounds_width() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(800, 400));
        let options = ThumbnailOptions::default();
        let bytes = make_thumbnail(&image, &options).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (200, 100));
    }

    #[test]
    fn test_thumbnail_does_not_upscale() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(100, 50));
        let bytes = make_thumbnail(&image, &ThumbnailOptions::default()).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (100, 50));
    }

    #[test]
    fn test_thumbnail_budget_exceeded() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(200, 200));
        let options = ThumbnailOptions {
            max_width: 200,
            jpeg_quality: 85,
            max_bytes: 10,
        };
        let result = make_thumbnail(&image, &options);
        assert!(result.is_err());
    }

    #[test]
    fn test_optimize_bounds_longer_edge() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(2400, 1200));
        let optimized = optimize_image(&image, 1200);
        assert_eq!(optimized.dimensions(), (1200, 600));
    }

    #[test]
    fn test_optimize_flattens_alpha_onto_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let optimized = optimize_image(&DynamicImage::ImageRgba8(rgba), 1200);
        let rgb = optimized.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 255, 255]);
    }
}
