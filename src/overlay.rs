//! Timestamp overlay
//!
//! Pure byte-buffer annotation: decodes an image, stamps the current local
//! time on a darkened banner in the lower-left corner, and re-encodes as
//! JPEG. Rendering uses the 8x8 bitmap font scaled with image width, so no
//! font files are required at runtime.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::Utc;
use chrono_tz::Tz;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Cursor;

/// Default strftime format for the stamp
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// JPEG quality for the re-encoded output
const JPEG_QUALITY: u8 = 90;

/// Validated strftime format; anything unparsable falls back to the default
fn safe_format(fmt: &str) -> &str {
    if !fmt.is_empty() && StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error)) {
        fmt
    } else {
        DEFAULT_FORMAT
    }
}

/// Current time label in the requested zone
///
/// An empty or unknown zone name falls back to UTC; a malformed format
/// string falls back to the default. Total by construction.
pub fn timestamp_label(tz_name: &str, fmt: &str) -> String {
    let fmt = safe_format(fmt);
    let now = Utc::now();
    match tz_name.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format(fmt).to_string(),
        Err(_) => now.format(fmt).to_string(),
    }
}

/// Darken a rectangle in place to back the label
fn darken_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32) {
    let x1 = (x0 + w).min(img.width());
    let y1 = (y0 + h).min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let px = img.get_pixel_mut(x, y);
            for c in 0..3 {
                px.0[c] = (px.0[c] as u32 * 2 / 5) as u8;
            }
        }
    }
}

/// Draw text with the 8x8 bitmap font at an integer scale
fn draw_bitmap_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += 8 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col_idx in 0..8 {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let tx = cursor_x + col_idx * scale + sx;
                        let ty = y + row_idx as i32 * scale + sy;
                        if tx >= 0
                            && ty >= 0
                            && (tx as u32) < img.width()
                            && (ty as u32) < img.height()
                        {
                            img.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}

/// Stamp the current local time onto an image buffer
///
/// Consumes and produces encoded image bytes (output is always JPEG).
pub fn overlay_timestamp(photo: &[u8], tz_name: &str, fmt: &str) -> Result<Vec<u8>> {
    let label = timestamp_label(tz_name, fmt);

    let decoded = image::load_from_memory(photo)
        .map_err(|e| Error::Internal(format!("image decode failed: {}", e)))?;
    let mut img = decoded.to_rgba8();

    let scale = (img.width() / 400).max(2);
    let pad = scale * 4;
    let text_w = label.chars().count() as u32 * 8 * scale;
    let text_h = 8 * scale;
    let x = pad;
    let y = img.height().saturating_sub(text_h + 2 * pad);

    darken_rect(
        &mut img,
        x.saturating_sub(pad),
        y.saturating_sub(pad),
        text_w + 2 * pad,
        text_h + 2 * pad,
    );
    draw_bitmap_text(
        &mut img,
        x as i32,
        y as i32,
        &label,
        Rgba([255, 255, 255, 255]),
        scale,
    );

    let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
    let mut out = Cursor::new(Vec::new());
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| Error::Internal(format!("image encode failed: {}", e)))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let label = timestamp_label("Not/AZone", "%Y");
        assert_eq!(label.len(), 4);
        assert!(label.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn malformed_format_falls_back_to_default() {
        assert_eq!(safe_format("%Q"), DEFAULT_FORMAT);
        assert_eq!(safe_format(""), DEFAULT_FORMAT);
        assert_eq!(safe_format("%H:%M"), "%H:%M");
    }

    #[test]
    fn overlay_produces_jpeg_bytes() {
        let photo = sample_png(320, 240);
        let stamped = overlay_timestamp(&photo, "UTC", "").unwrap();
        assert!(stamped.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn overlay_survives_tiny_images() {
        let photo = sample_png(16, 8);
        let stamped = overlay_timestamp(&photo, "", "").unwrap();
        assert!(!stamped.is_empty());
    }

    #[test]
    fn garbage_input_is_rejected() {
        let err = overlay_timestamp(b"not an image", "UTC", "").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
