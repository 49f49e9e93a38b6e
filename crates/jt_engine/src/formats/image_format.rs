//! Raster image import/export.
//!
//! Importing turns an image into a single-frame document; in indexed
//! mode every pixel is quantized to the panel palette, matching what the
//! editor does when a photo is dropped onto the canvas.

use image::RgbImage;

use crate::{Color, ColorMode, Frame, PixelDocument, Result, quantize};

/// Decode image bytes (PNG, GIF, JPEG, BMP, ...) into a single-frame
/// document in the requested color mode.
///
/// # Errors
///
/// Returns an error if the image data cannot be decoded.
pub fn import_image(data: &[u8], color_mode: ColorMode) -> Result<PixelDocument> {
    let img = image::load_from_memory(data)?.to_rgb8();
    Ok(import_rgb_image(&img, color_mode))
}

/// Convert a decoded RGB image into a single-frame document.
pub fn import_rgb_image(img: &RgbImage, color_mode: ColorMode) -> PixelDocument {
    let size = (img.width() as usize, img.height() as usize);
    let mut doc = PixelDocument::new(color_mode, size, Color::default());
    let frame = &mut doc.frames[0];
    for (x, y, pixel) in img.enumerate_pixels() {
        let color = Color::new(pixel[0], pixel[1], pixel[2]);
        let color = match color_mode {
            ColorMode::Indexed3Bit => quantize(color).into(),
            ColorMode::Rgb24Bit => color,
        };
        frame.set_pixel(x as i32, y as i32, color);
    }
    doc
}

/// Render one frame as an RGB image, e.g. for PNG export.
pub fn export_frame(frame: &Frame) -> RgbImage {
    RgbImage::from_fn(frame.get_width() as u32, frame.get_height() as u32, |x, y| {
        let color = frame.get_pixel(x as i32, y as i32);
        image::Rgb([color.r, color.g, color.b])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaletteColor;

    fn test_image() -> RgbImage {
        RgbImage::from_fn(4, 8, |x, y| image::Rgb([(x * 60) as u8, (y * 30) as u8, 200]))
    }

    #[test]
    fn test_import_quantizes_in_indexed_mode() {
        let doc = import_rgb_image(&test_image(), ColorMode::Indexed3Bit);
        assert_eq!(doc.frame_count(), 1);
        assert!(doc.check_invariants().is_ok());
        for y in 0..doc.get_height() {
            for x in 0..doc.get_width() {
                assert!(PaletteColor::from_color(doc.frames[0].get_pixel(x, y)).is_some());
            }
        }
    }

    #[test]
    fn test_import_keeps_colors_in_rgb_mode() {
        let doc = import_rgb_image(&test_image(), ColorMode::Rgb24Bit);
        assert_eq!(doc.frames[0].get_pixel(3, 7), Color::new(180, 210, 200));
    }

    #[test]
    fn test_export_round_trip() {
        let doc = import_rgb_image(&test_image(), ColorMode::Rgb24Bit);
        let img = export_frame(&doc.frames[0]);
        assert_eq!(img, test_image());
    }
}
