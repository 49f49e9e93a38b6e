//! Frame resampling used when a canvas is resized.
//!
//! Nearest neighbor keeps hard pixel edges, EPX is the classic 2x pixel
//! art magnifier, and bilinear suits photographic content. Bilinear
//! interpolation invents colors, so its output is re-quantized when the
//! document is in indexed mode.

use crate::{Color, ColorMode, Frame, Size, quantize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalingAlgorithm {
    #[default]
    NearestNeighbor,
    Epx,
    Bilinear,
}

impl ScalingAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            ScalingAlgorithm::NearestNeighbor => "nearest neighbor",
            ScalingAlgorithm::Epx => "EPX",
            ScalingAlgorithm::Bilinear => "bilinear",
        }
    }
}

/// Resample `frame` to `target` with the chosen algorithm.
pub fn scale_frame(frame: &Frame, target: Size, algorithm: ScalingAlgorithm, color_mode: ColorMode) -> Frame {
    match algorithm {
        ScalingAlgorithm::NearestNeighbor => scale_nearest(frame, target),
        ScalingAlgorithm::Epx => {
            let doubled = scale_epx_2x(frame);
            if doubled.size() == target {
                doubled
            } else {
                // EPX is defined for exact 2x; other factors fall back to
                // nearest neighbor on the doubled frame.
                scale_nearest(&doubled, target)
            }
        }
        ScalingAlgorithm::Bilinear => scale_bilinear(frame, target, color_mode),
    }
}

fn scale_nearest(frame: &Frame, target: Size) -> Frame {
    let mut result = Frame::new(target, Color::default());
    let scale_x = f64::from(frame.get_width()) / f64::from(target.width);
    let scale_y = f64::from(frame.get_height()) / f64::from(target.height);
    for y in 0..target.height {
        for x in 0..target.width {
            let src_x = (f64::from(x) * scale_x).floor() as i32;
            let src_y = (f64::from(y) * scale_y).floor() as i32;
            result.set_pixel(x, y, frame.get_pixel_clamped(src_x, src_y));
        }
    }
    result
}

fn scale_epx_2x(frame: &Frame) -> Frame {
    let width = frame.get_width();
    let height = frame.get_height();
    let mut result = Frame::new(Size::new(width * 2, height * 2), Color::default());
    for y in 0..height {
        for x in 0..width {
            let c = frame.get_pixel(x, y);
            let a = if y > 0 { frame.get_pixel(x, y - 1) } else { c };
            let b = if x < width - 1 { frame.get_pixel(x + 1, y) } else { c };
            let d = if x > 0 { frame.get_pixel(x - 1, y) } else { c };
            let g = if y < height - 1 { frame.get_pixel(x, y + 1) } else { c };

            let (dx, dy) = (x * 2, y * 2);
            result.set_pixel(dx, dy, if d == a && d != g && a != b { a } else { c });
            result.set_pixel(dx + 1, dy, if a == b && a != d && b != g { b } else { c });
            result.set_pixel(dx, dy + 1, if d == g && d != a && g != b { d } else { c });
            result.set_pixel(dx + 1, dy + 1, if g == b && g != d && b != a { g } else { c });
        }
    }
    result
}

fn scale_bilinear(frame: &Frame, target: Size, color_mode: ColorMode) -> Frame {
    let mut result = Frame::new(target, Color::default());
    let scale_x = f64::from(frame.get_width() - 1) / f64::from(target.width);
    let scale_y = f64::from(frame.get_height() - 1) / f64::from(target.height);
    for y in 0..target.height {
        for x in 0..target.width {
            let gx = f64::from(x) * scale_x;
            let gy = f64::from(y) * scale_y;
            let gxi = gx.floor() as i32;
            let gyi = gy.floor() as i32;

            let c00 = frame.get_pixel_clamped(gxi, gyi);
            let c10 = frame.get_pixel_clamped(gxi + 1, gyi);
            let c01 = frame.get_pixel_clamped(gxi, gyi + 1);
            let c11 = frame.get_pixel_clamped(gxi + 1, gyi + 1);

            let wx = gx - f64::from(gxi);
            let wy = gy - f64::from(gyi);
            let lerp = |c00: u8, c10: u8, c01: u8, c11: u8| {
                (f64::from(c00) * (1.0 - wx) * (1.0 - wy) + f64::from(c10) * wx * (1.0 - wy) + f64::from(c01) * (1.0 - wx) * wy + f64::from(c11) * wx * wy)
                    .round() as u8
            };
            let color = Color::new(
                lerp(c00.r, c10.r, c01.r, c11.r),
                lerp(c00.g, c10.g, c01.g, c11.g),
                lerp(c00.b, c10.b, c01.b, c11.b),
            );
            let color = match color_mode {
                ColorMode::Indexed3Bit => quantize(color).into(),
                ColorMode::Rgb24Bit => color,
            };
            result.set_pixel(x, y, color);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::PaletteColor;

    const R: Color = Color::new(255, 0, 0);
    const B: Color = Color::new(0, 0, 255);

    fn two_by_two() -> Frame {
        let mut frame = Frame::new((2, 2), Color::default());
        frame.set_pixel(0, 0, R);
        frame.set_pixel(1, 1, B);
        frame
    }

    #[test]
    fn test_nearest_doubles_pixels() {
        let scaled = scale_frame(&two_by_two(), Size::new(4, 4), ScalingAlgorithm::NearestNeighbor, ColorMode::Rgb24Bit);
        assert_eq!(scaled.get_pixel(0, 0), R);
        assert_eq!(scaled.get_pixel(1, 1), R);
        assert_eq!(scaled.get_pixel(2, 2), B);
        assert_eq!(scaled.get_pixel(3, 3), B);
        assert_eq!(scaled.get_pixel(3, 0), Color::default());
    }

    #[test]
    fn test_nearest_identity_at_same_size() {
        let frame = two_by_two();
        let scaled = scale_frame(&frame, frame.size(), ScalingAlgorithm::NearestNeighbor, ColorMode::Rgb24Bit);
        assert_eq!(scaled, frame);
    }

    #[test]
    fn test_epx_2x_preserves_solid_areas() {
        let frame = Frame::new((3, 3), R);
        let scaled = scale_frame(&frame, Size::new(6, 6), ScalingAlgorithm::Epx, ColorMode::Rgb24Bit);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(scaled.get_pixel(x, y), R);
            }
        }
    }

    #[test]
    fn test_epx_2x_diagonal() {
        // A lone corner pixel must not bleed into the opposite corner.
        let scaled = scale_frame(&two_by_two(), Size::new(4, 4), ScalingAlgorithm::Epx, ColorMode::Rgb24Bit);
        assert_eq!(scaled.get_pixel(0, 0), R);
        assert_eq!(scaled.get_pixel(3, 3), B);
        assert_eq!(scaled.get_pixel(3, 0), Color::default());
    }

    #[test]
    fn test_bilinear_quantizes_in_indexed_mode() {
        let mut frame = Frame::new((2, 8), Color::default());
        for y in 0..8 {
            frame.set_pixel(0, y, PaletteColor::White.into());
        }
        let scaled = scale_frame(&frame, Size::new(4, 8), ScalingAlgorithm::Bilinear, ColorMode::Indexed3Bit);
        for y in 0..scaled.get_height() {
            for x in 0..scaled.get_width() {
                assert!(PaletteColor::from_color(scaled.get_pixel(x, y)).is_some());
            }
        }
    }
}
