// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Measurement annotator: burns a vertical height guide, a horizontal width
// guide, and their labels into a copy of the building photo.

pub mod glyphs;
pub mod layout;

use bauwerk_core::error::BauwerkError;
use bauwerk_core::{AnnotationSettings, DimensionEstimate};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, info, instrument, warn};

pub use layout::{GuideLayout, Point};

/// Thickest guide line drawn, in pixels.
pub const MAX_STROKE_WIDTH: u32 = 64;
/// Largest label magnification.
pub const MAX_TEXT_SCALE: u32 = glyphs::MAX_SCALE;

/// Colours and sizes used when drawing the guides and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationStyle {
    pub height_color: Rgb<u8>,
    pub width_color: Rgb<u8>,
    /// Guide thickness in pixels.
    pub stroke_width: u32,
    /// Label glyph magnification.
    pub text_scale: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::from(&AnnotationSettings::default())
    }
}

impl From<&AnnotationSettings> for AnnotationStyle {
    fn from(settings: &AnnotationSettings) -> Self {
        Self {
            height_color: Rgb(settings.height_color),
            width_color: Rgb(settings.width_color),
            stroke_width: settings.stroke_width,
            text_scale: settings.text_scale,
        }
        .clamped()
    }
}

impl AnnotationStyle {
    /// This style with the stroke width in `1..=MAX_STROKE_WIDTH` and the text
    /// scale in `1..=MAX_TEXT_SCALE`.
    pub fn clamped(self) -> Self {
        let clamped = Self {
            stroke_width: self.stroke_width.clamp(1, MAX_STROKE_WIDTH),
            text_scale: self.text_scale.clamp(1, MAX_TEXT_SCALE),
            ..self
        };
        if clamped != self {
            warn!(
                stroke_width = self.stroke_width,
                text_scale = self.text_scale,
                "Annotation style clamped to drawable range"
            );
        }
        clamped
    }
}

/// Annotate `image` with the default style.
///
/// Returns a new image of the same size; `image` itself is left untouched.
pub fn annotate(
    image: &RgbImage,
    total_height_m: f64,
    total_width_m: f64,
) -> Result<RgbImage, BauwerkError> {
    annotate_with(
        image,
        &DimensionEstimate::new(total_height_m, total_width_m),
        &AnnotationStyle::default(),
    )
}

/// Annotate `image` with an explicit style.
#[instrument(skip_all, fields(
    width = image.width(),
    height = image.height(),
    total_height_m = estimate.total_height_m,
    total_width_m = estimate.total_width_m,
))]
pub fn annotate_with(
    image: &RgbImage,
    estimate: &DimensionEstimate,
    style: &AnnotationStyle,
) -> Result<RgbImage, BauwerkError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(BauwerkError::InvalidImage(format!(
            "cannot annotate an empty image ({}x{})",
            width, height
        )));
    }

    let style = style.clamped();
    let layout = GuideLayout::for_dimensions(width, height);
    debug!(?layout, "Guide layout computed");

    let mut canvas = image.clone();

    draw_vertical_guide(&mut canvas, &layout, style.stroke_width, style.height_color);
    glyphs::draw_text(
        &mut canvas,
        layout.height_label.x,
        layout.height_label.y,
        &estimate.height_label(),
        style.text_scale,
        style.height_color,
    );

    draw_horizontal_guide(&mut canvas, &layout, style.stroke_width, style.width_color);
    let width_label = estimate.width_label();
    let label_extent = glyphs::text_width(&width_label, style.text_scale);
    glyphs::draw_text(
        &mut canvas,
        keep_inside(layout.width_label.x, label_extent, width),
        layout.width_label.y,
        &width_label,
        style.text_scale,
        style.width_color,
    );

    info!("Measurement annotations drawn");
    Ok(canvas)
}

/// Shift `x` left so that `extent` pixels starting there end inside `limit`,
/// without going past the left edge.
fn keep_inside(x: i32, extent: u32, limit: u32) -> i32 {
    let room = i64::from(limit) - i64::from(extent);
    i64::from(x).min(room).max(0) as i32
}

/// Thick vertical segment centred on the guide's x coordinate, endpoints
/// inclusive.
fn draw_vertical_guide(canvas: &mut RgbImage, layout: &GuideLayout, stroke: u32, color: Rgb<u8>) {
    let (start, _) = layout.vertical;
    let half = (stroke / 2) as i32;
    let rect = Rect::at(start.x - half, start.y).of_size(stroke, layout.vertical_span() + 1);
    draw_filled_rect_mut(canvas, rect, color);
}

/// Thick horizontal segment centred on the guide's y coordinate, endpoints
/// inclusive.
fn draw_horizontal_guide(
    canvas: &mut RgbImage,
    layout: &GuideLayout,
    stroke: u32,
    color: Rgb<u8>,
) {
    let (start, _) = layout.horizontal;
    let half = (stroke / 2) as i32;
    let rect = Rect::at(start.x, start.y - half).of_size(layout.horizontal_span() + 1, stroke);
    draw_filled_rect_mut(canvas, rect, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const GREY: Rgb<u8> = Rgb([90, 90, 90]);

    fn photo(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, GREY)
    }

    #[test]
    fn output_keeps_dimensions_and_input_is_untouched() {
        let src = photo(640, 480);
        let before = src.clone();
        let out = annotate(&src, 2.5, 5.0).unwrap();
        assert_eq!(out.dimensions(), src.dimensions());
        assert_eq!(src, before);
        assert_ne!(out, src);
    }

    #[test]
    fn empty_image_is_invalid() {
        let err = annotate(&RgbImage::new(0, 0), 1.0, 1.0).unwrap_err();
        assert!(matches!(err, BauwerkError::InvalidImage(_)));
    }

    #[test]
    fn vertical_guide_is_green_and_two_pixels_wide() {
        let out = annotate(&photo(400, 300), 1.0, 1.0).unwrap();
        // x = 40, y spans 30..=270.
        for y in [30, 100, 200, 260] {
            assert_eq!(*out.get_pixel(39, y), GREEN, "y={y}");
            assert_eq!(*out.get_pixel(40, y), GREEN, "y={y}");
            assert_eq!(*out.get_pixel(41, y), GREY, "y={y}");
            assert_eq!(*out.get_pixel(38, y), GREY, "y={y}");
        }
        assert_eq!(*out.get_pixel(40, 29), GREY);
    }

    #[test]
    fn horizontal_guide_is_blue() {
        let out = annotate(&photo(400, 300), 1.0, 1.0).unwrap();
        // y = 270, x spans 40..=360.
        for x in [40, 120, 300, 360] {
            assert_eq!(*out.get_pixel(x, 269), BLUE, "x={x}");
            assert_eq!(*out.get_pixel(x, 270), BLUE, "x={x}");
            assert_eq!(*out.get_pixel(x, 271), GREY, "x={x}");
        }
        assert_eq!(*out.get_pixel(361, 270), GREY);
    }

    #[test]
    fn horizontal_guide_doubles_with_width() {
        let blue_in_row = |img: &RgbImage, y: u32| {
            (0..img.width()).filter(|x| *img.get_pixel(*x, y) == BLUE).count()
        };
        let narrow = annotate(&photo(200, 100), 1.0, 1.0).unwrap();
        let wide = annotate(&photo(400, 100), 1.0, 1.0).unwrap();
        // Guide row is 90% of the height; the label sits above it.
        let narrow_len = blue_in_row(&narrow, 90) - 1;
        let wide_len = blue_in_row(&wide, 90) - 1;
        assert_eq!(narrow_len, 160);
        assert_eq!(wide_len, narrow_len * 2);
    }

    #[test]
    fn labels_are_drawn_in_guide_colours() {
        let out = annotate(&photo(400, 300), 12.34, 56.78).unwrap();
        let layout = GuideLayout::for_dimensions(400, 300);

        // 'H' has a full-height left stem: its bottom block is just above the
        // baseline.
        let hx = layout.height_label.x as u32;
        let hy = layout.height_label.y as u32;
        assert_eq!(*out.get_pixel(hx, hy - 1), GREEN);

        // 'W' ends in 01010, so check the row above its last one.
        let wx = layout.width_label.x as u32;
        let wy = layout.width_label.y as u32;
        assert_eq!(*out.get_pixel(wx, wy - 3), BLUE);

        let green_total = out.pixels().filter(|p| **p == GREEN).count();
        let line_only = 2 * (layout.vertical_span() as usize + 1);
        assert!(green_total > line_only, "height label missing");
    }

    #[test]
    fn label_text_changes_with_values() {
        let src = photo(400, 300);
        let a = annotate(&src, 1.0, 1.0).unwrap();
        let b = annotate(&src, 9.0, 1.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn custom_style_is_applied() {
        let style = AnnotationStyle {
            height_color: Rgb([255, 0, 0]),
            width_color: Rgb([255, 255, 0]),
            stroke_width: 4,
            text_scale: 1,
        };
        let est = DimensionEstimate::new(1.0, 1.0);
        let out = annotate_with(&photo(400, 300), &est, &style).unwrap();
        for x in 38..42 {
            assert_eq!(*out.get_pixel(x, 150), Rgb([255, 0, 0]), "x={x}");
        }
        assert_eq!(*out.get_pixel(42, 150), GREY);
        assert_eq!(*out.get_pixel(200, 268), Rgb([255, 255, 0]));
    }

    #[test]
    fn zero_stroke_draws_a_one_pixel_guide() {
        let style = AnnotationStyle {
            stroke_width: 0,
            ..AnnotationStyle::default()
        };
        let est = DimensionEstimate::new(1.0, 1.0);
        let out = annotate_with(&photo(100, 100), &est, &style).unwrap();
        // x = 10, y spans 10..=90.
        assert_eq!(*out.get_pixel(10, 50), GREEN);
        assert_eq!(*out.get_pixel(9, 50), GREY);
        assert_eq!(*out.get_pixel(11, 50), GREY);
    }

    #[test]
    fn oversized_style_is_capped() {
        let huge = AnnotationStyle {
            stroke_width: u32::MAX,
            text_scale: 700_000_000,
            ..AnnotationStyle::default()
        };
        let capped = huge.clamped();
        assert_eq!(capped.stroke_width, MAX_STROKE_WIDTH);
        assert_eq!(capped.text_scale, MAX_TEXT_SCALE);

        let est = DimensionEstimate::new(12.34, 56.78);
        let out = annotate_with(&photo(200, 150), &est, &huge).unwrap();
        assert_eq!(out.dimensions(), (200, 150));
    }

    #[test]
    fn settings_are_clamped_into_style() {
        let settings = AnnotationSettings {
            stroke_width: 0,
            text_scale: 1_000,
            ..AnnotationSettings::default()
        };
        let style = AnnotationStyle::from(&settings);
        assert_eq!(style.stroke_width, 1);
        assert_eq!(style.text_scale, MAX_TEXT_SCALE);
    }

    #[test]
    fn width_label_stays_inside_narrow_images() {
        // The label is wider than half of the narrow image, so it must be
        // shifted left rather than clipped.
        let label_ink = |img: &RgbImage| {
            (60..88)
                .flat_map(|y| (0..img.width()).map(move |x| (x, y)))
                .filter(|(x, y)| *img.get_pixel(*x, *y) == BLUE)
                .count()
        };
        let narrow = annotate(&photo(200, 100), 1.0, 1.0).unwrap();
        let wide = annotate(&photo(400, 100), 1.0, 1.0).unwrap();
        assert!(label_ink(&wide) > 0);
        assert_eq!(label_ink(&narrow), label_ink(&wide));
    }

    #[test]
    fn keep_inside_shifts_only_when_needed() {
        assert_eq!(keep_inside(100, 50, 400), 100);
        assert_eq!(keep_inside(100, 150, 200), 50);
        assert_eq!(keep_inside(100, 500, 200), 0);
    }

    #[test]
    fn tiny_images_do_not_panic() {
        for (w, h) in [(1, 1), (2, 3), (9, 9)] {
            let out = annotate(&photo(w, h), 3.0, 4.0).unwrap();
            assert_eq!(out.dimensions(), (w, h));
        }
    }
}
