// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bauwerk.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pixel length used as the known side of the calibration pair when the user
/// has not moved the slider yet.
pub const DEFAULT_KNOWN_PIXELS: u32 = 100;

/// Pixel extent of the building in the source image, one count per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingPixels {
    pub height_px: u32,
    pub width_px: u32,
}

/// Everything the user picks on the image: the calibration pixel length and
/// the building's extent along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSelection {
    /// Pixel length of the reference object (e.g. a window).
    pub known_length_px: u32,
    /// Pixel height of the whole building.
    pub building_height_px: u32,
    /// Pixel width of the whole building.
    pub building_width_px: u32,
}

impl PixelSelection {
    /// Starting slider positions for an image of `width` x `height` pixels.
    ///
    /// The known length starts at 100 px, the building extent at half of each
    /// image dimension. Every value is at least 1 and within the image.
    pub fn defaults_for(width: u32, height: u32) -> Self {
        Self {
            known_length_px: DEFAULT_KNOWN_PIXELS,
            building_height_px: height / 2,
            building_width_px: width / 2,
        }
        .clamped_to(width, height)
    }

    /// Clamp every pixel value into the slider range for an image of
    /// `width` x `height` pixels.
    ///
    /// Vertical values live in `1..=height`, the horizontal one in
    /// `1..=width`. The known length is not compared against the building
    /// height.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let max_h = height.max(1);
        let max_w = width.max(1);
        let clamped = Self {
            known_length_px: self.known_length_px.clamp(1, max_h),
            building_height_px: self.building_height_px.clamp(1, max_h),
            building_width_px: self.building_width_px.clamp(1, max_w),
        };
        if clamped != self {
            warn!(
                requested = ?self,
                clamped = ?clamped,
                width,
                height,
                "Pixel selection clamped to image bounds"
            );
        }
        clamped
    }

    /// The building extent part of the selection.
    pub fn building(&self) -> BuildingPixels {
        BuildingPixels {
            height_px: self.building_height_px,
            width_px: self.building_width_px,
        }
    }
}

/// Real-world building size derived from one calibration pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionEstimate {
    /// Approximate total height in metres.
    pub total_height_m: f64,
    /// Approximate total width in metres.
    pub total_width_m: f64,
}

impl DimensionEstimate {
    pub fn new(total_height_m: f64, total_width_m: f64) -> Self {
        Self {
            total_height_m,
            total_width_m,
        }
    }

    /// Label burned next to the vertical guide line.
    pub fn height_label(&self) -> String {
        format!("Height: {:.2} m", self.total_height_m)
    }

    /// Label burned above the horizontal guide line.
    pub fn width_label(&self) -> String {
        format!("Width: {:.2} m", self.total_width_m)
    }

    /// The two body lines of the summary report.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Approximate total height: {:.2} meters", self.total_height_m),
            format!("Approximate total width: {:.2} meters", self.total_width_m),
        ]
    }
}

/// A downloadable output: bytes plus the file name and MIME type offered to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub const ANNOTATED_IMAGE_FILE: &'static str = "annotated_image.jpg";
    pub const REPORT_FILE: &'static str = "building_estimates.pdf";

    /// JPEG-encoded annotated photo.
    pub fn annotated_image(bytes: Vec<u8>) -> Self {
        Self {
            file_name: Self::ANNOTATED_IMAGE_FILE,
            mime_type: "image/jpeg",
            bytes,
        }
    }

    /// Serialised summary report.
    pub fn report(bytes: Vec<u8>) -> Self {
        Self {
            file_name: Self::REPORT_FILE,
            mime_type: "application/pdf",
            bytes,
        }
    }

    /// File extension of the suggested file name, without the dot.
    pub fn extension(&self) -> &'static str {
        self.file_name.rsplit('.').next().unwrap_or_default()
    }
}

/// Standard paper sizes for the report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Short name for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::Letter => "Letter",
            Self::Legal => "Legal",
            Self::Custom { .. } => "Custom",
        }
    }

    /// Parse a menu label back into a standard size.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A4" => Some(Self::A4),
            "A5" => Some(Self::A5),
            "Letter" => Some(Self::Letter),
            "Legal" => Some(Self::Legal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_half_the_image() {
        let sel = PixelSelection::defaults_for(800, 600);
        assert_eq!(sel.known_length_px, 100);
        assert_eq!(sel.building_height_px, 300);
        assert_eq!(sel.building_width_px, 400);
    }

    #[test]
    fn defaults_fit_tiny_images() {
        let sel = PixelSelection::defaults_for(1, 50);
        assert_eq!(sel.known_length_px, 50);
        assert_eq!(sel.building_height_px, 25);
        assert_eq!(sel.building_width_px, 1);
    }

    #[test]
    fn clamp_keeps_values_in_slider_range() {
        let sel = PixelSelection {
            known_length_px: 0,
            building_height_px: 5000,
            building_width_px: 9000,
        }
        .clamped_to(640, 480);
        assert_eq!(sel.known_length_px, 1);
        assert_eq!(sel.building_height_px, 480);
        assert_eq!(sel.building_width_px, 640);
    }

    #[test]
    fn known_length_may_exceed_building_height() {
        let sel = PixelSelection {
            known_length_px: 400,
            building_height_px: 100,
            building_width_px: 100,
        }
        .clamped_to(640, 480);
        assert_eq!(sel.known_length_px, 400);
        assert_eq!(sel.building_height_px, 100);
    }

    #[test]
    fn labels_use_two_decimals() {
        let est = DimensionEstimate::new(3.456, 7.891);
        assert_eq!(est.height_label(), "Height: 3.46 m");
        assert_eq!(est.width_label(), "Width: 7.89 m");
        let [h, w] = est.summary_lines();
        assert_eq!(h, "Approximate total height: 3.46 meters");
        assert_eq!(w, "Approximate total width: 7.89 meters");
    }

    #[test]
    fn artifacts_carry_download_names() {
        let img = Artifact::annotated_image(vec![1, 2, 3]);
        assert_eq!(img.file_name, "annotated_image.jpg");
        assert_eq!(img.mime_type, "image/jpeg");
        assert_eq!(img.extension(), "jpg");

        let pdf = Artifact::report(Vec::new());
        assert_eq!(pdf.file_name, "building_estimates.pdf");
        assert_eq!(pdf.mime_type, "application/pdf");
        assert_eq!(pdf.extension(), "pdf");
    }

    #[test]
    fn paper_labels_round_trip() {
        for size in [PaperSize::A4, PaperSize::A5, PaperSize::Letter, PaperSize::Legal] {
            assert_eq!(PaperSize::from_label(size.label()), Some(size));
        }
        assert_eq!(PaperSize::from_label("Tabloid"), None);
    }
}
