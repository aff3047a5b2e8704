// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_KNOWN_PIXELS, PaperSize};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JPEG quality (1-100) for the annotated image download.
    pub jpeg_quality: u8,
    /// Page size of the PDF summary report.
    pub report_paper_size: PaperSize,
    /// Pre-filled known length in metres (e.g. a typical window height).
    pub default_known_length_m: f64,
    /// Pre-filled pixel length of the known object.
    pub default_known_pixels: u32,
    /// Colours and stroke sizes of the burned-in annotations.
    pub annotation: AnnotationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            report_paper_size: PaperSize::A4,
            default_known_length_m: 1.0,
            default_known_pixels: DEFAULT_KNOWN_PIXELS,
            annotation: AnnotationSettings::default(),
        }
    }
}

/// Look of the guide lines and labels drawn on the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    /// RGB colour of the vertical (height) guide and its label.
    pub height_color: [u8; 3],
    /// RGB colour of the horizontal (width) guide and its label.
    pub width_color: [u8; 3],
    /// Guide line thickness in pixels.
    pub stroke_width: u32,
    /// Integer magnification of the 5x7 label glyphs.
    pub text_scale: u32,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            height_color: [0, 255, 0],
            width_color: [0, 0, 255],
            stroke_width: 2,
            text_scale: 2,
        }
    }
}
