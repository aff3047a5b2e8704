// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Estimate pipeline: one user request in, estimate plus both downloadable
// artifacts out.
//
// Calibration is validated first, then the scale calculator runs once per
// axis, and the annotator and report writer each receive the result. Every
// input arrives as a parameter; nothing is read from ambient state.

use bauwerk_core::error::Result;
use bauwerk_core::{
    AppConfig, Artifact, Calibration, DimensionEstimate, PaperSize, PixelSelection,
    estimate_dimensions,
};
use image::RgbImage;
use tracing::{info, instrument};

use crate::annotate::{AnnotationStyle, annotate_with};
use crate::image::{SourceImage, encode_jpeg};
use crate::pdf::ReportWriter;

/// The user's inputs for one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateRequest {
    /// Real length of the reference object in metres.
    pub known_length_m: f64,
    /// Calibration and building pixel lengths picked on the photo.
    pub selection: PixelSelection,
}

/// Output settings that do not change the numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub jpeg_quality: u8,
    pub paper_size: PaperSize,
    pub style: AnnotationStyle,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl PipelineOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            paper_size: config.report_paper_size,
            style: AnnotationStyle::from(&config.annotation),
        }
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone)]
pub struct EstimateOutcome {
    pub estimate: DimensionEstimate,
    /// Annotated pixels, for on-screen preview.
    pub annotated: RgbImage,
    /// `annotated_image.jpg`
    pub image_artifact: Artifact,
    /// `building_estimates.pdf`
    pub report_artifact: Artifact,
}

/// Run calculator, annotator, and report writer for one request.
///
/// `source` is only read; the annotated result is a new image.
#[instrument(skip_all, fields(
    width = source.width(),
    height = source.height(),
    known_length_m = request.known_length_m,
    selection = ?request.selection,
))]
pub fn run_estimate(
    source: &SourceImage,
    request: &EstimateRequest,
    options: &PipelineOptions,
) -> Result<EstimateOutcome> {
    let calibration = Calibration::new(request.known_length_m, request.selection.known_length_px)?;
    let estimate = estimate_dimensions(&calibration, request.selection.building())?;
    info!(
        total_height_m = estimate.total_height_m,
        total_width_m = estimate.total_width_m,
        "Building dimensions estimated"
    );

    let annotated = annotate_with(&source.to_rgb(), &estimate, &options.style)?;
    let jpeg = encode_jpeg(&annotated, options.jpeg_quality)?;
    let report = ReportWriter::new(options.paper_size).render(&estimate)?;

    info!(
        image_bytes = jpeg.len(),
        report_bytes = report.len(),
        "Estimate artifacts ready"
    );

    Ok(EstimateOutcome {
        estimate,
        annotated,
        image_artifact: Artifact::annotated_image(jpeg),
        report_artifact: Artifact::report(report),
    })
}
