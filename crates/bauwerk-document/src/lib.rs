// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bauwerk-document: the raster and document side of Bauwerk.
//
// Decodes the building photo, burns measurement guides and labels into a
// copy of it, renders the PDF summary report, and wires those steps together
// with the scale calculator for a single request.

pub mod annotate;
pub mod image;
pub mod pdf;
pub mod pipeline;

// Re-export the primary items so callers can use `bauwerk_document::annotate` etc.
pub use annotate::{AnnotationStyle, GuideLayout, annotate, annotate_with};
pub use image::SourceImage;
pub use pdf::{ReportReader, ReportWriter, render_report};
pub use pipeline::{EstimateOutcome, EstimateRequest, PipelineOptions, run_estimate};
