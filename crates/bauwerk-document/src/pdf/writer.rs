// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report writer: renders the one-page dimension summary with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. printpdf fills the trailer /ID with random bytes, so
// the saved file is reopened with lopdf and given an ID derived from the
// estimate. The same estimate therefore always yields the same bytes.

use std::path::Path;

use bauwerk_core::error::BauwerkError;
use bauwerk_core::{DimensionEstimate, PaperSize};
use lopdf::{Object, StringFormat};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, info, instrument};

/// Heading printed at the top of every report.
pub const REPORT_TITLE: &str = "Building Dimension Estimates";

const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;
const TOP_MARGIN_MM: f32 = 10.0;
const LEFT_MARGIN_MM: f32 = 10.0;
/// Height of one text row; the title row is followed by one blank row.
const ROW_MM: f32 = 10.0;

/// Renders the dimension summary report.
pub struct ReportWriter {
    /// Paper size for the single page.
    paper_size: PaperSize,
}

impl ReportWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Render the report: a centred bold heading, then the approximate height
    /// and width, each to two decimals.
    #[instrument(skip(self), fields(
        paper = ?self.paper_size,
        total_height_m = estimate.total_height_m,
        total_width_m = estimate.total_width_m,
    ))]
    pub fn render(&self, estimate: &DimensionEstimate) -> Result<Vec<u8>, BauwerkError> {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let row_pt = Mm(ROW_MM).into_pt().0;
        let left_pt = Mm(LEFT_MARGIN_MM).into_pt().0;

        // Baselines sit a little below the middle of each row.
        let first_row_top = page_h_pt - Mm(TOP_MARGIN_MM).into_pt().0;
        let baseline_in_row = |row: usize, size_pt: f32| {
            first_row_top - row as f32 * row_pt - (row_pt + size_pt * 0.7) / 2.0
        };

        let mut ops: Vec<Op> = Vec::new();

        let title_width = estimate_text_width_pt(REPORT_TITLE, TITLE_SIZE_PT, true);
        push_text_line(
            &mut ops,
            REPORT_TITLE,
            BuiltinFont::HelveticaBold,
            TITLE_SIZE_PT,
            ((page_w_pt - title_width) / 2.0).max(left_pt),
            baseline_in_row(0, TITLE_SIZE_PT),
        );

        // Row 1 is left blank under the heading.
        for (i, line) in estimate.summary_lines().iter().enumerate() {
            push_text_line(
                &mut ops,
                line,
                BuiltinFont::Helvetica,
                BODY_SIZE_PT,
                left_pt,
                baseline_in_row(i + 2, BODY_SIZE_PT),
            );
        }

        let mut doc = PdfDocument::new(REPORT_TITLE);
        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let saved = doc.save(&PdfSaveOptions::default(), &mut warnings);
        let output = with_stable_id(&saved, estimate)?;

        debug!(warnings = warnings.len(), title_width, "Report layout complete");
        info!(bytes = output.len(), "Report rendered");

        Ok(output)
    }

    /// Render the report and write it directly to a file.
    pub fn write_to_file(
        &self,
        estimate: &DimensionEstimate,
        path: impl AsRef<Path>,
    ) -> Result<(), BauwerkError> {
        let bytes = self.render(estimate)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote report to {}", path.as_ref().display());
        Ok(())
    }
}

/// Render the A4 summary report for the given height and width in metres.
pub fn render_report(total_height_m: f64, total_width_m: f64) -> Result<Vec<u8>, BauwerkError> {
    ReportWriter::a4().render(&DimensionEstimate::new(total_height_m, total_width_m))
}

/// Replace the trailer /ID of a saved report with one built from `estimate`.
fn with_stable_id(pdf: &[u8], estimate: &DimensionEstimate) -> Result<Vec<u8>, BauwerkError> {
    let mut doc = lopdf::Document::load_mem(pdf)
        .map_err(|e| BauwerkError::PdfError(format!("failed to reload report: {e}")))?;

    let mut id = Vec::with_capacity(16);
    id.extend_from_slice(&estimate.total_height_m.to_bits().to_be_bytes());
    id.extend_from_slice(&estimate.total_width_m.to_bits().to_be_bytes());
    let id = Object::String(id, StringFormat::Hexadecimal);
    doc.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let mut output = Vec::with_capacity(pdf.len());
    doc.save_to(&mut output)
        .map_err(|e| BauwerkError::PdfError(format!("failed to write report: {e}")))?;
    Ok(output)
}

fn push_text_line(ops: &mut Vec<Op>, text: &str, font: BuiltinFont, size_pt: f32, x: f32, y: f32) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size_pt),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Approximate rendered width of `text` in points.
///
/// Helvetica averages roughly half an em per glyph for mixed-case text; the
/// bold cut runs a little wider.
fn estimate_text_width_pt(text: &str, size_pt: f32, bold: bool) -> f32 {
    let em_fraction = if bold { 0.56 } else { 0.50 };
    text.chars().count() as f32 * size_pt * em_fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::ReportReader;

    #[test]
    fn report_is_a_single_page_pdf() {
        let bytes = render_report(2.5, 5.0).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let reader = ReportReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn report_text_has_two_decimal_values() {
        let bytes = render_report(3.456, 7.891).unwrap();
        let text = ReportReader::from_bytes(&bytes).unwrap().extract_text().unwrap();
        assert!(text.contains("3.46"), "{text}");
        assert!(text.contains("7.89"), "{text}");
        assert!(!text.contains("3.456"), "{text}");
        assert!(text.contains("Building Dimension Estimates"), "{text}");
        assert!(text.contains("Approximate total height"), "{text}");
        assert!(text.contains("Approximate total width"), "{text}");
    }

    #[test]
    fn paper_size_sets_media_box() {
        let writer = ReportWriter::new(PaperSize::Letter);
        let bytes = writer.render(&DimensionEstimate::new(1.0, 1.0)).unwrap();
        let reader = ReportReader::from_bytes(&bytes).unwrap();
        let (w, h) = reader.first_page_size_pt().unwrap();
        assert!((w - Mm(216.0).into_pt().0).abs() < 1.0, "width {w}");
        assert!((h - Mm(279.0).into_pt().0).abs() < 1.0, "height {h}");
    }

    #[test]
    fn same_inputs_same_bytes() {
        let a = render_report(3.456, 7.891).unwrap();
        let b = render_report(3.456, 7.891).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trailer_id_follows_the_estimate() {
        let a = render_report(10.0, 20.0).unwrap();
        let b = render_report(10.0, 21.0).unwrap();
        let id_of = |bytes: &[u8]| {
            let doc = lopdf::Document::load_mem(bytes).unwrap();
            doc.trailer.get(b"ID").unwrap().clone()
        };
        let id = id_of(&a);
        let parts = id.as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], parts[1]);
        assert_ne!(id, id_of(&b));
    }

    #[test]
    fn write_to_file_creates_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("building_estimates.pdf");
        ReportWriter::a4()
            .write_to_file(&DimensionEstimate::new(1.0, 2.0), &path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn title_is_roughly_centred() {
        let width = estimate_text_width_pt(REPORT_TITLE, TITLE_SIZE_PT, true);
        let page_w = Mm(210.0).into_pt().0;
        let x = (page_w - width) / 2.0;
        assert!(x > 0.0 && x + width < page_w);
    }
}
