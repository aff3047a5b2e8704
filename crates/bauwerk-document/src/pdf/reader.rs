// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report reader: open a rendered report with `lopdf` and inspect its pages
// and text.

use std::path::Path;

use bauwerk_core::error::BauwerkError;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Read-only view of a PDF report.
pub struct ReportReader {
    /// The underlying lopdf document.
    document: Document,
}

impl ReportReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BauwerkError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BauwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BauwerkError> {
        let document = Document::load_mem(data).map_err(|err| {
            BauwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Text of all pages, in page order.
    pub fn extract_text(&self) -> Result<String, BauwerkError> {
        let pages: Vec<u32> = self.document.get_pages().keys().copied().collect();
        self.document
            .extract_text(&pages)
            .map_err(|err| BauwerkError::PdfError(format!("failed to extract text: {}", err)))
    }

    /// Width and height of the first page in points, from its /MediaBox.
    pub fn first_page_size_pt(&self) -> Result<(f32, f32), BauwerkError> {
        let page_id = self
            .document
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| BauwerkError::PdfError("document has no pages".into()))?;

        let media_box = self.inherited_attribute(page_id, b"MediaBox")?;
        let corners = media_box
            .as_array()
            .map_err(|err| BauwerkError::PdfError(format!("malformed /MediaBox: {}", err)))?
            .iter()
            .map(|value| {
                value
                    .as_float()
                    .map_err(|err| BauwerkError::PdfError(format!("malformed /MediaBox: {}", err)))
            })
            .collect::<Result<Vec<f32>, _>>()?;

        match corners.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(BauwerkError::PdfError(format!(
                "/MediaBox has {} entries, expected 4",
                corners.len()
            ))),
        }
    }

    /// Look up `key` on a page, walking /Parent links for inherited values.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Result<&Object, BauwerkError> {
        let mut current = page_id;
        loop {
            let dict = self.document.get_dictionary(current).map_err(|err| {
                BauwerkError::PdfError(format!("cannot read page {:?}: {}", current, err))
            })?;
            if let Ok(value) = dict.get(key) {
                return match value {
                    Object::Reference(id) => self.document.get_object(*id).map_err(|err| {
                        BauwerkError::PdfError(format!("dangling reference {:?}: {}", id, err))
                    }),
                    other => Ok(other),
                };
            }
            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| {
                    BauwerkError::PdfError(format!(
                        "/{} not found on page or its parents",
                        String::from_utf8_lossy(key)
                    ))
                })?;
        }
    }
}
