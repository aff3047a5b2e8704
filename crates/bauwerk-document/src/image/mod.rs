// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: decode the uploaded photo and encode annotated output.

pub mod source;

pub use source::{SourceImage, encode_jpeg, encode_png};
