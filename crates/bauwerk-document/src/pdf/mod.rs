// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: rendering and inspecting the dimension summary report.

pub mod reader;
pub mod writer;

pub use reader::ReportReader;
pub use writer::{REPORT_TITLE, ReportWriter, render_report};
