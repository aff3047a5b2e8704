// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bauwerk: core types, error definitions, and the scale calculator shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod scale;
pub mod types;

pub use config::{AnnotationSettings, AppConfig};
pub use error::BauwerkError;
pub use scale::{Calibration, compute_real_length, estimate_dimensions};
pub use types::*;
