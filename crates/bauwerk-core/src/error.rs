// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bauwerk.

use thiserror::Error;

/// Top-level error type for all Bauwerk operations.
#[derive(Debug, Error)]
pub enum BauwerkError {
    // -- Input errors --
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("division by zero in scale calculation")]
    DivisionByZero,

    // -- Output errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BauwerkError>;
