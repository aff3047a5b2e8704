// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scale calculator: converts pixel lengths into metres using a single
// calibration pair (a known real length and its pixel length in the same
// photo). Plain proportional scaling, no perspective correction.

use tracing::{debug, instrument};

use crate::error::{BauwerkError, Result};
use crate::types::{BuildingPixels, DimensionEstimate};

/// Solve `target_pixel_length` for metres given one calibration pair:
/// `(target / known_pixel) * known_real`.
///
/// Fails with [`BauwerkError::DivisionByZero`] when `known_pixel_length` is
/// zero, or when the inputs would otherwise yield an infinite or NaN result.
pub fn compute_real_length(
    known_real_length: f64,
    known_pixel_length: f64,
    target_pixel_length: f64,
) -> Result<f64> {
    if known_pixel_length == 0.0 {
        return Err(BauwerkError::DivisionByZero);
    }
    let result = (target_pixel_length / known_pixel_length) * known_real_length;
    if !result.is_finite() {
        return Err(BauwerkError::DivisionByZero);
    }
    Ok(result)
}

/// A validated calibration pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    known_length_m: f64,
    known_length_px: u32,
}

impl Calibration {
    /// Build a calibration from a real length in metres and its pixel length.
    ///
    /// Both must be strictly positive; the length must also be finite.
    pub fn new(known_length_m: f64, known_length_px: u32) -> Result<Self> {
        if !known_length_m.is_finite() || known_length_m <= 0.0 {
            return Err(BauwerkError::InvalidCalibration(format!(
                "known length must be a positive number of metres, got {known_length_m}"
            )));
        }
        if known_length_px == 0 {
            return Err(BauwerkError::InvalidCalibration(
                "known pixel length must be at least 1 pixel".into(),
            ));
        }
        Ok(Self {
            known_length_m,
            known_length_px,
        })
    }

    /// Metres represented by a single pixel.
    pub fn meters_per_pixel(&self) -> f64 {
        self.known_length_m / f64::from(self.known_length_px)
    }

    /// Real length of `pixels` under this calibration.
    pub fn real_length(&self, pixels: u32) -> Result<f64> {
        compute_real_length(
            self.known_length_m,
            f64::from(self.known_length_px),
            f64::from(pixels),
        )
    }
}

/// Estimate the building's height and width from its pixel extent, using the
/// same calibration for both axes.
#[instrument(skip_all, fields(
    known_m = calibration.known_length_m,
    known_px = calibration.known_length_px,
    height_px = pixels.height_px,
    width_px = pixels.width_px,
))]
pub fn estimate_dimensions(
    calibration: &Calibration,
    pixels: BuildingPixels,
) -> Result<DimensionEstimate> {
    let total_height_m = calibration.real_length(pixels.height_px)?;
    let total_width_m = calibration.real_length(pixels.width_px)?;
    debug!(total_height_m, total_width_m, "Dimensions estimated");
    Ok(DimensionEstimate::new(total_height_m, total_width_m))
}
