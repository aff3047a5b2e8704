// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the UI presents the message.

use crate::error::BauwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something went wrong that may work on a second try (disk busy, etc.).
    Transient,
    /// The user must change an input before continuing.
    ActionRequired,
    /// Cannot be fixed by retrying or by changing a value (wrong file, etc.).
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again unchanged could succeed.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BauwerkError` into a `HumanError` for display.
pub fn humanize_error(err: &BauwerkError) -> HumanError {
    match err {
        BauwerkError::InvalidCalibration(detail) => HumanError {
            message: "The reference measurement isn't usable.".into(),
            suggestion: format!(
                "Enter a known length above zero and mark at least one pixel for it. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BauwerkError::DivisionByZero => HumanError {
            message: "The measurement couldn't be calculated.".into(),
            suggestion: "The reference length in pixels must be larger than zero. Move the slider and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BauwerkError::InvalidImage(_) => HumanError {
            message: "This photo can't be opened.".into(),
            suggestion: "The file may be damaged or not a photo. Choose a JPEG or PNG picture of the building.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BauwerkError::ImageError(_) => HumanError {
            message: "The annotated photo couldn't be created.".into(),
            suggestion: "Try again. If this keeps happening, try a smaller photo.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BauwerkError::PdfError(_) => HumanError {
            message: "The PDF report couldn't be created.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        BauwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different folder.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        BauwerkError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read or written.".into(),
            suggestion: "Open Settings and save again to restore it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_is_action_required() {
        let err = BauwerkError::InvalidCalibration("known length must be positive".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.suggestion.contains("known length must be positive"));
    }

    #[test]
    fn division_by_zero_is_action_required() {
        let human = humanize_error(&BauwerkError::DivisionByZero);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn bad_image_is_permanent() {
        let human = humanize_error(&BauwerkError::InvalidImage("zero width".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = BauwerkError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn other_io_is_transient() {
        let err = BauwerkError::Io(std::io::Error::other("disk hiccup"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }
}
