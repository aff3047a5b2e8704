// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use bauwerk_core::AppConfig;

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Application settings, edited on the Settings page and read when a new
    /// photo is loaded.
    pub config: AppConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            config: svc.config(),
            status_message: None,
        }
    }
}
