// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the Dioxus UI to the bauwerk backend crates.
//
// The UI hands every input over explicitly and gets back data it can display
// directly (estimates, preview URLs, artifacts to save).

pub mod app_services;
pub mod data_dir;
