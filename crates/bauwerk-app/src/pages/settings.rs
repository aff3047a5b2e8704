// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use dioxus::prelude::*;

use bauwerk_core::PaperSize;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const ROW_STYLE: &str = "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;";
const INPUT_STYLE: &str = "width: 100px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;";

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "New photos" }
                div { style: ROW_STYLE,
                    span { "Default known length (meters)" }
                    input {
                        r#type: "number",
                        min: "0.1",
                        step: "0.1",
                        style: INPUT_STYLE,
                        value: "{state.read().config.default_known_length_m}",
                        onchange: move |evt| {
                            if let Ok(m) = evt.value().parse::<f64>()
                                && m > 0.0
                            {
                                state.write().config.default_known_length_m = m;
                            }
                        },
                    }
                }
                div { style: ROW_STYLE,
                    span { "Default known length (pixels)" }
                    input {
                        r#type: "number",
                        min: "1",
                        style: INPUT_STYLE,
                        value: "{state.read().config.default_known_pixels}",
                        onchange: move |evt| {
                            if let Ok(px) = evt.value().parse::<u32>()
                                && px > 0
                            {
                                state.write().config.default_known_pixels = px;
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                div { style: ROW_STYLE,
                    span { "JPEG quality" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "100",
                        style: INPUT_STYLE,
                        value: "{state.read().config.jpeg_quality}",
                        onchange: move |evt| {
                            if let Ok(q) = evt.value().parse::<u8>()
                                && (1..=100).contains(&q)
                            {
                                state.write().config.jpeg_quality = q;
                            }
                        },
                    }
                }
                div { style: ROW_STYLE,
                    span { "Report paper size" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: state.read().config.report_paper_size.label(),
                        onchange: move |evt| {
                            if let Some(ps) = PaperSize::from_label(&evt.value()) {
                                state.write().config.report_paper_size = ps;
                            }
                        },
                        for ps in [PaperSize::A4, PaperSize::A5, PaperSize::Letter, PaperSize::Legal] {
                            option { value: ps.label(), "{ps.label()}" }
                        }
                    }
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Bauwerk v0.1.0"
                    br {}
                    "Building dimension estimates from a single photo"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}
