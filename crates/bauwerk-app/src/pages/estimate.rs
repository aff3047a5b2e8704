// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Estimate page: load a photo, pick the calibration and building lengths in
// pixels, then calculate and download the annotated image and the report.
//
// Results are cleared whenever an input changes so what is shown always
// matches the current sliders.

use dioxus::prelude::*;

use bauwerk_core::human_errors::{HumanError, humanize_error};
use bauwerk_core::{Artifact, PixelSelection};
use bauwerk_document::{EstimateOutcome, EstimateRequest};

use crate::services::app_services::{AppServices, LoadedPhoto, data_url};
use crate::state::AppState;

/// A finished calculation plus its on-screen preview.
#[derive(Clone)]
struct Shown {
    outcome: EstimateOutcome,
    preview_url: String,
}

#[component]
pub fn Estimate() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let mut photo = use_signal(|| Option::<LoadedPhoto>::None);
    let mut known_length_m = use_signal(|| state.read().config.default_known_length_m);
    let mut selection = use_signal(|| PixelSelection::defaults_for(1, 1));
    let mut shown = use_signal(|| Option::<Shown>::None);
    let mut failure = use_signal(|| Option::<HumanError>::None);
    let mut length_text = use_signal(|| known_length_m.peek().to_string());
    let mut length_error = use_signal(|| Option::<String>::None);

    let dims = photo
        .read()
        .as_ref()
        .map(|p| (p.source.width(), p.source.height()));

    rsx! {
        div {
            h1 { "Building Dimension Estimator" }
            p { style: "color: #666;",
                "Upload a photo of a building, mark something of known length, and estimate the building's height and width."
            }

            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 16px; margin: 16px 0;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png"])
                            .pick_file()
                        else {
                            return;
                        };
                        match svc.load_photo(&path) {
                            Ok(loaded) => {
                                let (w, h) = (loaded.source.width(), loaded.source.height());
                                let config = state.read().config.clone();
                                selection.set(
                                    PixelSelection {
                                        known_length_px: config.default_known_pixels,
                                        ..PixelSelection::defaults_for(w, h)
                                    }
                                    .clamped_to(w, h),
                                );
                                known_length_m.set(config.default_known_length_m);
                                length_text.set(config.default_known_length_m.to_string());
                                length_error.set(None);
                                state.write().status_message = Some(format!("Loaded {}", loaded.name));
                                photo.set(Some(loaded));
                                shown.set(None);
                                failure.set(None);
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "photo could not be loaded");
                                failure.set(Some(humanize_error(&e)));
                            }
                        }
                    }
                },
                "Choose a photo (JPG or PNG)"
            }

            if let Some(ref err) = *failure.read() {
                div { style: "padding: 12px; border-radius: 8px; background: #fff0f0; color: #c00; margin-bottom: 12px;",
                    strong { "{err.message}" }
                    p { style: "margin: 4px 0 0; color: #555;", "{err.suggestion}" }
                }
            }

            if let Some((width, height)) = dims {
                if let Some(ref loaded) = *photo.read() {
                    figure { style: "margin: 0 0 16px;",
                        img { src: "{loaded.preview_url}", style: "max-width: 100%; border-radius: 8px;" }
                        figcaption { style: "color: #888; font-size: 12px;",
                            "{loaded.name}: {width} x {height} px"
                        }
                    }
                }

                section { style: "margin: 16px 0;",
                    h3 { "Reference object" }
                    div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                        span { "Known length (meters)" }
                        input {
                            r#type: "number",
                            min: "0.1",
                            step: "0.1",
                            style: "width: 100px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                            value: "{length_text}",
                            oninput: move |evt| {
                                shown.set(None);
                                length_text.set(evt.value());
                                match parse_known_length(&evt.value()) {
                                    Ok(m) => {
                                        known_length_m.set(m);
                                        length_error.set(None);
                                    }
                                    Err(msg) => length_error.set(Some(msg)),
                                }
                            },
                        }
                    }
                    if let Some(ref msg) = *length_error.read() {
                        p { style: "color: #c00; font-size: 13px; margin: 4px 0 0;", "{msg}" }
                    }
                    PixelSlider {
                        label: "Known length in pixels",
                        max: height,
                        value: selection.read().known_length_px,
                        on_change: move |px: u32| {
                            selection.write().known_length_px = px;
                            shown.set(None);
                        },
                    }
                }

                section { style: "margin: 16px 0;",
                    h3 { "Building" }
                    PixelSlider {
                        label: "Building height in pixels",
                        max: height,
                        value: selection.read().building_height_px,
                        on_change: move |px: u32| {
                            selection.write().building_height_px = px;
                            shown.set(None);
                        },
                    }
                    PixelSlider {
                        label: "Building width in pixels",
                        max: width,
                        value: selection.read().building_width_px,
                        on_change: move |px: u32| {
                            selection.write().building_width_px = px;
                            shown.set(None);
                        },
                    }
                }

                button {
                    style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                    disabled: length_error.read().is_some(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let request = EstimateRequest {
                                known_length_m: *known_length_m.read(),
                                selection: *selection.read(),
                            };
                            let result = match photo.read().as_ref() {
                                Some(loaded) => svc.estimate(loaded, &request),
                                None => return,
                            };
                            match result {
                                Ok(outcome) => {
                                    let preview_url = data_url(
                                        outcome.image_artifact.mime_type,
                                        &outcome.image_artifact.bytes,
                                    );
                                    shown.set(Some(Shown { outcome, preview_url }));
                                    failure.set(None);
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "estimate failed");
                                    shown.set(None);
                                    failure.set(Some(humanize_error(&e)));
                                }
                            }
                        }
                    },
                    "Calculate dimensions"
                }
            } else {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "No photo loaded yet."
                }
            }

            if let Some(ref result) = *shown.read() {
                {
                    let [height_line, width_line] = result.outcome.estimate.summary_lines();
                    rsx! {
                        section { style: "margin: 24px 0;",
                            h3 { "Results" }
                            p { "{height_line}" }
                            p { "{width_line}" }
                            img { src: "{result.preview_url}", style: "max-width: 100%; border-radius: 8px;" }
                            div { style: "display: flex; gap: 8px; margin-top: 16px;",
                                SaveButton {
                                    label: "Download annotated image",
                                    artifact: result.outcome.image_artifact.clone(),
                                }
                                SaveButton {
                                    label: "Download PDF report",
                                    artifact: result.outcome.report_artifact.clone(),
                                }
                            }
                        }
                    }
                }
            }

            if let Some(ref msg) = state.read().status_message {
                p { style: "color: #666; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }
        }
    }
}

/// A labelled `1..=max` range input.
#[component]
fn PixelSlider(label: &'static str, max: u32, value: u32, on_change: EventHandler<u32>) -> Element {
    rsx! {
        div { style: "padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            div { style: "display: flex; justify-content: space-between;",
                span { "{label}" }
                span { style: "color: #888;", "{value} px" }
            }
            input {
                r#type: "range",
                min: "1",
                max: "{max}",
                value: "{value}",
                style: "width: 100%;",
                oninput: move |evt| {
                    if let Ok(px) = evt.value().parse::<u32>() {
                        on_change.call(px);
                    }
                },
            }
        }
    }
}

/// Ask where to save `artifact`, suggesting its fixed file name.
#[component]
fn SaveButton(label: &'static str, artifact: Artifact) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();

    rsx! {
        button {
            style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
            onclick: move |_| {
                let Some(path) = rfd::FileDialog::new()
                    .set_file_name(artifact.file_name)
                    .add_filter(artifact.mime_type, &[artifact.extension()])
                    .save_file()
                else {
                    return;
                };
                let msg = match svc.save_artifact(&artifact, &path) {
                    Ok(()) => format!("Saved {}", path.display()),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to save artifact");
                        humanize_error(&e).message
                    }
                };
                state.write().status_message = Some(msg);
            },
            "{label}"
        }
    }
}

/// Read the known-length field. Anything that is not a positive number of
/// metres is shown as an inline error and blocks calculation.
fn parse_known_length(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(m) if m.is_finite() && m > 0.0 => Ok(m),
        Ok(_) => Err("The known length must be greater than zero.".into()),
        Err(_) => Err("Enter the known length in meters, for example 1.5.".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_length_accepts_positive_metres() {
        assert_eq!(parse_known_length("1.5"), Ok(1.5));
        assert_eq!(parse_known_length(" 0.1 "), Ok(0.1));
    }

    #[test]
    fn known_length_rejects_text_and_non_positive_values() {
        assert!(parse_known_length("").is_err());
        assert!(parse_known_length("abc").is_err());
        assert!(parse_known_length("0").is_err());
        assert!(parse_known_length("-2").is_err());
        assert!(parse_known_length("inf").is_err());
        assert!(parse_known_length("NaN").is_err());
    }
}
