// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: owns the loaded configuration and exposes the few
// operations the UI needs (open a photo, run an estimate, save an artifact).
//
// The config sits behind `Arc<Mutex<>>` so the struct can be cloned into
// Dioxus event handlers cheaply.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bauwerk_core::error::Result;
use bauwerk_core::{AppConfig, Artifact};
use bauwerk_document::{EstimateOutcome, EstimateRequest, PipelineOptions, SourceImage, run_estimate};
use tracing::{info, instrument, warn};

use super::data_dir;

/// A decoded photo plus what the UI needs to show it.
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    /// File name shown under the preview.
    pub name: String,
    pub source: SourceImage,
    /// `data:` URL of the original bytes for the `<img>` preview.
    pub preview_url: String,
}

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise services in the per-user data directory.  Call once at app
    /// startup.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::with_data_dir(dir)
    }

    /// Initialise services rooted at `dir`, loading any saved settings.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        let config = load_config(&dir).unwrap_or_default();
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    // -- Photos --------------------------------------------------------------

    /// Read and decode a photo from disk.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_photo(&self, path: &Path) -> Result<LoadedPhoto> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".into());
        self.photo_from_bytes(name, &bytes)
    }

    /// Decode photo bytes received from any source.
    pub fn photo_from_bytes(&self, name: String, bytes: &[u8]) -> Result<LoadedPhoto> {
        let source = SourceImage::from_bytes(bytes)?;
        let mime = image::guess_format(bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("image/jpeg");
        info!(
            name = %name,
            width = source.width(),
            height = source.height(),
            "photo loaded"
        );
        Ok(LoadedPhoto {
            name,
            source,
            preview_url: data_url(mime, bytes),
        })
    }

    // -- Estimation ----------------------------------------------------------

    /// Run one estimate with the current output settings.
    pub fn estimate(&self, photo: &LoadedPhoto, request: &EstimateRequest) -> Result<EstimateOutcome> {
        let options = PipelineOptions::from_config(&self.config());
        run_estimate(&photo.source, request, &options)
    }

    /// Write an artifact to `path`.
    #[instrument(skip(self, artifact), fields(file = artifact.file_name, bytes = artifact.bytes.len()))]
    pub fn save_artifact(&self, artifact: &Artifact, path: &Path) -> Result<()> {
        std::fs::write(path, &artifact.bytes)?;
        info!(path = %path.display(), "artifact saved");
        Ok(())
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }
}

/// Inline `data:` URL so the webview can show in-memory images.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "settings.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bauwerk_core::{BauwerkError, PaperSize, PixelSelection};
    use bauwerk_document::ReportReader;
    use bauwerk_document::image::encode_png;
    use image::{Rgb, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&RgbImage::from_pixel(width, height, Rgb([200, 200, 200]))).unwrap()
    }

    #[test]
    fn missing_settings_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());
    }

    #[test]
    fn saved_settings_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let config = AppConfig {
            jpeg_quality: 80,
            report_paper_size: PaperSize::Letter,
            ..AppConfig::default()
        };
        svc.save_config(&config).unwrap();

        let reopened = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(reopened.config(), config);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());
    }

    #[test]
    fn extreme_saved_style_does_not_break_estimates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"annotation":{"text_scale":700000000,"stroke_width":0}}"#,
        )
        .unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config().annotation.text_scale, 700_000_000);

        let photo = svc.photo_from_bytes("wall.png".into(), &png(120, 90)).unwrap();
        let request = EstimateRequest {
            known_length_m: 1.0,
            selection: PixelSelection::defaults_for(120, 90),
        };
        let outcome = svc.estimate(&photo, &request).unwrap();
        assert_eq!(outcome.annotated.dimensions(), (120, 90));
    }

    #[test]
    fn photo_preview_is_a_png_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let photo = svc.photo_from_bytes("front.png".into(), &png(20, 10)).unwrap();
        assert!(photo.preview_url.starts_with("data:image/png;base64,"));
        assert_eq!((photo.source.width(), photo.source.height()), (20, 10));
    }

    #[test]
    fn unreadable_photo_is_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let err = svc.photo_from_bytes("x.jpg".into(), b"nope").unwrap_err();
        assert!(matches!(err, BauwerkError::InvalidImage(_)));
    }

    #[test]
    fn estimate_and_save_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let photo_path = dir.path().join("building.png");
        std::fs::write(&photo_path, png(600, 400)).unwrap();
        let photo = svc.load_photo(&photo_path).unwrap();
        assert_eq!(photo.name, "building.png");

        let request = EstimateRequest {
            known_length_m: 1.0,
            selection: PixelSelection {
                known_length_px: 100,
                building_height_px: 250,
                building_width_px: 500,
            },
        };
        let outcome = svc.estimate(&photo, &request).unwrap();

        let image_path = dir.path().join(outcome.image_artifact.file_name);
        let report_path = dir.path().join(outcome.report_artifact.file_name);
        svc.save_artifact(&outcome.image_artifact, &image_path).unwrap();
        svc.save_artifact(&outcome.report_artifact, &report_path).unwrap();

        let saved = SourceImage::open(&image_path).unwrap();
        assert_eq!((saved.width(), saved.height()), (600, 400));
        let text = ReportReader::open(&report_path).unwrap().extract_text().unwrap();
        assert!(text.contains("2.50") && text.contains("5.00"), "{text}");
    }
}
