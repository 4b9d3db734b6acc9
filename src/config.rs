// Configuration file support.
//
// Settings are read from `~/.config/air-sketch/config.toml` (or a path given on the
// command line). Every section is optional; anything missing falls back to the
// defaults below, and out-of-range values are clamped with a warning.
//
// Example:
// [canvas]
// width = 1280
// height = 720
// default_brush_radius = 8
//
// [tracking]
// min_detection_confidence = 0.7
//
// [gestures]
// cooldown_ms = 400
//
// [output]
// save_directory = "/tmp/sketches"

use crate::error::Error;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub gestures: GestureConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Canvas raster and stroke defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Target resolution; also requested from the camera.
    pub width: u32,
    pub height: u32,
    /// Weight of the canvas when blended over the camera image (0.0 - 1.0).
    pub canvas_weight: f32,
    /// Max snapshots kept for undo (1 - 256).
    pub history_capacity: usize,
    pub default_brush_radius: u32,
    pub default_eraser_radius: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            canvas_weight: 0.3,
            history_capacity: 8,
            default_brush_radius: 5,
            default_eraser_radius: 20,
        }
    }
}

/// Camera and hand-tracking model options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub camera_index: u32,
    /// At most one left and one right hand are distinguished, so 1 or 2.
    pub max_num_hands: usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            max_num_hands: 2,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Thresholds used by the gesture interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Fingertips closer than this (px) count as touching.
    pub pinch_threshold: f32,
    /// Right index tip moving faster than this (px/frame) cannot toggle anything.
    pub speed_threshold: f32,
    /// Re-trigger suppression after a toggle or clear.
    pub cooldown_ms: u64,
    pub brush_min: u32,
    pub brush_max: u32,
    pub eraser_min: u32,
    pub eraser_max: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 30.0,
            speed_threshold: 20.0,
            cooldown_ms: 300,
            brush_min: 5,
            brush_max: 20,
            eraser_min: 10,
            eraser_max: 50,
        }
    }
}

/// Where saved canvases go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub save_directory: PathBuf,
    /// chrono format string; the default `%s` is whole Unix seconds.
    pub filename_template: String,
    /// File extension, which also picks the encoder.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: PathBuf::from("."),
            filename_template: "drawing_%s".to_string(),
            format: "png".to_string(),
        }
    }
}

impl Config {
    /// Returns `~/.config/air-sketch/config.toml`.
    pub fn default_path() -> Result<PathBuf, Error> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?.join("air-sketch");
        Ok(dir.join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let mut config = Self::from_toml(&text).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {config:?}");
        Ok(config)
    }

    fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Pull every value back into a range the rest of the app can rely on.
    pub fn validate_and_clamp(&mut self) {
        let c = &mut self.canvas;
        clamp_field("canvas.width", &mut c.width, 64, 7680);
        clamp_field("canvas.height", &mut c.height, 64, 4320);
        clamp_field("canvas.canvas_weight", &mut c.canvas_weight, 0.0, 1.0);
        clamp_field("canvas.history_capacity", &mut c.history_capacity, 1, 256);

        let t = &mut self.tracking;
        clamp_field("tracking.max_num_hands", &mut t.max_num_hands, 1, 2);
        clamp_field("tracking.min_detection_confidence", &mut t.min_detection_confidence, 0.0, 1.0);
        clamp_field("tracking.min_tracking_confidence", &mut t.min_tracking_confidence, 0.0, 1.0);

        let g = &mut self.gestures;
        clamp_field("gestures.pinch_threshold", &mut g.pinch_threshold, 1.0, 500.0);
        clamp_field("gestures.speed_threshold", &mut g.speed_threshold, 0.0, 1000.0);
        clamp_field("gestures.cooldown_ms", &mut g.cooldown_ms, 0, 5000);
        clamp_field("gestures.brush_min", &mut g.brush_min, 1, 500);
        let brush_min = g.brush_min;
        clamp_field("gestures.brush_max", &mut g.brush_max, brush_min, 500);
        clamp_field("gestures.eraser_min", &mut g.eraser_min, 1, 500);
        let eraser_min = g.eraser_min;
        clamp_field("gestures.eraser_max", &mut g.eraser_max, eraser_min, 500);

        // Start-up radii must already satisfy the gesture ranges.
        clamp_field(
            "canvas.default_brush_radius",
            &mut self.canvas.default_brush_radius,
            g.brush_min,
            g.brush_max,
        );
        clamp_field(
            "canvas.default_eraser_radius",
            &mut self.canvas.default_eraser_radius,
            g.eraser_min,
            g.eraser_max,
        );

        if self.output.format.trim().is_empty() {
            warn!("Empty output.format, falling back to 'png'");
            self.output.format = "png".to_string();
        }
        let template = &self.output.filename_template;
        if template.trim().is_empty() || !crate::snapshot::template_is_valid(template) {
            warn!("Invalid output.filename_template {template:?}, falling back to 'drawing_%s'");
            self.output.filename_template = "drawing_%s".to_string();
        }
    }
}

fn clamp_field<T>(name: &str, value: &mut T, min: T, max: T)
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if *value < min || *value > max {
        let clamped = if *value < min { min } else { max };
        warn!("Invalid {name} {value}, clamping to {min}-{max} range");
        *value = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.canvas.width, 1920);
        assert_eq!(config.canvas.height, 1080);
        assert_eq!(config.canvas.default_brush_radius, 5);
        assert_eq!(config.canvas.default_eraser_radius, 20);
        assert_eq!(config.tracking.max_num_hands, 2);
        assert_eq!(config.gestures.cooldown_ms, 300);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[canvas]\nwidth = 640\nheight = 480\n\n[gestures]\ncooldown_ms = 500").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 480);
        assert_eq!(config.canvas.canvas_weight, 0.3);
        assert_eq!(config.gestures.cooldown_ms, 500);
        assert_eq!(config.gestures.pinch_threshold, 30.0);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [canvas]
            canvas_weight = 3.5
            history_capacity = 0
            default_brush_radius = 99

            [tracking]
            max_num_hands = 7
            min_detection_confidence = -1.0

            [gestures]
            brush_min = 10
            brush_max = 4
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.canvas.canvas_weight, 1.0);
        assert_eq!(config.canvas.history_capacity, 1);
        assert_eq!(config.tracking.max_num_hands, 2);
        assert_eq!(config.tracking.min_detection_confidence, 0.0);
        assert_eq!(config.gestures.brush_max, 10);
        assert_eq!(config.canvas.default_brush_radius, 10);
    }

    #[test]
    fn bad_filename_template_falls_back_to_default() {
        let mut config = Config::from_toml("[output]\nfilename_template = \"drawing_%Q\"").unwrap();
        config.validate_and_clamp();
        assert_eq!(config.output.filename_template, "drawing_%s");

        let mut config = Config::from_toml("[output]\nfilename_template = \"shot_%Y%m%d\"").unwrap();
        config.validate_and_clamp();
        assert_eq!(config.output.filename_template, "shot_%Y%m%d");
    }

    #[test]
    fn bad_toml_is_reported_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[canvas\nwidth = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
