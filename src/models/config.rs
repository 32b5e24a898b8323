use crate::assets::AssetLoader;
use ink_raster::Pipeline;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Classifier model artifact
    #[serde(default)]
    pub model: ModelConfig,

    /// Drawing canvas and pen geometry
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Preview image rendering
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Drawing session limits
    #[serde(default)]
    pub sessions: SessionConfig,
}

/// Where to find the trained classifier
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ModelConfig {
    /// Path to the JSON model export; `null` disables classification
    #[serde(default = "default_model_path")]
    pub path: Option<PathBuf>,
}

fn default_model_path() -> Option<PathBuf> {
    Some(PathBuf::from("assets/mnist_model.json"))
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

/// Canvas geometry strokes are recorded in
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Edge length of the square canvas in pixels
    #[serde(default = "default_canvas_size")]
    pub size: u32,

    /// Pen width for dragged strokes
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    /// Disc radius for taps
    #[serde(default = "default_tap_radius")]
    pub tap_radius: f32,
}

fn default_canvas_size() -> u32 {
    ink_raster::DEFAULT_CANVAS_SIZE
}

fn default_stroke_width() -> f32 {
    ink_raster::DEFAULT_STROKE_WIDTH
}

fn default_tap_radius() -> f32 {
    ink_raster::DEFAULT_TAP_RADIUS
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: default_canvas_size(),
            stroke_width: default_stroke_width(),
            tap_radius: default_tap_radius(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Integer upscale factor for the 28x28 preview PNG
    #[serde(default = "default_preview_scale")]
    pub scale: u32,
}

fn default_preview_scale() -> u32 {
    4
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scale: default_preview_scale(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    /// Maximum concurrent drawing sessions; least recently used are evicted
    #[serde(default = "default_max_sessions")]
    pub max: usize,
}

fn default_max_sessions() -> usize {
    1024
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max: default_max_sessions(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        model = ?config.model.path,
                        canvas = config.canvas.size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace the model path when `path` is set (e.g. from `MODEL_PATH`).
    pub fn with_model_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.model.path = Some(path);
        }
        self
    }

    /// Build the stroke pipeline for the configured canvas.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .canvas(self.canvas.size, self.canvas.size)
            .stroke_width(self.canvas.stroke_width)
            .tap_radius(self.canvas.tap_radius)
    }
}
