pub mod config;
pub mod drawing;
pub mod prediction;

pub use config::{AppConfig, CanvasConfig, ModelConfig, PreviewConfig, SessionConfig};
pub use drawing::{DrawingSession, DrawingSummary, SessionId, StrokeEvent};
pub use prediction::{format_outcome, Prediction, Recognition, NUM_CLASSES};
