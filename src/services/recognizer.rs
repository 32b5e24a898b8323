use crate::error::RecognizeError;
use crate::models::Recognition;
use crate::services::Classifier;
use ink_raster::{Pipeline, StrokeSet};
use std::sync::Arc;
use std::time::Instant;

/// Turns committed strokes into a digit prediction.
///
/// Pairs the stroke pipeline with a classifier. The pipeline runs first, so
/// an empty drawing is reported as such even when no model is loaded.
pub struct Recognizer {
    pipeline: Pipeline,
    classifier: Arc<dyn Classifier>,
}

impl Recognizer {
    pub fn new(pipeline: Pipeline, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            pipeline,
            classifier,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    /// Classify a stroke snapshot.
    pub fn recognize(&self, strokes: &StrokeSet) -> Result<Recognition, RecognizeError> {
        let started = Instant::now();
        let prepared = self.pipeline.prepare(strokes)?;
        let prediction = self.classifier.predict(&prepared.features)?;

        tracing::debug!(
            strokes = strokes.len(),
            points = strokes.point_count(),
            label = prediction.label,
            confidence = prediction.confidence(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recognized drawing"
        );

        Ok(Recognition {
            prediction,
            preview: prepared.canonical,
        })
    }

    /// Run [`Recognizer::recognize`] on the blocking pool.
    ///
    /// Takes the snapshot by value: the caller's drawing may keep changing
    /// while this runs without affecting the result.
    pub async fn recognize_snapshot(
        self: &Arc<Self>,
        strokes: StrokeSet,
    ) -> Result<Recognition, RecognizeError> {
        let recognizer = Arc::clone(self);
        tokio::task::spawn_blocking(move || recognizer.recognize(&strokes))
            .await
            .map_err(|e| RecognizeError::Inference(format!("Recognition task failed: {e}")))?
    }
}
