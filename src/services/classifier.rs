use crate::error::ClassifyError;
use crate::models::Prediction;
use crate::services::MlpClassifier;
use ink_raster::FeatureVector;
use std::path::Path;
use std::sync::Arc;

/// A trained digit classifier.
///
/// Implementations are shared across requests and must be safe to call
/// concurrently; `predict` takes `&self` and keeps no per-call state.
pub trait Classifier: Send + Sync {
    /// Classify one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifyError>;

    /// Whether a model is loaded. When `false`, every `predict` call fails
    /// with [`ClassifyError::ModelUnavailable`].
    fn is_loaded(&self) -> bool;
}

/// Stand-in used when no model could be loaded.
#[derive(Debug, Clone)]
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the model is unavailable.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Classifier for UnavailableClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<Prediction, ClassifyError> {
        Err(ClassifyError::ModelUnavailable)
    }

    fn is_loaded(&self) -> bool {
        false
    }
}

/// Load the classifier at `path`.
///
/// Never fails: a missing path or a load error is logged and yields an
/// [`UnavailableClassifier`], so the rest of the application keeps working.
pub fn load_classifier(path: Option<&Path>) -> Arc<dyn Classifier> {
    let Some(path) = path else {
        tracing::warn!("No model path configured, classification disabled");
        return Arc::new(UnavailableClassifier::new("no model configured"));
    };

    match MlpClassifier::load(path) {
        Ok(classifier) => {
            tracing::info!(
                path = %path.display(),
                layers = classifier.layer_count(),
                "Loaded classifier model"
            );
            Arc::new(classifier)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), %e, "Failed to load model, classification disabled");
            Arc::new(UnavailableClassifier::new(e.to_string()))
        }
    }
}
