use crate::error::RecognizeError;
use ink_raster::CanonicalImage;

/// Number of digit classes.
pub const NUM_CLASSES: usize = 10;

/// Classifier output for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted digit, 0-9
    pub label: u8,
    /// Probability per digit, indexed by digit
    pub probabilities: [f32; NUM_CLASSES],
}

impl Prediction {
    /// Prediction for the most probable digit.
    ///
    /// Ties resolve to the lowest digit.
    pub fn from_probabilities(probabilities: [f32; NUM_CLASSES]) -> Self {
        let label = probabilities
            .iter()
            .enumerate()
            .fold((0usize, f32::NEG_INFINITY), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            })
            .0 as u8;
        Self {
            label,
            probabilities,
        }
    }

    /// Probability assigned to the predicted label.
    pub fn confidence(&self) -> f32 {
        self.probabilities[self.label as usize]
    }

    /// User-facing summary, e.g. `Prediction: 7 (confidence: 99.0%)`.
    pub fn summary(&self) -> String {
        format!(
            "Prediction: {} (confidence: {:.1}%)",
            self.label,
            self.confidence() * 100.0
        )
    }
}

/// A successful recognition: the prediction plus the image the model saw.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub prediction: Prediction,
    pub preview: CanonicalImage,
}

/// Render a recognition outcome as the message shown to the user.
pub fn format_outcome(outcome: &Result<Recognition, RecognizeError>) -> String {
    match outcome {
        Ok(recognition) => recognition.prediction.summary(),
        Err(e) => e.to_string(),
    }
}
