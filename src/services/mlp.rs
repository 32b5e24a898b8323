//! Multi-layer perceptron loaded from a JSON weight export.

use crate::error::{ClassifyError, ModelError};
use crate::models::{Prediction, NUM_CLASSES};
use crate::services::Classifier;
use ink_raster::FeatureVector;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Activation applied after every hidden layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Relu,
    Identity,
    Tanh,
    Logistic,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Identity => {}
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Logistic => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
        }
    }
}

/// One fully connected layer.
///
/// `weights[i][j]` connects input `i` to output `j`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
    /// Overrides the model-wide hidden activation for this layer.
    /// Ignored on the output layer, which is always softmax.
    #[serde(default)]
    pub activation: Option<Activation>,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.len()
    }

    fn outputs(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ClassifyError> {
        if input.len() != self.inputs() {
            return Err(ClassifyError::Inference(format!(
                "layer expects {} inputs, got {}",
                self.inputs(),
                input.len()
            )));
        }

        let mut output = self.biases.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            if row.len() != self.outputs() {
                return Err(ClassifyError::Inference(format!(
                    "weight row has {} columns, expected {}",
                    row.len(),
                    self.outputs()
                )));
            }
            if *x == 0.0 {
                continue;
            }
            for (o, w) in output.iter_mut().zip(row) {
                *o += x * w;
            }
        }
        Ok(output)
    }
}

/// Serialized model: digit label per output unit plus the layer stack.
///
/// Class labels may be numbers or numeric strings; scikit-learn models
/// trained on OpenML MNIST carry `"0"`..`"9"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MlpModel {
    #[serde(deserialize_with = "deserialize_classes")]
    pub classes: Vec<u8>,
    pub layers: Vec<DenseLayer>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassLabel {
    Number(u8),
    Text(String),
}

fn deserialize_classes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<ClassLabel>::deserialize(deserializer)?
        .into_iter()
        .map(|label| match label {
            ClassLabel::Number(n) => Ok(n),
            ClassLabel::Text(s) => s.trim().parse::<u8>().map_err(|_| {
                serde::de::Error::custom(format!("class label {s:?} is not a digit"))
            }),
        })
        .collect()
}

impl MlpModel {
    fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::Invalid("model has no layers".into()));
        }
        if self.classes.len() != NUM_CLASSES {
            return Err(ModelError::Invalid(format!(
                "expected {NUM_CLASSES} classes, found {}",
                self.classes.len()
            )));
        }
        let mut seen = [false; NUM_CLASSES];
        for &class in &self.classes {
            let slot = seen
                .get_mut(class as usize)
                .ok_or_else(|| ModelError::Invalid(format!("class label {class} is not a digit")))?;
            if std::mem::replace(slot, true) {
                return Err(ModelError::Invalid(format!("duplicate class label {class}")));
            }
        }
        Ok(())
    }
}

/// [`Classifier`] backed by an [`MlpModel`].
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    model: MlpModel,
}

impl MlpClassifier {
    /// Read and validate a model file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: MlpModel = serde_json::from_str(json)?;
        Self::from_model(model)
    }

    pub fn from_model(model: MlpModel) -> Result<Self, ModelError> {
        model.validate()?;
        Ok(Self { model })
    }

    pub fn layer_count(&self) -> usize {
        self.model.layers.len()
    }

    /// Raw output-layer probabilities, in the model's class order.
    fn forward(&self, features: &[f32]) -> Result<Vec<f32>, ClassifyError> {
        let last = self.model.layers.len() - 1;
        let mut values = features.to_vec();
        for (i, layer) in self.model.layers.iter().enumerate() {
            values = layer.forward(&values)?;
            if i < last {
                layer
                    .activation
                    .unwrap_or(self.model.activation)
                    .apply(&mut values);
            }
        }
        softmax(&mut values);
        Ok(values)
    }
}

impl Classifier for MlpClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifyError> {
        let output = self.forward(features.as_slice())?;
        if output.len() != self.model.classes.len() {
            return Err(ClassifyError::Inference(format!(
                "model produced {} outputs for {} classes",
                output.len(),
                self.model.classes.len()
            )));
        }
        if output.iter().any(|p| !p.is_finite()) {
            return Err(ClassifyError::Inference(
                "model produced non-finite output".into(),
            ));
        }

        let mut probabilities = [0.0; NUM_CLASSES];
        for (&class, &p) in self.model.classes.iter().zip(&output) {
            probabilities[class as usize] = p;
        }
        Ok(Prediction::from_probabilities(probabilities))
    }

    fn is_loaded(&self) -> bool {
        true
    }
}

fn softmax(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}
