pub mod classifier;
pub mod mlp;
pub mod recognizer;
pub mod session_registry;

pub use classifier::{load_classifier, Classifier, UnavailableClassifier};
pub use mlp::{Activation, DenseLayer, MlpClassifier, MlpModel};
pub use recognizer::Recognizer;
pub use session_registry::{InMemorySessionRegistry, SessionRegistry};
