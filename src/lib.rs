//! inkdigit - handwritten digit recognizer
//!
//! Serves a drawing canvas, turns the strokes into an MNIST-style 28x28
//! image and classifies it with a trained multi-layer perceptron.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
