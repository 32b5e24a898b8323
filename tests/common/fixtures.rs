//! Test fixtures: strokes and a tiny hand-built model.
//!
//! The fixture model is a single linear layer. Ink in the four centre
//! columns of the 28x28 image votes for `1`, ink anywhere else votes for `0`,
//! so a vertical bar reads as `1` and a horizontal bar as `0`.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Columns of the canonical image that vote for digit 1.
const CENTRE_COLUMNS: std::ops::Range<usize> = 12..16;

/// Fixture model as JSON.
pub fn model_json() -> Value {
    let weights: Vec<Vec<f32>> = (0..784)
        .map(|i| {
            let mut row = vec![0.0f32; 10];
            if CENTRE_COLUMNS.contains(&(i % 28)) {
                row[1] = 0.5;
            } else {
                row[0] = 0.5;
            }
            row
        })
        .collect();

    json!({
        "classes": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        "layers": [{ "weights": weights, "biases": vec![0.0f32; 10] }],
    })
}

/// Write the fixture model into `dir` and return its path.
pub fn write_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.json");
    std::fs::write(&path, model_json().to_string()).expect("Failed to write model fixture");
    path
}

/// Vertical bar down the middle of a 300x300 canvas.
pub fn vertical_bar() -> Value {
    json!([[[150, 40], [150, 260]]])
}

/// Horizontal bar across the middle of a 300x300 canvas.
pub fn horizontal_bar() -> Value {
    json!([[[40, 150], [260, 150]]])
}

/// Pointer events drawing a vertical bar.
pub fn vertical_bar_events() -> Value {
    json!([
        { "type": "start", "x": 150, "y": 40 },
        { "type": "point", "x": 150, "y": 150 },
        { "type": "point", "x": 150, "y": 260 },
        { "type": "end" },
    ])
}
