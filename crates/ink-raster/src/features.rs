//! Feature encoding: canonical image to a flat `[0, 1]` vector.

use crate::bitmap::{CanonicalImage, CANONICAL_PIXELS};

/// Row-major pixel intensities of a canonical image, each scaled to `[0, 1]`.
///
/// Always exactly [`FeatureVector::LEN`] values long.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Number of features (28 x 28).
    pub const LEN: usize = CANONICAL_PIXELS;

    /// Wrap precomputed values. Returns `None` unless there are exactly
    /// [`FeatureVector::LEN`] values, all within `[0, 1]`.
    pub fn from_values(values: Vec<f32>) -> Option<Self> {
        let valid =
            values.len() == Self::LEN && values.iter().all(|v| (0.0..=1.0).contains(v));
        valid.then_some(Self { values })
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// Flatten `image` row-major, dividing every byte by 255.
pub fn encode(image: &CanonicalImage) -> FeatureVector {
    FeatureVector {
        values: image
            .as_raw()
            .iter()
            .map(|&v| f32::from(v) / 255.0)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_encodes_to_zeros() {
        let features = encode(&CanonicalImage::blank());
        assert_eq!(features.len(), 784);
        assert!(features.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_major_and_scaled() {
        let mut bytes = vec![0u8; 784];
        bytes[1] = 255; // (x=1, y=0)
        bytes[28] = 51; // (x=0, y=1)
        let features = encode(&CanonicalImage::from_raw(bytes).unwrap());

        assert_eq!(features.as_slice()[1], 1.0);
        assert!((features.as_slice()[28] - 0.2).abs() < 1e-6);
        assert_eq!(features.as_slice()[0], 0.0);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let bytes: Vec<u8> = (0..784).map(|i| (i % 256) as u8).collect();
        let features = encode(&CanonicalImage::from_raw(bytes).unwrap());
        assert!(features
            .as_slice()
            .iter()
            .all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(features.into_vec().len(), FeatureVector::LEN);
    }

    #[test]
    fn test_from_values_validates() {
        assert!(FeatureVector::from_values(vec![0.5; 784]).is_some());
        assert!(FeatureVector::from_values(vec![0.5; 783]).is_none());
        assert!(FeatureVector::from_values(vec![1.5; 784]).is_none());
        assert!(FeatureVector::from_values(vec![f32::NAN; 784]).is_none());
    }
}
