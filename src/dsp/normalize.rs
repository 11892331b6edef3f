//! Peak normalization.

use crate::pcm;

/// Scale samples so the peak absolute amplitude is exactly 1.0.
///
/// A fully silent buffer (peak 0) is returned as-is, allocation unchanged;
/// there is nothing to scale and scaling would divide by zero.
pub fn normalize(samples: Vec<f32>) -> Vec<f32> {
    let peak = pcm::peak(&samples);
    if peak == 0.0 {
        return samples;
    }

    let scale = 1.0 / peak;
    samples.into_iter().map(|s| s * scale).collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_becomes_one() {
        let samples = vec![0.1, -0.25, 0.5];
        let output = normalize(samples);
        assert!((pcm::peak(&output) - 1.0).abs() < 1e-6);
        assert_eq!(output, vec![0.2, -0.5, 1.0]);
    }

    #[test]
    fn test_negative_peak_scales_by_magnitude() {
        let samples = vec![0.2, -0.8];
        let output = normalize(samples);
        assert_eq!(output, vec![0.25, -1.0]);
    }

    #[test]
    fn test_silent_buffer_returns_same_allocation() {
        let samples = vec![0.0_f32; 512];
        let ptr = samples.as_ptr();
        let output = normalize(samples);
        assert_eq!(output.as_ptr(), ptr);
        assert_eq!(output.len(), 512);
    }

    #[test]
    fn test_empty_buffer_is_identity() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_already_normalized_is_unchanged_in_value() {
        let samples = vec![0.5, -1.0, 0.25];
        let output = normalize(samples.clone());
        assert_eq!(output, samples);
    }
}
