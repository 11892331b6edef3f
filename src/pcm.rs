//! Raw PCM buffer conversions.
//!
//! Buffers are byte sequences of interleaved little-endian 32-bit float
//! samples at [`SAMPLE_RATE`]. A byte length that is not a multiple of 4
//! floor-divides; the trailing remainder is dropped rather than rejected.

use crate::constants::{BYTES_PER_SAMPLE, SAMPLE_RATE};

/// Reinterpret raw bytes as f32 samples.
pub fn samples_from_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Serialize f32 samples back to raw little-endian bytes.
pub fn samples_to_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Peak absolute amplitude over all samples. Zero for an empty buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |max, s| max.max(s.abs()))
}

/// Duration in seconds of a buffer with the given sample count.
#[allow(clippy::cast_precision_loss)]
pub fn duration_secs(sample_count: usize) -> f64 {
    sample_count as f64 / f64::from(SAMPLE_RATE)
}
