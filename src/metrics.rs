//! Size savings metrics.

use serde::Serialize;

/// Before/after size comparison for a chain run.
///
/// Sizes are in bytes. `ratio` and `percentage` are rounded to two decimal
/// places and degrade to `0.0` instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Size before processing.
    pub original_size: usize,
    /// Size after processing.
    pub final_size: usize,
    /// Bytes saved (`original_size - final_size`); negative when an
    /// operation grew the buffer.
    pub saved_size: i64,
    /// Compression ratio (`original_size / final_size`); 2.0 means the
    /// payload shrank to half.
    pub ratio: f64,
    /// Percentage saved; 50.0 means half the bytes were removed.
    pub percentage: f64,
}

/// Compute savings metrics from before/after sizes.
///
/// Pure and total: degenerate sizes produce zeroed ratio/percentage rather
/// than infinities.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn calculate_metrics(original_size: usize, final_size: usize) -> Metrics {
    let saved_size = original_size as i64 - final_size as i64;

    let ratio = if final_size > 0 {
        original_size as f64 / final_size as f64
    } else {
        0.0
    };

    let percentage = if original_size > 0 {
        saved_size as f64 / original_size as f64 * 100.0
    } else {
        0.0
    };

    Metrics {
        original_size,
        final_size,
        saved_size,
        ratio: round2(ratio),
        percentage: round2(percentage),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
