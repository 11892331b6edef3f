//! Silence detection and excision.

use tracing::trace;

use crate::constants::{SAMPLE_RATE, silence};

/// A contiguous run of sub-threshold samples, as half-open sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceRange {
    /// First sample of the run.
    pub start: usize,
    /// One past the last sample of the run.
    pub end: usize,
}

impl SilenceRange {
    /// Number of samples covered by the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no samples.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Convert a dBFS threshold to linear amplitude.
///
/// The threshold is clamped to [-60, 0] dB before conversion.
fn db_to_amplitude(db: f64) -> f32 {
    let clamped = db.clamp(silence::THRESHOLD_DB_FLOOR, silence::THRESHOLD_DB_CEILING);
    #[allow(clippy::cast_possible_truncation)]
    let amplitude = 10.0_f64.powf(clamped / 20.0) as f32;
    amplitude
}

/// Find all silence ranges in the buffer.
///
/// A silence range is a maximal run of consecutive samples whose absolute
/// value is strictly below the threshold, spanning at least
/// `min_duration_ms`. A sample exactly at the threshold is not silent.
/// Runs are never merged across louder gaps, however short; a run touching
/// the final sample qualifies like any other. Ranges come back in
/// ascending order and do not overlap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn detect_silence(samples: &[f32], threshold_db: f64, min_duration_ms: f64) -> Vec<SilenceRange> {
    let threshold = db_to_amplitude(threshold_db);
    let min_samples = (min_duration_ms / 1000.0 * f64::from(SAMPLE_RATE)).floor() as usize;

    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, sample) in samples.iter().enumerate() {
        if sample.abs() < threshold {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else {
            if let Some(start) = run_start {
                if i - start >= min_samples {
                    ranges.push(SilenceRange { start, end: i });
                }
            }
            run_start = None;
        }
    }

    // A trailing run touching the buffer end qualifies if long enough.
    if let Some(start) = run_start {
        if samples.len() - start >= min_samples {
            ranges.push(SilenceRange {
                start,
                end: samples.len(),
            });
        }
    }

    trace!(
        threshold,
        min_samples,
        ranges = ranges.len(),
        "silence detection complete"
    );

    ranges
}

/// Cut every qualifying silence range out of the buffer.
///
/// The output concatenates, in original order, every span not covered by a
/// silence range; no gaps are inserted. When no range qualifies the input
/// buffer is returned as-is, allocation unchanged.
pub fn remove_silence(samples: Vec<f32>, threshold_db: f64, min_duration_ms: f64) -> Vec<f32> {
    let ranges = detect_silence(&samples, threshold_db, min_duration_ms);
    if ranges.is_empty() {
        return samples;
    }

    let removed: usize = ranges.iter().map(SilenceRange::len).sum();
    let mut output = Vec::with_capacity(samples.len() - removed);
    let mut cursor = 0;

    for range in &ranges {
        output.extend_from_slice(&samples[cursor..range.start]);
        cursor = range.end;
    }
    output.extend_from_slice(&samples[cursor..]);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // 100 ms at 44100 Hz.
    const MIN_MS: f64 = 100.0;
    const MIN_SAMPLES: usize = 4410;

    fn loud(n: usize) -> Vec<f32> {
        vec![0.5; n]
    }

    fn quiet(n: usize) -> Vec<f32> {
        vec![0.0; n]
    }

    #[test]
    fn test_detects_interior_run() {
        let mut samples = loud(1000);
        samples.extend(quiet(MIN_SAMPLES));
        samples.extend(loud(1000));

        let ranges = detect_silence(&samples, -40.0, MIN_MS);
        assert_eq!(
            ranges,
            vec![SilenceRange {
                start: 1000,
                end: 1000 + MIN_SAMPLES,
            }]
        );
    }

    #[test]
    fn test_trailing_run_qualifies() {
        let mut samples = loud(100);
        samples.extend(quiet(MIN_SAMPLES + 5));

        let ranges = detect_silence(&samples, -40.0, MIN_MS);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, 100);
        assert_eq!(ranges[0].end, samples.len());
    }

    #[test]
    fn test_short_run_does_not_qualify() {
        let mut samples = loud(100);
        samples.extend(quiet(MIN_SAMPLES - 1));
        samples.extend(loud(100));

        assert!(detect_silence(&samples, -40.0, MIN_MS).is_empty());
    }

    #[test]
    fn test_runs_are_not_merged_across_loud_gaps() {
        let mut samples = quiet(MIN_SAMPLES);
        samples.push(0.5);
        samples.extend(quiet(MIN_SAMPLES));

        let ranges = detect_silence(&samples, -40.0, MIN_MS);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].end, MIN_SAMPLES);
        assert_eq!(ranges[1].start, MIN_SAMPLES + 1);
        assert_eq!(ranges[1].end, samples.len());
    }

    #[test]
    fn test_sample_at_threshold_is_not_silent() {
        // -40 dB is exactly 0.01 linear amplitude; the comparison is
        // strict, so a buffer pinned at the threshold has no silence.
        let at_threshold = vec![0.01_f32; MIN_SAMPLES * 2];
        assert!(detect_silence(&at_threshold, -40.0, MIN_MS).is_empty());

        let below_threshold = vec![0.009_f32; MIN_SAMPLES * 2];
        assert_eq!(detect_silence(&below_threshold, -40.0, MIN_MS).len(), 1);
    }

    #[test]
    fn test_threshold_is_clamped_to_floor() {
        // -120 dB clamps to -60 dB (0.001 linear); samples below that
        // still count as silent.
        let samples = vec![0.0005_f32; MIN_SAMPLES];
        assert_eq!(detect_silence(&samples, -120.0, MIN_MS).len(), 1);
    }

    #[test]
    fn test_removal_concatenates_kept_spans() {
        let mut samples = loud(10);
        samples.extend(quiet(MIN_SAMPLES));
        samples.extend(loud(20));
        samples.extend(quiet(MIN_SAMPLES));
        samples.extend(loud(30));
        let total = samples.len();

        let output = remove_silence(samples, -40.0, MIN_MS);
        assert_eq!(output.len(), total - 2 * MIN_SAMPLES);
        assert_eq!(output.len(), 60);
        assert!(output.iter().all(|&s| (s - 0.5).abs() < f32::EPSILON));
    }

    #[test]
    fn test_no_qualifying_range_returns_same_allocation() {
        let samples = loud(MIN_SAMPLES * 2);
        let ptr = samples.as_ptr();
        let output = remove_silence(samples, -40.0, MIN_MS);
        assert_eq!(output.as_ptr(), ptr);
    }

    #[test]
    fn test_retained_samples_match_range_arithmetic() {
        let mut samples = loud(5000);
        samples.extend(quiet(9000));
        samples.extend(loud(3000));
        let total = samples.len();

        let removed: usize = detect_silence(&samples, -40.0, MIN_MS)
            .iter()
            .map(SilenceRange::len)
            .sum();
        let output = remove_silence(samples, -40.0, MIN_MS);
        assert_eq!(output.len(), total - removed);
    }

    #[test]
    fn test_fully_silent_buffer_is_emptied() {
        let samples = quiet(MIN_SAMPLES * 3);
        let output = remove_silence(samples, -40.0, MIN_MS);
        assert!(output.is_empty());
    }
}
