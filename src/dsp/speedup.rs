//! Linear-interpolation speedup.

/// Resample audio to play back `rate` times faster.
///
/// The output holds `floor(len / rate)` samples; output index `i` reads
/// fractional source position `i * rate` and linearly interpolates between
/// the two neighboring samples. Source positions past the end read as 0.
///
/// This shifts pitch along with tempo. The pitch-preserving path is the
/// external filter chain in [`crate::tempo`]; this resampler is the
/// in-process alternative behind [`crate::tempo::TempoEngine::Resample`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn speedup(samples: &[f32], rate: f64) -> Vec<f32> {
    let original_len = samples.len();
    let new_len = (original_len as f64 / rate).floor() as usize;
    let mut output = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let position = i as f64 * rate;
        let index1 = position.floor() as usize;
        let index2 = (index1 + 1).min(original_len.saturating_sub(1));
        let fraction = (position - position.floor()) as f32;

        let sample1 = samples.get(index1).copied().unwrap_or(0.0);
        let sample2 = samples.get(index2).copied().unwrap_or(0.0);
        output.push(sample1 + (sample2 - sample1) * fraction);
    }

    output
}
