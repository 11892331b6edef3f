//! Error types for audiotrim.

use crate::constants::validation;
use crate::format::ContainerFormat;

/// Result type alias for audiotrim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for audiotrim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Speedup rate outside the accepted range.
    #[error(
        "invalid speedup rate: {rate} (must be greater than 0 and at most {max})",
        max = validation::MAX_SPEEDUP_RATE
    )]
    InvalidSpeedupRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Volume level outside the accepted range.
    #[error(
        "invalid volume level: {level} (must be between {min} and {max})",
        min = validation::MIN_VOLUME_LEVEL,
        max = validation::MAX_VOLUME_LEVEL
    )]
    InvalidVolumeLevel {
        /// The rejected level.
        level: f32,
    },

    /// Input buffer carries a known container signature instead of raw PCM.
    #[error(
        "input is {format} data, not raw PCM; decode it to mono 44100 Hz \
         32-bit float samples before building a chain"
    )]
    EncodedInput {
        /// The container format detected in the buffer.
        format: ContainerFormat,
    },

    /// The external tempo filter process failed.
    ///
    /// Covers both spawn failures and non-zero exits; `detail` carries the
    /// diagnostic text captured from the process.
    #[error("tempo filter failed: {detail}")]
    TempoFilter {
        /// Captured diagnostic text.
        detail: String,
    },
}
