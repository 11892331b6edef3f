//! Tempo change with pitch preserved.
//!
//! The canonical path streams samples through an external ffmpeg `atempo`
//! filter chain, which keeps pitch intact at any factor. The in-process
//! resampler from [`crate::dsp`] is available as an explicit alternative
//! for environments without ffmpeg; it shifts pitch and is never
//! substituted silently.

mod ffmpeg;
mod filter;

pub use ffmpeg::run_atempo;
pub use filter::{filter_argument, tempo_stages};

use std::path::PathBuf;

use crate::constants::DEFAULT_FFMPEG_BINARY;
use crate::dsp;
use crate::error::Result;

/// Backend used to realize a tempo change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempoEngine {
    /// Pitch-preserving time-stretch through an external ffmpeg process.
    ///
    /// This is the canonical path and the default.
    Filter {
        /// Path or name of the ffmpeg binary.
        ffmpeg: PathBuf,
    },
    /// In-process linear-interpolation resampler.
    ///
    /// Shifts pitch along with tempo; select it only when spawning an
    /// external process is not an option.
    Resample,
}

impl Default for TempoEngine {
    fn default() -> Self {
        Self::Filter {
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG_BINARY),
        }
    }
}

/// Change playback tempo by `rate` using the selected engine.
///
/// A factor that reduces to an empty stage list (rate 1.0) short-circuits
/// and returns the input unchanged without touching the engine.
pub async fn change_tempo(samples: Vec<f32>, rate: f64, engine: &TempoEngine) -> Result<Vec<f32>> {
    match engine {
        TempoEngine::Filter { ffmpeg } => {
            let stages = filter::tempo_stages(rate);
            if stages.is_empty() {
                return Ok(samples);
            }
            ffmpeg::run_atempo(&samples, &stages, ffmpeg).await
        }
        TempoEngine::Resample => Ok(dsp::speedup(&samples, rate)),
    }
}
