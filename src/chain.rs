//! Immutable operation chain over a PCM buffer.
//!
//! A chain records operations without executing them; `run` replays the
//! queue in append order against the source buffer. Appending never
//! mutates an existing chain, so independent chains share no mutable
//! state and may run concurrently.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::constants::validation;
use crate::dsp;
use crate::error::{Error, Result};
use crate::format;
use crate::metrics::{Metrics, calculate_metrics};
use crate::pcm;
use crate::tempo::{self, TempoEngine};

/// A queued transformation with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Change playback tempo by the given factor.
    Speedup {
        /// Tempo factor; 2.0 halves the duration.
        rate: f64,
    },
    /// Scale samples so the peak amplitude is 1.0.
    Normalize,
    /// Cut out sub-threshold runs of at least the minimum duration.
    RemoveSilence {
        /// Detection threshold in dBFS, clamped to [-60, 0] at use.
        threshold_db: f64,
        /// Minimum qualifying run length in milliseconds.
        min_duration_ms: f64,
    },
    /// Multiply every sample by a linear gain level.
    Volume {
        /// Gain level in [0, 2].
        level: f32,
    },
}

impl Operation {
    /// Stable name of the operation kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Speedup { .. } => "speedup",
            Self::Normalize => "normalize",
            Self::RemoveSilence { .. } => "remove_silence",
            Self::Volume { .. } => "volume",
        }
    }
}

/// Audio-specific details derived from the buffers of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioDetails {
    /// Duration of the final buffer in seconds.
    pub duration: f64,
    /// Sample rate in Hz (fixed crate-wide).
    pub sample_rate: u32,
    /// Duration of the source buffer in seconds.
    pub original_duration: f64,
    /// Seconds removed by silence excision across the run.
    pub silence_removed: f64,
}

/// Final result of a chain run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome {
    /// The transformed PCM buffer.
    pub data: Vec<u8>,
    /// Before/after size savings.
    pub metrics: Metrics,
    /// Buffer-derived audio details.
    pub details: AudioDetails,
    /// Names of the applied operations, in execution order.
    pub operations: Vec<&'static str>,
}

/// An immutable, ordered list of operations bound to a source buffer.
///
/// Created with [`AudioChain::new`], which rejects buffers that still
/// carry a container header. Builder methods validate their parameters
/// and return a new chain, leaving the receiver untouched; a rejected
/// append extends nothing. [`AudioChain::run`] consumes the chain, so a
/// chain executes at most once.
///
/// ```no_run
/// # async fn example(raw_pcm: Vec<u8>) -> audiotrim::Result<()> {
/// use audiotrim::AudioChain;
///
/// let outcome = AudioChain::new(raw_pcm)?
///     .remove_silence(-40.0, 100.0)
///     .speedup(1.5)?
///     .run()
///     .await?;
/// println!("saved {} bytes", outcome.metrics.saved_size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AudioChain {
    data: Arc<[u8]>,
    ops: Vec<Operation>,
}

impl AudioChain {
    /// Create a chain over a raw PCM buffer.
    ///
    /// The buffer is sniffed eagerly: a WAV, MP4/M4A, or MP3 container
    /// signature fails here with [`Error::EncodedInput`], before any
    /// operation can be queued.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Result<Self> {
        let data = data.into();
        format::ensure_raw_pcm(&data)?;
        Ok(Self {
            data,
            ops: Vec::new(),
        })
    }

    /// Queue a tempo change. Rejects rates outside (0, 100].
    pub fn speedup(&self, rate: f64) -> Result<Self> {
        if !(rate > 0.0 && rate <= validation::MAX_SPEEDUP_RATE) {
            return Err(Error::InvalidSpeedupRate { rate });
        }
        Ok(self.with(Operation::Speedup { rate }))
    }

    /// Queue peak normalization.
    pub fn normalize(&self) -> Self {
        self.with(Operation::Normalize)
    }

    /// Queue silence excision.
    ///
    /// Defaults live in [`crate::constants::silence`]; the threshold is
    /// clamped to [-60, 0] dB when the operation executes.
    pub fn remove_silence(&self, threshold_db: f64, min_duration_ms: f64) -> Self {
        self.with(Operation::RemoveSilence {
            threshold_db,
            min_duration_ms,
        })
    }

    /// Queue a gain change. Rejects levels outside [0, 2].
    pub fn volume(&self, level: f32) -> Result<Self> {
        if !(validation::MIN_VOLUME_LEVEL..=validation::MAX_VOLUME_LEVEL).contains(&level) {
            return Err(Error::InvalidVolumeLevel { level });
        }
        Ok(self.with(Operation::Volume { level }))
    }

    /// The queued operations, in append order.
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Execute the chain with the default tempo engine.
    pub async fn run(self) -> Result<ChainOutcome> {
        self.run_with(&TempoEngine::default()).await
    }

    /// Execute the chain with an explicit tempo engine.
    ///
    /// Operations replay strictly in append order, each consuming the
    /// previous operation's output. The first failing operation aborts
    /// the run; nothing partial is returned and nothing is retried.
    pub async fn run_with(self, engine: &TempoEngine) -> Result<ChainOutcome> {
        let mut samples = pcm::samples_from_bytes(&self.data);
        let original_duration = pcm::duration_secs(samples.len());
        let mut silence_removed_samples = 0_usize;
        let mut applied = Vec::with_capacity(self.ops.len());

        for op in &self.ops {
            debug!(operation = op.name(), samples = samples.len(), "applying operation");

            samples = match *op {
                Operation::Speedup { rate } => tempo::change_tempo(samples, rate, engine).await?,
                Operation::Normalize => dsp::normalize(samples),
                Operation::RemoveSilence {
                    threshold_db,
                    min_duration_ms,
                } => {
                    let before = samples.len();
                    let output = dsp::remove_silence(samples, threshold_db, min_duration_ms);
                    silence_removed_samples += before - output.len();
                    output
                }
                Operation::Volume { level } => dsp::volume(&samples, level),
            };

            applied.push(op.name());
        }

        let data = pcm::samples_to_bytes(&samples);
        let metrics = calculate_metrics(self.data.len(), data.len());
        let details = AudioDetails {
            duration: pcm::duration_secs(samples.len()),
            sample_rate: crate::constants::SAMPLE_RATE,
            original_duration,
            silence_removed: pcm::duration_secs(silence_removed_samples),
        };

        debug!(
            original_size = metrics.original_size,
            final_size = metrics.final_size,
            percentage = metrics.percentage,
            "chain run complete"
        );

        Ok(ChainOutcome {
            data,
            metrics,
            details,
            operations: applied,
        })
    }

    fn with(&self, op: Operation) -> Self {
        let mut ops = self.ops.clone();
        ops.push(op);
        Self {
            data: Arc::clone(&self.data),
            ops,
        }
    }
}
