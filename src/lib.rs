//! Audiotrim - shrink audio payloads before forwarding them downstream.
//!
//! This crate applies chains of deterministic transformations to raw mono
//! 32-bit-float PCM buffers and reports the size savings. Decoding from
//! and re-encoding to container formats is left to external collaborators;
//! buffers that still carry a WAV, MP4, or MP3 header are rejected up
//! front.
//!
//! Build a chain with [`AudioChain::new`], queue operations through the
//! builder methods, and execute with [`AudioChain::run`]:
//!
//! ```no_run
//! # async fn example(raw_pcm: Vec<u8>) -> audiotrim::Result<()> {
//! use audiotrim::AudioChain;
//!
//! let outcome = AudioChain::new(raw_pcm)?
//!     .remove_silence(-40.0, 100.0)
//!     .normalize()
//!     .speedup(1.5)?
//!     .run()
//!     .await?;
//!
//! println!(
//!     "{} -> {} bytes ({}% saved)",
//!     outcome.metrics.original_size,
//!     outcome.metrics.final_size,
//!     outcome.metrics.percentage,
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Tempo changes run through an external ffmpeg `atempo` filter chain by
//! default, which preserves pitch at any factor; see
//! [`tempo::TempoEngine`] for the in-process alternative.

#![warn(missing_docs)]

pub mod chain;
pub mod constants;
pub mod dsp;
pub mod error;
pub mod format;
pub mod metrics;
pub mod pcm;
pub mod tempo;

pub use chain::{AudioChain, AudioDetails, ChainOutcome, Operation};
pub use error::{Error, Result};
pub use format::ContainerFormat;
pub use metrics::{Metrics, calculate_metrics};
pub use tempo::TempoEngine;
