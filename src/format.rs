//! Container signature sniffing.
//!
//! The chain accepts only raw PCM. Callers who pass an undecoded file by
//! mistake get rejected immediately, with a message naming the container,
//! instead of garbage output several operations later.

use std::fmt;

use crate::error::{Error, Result};

/// Minimum buffer length before signature checks apply.
///
/// The longest signature (RIFF....WAVE) spans the first 12 bytes; anything
/// shorter cannot carry it and passes through.
const MIN_SNIFF_LEN: usize = 12;

/// A recognized audio container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// WAV (RIFF container).
    Wav,
    /// MP4 or M4A (ISO base media `ftyp` box).
    Mp4,
    /// MP3 with an ID3 tag.
    Mp3,
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wav => write!(f, "WAV (RIFF container)"),
            Self::Mp4 => write!(f, "MP4/M4A (ftyp container)"),
            Self::Mp3 => write!(f, "MP3 (ID3 tagged)"),
        }
    }
}

/// Detect a known container signature in the buffer head.
///
/// Returns `None` for raw PCM and for buffers too short to carry a
/// signature.
pub fn detect_container(data: &[u8]) -> Option<ContainerFormat> {
    if data.len() < MIN_SNIFF_LEN {
        return None;
    }

    if &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        return Some(ContainerFormat::Wav);
    }

    if &data[4..8] == b"ftyp" {
        return Some(ContainerFormat::Mp4);
    }

    if &data[0..3] == b"ID3" {
        return Some(ContainerFormat::Mp3);
    }

    None
}

/// Reject buffers that match a known container signature.
pub fn ensure_raw_pcm(data: &[u8]) -> Result<()> {
    match detect_container(data) {
        Some(format) => Err(Error::EncodedInput { format }),
        None => Ok(()),
    }
}
