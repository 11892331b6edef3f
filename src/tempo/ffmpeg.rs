//! External tempo filter process adapter.
//!
//! Pipes a raw PCM buffer through an ffmpeg subprocess running a chained
//! `atempo` filter and collects the transformed buffer. One attempt per
//! invocation; the process is never reused. No timeout is enforced here;
//! callers bound the task, and cancelling it kills the child.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::constants::SAMPLE_RATE;
use crate::error::{Error, Result};
use crate::pcm;

use super::filter;

/// Run samples through an ffmpeg `atempo` chain built from `stages`.
///
/// Input and output are both raw mono 32-bit-float little-endian at
/// 44100 Hz, stated explicitly on both sides of the command line so the
/// process never guesses a format. Spawn failures and non-zero exits
/// surface as [`Error::TempoFilter`] carrying the captured stderr text.
pub async fn run_atempo(samples: &[f32], stages: &[f64], binary: &Path) -> Result<Vec<f32>> {
    let filter_arg = filter::filter_argument(stages);
    let rate = SAMPLE_RATE.to_string();

    debug!(filter = %filter_arg, binary = %binary.display(), "spawning tempo filter");

    let mut child = Command::new(binary)
        .args(["-hide_banner", "-loglevel", "error"])
        .args(["-f", "f32le", "-ar", &rate, "-ac", "1", "-i", "pipe:0"])
        .args(["-filter:a", &filter_arg])
        .args(["-f", "f32le", "-ar", &rate, "-ac", "1", "pipe:1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::TempoFilter {
            detail: format!("failed to spawn '{}': {e}", binary.display()),
        })?;

    let mut stdin = child.stdin.take().ok_or_else(|| Error::TempoFilter {
        detail: "child stdin was not captured".to_string(),
    })?;

    // Feed input from a separate task so a full stdout pipe cannot
    // deadlock against an unread stdin pipe.
    let input = pcm::samples_to_bytes(samples);
    let writer = tokio::spawn(async move {
        match stdin.write_all(&input).await {
            // The process closes its input once it has produced all output
            // it needs; that is success, not failure.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
        // Dropping stdin here closes the pipe and lets the child finish.
    });

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| Error::TempoFilter {
            detail: format!("failed to collect process output: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::TempoFilter {
            detail: format!("process exited with {}: {}", output.status, stderr.trim()),
        });
    }

    match writer.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return Err(Error::TempoFilter {
                detail: format!("failed to write samples to process: {e}"),
            });
        }
        Err(e) => {
            return Err(Error::TempoFilter {
                detail: format!("input writer task failed: {e}"),
            });
        }
    }

    debug!(
        bytes_in = samples.len() * crate::constants::BYTES_PER_SAMPLE,
        bytes_out = output.stdout.len(),
        "tempo filter complete"
    );

    Ok(pcm::samples_from_bytes(&output.stdout))
}
