//! Signal processing operations over raw PCM samples.
//!
//! All operations are pure and deterministic. They either return a newly
//! allocated buffer or, on two documented fast paths, the input buffer
//! itself with the allocation unchanged.

mod normalize;
mod silence;
mod speedup;
mod volume;

pub use normalize::normalize;
pub use silence::{SilenceRange, detect_silence, remove_silence};
pub use speedup::speedup;
pub use volume::volume;
