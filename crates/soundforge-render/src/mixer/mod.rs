//! Layer mixing to a single mono buffer.
//!
//! Each layer is scaled by its amp and by an equal-power pan law folded to
//! mono, summed, then scaled by the global amp.

#[allow(clippy::module_inception)]
mod mixer;
mod processing;

#[cfg(test)]
mod tests_mixing;
#[cfg(test)]
mod tests_normalization;
#[cfg(test)]
mod tests_pan;

// Re-export public API
pub use mixer::{MixLayer, Mixer};
pub use processing::{hard_clip_buffer, normalize_to_peak, pan_gain, peak};
