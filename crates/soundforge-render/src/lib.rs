//! SoundForge Renderer
//!
//! This crate turns validated SoundSpecs into mono PCM buffers.
//!
//! # Overview
//!
//! Each layer is synthesized independently, shaped, and summed. The supported
//! layer types are:
//!
//! - **Oscillators** - Sine, square, saw, and triangle with optional harmonics
//! - **Chirps** - Frequency sweeps with vibrato
//! - **FM** - Two-operator frequency modulation
//! - **Noise** - White and pink noise with an optional low-pass sweep
//! - **Impulses** - Clicks, taps, and metallic pings
//!
//! # Determinism
//!
//! Rendering is a pure function of the spec. Every random draw comes from a
//! single PCG32 stream seeded from `spec.seed`, consumed in layer order, so
//! the same spec always produces bit-identical samples.
//!
//! # Example
//!
//! ```
//! use soundforge_render::{render, render_wav};
//! use soundforge_spec::presets;
//!
//! let spec = presets::get("ui_click").unwrap();
//! let samples = render(&spec);
//! assert_eq!(samples.len(), spec.num_samples());
//!
//! let wav = render_wav(&spec);
//! assert_eq!(wav.pcm_hash.len(), 64);
//! ```
//!
//! # Crate Structure
//!
//! - [`render()`] - Main entry point
//! - [`synthesis`] - Per-layer-type sample generators
//! - [`envelope`] - Attack/decay/ADSR envelopes
//! - [`filter`] - One-pole and biquad filters with cutoff sweeps
//! - [`modulation`] - Tremolo and pitch LFOs
//! - [`mixer`] - Layer summing, pan, and normalization
//! - [`effects`] - Post-mix FX chain
//! - [`rng`] - The seeded random stream
//! - [`wav`] - 16-bit mono WAV encoding

pub mod effects;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod mixer;
pub mod modulation;
pub mod oscillator;
pub mod render;
pub mod rng;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use error::{RenderError, RenderResult};
pub use render::{render, render_wav, try_render};
pub use wav::WavResult;
