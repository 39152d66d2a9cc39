//! SoundForge End-to-End Test Infrastructure
//!
//! This crate holds tests that cross crate boundaries:
//!
//! - Validation: JSON document -> typed spec, or a complete error list
//! - Editing: path updates followed by re-rendering
//! - **Determinism**: bit-identical buffers and WAV bytes across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p soundforge-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use soundforge_tests::determinism::verify_determinism;
//! use soundforge_tests::test_determinism;
//!
//! let result = verify_determinism(|| render_wav(&spec).wav_data, 3);
//! result.assert_deterministic();
//!
//! test_determinism!(laser_wav, {
//!     render_wav(&presets::get("laser_blast").unwrap()).wav_data
//! });
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{
    compute_hash, samples_to_bytes, verify_determinism, DeterminismResult, DiffInfo,
};
