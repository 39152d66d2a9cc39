//! Deterministic WAV file writer.
//!
//! Writes 16-bit PCM mono WAV files with no timestamps or variable metadata,
//! so equal buffers always produce equal bytes. The BLAKE3 hash of the PCM
//! payload gives a cheap equality check between renders.

mod format;
mod pcm;
mod result;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec};
