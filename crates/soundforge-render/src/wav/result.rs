//! WAV file generation result type.

use std::io::Write;
use std::path::Path;

use super::format::WavFormat;
use crate::error::RenderResult;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// An encoded WAV file plus metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash (hex) of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples as 16-bit PCM.
    pub fn from_samples(samples: &[f64], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the WAV bytes to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> RenderResult<()> {
        writer.write_all(&self.wav_data)?;
        Ok(())
    }

    /// Writes the WAV file to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        std::fs::write(path, &self.wav_data)?;
        Ok(())
    }
}
