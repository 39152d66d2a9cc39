//! Mixer for combining rendered layers.

use super::processing::pan_gain;

/// A rendered layer with its mixing parameters.
#[derive(Debug, Clone)]
pub struct MixLayer {
    /// Audio samples, already enveloped.
    pub samples: Vec<f64>,
    /// Layer gain (0.0 to 1.0).
    pub amp: f64,
    /// Stereo position (-1.0 = left, 0.0 = center, 1.0 = right).
    pub pan: f64,
}

impl MixLayer {
    pub fn new(samples: Vec<f64>, amp: f64, pan: f64) -> Self {
        Self {
            samples,
            amp: amp.clamp(0.0, 1.0),
            pan: pan.clamp(-1.0, 1.0),
        }
    }

    /// Creates a centered layer.
    pub fn centered(samples: Vec<f64>, amp: f64) -> Self {
        Self::new(samples, amp, 0.0)
    }

    /// Combined amp and pan gain.
    pub fn gain(&self) -> f64 {
        self.amp * pan_gain(self.pan)
    }
}

/// Audio mixer accumulating layers into one mono buffer.
#[derive(Debug)]
pub struct Mixer {
    buffer: Vec<f64>,
    num_layers: usize,
}

impl Mixer {
    /// Creates a silent mixer of `num_samples`.
    pub fn new(num_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; num_samples],
            num_layers: 0,
        }
    }

    /// Adds a layer to the mix. Samples past the mixer length are ignored.
    pub fn add_layer(&mut self, layer: &MixLayer) {
        let gain = layer.gain();
        for (out, sample) in self.buffer.iter_mut().zip(&layer.samples) {
            *out += sample * gain;
        }
        self.num_layers += 1;
    }

    /// Number of layers added so far.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Finishes the mix, applying the global gain.
    pub fn mix(self, global_amp: f64) -> Vec<f64> {
        let mut buffer = self.buffer;
        for sample in buffer.iter_mut() {
            *sample *= global_amp;
        }
        buffer
    }
}
