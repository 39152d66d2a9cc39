//! Low-frequency modulation: tremolo, pitch LFO and vibrato.

use soundforge_spec::Modulation;

use crate::oscillator::TWO_PI;

/// Sinusoidal frequency multiplier `1 + depth · sin(2π · hz · t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    pub hz: f64,
    pub depth: f64,
}

impl Lfo {
    pub fn new(hz: f64, depth: f64) -> Self {
        Self { hz, depth }
    }

    /// The pitch LFO of a layer's `mod` block, if it has any effect.
    pub fn pitch(modulation: Option<&Modulation>) -> Option<Self> {
        modulation
            .filter(|m| m.has_pitch_lfo())
            .map(|m| Self::new(m.pitch_lfo_hz, m.pitch_lfo_depth))
    }

    /// A vibrato LFO, if it has any effect.
    pub fn vibrato(hz: f64, depth: f64) -> Option<Self> {
        (hz > 0.0 && depth > 0.0).then(|| Self::new(hz, depth))
    }

    /// Frequency multiplier at time `t` seconds.
    #[inline]
    pub fn factor(&self, t: f64) -> f64 {
        1.0 + self.depth * (TWO_PI * self.hz * t).sin()
    }
}

/// Combined multiplier of optional LFOs at time `t`.
#[inline]
pub fn pitch_factor(lfos: &[Option<Lfo>], t: f64) -> f64 {
    lfos.iter().flatten().map(|lfo| lfo.factor(t)).product()
}

/// Tremolo gain at time `t`: `1 − depth · (sin(2π · hz · t) + 1)/2`.
#[inline]
pub fn tremolo_gain(hz: f64, depth: f64, t: f64) -> f64 {
    1.0 - depth * ((TWO_PI * hz * t).sin() + 1.0) / 2.0
}

/// Applies the tremolo of `modulation` in place. No-op without tremolo.
pub fn apply_tremolo(samples: &mut [f64], modulation: &Modulation, sample_rate: f64) {
    if !modulation.has_tremolo() {
        return;
    }
    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample *= tremolo_gain(modulation.tremolo_hz, modulation.tremolo_depth, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modulation(tremolo_hz: f64, tremolo_depth: f64) -> Modulation {
        Modulation {
            tremolo_hz,
            tremolo_depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_tremolo_gain_bounds() {
        for i in 0..1000 {
            let g = tremolo_gain(5.0, 0.8, i as f64 / 1000.0);
            assert!((0.2 - 1e-12..=1.0).contains(&g));
        }
        // sin = 0 at t = 0, so gain is 1 − depth/2
        assert_eq!(tremolo_gain(5.0, 0.4, 0.0), 0.8);
    }

    #[test]
    fn test_zero_depth_tremolo_is_noop() {
        let mut samples = vec![0.5; 64];
        apply_tremolo(&mut samples, &modulation(6.0, 0.0), 44100.0);
        assert!(samples.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_tremolo_scales_samples() {
        let mut samples = vec![1.0; 4410];
        apply_tremolo(&mut samples, &modulation(10.0, 0.5), 44100.0);
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!(min < 0.51 && min >= 0.5 - 1e-12);
    }

    #[test]
    fn test_pitch_lfo_only_when_active() {
        assert_eq!(Lfo::pitch(None), None);
        let inactive = Modulation {
            pitch_lfo_hz: 5.0,
            ..Default::default()
        };
        assert_eq!(Lfo::pitch(Some(&inactive)), None);

        let active = Modulation {
            pitch_lfo_hz: 5.0,
            pitch_lfo_depth: 0.05,
            ..Default::default()
        };
        let lfo = Lfo::pitch(Some(&active)).unwrap();
        assert_eq!(lfo.factor(0.0), 1.0);
        assert!((lfo.factor(0.05) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_factor_multiplies() {
        let a = Some(Lfo::new(5.0, 0.1));
        assert_eq!(pitch_factor(&[None, None], 0.3), 1.0);
        assert!((pitch_factor(&[a, a], 0.05) - 1.21).abs() < 1e-12);
    }
}
