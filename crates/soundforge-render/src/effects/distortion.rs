//! Distortion effects: soft clipper and bitcrusher.

/// Cubic soft-clip curve: `1.5 · (c − c³/3)` with `c = clamp(v, −1, 1)`.
///
/// Continuous and monotonic, reaching ±1 at |v| >= 1.
#[inline]
pub fn soft_clip(v: f64) -> f64 {
    let c = v.clamp(-1.0, 1.0);
    1.5 * (c - c * c * c / 3.0)
}

/// Applies `soft_clip(drive · x)` to every sample.
pub fn apply_softclip(samples: &mut [f64], drive: f64) {
    for sample in samples.iter_mut() {
        *sample = soft_clip(drive * *sample);
    }
}

/// Quantizes a sample to `steps` levels per unit. `steps == 0` passes it through.
#[inline]
fn quantize(sample: f64, steps: u32) -> f64 {
    if steps == 0 {
        sample
    } else {
        let steps = steps as f64;
        (sample * steps).round() / steps
    }
}

/// Sample-and-hold bitcrusher.
///
/// Every `hold_samples` samples a quantized value is captured and held until
/// the next capture.
pub fn apply_bitcrush(samples: &mut [f64], steps: u32, hold_samples: u32) {
    let hold = hold_samples.max(1) as usize;
    let mut held = 0.0;
    for (i, sample) in samples.iter_mut().enumerate() {
        if i % hold == 0 {
            held = quantize(*sample, steps);
        }
        *sample = held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_landmarks() {
        assert_eq!(soft_clip(0.0), 0.0);
        assert_eq!(soft_clip(1.0), 1.0);
        assert_eq!(soft_clip(-1.0), -1.0);
        assert_eq!(soft_clip(25.0), 1.0);
    }

    #[test]
    fn test_soft_clip_monotonic_and_bounded() {
        let mut last = f64::NEG_INFINITY;
        for i in -400..=400 {
            let y = soft_clip(i as f64 / 100.0);
            assert!(y >= last);
            assert!((-1.0..=1.0).contains(&y));
            last = y;
        }
    }

    #[test]
    fn test_softclip_drive() {
        let mut samples = vec![0.1, 0.5, -0.9];
        apply_softclip(&mut samples, 4.0);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        assert_eq!(samples[1], 1.0);
        assert_eq!(samples[2], -1.0);
    }

    #[test]
    fn test_bitcrush_quantizes() {
        let mut samples = vec![0.12, 0.37, -0.61];
        apply_bitcrush(&mut samples, 4, 1);
        assert_eq!(samples, vec![0.0, 0.25, -0.5]);
    }

    #[test]
    fn test_bitcrush_holds() {
        let mut samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        apply_bitcrush(&mut samples, 0, 2);
        assert_eq!(samples, vec![0.1, 0.1, 0.3, 0.3, 0.5]);
    }

    #[test]
    fn test_bitcrush_zero_steps_and_unit_hold_is_identity() {
        let input = vec![0.123, -0.456, 0.789];
        let mut samples = input.clone();
        apply_bitcrush(&mut samples, 0, 1);
        assert_eq!(samples, input);
    }
}
