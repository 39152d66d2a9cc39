//! Feedback delay.
//!
//! Output keeps the input length; the echo tail past the end is lost.

/// Ring buffer for delay line.
struct DelayLine {
    buffer: Vec<f64>,
    write_pos: usize,
}

impl DelayLine {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            write_pos: 0,
        }
    }

    /// The sample written `len` samples ago.
    fn read(&self) -> f64 {
        self.buffer[self.write_pos]
    }

    fn write(&mut self, sample: f64) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }
}

/// Delay length in samples: `round(time_ms · sr / 1000)`, at least one.
pub fn delay_samples(time_ms: f64, sample_rate: f64) -> usize {
    ((time_ms * sample_rate / 1000.0).round() as usize).max(1)
}

/// Applies the delay in place: `out = x + mix · d`, line input `x + feedback · d`.
pub fn apply(samples: &mut [f64], time_ms: f64, feedback: f64, mix: f64, sample_rate: f64) {
    let mut line = DelayLine::new(delay_samples(time_ms, sample_rate));
    for sample in samples.iter_mut() {
        let x = *sample;
        let d = line.read();
        line.write(x + feedback * d);
        *sample = x + mix * d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_samples_rounds() {
        assert_eq!(delay_samples(100.0, 44100.0), 4410);
        assert_eq!(delay_samples(5.0, 22050.0), 110);
    }

    #[test]
    fn test_echo_position_and_feedback() {
        // 1 ms at 4 kHz is a 4-sample line
        let mut samples = vec![0.0; 12];
        samples[0] = 1.0;
        apply(&mut samples, 1.0, 0.5, 0.5, 4000.0);
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[4], 0.5);
        assert_eq!(samples[8], 0.25);
        assert_eq!(samples.iter().filter(|&&s| s != 0.0).count(), 3);
    }

    #[test]
    fn test_zero_mix_is_dry() {
        let input: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
        let mut samples = input.clone();
        apply(&mut samples, 5.0, 0.8, 0.0, 22050.0);
        assert_eq!(samples, input);
    }

    #[test]
    fn test_tail_is_truncated() {
        let mut samples = vec![1.0; 10];
        apply(&mut samples, 200.0, 0.5, 0.5, 44100.0);
        assert_eq!(samples.len(), 10);
        assert_eq!(samples, vec![1.0; 10]);
    }
}
