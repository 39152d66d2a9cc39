//! One-pole and biquad filter implementations.
//!
//! Biquad coefficients are calculated using the Audio EQ Cookbook formulas.
//! Every cutoff is clamped to at most `0.49 · sample_rate` before use.

use std::f64::consts::PI;

use soundforge_spec::{Filter, FilterType};

use crate::synthesis::{sweep_position, FrequencySweep};

/// Highest usable cutoff as a fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f64 = 0.49;

/// Clamps a cutoff to `(0, 0.49 · sample_rate]`.
#[inline]
pub fn clamp_cutoff(cutoff: f64, sample_rate: f64) -> f64 {
    cutoff.min(MAX_CUTOFF_RATIO * sample_rate).max(f64::MIN_POSITIVE)
}

/// Biquad filter coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Coefficients for a second-order response. `None` for the one-pole types.
    pub fn for_type(filter_type: FilterType, cutoff: f64, q: f64, sample_rate: f64) -> Option<Self> {
        match filter_type {
            FilterType::BiquadLp => Some(Self::lowpass(cutoff, q, sample_rate)),
            FilterType::BiquadHp => Some(Self::highpass(cutoff, q, sample_rate)),
            FilterType::BiquadBp => Some(Self::bandpass(cutoff, q, sample_rate)),
            FilterType::Notch => Some(Self::notch(cutoff, q, sample_rate)),
            FilterType::Lp1 | FilterType::Hp1 => None,
        }
    }

    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance), 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(cutoff, q, sample_rate);
        Self::normalized(
            (1.0 - cos_omega) / 2.0,
            1.0 - cos_omega,
            (1.0 - cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Creates highpass filter coefficients.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(cutoff, q, sample_rate);
        Self::normalized(
            (1.0 + cos_omega) / 2.0,
            -(1.0 + cos_omega),
            (1.0 + cos_omega) / 2.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Creates bandpass filter coefficients (constant 0 dB peak gain).
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(center, q, sample_rate);
        Self::normalized(
            alpha,
            0.0,
            -alpha,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    /// Creates a notch (band-reject) filter.
    pub fn notch(center: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(center, q, sample_rate);
        Self::normalized(
            1.0,
            -2.0 * cos_omega,
            1.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        )
    }

    fn omega(frequency: f64, q: f64, sample_rate: f64) -> (f64, f64) {
        let frequency = clamp_cutoff(frequency, sample_rate);
        let omega = 2.0 * PI * frequency / sample_rate;
        (omega.cos(), omega.sin() / (2.0 * q))
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Biquad filter state (direct form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a lowpass filter.
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::lowpass(cutoff, q, sample_rate))
    }

    /// Updates the filter coefficients, keeping the delay lines.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Which half of the one-pole pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnePoleMode {
    Lowpass,
    Highpass,
}

/// One-pole RC filter.
///
/// Lowpass: `y += α(x − y)` with `α = dt/(RC + dt)`.
/// Highpass: `y = α(y + x − x₋₁)` with `α = RC/(RC + dt)`.
#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    mode: OnePoleMode,
    alpha: f64,
    sample_rate: f64,
    x1: f64,
    y1: f64,
}

impl OnePoleFilter {
    pub fn new(mode: OnePoleMode, cutoff: f64, sample_rate: f64) -> Self {
        Self {
            mode,
            alpha: Self::alpha(mode, cutoff, sample_rate),
            sample_rate,
            x1: 0.0,
            y1: 0.0,
        }
    }

    fn alpha(mode: OnePoleMode, cutoff: f64, sample_rate: f64) -> f64 {
        let rc = 1.0 / (2.0 * PI * clamp_cutoff(cutoff, sample_rate));
        let dt = 1.0 / sample_rate;
        match mode {
            OnePoleMode::Lowpass => dt / (rc + dt),
            OnePoleMode::Highpass => rc / (rc + dt),
        }
    }

    /// Moves the cutoff, keeping the filter state.
    pub fn set_cutoff(&mut self, cutoff: f64) {
        self.alpha = Self::alpha(self.mode, cutoff, self.sample_rate);
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = match self.mode {
            OnePoleMode::Lowpass => self.y1 + self.alpha * (input - self.y1),
            OnePoleMode::Highpass => self.alpha * (self.y1 + input - self.x1),
        };
        self.x1 = input;
        self.y1 = output;
        output
    }
}

#[derive(Debug, Clone)]
enum Kernel {
    OnePole(OnePoleFilter),
    Biquad(BiquadFilter),
}

/// One entry of a layer's filter chain, with its optional cutoff sweep.
#[derive(Debug, Clone)]
pub struct FilterStage {
    filter_type: FilterType,
    q: f64,
    sweep: Option<FrequencySweep>,
    sample_rate: f64,
    kernel: Kernel,
}

impl FilterStage {
    pub fn new(filter: &Filter, sample_rate: f64) -> Self {
        let kernel = match BiquadCoeffs::for_type(filter.filter_type, filter.cutoff, filter.q, sample_rate) {
            Some(coeffs) => Kernel::Biquad(BiquadFilter::new(coeffs)),
            None => {
                let mode = if filter.filter_type == FilterType::Hp1 {
                    OnePoleMode::Highpass
                } else {
                    OnePoleMode::Lowpass
                };
                Kernel::OnePole(OnePoleFilter::new(mode, filter.cutoff, sample_rate))
            }
        };
        let sweep = filter
            .is_swept()
            .then(|| FrequencySweep::new(filter.cutoff, filter.end_cutoff(), filter.curve));

        Self {
            filter_type: filter.filter_type,
            q: filter.q,
            sweep,
            sample_rate,
            kernel,
        }
    }

    fn retune(&mut self, cutoff: f64) {
        match &mut self.kernel {
            Kernel::OnePole(f) => f.set_cutoff(cutoff),
            Kernel::Biquad(f) => {
                if let Some(coeffs) =
                    BiquadCoeffs::for_type(self.filter_type, cutoff, self.q, self.sample_rate)
                {
                    f.set_coeffs(coeffs);
                }
            }
        }
    }

    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        match &mut self.kernel {
            Kernel::OnePole(f) => f.process(input),
            Kernel::Biquad(f) => f.process(input),
        }
    }

    /// Filters a whole buffer in place, recomputing coefficients per sample
    /// when the cutoff is swept.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        let n = buffer.len();
        for i in 0..n {
            if let Some(sweep) = self.sweep {
                self.retune(sweep.at(sweep_position(i, n)));
            }
            buffer[i] = self.process(buffer[i]);
        }
    }
}

/// Applies a filter chain in order.
pub fn apply_filters(samples: &mut [f64], filters: &[Filter], sample_rate: f64) {
    for filter in filters {
        FilterStage::new(filter, sample_rate).process_buffer(samples);
    }
}
