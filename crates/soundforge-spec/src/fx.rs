//! Post-mix effect descriptors.

use serde::Serialize;

use crate::choice::FxType;
use crate::wire::FxDoc;

pub const DEFAULT_DRIVE: f64 = 1.0;
pub const DEFAULT_STEPS: u32 = 16;
pub const DEFAULT_HOLD_SAMPLES: u32 = 1;
pub const DEFAULT_TIME_MS: f64 = 100.0;
pub const DEFAULT_FEEDBACK: f64 = 0.3;
pub const DEFAULT_MIX: f64 = 0.3;
pub const DEFAULT_TARGET_PEAK: f64 = 0.95;

/// Effect parameters, one variant per effect type.
#[derive(Debug, Clone, PartialEq)]
pub enum FxKind {
    /// Saturating nonlinearity; output never leaves [-1, 1].
    Softclip { drive: f64 },
    /// Amplitude quantization plus sample-and-hold decimation.
    /// `steps == 0` disables quantization.
    Bitcrush { steps: u32, hold_samples: u32 },
    /// Feedback delay; output keeps the input length.
    Delay { time_ms: f64, feedback: f64, mix: f64 },
    /// Peak normalization to `target_peak`.
    Normalize { target_peak: f64 },
}

impl FxKind {
    pub fn fx_type(&self) -> FxType {
        match self {
            FxKind::Softclip { .. } => FxType::Softclip,
            FxKind::Bitcrush { .. } => FxType::Bitcrush,
            FxKind::Delay { .. } => FxType::Delay,
            FxKind::Normalize { .. } => FxType::Normalize,
        }
    }

    /// The variant for `fx_type` with every parameter at its default.
    pub fn with_defaults(fx_type: FxType) -> Self {
        match fx_type {
            FxType::Softclip => FxKind::Softclip {
                drive: DEFAULT_DRIVE,
            },
            FxType::Bitcrush => FxKind::Bitcrush {
                steps: DEFAULT_STEPS,
                hold_samples: DEFAULT_HOLD_SAMPLES,
            },
            FxType::Delay => FxKind::Delay {
                time_ms: DEFAULT_TIME_MS,
                feedback: DEFAULT_FEEDBACK,
                mix: DEFAULT_MIX,
            },
            FxType::Normalize => FxKind::Normalize {
                target_peak: DEFAULT_TARGET_PEAK,
            },
        }
    }
}

/// A validated effect in the FX chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "FxDoc")]
pub struct Fx {
    pub enabled: bool,
    pub kind: FxKind,
}

impl Fx {
    pub fn new(kind: FxKind) -> Self {
        Self {
            enabled: true,
            kind,
        }
    }

    pub fn fx_type(&self) -> FxType {
        self.kind.fx_type()
    }
}
