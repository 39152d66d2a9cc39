//! Closed string enumerations used throughout the SoundSpec wire format.
//!
//! Every enum here serializes as a lowercase string and can be parsed back
//! from that spelling at runtime, which is what the parameter path resolver
//! and the schema export need.

/// A closed set of string values.
pub trait Choice: Copy + 'static {
    /// Every accepted spelling, in declaration order.
    const NAMES: &'static [&'static str];

    /// Wire spelling of this value.
    fn as_str(&self) -> &'static str;

    /// Parses a wire spelling.
    fn parse(s: &str) -> Option<Self>;
}

/// Object-safe view over a [`Choice`] slot, used by the path resolver.
pub trait ChoiceSlot {
    fn current(&self) -> &'static str;
    fn options(&self) -> &'static [&'static str];
    /// Assigns the parsed value; returns false if `s` is not a valid spelling.
    fn assign(&mut self, s: &str) -> bool;
}

impl<T: Choice> ChoiceSlot for T {
    fn current(&self) -> &'static str {
        self.as_str()
    }

    fn options(&self) -> &'static [&'static str] {
        T::NAMES
    }

    fn assign(&mut self, s: &str) -> bool {
        match T::parse(s) {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $crate::choice::Choice for $name {
            const NAMES: &'static [&'static str] = &[$($text),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $text => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::choice::Choice::as_str(self))
            }
        }
    };
}

choice_enum! {
    /// Basic oscillator waveform.
    pub enum Waveform {
        Sine => "sine",
        Triangle => "triangle",
        Square => "square",
        Saw => "saw",
    }
}

choice_enum! {
    /// Interpolation curve for sweeps.
    pub enum Curve {
        Linear => "linear",
        /// Log-domain interpolation; both endpoints must be positive.
        Exponential => "exponential",
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Linear
    }
}

choice_enum! {
    /// Noise color.
    pub enum NoiseColor {
        White => "white",
        Pink => "pink",
    }
}

choice_enum! {
    /// Impulse flavour.
    pub enum ImpulseKind {
        Click => "click",
        Tap => "tap",
        MetalPing => "metal_ping",
    }
}

choice_enum! {
    /// Envelope shape.
    pub enum EnvelopeShape {
        Exp => "exp",
        Lin => "lin",
        Adsr => "adsr",
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        EnvelopeShape::Exp
    }
}

choice_enum! {
    /// Filter response.
    pub enum FilterType {
        /// One-pole lowpass.
        Lp1 => "lp1",
        /// One-pole highpass.
        Hp1 => "hp1",
        BiquadLp => "biquad_lp",
        BiquadHp => "biquad_hp",
        BiquadBp => "biquad_bp",
        Notch => "notch",
    }
}

impl FilterType {
    /// Returns true for the second-order (biquad) responses.
    pub fn is_biquad(&self) -> bool {
        !matches!(self, FilterType::Lp1 | FilterType::Hp1)
    }
}

choice_enum! {
    /// FM operator waveform. Only sine is supported.
    pub enum FmWaveform {
        Sine => "sine",
    }
}

impl Default for FmWaveform {
    fn default() -> Self {
        FmWaveform::Sine
    }
}

choice_enum! {
    /// Layer discriminator.
    pub enum LayerType {
        Osc => "osc",
        Chirp => "chirp",
        Fm => "fm",
        Noise => "noise",
        Impulse => "impulse",
    }
}

choice_enum! {
    /// Effect discriminator.
    pub enum FxType {
        Softclip => "softclip",
        Bitcrush => "bitcrush",
        Delay => "delay",
        Normalize => "normalize",
    }
}

choice_enum! {
    /// UI control kind for a param binding.
    pub enum ParamKind {
        Slider => "slider",
        Select => "select",
        Checkbox => "checkbox",
    }
}
